//! Per-field attachment lifecycle: deduplicated fetch-by-id, upload,
//! removal, and preview teardown.

use std::sync::{Arc, Mutex};

use futures::future::join_all;
use serde_json::{Value, json};
use time::OffsetDateTime;
use tracing::{debug, warn};

use crate::error::TransferError;
use crate::preview::PreviewHandle;
use crate::transfer::{LocalFile, TransferService};

/// Which attachment flavor a field accepts; only affects the accept hint
/// surfaced to pickers, never the lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentKind {
    Images,
    Files,
}

impl AttachmentKind {
    pub fn accept(&self) -> &'static str {
        match self {
            AttachmentKind::Images => "image/*",
            AttachmentKind::Files => "application/pdf, .doc, .docx, .xls, .xlsx",
        }
    }
}

/// Local representation of a remote-stored file.
#[derive(Debug, Clone)]
pub struct AttachmentRecord {
    pub id: String,
    pub display_name: String,
    pub media_type: String,
    pub preview: Arc<PreviewHandle>,
    pub uploaded: bool,
    pub last_modified: OffsetDateTime,
}

/// Upward notification emitted through the field's value-change callback.
///
/// The two shapes are intentional: adds replace the whole id list, removes
/// carry a `{removedFileId}` marker, and the store consumer discriminates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachmentChange {
    Ids(Vec<String>),
    Removed { removed_file_id: String },
}

impl AttachmentChange {
    /// Converts the notification into the wire value handed to the value
    /// store.
    pub fn into_value(self) -> Value {
        match self {
            AttachmentChange::Ids(ids) => json!(ids),
            AttachmentChange::Removed { removed_file_id } => {
                json!({ "removedFileId": removed_file_id })
            }
        }
    }
}

pub type ChangeSink = Arc<dyn Fn(AttachmentChange) + Send + Sync>;

struct State {
    records: Vec<AttachmentRecord>,
    loading: bool,
    alive: bool,
}

/// Owns the attachment records of exactly one field instance. The
/// `loading` flag toggles sequentially around each operation's whole
/// window; `resolve_by_ids` runs its fetches concurrently inside one
/// window.
pub struct AttachmentManager {
    field_id: String,
    kind: AttachmentKind,
    transfer: Arc<dyn TransferService>,
    on_change: ChangeSink,
    state: Mutex<State>,
}

impl AttachmentManager {
    pub fn new(
        field_id: impl Into<String>,
        kind: AttachmentKind,
        transfer: Arc<dyn TransferService>,
        on_change: ChangeSink,
    ) -> Self {
        Self {
            field_id: field_id.into(),
            kind,
            transfer,
            on_change,
            state: Mutex::new(State {
                records: Vec::new(),
                loading: false,
                alive: true,
            }),
        }
    }

    pub fn field_id(&self) -> &str {
        &self.field_id
    }

    pub fn kind(&self) -> AttachmentKind {
        self.kind
    }

    pub fn is_loading(&self) -> bool {
        self.lock().loading
    }

    /// Snapshot of the current records.
    pub fn records(&self) -> Vec<AttachmentRecord> {
        self.lock().records.clone()
    }

    /// Distinct ids of the current records, in insertion order.
    pub fn ids(&self) -> Vec<String> {
        self.lock()
            .records
            .iter()
            .map(|record| record.id.clone())
            .collect()
    }

    /// Resolves pre-existing ids into records, skipping ids already
    /// present. Duplicate input ids collapse to one fetch. A set that is
    /// empty after deduplication is a no-op and does not touch `loading`.
    ///
    /// Failures collapse into one aggregate error; records that did fetch
    /// successfully are kept.
    pub async fn resolve_by_ids(&self, ids: &[String]) -> Result<(), TransferError> {
        let to_fetch: Vec<String> = {
            let state = self.lock();
            let mut pending: Vec<String> = Vec::new();
            for id in ids {
                if pending.iter().any(|seen| seen == id) {
                    continue;
                }
                if state.records.iter().any(|record| record.id == *id) {
                    continue;
                }
                pending.push(id.clone());
            }
            pending
        };
        if to_fetch.is_empty() {
            return Ok(());
        }

        self.set_loading(true);
        debug!(field = %self.field_id, count = to_fetch.len(), "fetching attachments");

        let results = join_all(to_fetch.iter().map(|id| async move {
            (id.clone(), self.transfer.fetch_file(id).await)
        }))
        .await;

        let total = results.len();
        let mut failed = 0;
        {
            let mut state = self.lock();
            for (id, result) in results {
                match result {
                    Ok(file) => {
                        let preview =
                            Arc::new(PreviewHandle::acquire(&file.bytes, &file.media_type));
                        // Liveness and dedup checks happen after the await:
                        // a late arrival past teardown, or a duplicate that
                        // overtook us, is released instead of stored.
                        if !state.alive || state.records.iter().any(|record| record.id == id) {
                            preview.release();
                            continue;
                        }
                        state.records.push(AttachmentRecord {
                            display_name: id.clone(),
                            id,
                            media_type: file.media_type,
                            preview,
                            uploaded: true,
                            last_modified: OffsetDateTime::now_utc(),
                        });
                    }
                    Err(error) => {
                        warn!(field = %self.field_id, %id, %error, "attachment fetch failed");
                        failed += 1;
                    }
                }
            }
            state.loading = false;
        }

        if failed > 0 {
            return Err(TransferError::BatchFetch { failed, total });
        }
        Ok(())
    }

    /// Uploads exactly one file. On success the record previews the local
    /// bytes immediately (no round-trip) and the distinct id list is
    /// reported upward. On failure existing records are untouched and
    /// nothing is retried.
    pub async fn upload(&self, file: LocalFile) -> Result<String, TransferError> {
        self.set_loading(true);

        let id = match self.transfer.upload_file(&file).await {
            Ok(id) => id,
            Err(error) => {
                warn!(field = %self.field_id, %error, "attachment upload failed");
                self.set_loading(false);
                return Err(error);
            }
        };

        let notification = {
            let mut state = self.lock();
            state.loading = false;
            if !state.alive {
                None
            } else {
                if !state.records.iter().any(|record| record.id == id) {
                    let preview = Arc::new(PreviewHandle::acquire(&file.bytes, &file.media_type));
                    state.records.push(AttachmentRecord {
                        id: id.clone(),
                        display_name: file.name.clone(),
                        media_type: file.media_type.clone(),
                        preview,
                        uploaded: true,
                        last_modified: OffsetDateTime::now_utc(),
                    });
                }
                let ids = state
                    .records
                    .iter()
                    .map(|record| record.id.clone())
                    .collect();
                Some(AttachmentChange::Ids(ids))
            }
        };

        if let Some(change) = notification {
            (self.on_change)(change);
        }
        Ok(id)
    }

    /// Removes one record: remote delete first, local state only after it
    /// succeeds. A failed delete leaves the record in place and emits no
    /// notification.
    pub async fn remove(&self, id: &str) -> Result<(), TransferError> {
        self.set_loading(true);

        if let Err(error) = self.transfer.delete_file(id).await {
            warn!(field = %self.field_id, %id, %error, "attachment delete failed");
            self.set_loading(false);
            return Err(error);
        }

        {
            let mut state = self.lock();
            if let Some(index) = state.records.iter().position(|record| record.id == id) {
                let record = state.records.remove(index);
                record.preview.release();
            }
            state.loading = false;
        }

        (self.on_change)(AttachmentChange::Removed {
            removed_file_id: id.to_string(),
        });
        Ok(())
    }

    /// Teardown: releases every preview resource and stops accepting
    /// late async results. Idempotent; in-flight network operations are
    /// not cancelled, their results are released on landing.
    pub fn release(&self) {
        let mut state = self.lock();
        if !state.alive {
            return;
        }
        state.alive = false;
        for record in state.records.drain(..) {
            record.preview.release();
        }
    }

    fn set_loading(&self, loading: bool) {
        self.lock().loading = loading;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().expect("attachment state lock")
    }
}
