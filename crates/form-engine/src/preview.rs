use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use bytes::Bytes;

static NEXT_HANDLE: AtomicU64 = AtomicU64::new(1);

/// Scoped preview resource for one attachment record, standing in for an
/// object URL backed by the attachment's bytes.
///
/// Acquired when a record is created and released exactly once: on record
/// removal, on manager teardown, or by `Drop` as a backstop. A handle that
/// lands after teardown is released immediately instead of being stored.
#[derive(Debug)]
pub struct PreviewHandle {
    url: String,
    media_type: String,
    len: usize,
    released: AtomicBool,
}

impl PreviewHandle {
    /// Acquires a preview resource over the given bytes.
    pub fn acquire(bytes: &Bytes, media_type: &str) -> Self {
        let serial = NEXT_HANDLE.fetch_add(1, Ordering::Relaxed);
        Self {
            url: format!("mem://attachments/{serial}"),
            media_type: media_type.to_string(),
            len: bytes.len(),
            released: AtomicBool::new(false),
        }
    }

    /// Renderable URL, or `None` once the resource has been released.
    pub fn url(&self) -> Option<&str> {
        if self.is_released() {
            None
        } else {
            Some(&self.url)
        }
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Releases the resource; subsequent calls are no-ops.
    pub fn release(&self) {
        self.released.store(true, Ordering::SeqCst);
    }

    pub fn is_released(&self) -> bool {
        self.released.load(Ordering::SeqCst)
    }
}

impl Drop for PreviewHandle {
    fn drop(&mut self) {
        self.release();
    }
}
