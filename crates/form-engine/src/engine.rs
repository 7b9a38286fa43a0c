//! The form engine: binds the schema to an external value store, routes
//! every write through normalization and a debounced committer, and owns
//! the submit/close contracts.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::{Map, Value};
use tracing::debug;

use form_spec::spec::{FieldType, FormSchema, SchemaError};
use form_spec::{
    NumberLocale, RenderPayload, ValidationResult, build_render_payload, normalize_value, validate,
};

use crate::attachments::{AttachmentKind, AttachmentManager, ChangeSink};
use crate::debounce::{DEFAULT_QUIESCENCE_WINDOW, DebouncedCommitter};
use crate::transfer::TransferService;

/// Callback writing one field's committed value into the external store.
pub type ValueSink = Arc<dyn Fn(&str, Value) + Send + Sync>;
/// Callback receiving the validated snapshot on successful submit.
pub type SubmitHandler = Arc<dyn Fn(Value) + Send + Sync>;
pub type CloseHandler = Arc<dyn Fn() + Send + Sync>;

/// Caller-owned callbacks wired into the engine. The external store is the
/// single source of truth; the engine only requests mutations through
/// `on_values_change`.
pub struct EngineHooks {
    pub on_values_change: ValueSink,
    pub on_submit: SubmitHandler,
    pub on_close: Option<CloseHandler>,
}

#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// Trailing-debounce window for value propagation.
    pub quiescence_window: Duration,
    pub locale: NumberLocale,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            quiescence_window: DEFAULT_QUIESCENCE_WINDOW,
            locale: NumberLocale::default(),
        }
    }
}

/// Schema-driven form engine. Keeps a locally displayed snapshot that
/// updates synchronously while commits to the external store are debounced
/// and coalesced per field.
pub struct FormEngine {
    schema: FormSchema,
    locale: NumberLocale,
    local: Mutex<Map<String, Value>>,
    committer: DebouncedCommitter,
    hooks: EngineHooks,
}

impl FormEngine {
    /// Builds an engine, rejecting schemas with duplicate field ids.
    pub fn new(
        schema: FormSchema,
        initial_values: &Value,
        hooks: EngineHooks,
        options: EngineOptions,
    ) -> Result<Self, SchemaError> {
        schema.ensure_unique_ids()?;
        let committer = DebouncedCommitter::new(
            options.quiescence_window,
            Arc::clone(&hooks.on_values_change),
        );
        let engine = Self {
            schema,
            locale: options.locale,
            local: Mutex::new(Map::new()),
            committer,
            hooks,
        };
        engine.apply_values(initial_values);
        Ok(engine)
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    /// Current locally displayed snapshot.
    pub fn values(&self) -> Value {
        Value::Object(self.local.lock().expect("engine value lock").clone())
    }

    /// Single write path for every field renderer. Normalizes the value,
    /// short-circuits when it equals the current one, updates the local
    /// snapshot synchronously, and schedules the debounced commit to the
    /// external store.
    pub fn request_value_change(&self, field_id: &str, value: Value) {
        let Some(field) = self.schema.field(field_id) else {
            debug!(%field_id, "ignoring change for unknown field");
            return;
        };
        let normalized = normalize_value(field, value);

        {
            let mut local = self.local.lock().expect("engine value lock");
            if local.get(field_id) == Some(&normalized) {
                return;
            }
            local.insert(field_id.to_string(), normalized.clone());
        }

        self.committer.submit(field_id, normalized);
    }

    /// Re-applies a full external snapshot (e.g. a freshly fetched record)
    /// to the render layer, coercing temporal fields into their canonical
    /// representation. Coercion is idempotent, so re-applying an
    /// already-coerced snapshot changes nothing.
    pub fn apply_values(&self, snapshot: &Value) {
        let mut map = snapshot.as_object().cloned().unwrap_or_default();
        for field in self.schema.fields() {
            if field.kind.is_temporal()
                && let Some(value) = map.get(&field.id)
            {
                let coerced = normalize_value(field, value.clone());
                map.insert(field.id.clone(), coerced);
            }
        }
        *self.local.lock().expect("engine value lock") = map;
    }

    /// Runs every field's rules over the current snapshot. When all pass,
    /// `on_submit` receives the snapshot; otherwise submission aborts and
    /// the per-field first-failure messages are returned. No partial
    /// submission either way.
    pub fn validate_and_submit(&self) -> ValidationResult {
        let snapshot = self.values();
        let result = validate(&self.schema, &snapshot);
        if result.valid {
            (self.hooks.on_submit)(snapshot);
        } else {
            debug!(errors = result.errors.len(), "submit blocked by validation");
        }
        result
    }

    pub fn close(&self) {
        if let Some(on_close) = &self.hooks.on_close {
            on_close();
        }
    }

    /// Builds the presentational payload for the current snapshot.
    pub fn render(&self) -> RenderPayload {
        build_render_payload(&self.schema, &self.values(), &self.locale)
    }

    /// Creates the attachment manager for an `images`/`files` field, wired
    /// so its notifications flow back through [`Self::request_value_change`]
    /// with the dual-shape payload (id list on add, `{removedFileId}` on
    /// remove).
    pub fn attachment_manager(
        self: &Arc<Self>,
        field_id: &str,
        transfer: Arc<dyn TransferService>,
    ) -> Result<AttachmentManager, SchemaError> {
        let field = self
            .schema
            .field(field_id)
            .ok_or_else(|| SchemaError::UnknownField(field_id.to_string()))?;
        let kind = match field.kind {
            FieldType::Images => AttachmentKind::Images,
            FieldType::Files => AttachmentKind::Files,
            _ => return Err(SchemaError::NotAttachment(field_id.to_string())),
        };

        let engine = Arc::clone(self);
        let target = field_id.to_string();
        let sink: ChangeSink = Arc::new(move |change| {
            engine.request_value_change(&target, change.into_value());
        });
        Ok(AttachmentManager::new(field_id, kind, transfer, sink))
    }
}
