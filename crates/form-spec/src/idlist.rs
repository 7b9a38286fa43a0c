//! Helpers for the CRUD persistence boundary of attachment fields.
//!
//! The resource service stores `files`/`images` values as a JSON-encoded
//! string holding an array of attachment ids. That round trip is owned by
//! the page shell, not the engine; these helpers just keep it uniform.

/// Encodes an id list into the persisted JSON string form.
pub fn encode(ids: &[String]) -> String {
    serde_json::to_string(ids).unwrap_or_else(|_| "[]".to_string())
}

/// Decodes the persisted JSON string back into an id list. An empty or
/// missing column decodes to an empty list.
pub fn decode(raw: &str) -> Result<Vec<String>, serde_json::Error> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(raw)
}
