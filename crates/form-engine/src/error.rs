use thiserror::Error;

/// Failures from the remote transfer collaborator. All variants are
/// recoverable: the caller surfaces them as a transient notification and
/// local state stays in its last-known-good condition. No operation is
/// auto-retried.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransferError {
    #[error("upload failed: {reason}")]
    Upload { reason: String },
    #[error("fetch failed for '{id}': {reason}")]
    Fetch { id: String, reason: String },
    #[error("delete failed for '{id}': {reason}")]
    Delete { id: String, reason: String },
    /// Aggregate for a parallel fetch batch; successfully fetched records
    /// are kept even when this is returned.
    #[error("failed to load {failed} of {total} attachments")]
    BatchFetch { failed: usize, total: usize },
}
