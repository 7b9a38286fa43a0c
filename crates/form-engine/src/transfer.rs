use async_trait::async_trait;
use bytes::Bytes;

use crate::error::TransferError;

/// A file held locally before or during upload.
#[derive(Debug, Clone)]
pub struct LocalFile {
    pub name: String,
    pub media_type: String,
    pub bytes: Bytes,
}

/// A file resolved from the remote store.
#[derive(Debug, Clone)]
pub struct FetchedFile {
    pub bytes: Bytes,
    pub media_type: String,
}

/// Seam to the remote transfer collaborator. The HTTP client, base URL,
/// and auth-header injection live behind this trait and are not part of
/// the engine.
#[async_trait]
pub trait TransferService: Send + Sync {
    /// Fetches a stored file by id.
    async fn fetch_file(&self, id: &str) -> Result<FetchedFile, TransferError>;

    /// Uploads one file and returns the remote-assigned id. Services that
    /// answer with a list of ids must normalize to the first element.
    async fn upload_file(&self, file: &LocalFile) -> Result<String, TransferError>;

    /// Deletes a stored file by id.
    async fn delete_file(&self, id: &str) -> Result<(), TransferError>;
}
