use async_trait::async_trait;

use crate::multimedia::application::ports::outgoing::StoredAsset;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchUploadError {
    #[error("Invalid file name")]
    InvalidName,

    #[error("File not found")]
    NotFound,

    #[error("Storage error: {0}")]
    StorageFailed(String),
}

#[async_trait]
pub trait FetchUploadUseCase: Send + Sync {
    async fn execute(&self, file_name: &str) -> Result<StoredAsset, FetchUploadError>;
}
