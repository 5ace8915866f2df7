use async_trait::async_trait;

use crate::multimedia::application::domain::{UploadPolicy, UploadRejection};

/// A file received from the admin page.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: Option<String>,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedImage {
    pub url: String,
    pub object_name: String,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum UploadImageError {
    #[error(transparent)]
    Rejected(#[from] UploadRejection),

    #[error("Upload failed: {0}")]
    StorageFailed(String),
}

#[async_trait]
pub trait UploadImageUseCase: Send + Sync {
    /// Limits applied to every upload, so callers can stop reading early.
    fn policy(&self) -> &UploadPolicy;

    async fn execute(&self, upload: ImageUpload) -> Result<UploadedImage, UploadImageError>;
}
