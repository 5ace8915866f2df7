use async_trait::async_trait;
use std::sync::Arc;
use tracing::error;

use crate::multimedia::application::ports::incoming::use_cases::{
    FetchUploadError, FetchUploadUseCase,
};
use crate::multimedia::application::ports::outgoing::{AssetStorage, StoredAsset};

pub struct FetchUploadService {
    storage: Arc<dyn AssetStorage>,
}

impl FetchUploadService {
    pub fn new(storage: Arc<dyn AssetStorage>) -> Self {
        Self { storage }
    }
}

/// `<name>.<ext>` made of ASCII letters, digits and dashes; nothing that can walk out of
/// the upload directory.
pub fn is_safe_file_name(name: &str) -> bool {
    let Some((stem, ext)) = name.rsplit_once('.') else {
        return false;
    };

    !stem.is_empty()
        && !ext.is_empty()
        && stem.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        && ext.chars().all(|c| c.is_ascii_alphanumeric())
}

#[async_trait]
impl FetchUploadUseCase for FetchUploadService {
    async fn execute(&self, file_name: &str) -> Result<StoredAsset, FetchUploadError> {
        if !is_safe_file_name(file_name) {
            return Err(FetchUploadError::InvalidName);
        }

        match self.storage.fetch(file_name).await {
            Ok(Some(asset)) => Ok(asset),
            Ok(None) => Err(FetchUploadError::NotFound),
            Err(e) => {
                error!(storage = self.storage.name(), error = %e, "Reading upload failed");
                Err(FetchUploadError::StorageFailed(e.to_string()))
            }
        }
    }
}
