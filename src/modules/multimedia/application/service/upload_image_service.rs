use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::multimedia::application::domain::UploadPolicy;
use crate::multimedia::application::ports::incoming::use_cases::{
    ImageUpload, UploadImageError, UploadImageUseCase, UploadedImage,
};
use crate::multimedia::application::ports::outgoing::AssetStorage;

pub struct UploadImageService {
    policy: UploadPolicy,
    storage: Arc<dyn AssetStorage>,
}

impl UploadImageService {
    pub fn new(policy: UploadPolicy, storage: Arc<dyn AssetStorage>) -> Self {
        Self { policy, storage }
    }
}

#[async_trait]
impl UploadImageUseCase for UploadImageService {
    fn policy(&self) -> &UploadPolicy {
        &self.policy
    }

    async fn execute(&self, upload: ImageUpload) -> Result<UploadedImage, UploadImageError> {
        let size = upload.bytes.len() as u64;
        let ext = self
            .policy
            .validate(&upload.content_type, size)
            .inspect_err(|e| warn!(reason = %e, file_name = ?upload.file_name, "Upload refused"))?;

        let object_name = UploadPolicy::object_name(ext);

        let url = self
            .storage
            .store(&object_name, &upload.content_type, upload.bytes)
            .await
            .map_err(|e| {
                error!(storage = self.storage.name(), error = %e, "Upload failed");
                UploadImageError::StorageFailed(e.to_string())
            })?;

        info!(storage = self.storage.name(), object = %object_name, size, "Image uploaded");

        Ok(UploadedImage { url, object_name })
    }
}
