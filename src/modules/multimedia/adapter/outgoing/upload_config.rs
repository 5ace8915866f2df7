use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use crate::multimedia::adapter::outgoing::{GcsAssetStorage, LocalAssetStorage};
use crate::multimedia::application::domain::UploadPolicy;
use crate::multimedia::application::ports::outgoing::AssetStorage;
use crate::shared::config::{optional_var, parse_var, required_var, ConfigError};

pub const DEFAULT_UPLOAD_DIR: &str = "data/uploads";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadBackend {
    Gcs {
        bucket: String,
        public_base_url: Option<String>,
    },
    Local {
        dir: PathBuf,
        public_base_url: String,
    },
}

#[derive(Debug, Clone)]
pub struct UploadConfig {
    pub backend: UploadBackend,
    pub max_bytes: u64,
}

impl UploadConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let public_base_url = optional_var("UPLOAD_PUBLIC_BASE_URL");

        let backend = match optional_var("UPLOAD_BACKEND").as_deref() {
            None | Some("local") => UploadBackend::Local {
                dir: PathBuf::from(
                    optional_var("UPLOAD_DIR").unwrap_or_else(|| DEFAULT_UPLOAD_DIR.to_string()),
                ),
                public_base_url: public_base_url
                    .unwrap_or_else(|| LocalAssetStorage::DEFAULT_PUBLIC_BASE_URL.to_string()),
            },
            Some("gcs") => UploadBackend::Gcs {
                bucket: required_var("UPLOAD_BUCKET")?,
                public_base_url,
            },
            Some(other) => {
                return Err(ConfigError::Invalid {
                    key: "UPLOAD_BACKEND",
                    reason: format!("expected `gcs` or `local`, got `{other}`"),
                })
            }
        };

        let max_bytes = parse_var("UPLOAD_MAX_BYTES", UploadPolicy::DEFAULT_MAX_FILE_SIZE_BYTES)?;
        if max_bytes == 0 {
            return Err(ConfigError::Invalid {
                key: "UPLOAD_MAX_BYTES",
                reason: "must be greater than zero".to_string(),
            });
        }

        Ok(Self { backend, max_bytes })
    }

    pub fn policy(&self) -> UploadPolicy {
        UploadPolicy::new(self.max_bytes)
    }

    pub fn build_storage(&self) -> Arc<dyn AssetStorage> {
        match &self.backend {
            UploadBackend::Gcs {
                bucket,
                public_base_url,
            } => {
                info!(bucket = %bucket, "Uploads go to Google Cloud Storage");
                Arc::new(GcsAssetStorage::new(bucket.clone(), public_base_url.clone()))
            }
            UploadBackend::Local {
                dir,
                public_base_url,
            } => {
                info!(dir = %dir.display(), "Uploads go to local disk");
                Arc::new(LocalAssetStorage::new(dir.clone(), public_base_url.clone()))
            }
        }
    }
}
