mod gcs_asset_storage;
mod local_asset_storage;
mod upload_config;

pub use gcs_asset_storage::GcsAssetStorage;
pub use local_asset_storage::LocalAssetStorage;
pub use upload_config::{UploadBackend, UploadConfig, DEFAULT_UPLOAD_DIR};
