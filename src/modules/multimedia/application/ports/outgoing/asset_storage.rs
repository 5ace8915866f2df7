use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssetStorageError {
    #[error("Storage is misconfigured: {0}")]
    Configuration(String),

    #[error("Storage access denied: {0}")]
    AccessDenied(String),

    #[error("Storage unreachable: {0}")]
    Network(String),

    #[error("Storage I/O failed: {0}")]
    Io(String),
}

/// A stored file read back for serving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredAsset {
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Where uploaded images end up.
#[async_trait]
pub trait AssetStorage: Send + Sync {
    fn name(&self) -> &'static str;

    /// Stores `bytes` under `object_name` and returns its public URL.
    async fn store(
        &self,
        object_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, AssetStorageError>;

    /// Reads back a file this process serves itself. Storages with their own public
    /// endpoint return `Ok(None)`.
    async fn fetch(&self, file_name: &str) -> Result<Option<StoredAsset>, AssetStorageError>;
}
