use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::fs;

use crate::multimedia::application::ports::outgoing::{
    AssetStorage, AssetStorageError, StoredAsset,
};

/// Uploads on local disk, served back by `GET /uploads/{name}`.
#[derive(Debug, Clone)]
pub struct LocalAssetStorage {
    dir: PathBuf,
    public_base_url: String,
}

impl LocalAssetStorage {
    pub const DEFAULT_PUBLIC_BASE_URL: &'static str = "/uploads";

    pub fn new(dir: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

fn content_type_for(file_name: &str) -> &'static str {
    match file_name.rsplit_once('.').map(|(_, ext)| ext) {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

#[async_trait]
impl AssetStorage for LocalAssetStorage {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn store(
        &self,
        object_name: &str,
        _content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, AssetStorageError> {
        // "uploads/<uuid>.<ext>" lands flat in the upload directory
        let file_name = object_name.rsplit('/').next().unwrap_or(object_name);

        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| AssetStorageError::Io(e.to_string()))?;
        fs::write(self.dir.join(file_name), bytes)
            .await
            .map_err(|e| AssetStorageError::Io(e.to_string()))?;

        Ok(format!("{}/{}", self.public_base_url, file_name))
    }

    async fn fetch(&self, file_name: &str) -> Result<Option<StoredAsset>, AssetStorageError> {
        match fs::read(self.dir.join(file_name)).await {
            Ok(bytes) => Ok(Some(StoredAsset {
                content_type: content_type_for(file_name),
                bytes,
            })),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AssetStorageError::Io(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn store_then_fetch() {
        let dir = TempDir::new().unwrap();
        let storage = LocalAssetStorage::new(dir.path().join("uploads"), "/uploads/");

        let url = storage
            .store("uploads/abc-123.png", "image/png", vec![1, 2, 3])
            .await
            .unwrap();
        assert_eq!(url, "/uploads/abc-123.png");

        let asset = storage.fetch("abc-123.png").await.unwrap().unwrap();
        assert_eq!(asset.content_type, "image/png");
        assert_eq!(asset.bytes, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        let storage = LocalAssetStorage::new(dir.path(), LocalAssetStorage::DEFAULT_PUBLIC_BASE_URL);

        assert_eq!(storage.fetch("nothing.png").await.unwrap(), None);
    }

    #[test]
    fn content_type_follows_extension() {
        assert_eq!(content_type_for("a.svg"), "image/svg+xml");
        assert_eq!(content_type_for("a.jpg"), "image/jpeg");
        assert_eq!(content_type_for("a.bin"), "application/octet-stream");
    }
}
