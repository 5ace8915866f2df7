use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

use crate::modules::portfolio::application::ports::outgoing::{
    DocumentBackend, DocumentBackendError,
};
use crate::modules::portfolio::domain::VersionedDocument;

/// Last-resort copy of the document as pretty JSON on local disk.
#[derive(Debug, Clone)]
pub struct FileDocumentBackend {
    path: PathBuf,
}

impl FileDocumentBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling temp file, renamed over the target once fully written.
    fn temp_path(&self) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "portfolio.json".to_string());

        self.path
            .with_file_name(format!(".{file_name}.{}.tmp", Uuid::new_v4().simple()))
    }
}

#[async_trait]
impl DocumentBackend for FileDocumentBackend {
    fn name(&self) -> &'static str {
        "file"
    }

    async fn read(&self) -> Result<Option<VersionedDocument>, DocumentBackendError> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(DocumentBackendError::Io(e.to_string())),
        };

        let value: serde_json::Value = serde_json::from_slice(&bytes)
            .map_err(|e| DocumentBackendError::Serialization(e.to_string()))?;

        Ok(Some(VersionedDocument::from_envelope(value)))
    }

    async fn write(&self, document: &VersionedDocument) -> Result<(), DocumentBackendError> {
        let payload = serde_json::to_vec_pretty(&document.to_envelope())
            .map_err(|e| DocumentBackendError::Serialization(e.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| DocumentBackendError::Io(e.to_string()))?;
        }

        let temp = self.temp_path();
        if let Err(e) = fs::write(&temp, &payload).await {
            return Err(DocumentBackendError::Io(e.to_string()));
        }

        if let Err(e) = fs::rename(&temp, &self.path).await {
            let _ = fs::remove_file(&temp).await;
            return Err(DocumentBackendError::Io(e.to_string()));
        }

        Ok(())
    }

    /// Reachable when the target directory exists or can be created.
    async fn ping(&self) -> Result<(), DocumentBackendError> {
        match self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => fs::create_dir_all(parent)
                .await
                .map_err(|e| DocumentBackendError::Io(e.to_string())),
            None => Ok(()),
        }
    }
}
