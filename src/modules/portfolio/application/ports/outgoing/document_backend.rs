// src/modules/portfolio/application/ports/outgoing/document_backend.rs

use async_trait::async_trait;

use crate::modules::portfolio::domain::VersionedDocument;

#[derive(Debug, Clone, thiserror::Error)]
pub enum DocumentBackendError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Query error: {0}")]
    Query(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// One place the portfolio document can live.
///
/// `read` returns `Ok(None)` when the backend is reachable but holds no document yet.
#[async_trait]
pub trait DocumentBackend: Send + Sync {
    /// Short label used in logs and readiness output.
    fn name(&self) -> &'static str;

    async fn read(&self) -> Result<Option<VersionedDocument>, DocumentBackendError>;

    async fn write(&self, document: &VersionedDocument) -> Result<(), DocumentBackendError>;

    async fn ping(&self) -> Result<(), DocumentBackendError>;
}
