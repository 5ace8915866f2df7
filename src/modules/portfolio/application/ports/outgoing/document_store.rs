// src/modules/portfolio/application/ports/outgoing/document_store.rs

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::modules::portfolio::domain::VersionedDocument;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PortfolioStoreError {
    #[error("Revision mismatch: expected {expected}, current {actual}")]
    Conflict { expected: u64, actual: u64 },

    #[error("No backend accepted the write: {}", .0.join("; "))]
    AllBackendsFailed(Vec<String>),
}

#[derive(Debug, Clone)]
pub struct SaveOutcome {
    pub saved: VersionedDocument,
    /// Top-level keys that were sent but did not fit the document shape.
    pub rejected: Vec<String>,
}

/// Read and merge-write access to the single portfolio document.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Never fails: falls back through backends and finally to the seed.
    async fn load(&self) -> VersionedDocument;

    /// Shallow-merges `fields` over the current document and persists the result.
    /// With `expected_revision`, the write is refused unless it matches.
    async fn save(
        &self,
        fields: Map<String, Value>,
        expected_revision: Option<u64>,
    ) -> Result<SaveOutcome, PortfolioStoreError>;

    /// Names of backends answering a ping.
    async fn reachable_backends(&self) -> Vec<&'static str>;
}
