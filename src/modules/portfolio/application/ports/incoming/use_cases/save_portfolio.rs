use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::modules::portfolio::application::ports::outgoing::SaveOutcome;

//
// ──────────────────────────────────────────────────────────
// Errors
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, thiserror::Error)]
pub enum SavePortfolioError {
    #[error("Document changed since revision {expected} (now {actual})")]
    Conflict { expected: u64, actual: u64 },

    #[error("Failed to save data: {0}")]
    SaveFailed(String),
}

//
// ──────────────────────────────────────────────────────────
// Use case trait
// ──────────────────────────────────────────────────────────
//

#[async_trait]
pub trait SavePortfolioUseCase: Send + Sync {
    async fn execute(
        &self,
        fields: Map<String, Value>,
        expected_revision: Option<u64>,
    ) -> Result<SaveOutcome, SavePortfolioError>;
}
