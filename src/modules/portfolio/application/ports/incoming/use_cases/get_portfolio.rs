use async_trait::async_trait;

use crate::modules::portfolio::domain::VersionedDocument;

//
// ──────────────────────────────────────────────────────────
// Use case trait
// ──────────────────────────────────────────────────────────
// Reading never fails: backend errors fall back to the next
// backend and finally to the seed document.
//

#[async_trait]
pub trait GetPortfolioUseCase: Send + Sync {
    async fn execute(&self) -> VersionedDocument;
}
