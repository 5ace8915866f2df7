use std::sync::Arc;

use async_trait::async_trait;

use crate::modules::portfolio::application::ports::incoming::use_cases::GetPortfolioUseCase;
use crate::modules::portfolio::application::ports::outgoing::DocumentStore;
use crate::modules::portfolio::domain::VersionedDocument;

pub struct GetPortfolioService<S>
where
    S: DocumentStore,
{
    store: Arc<S>,
}

impl<S> GetPortfolioService<S>
where
    S: DocumentStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S> GetPortfolioUseCase for GetPortfolioService<S>
where
    S: DocumentStore,
{
    async fn execute(&self) -> VersionedDocument {
        self.store.load().await
    }
}
