use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::modules::portfolio::application::ports::incoming::use_cases::{
    SavePortfolioError, SavePortfolioUseCase,
};
use crate::modules::portfolio::application::ports::outgoing::{
    DocumentStore, PortfolioStoreError, SaveOutcome,
};

pub struct SavePortfolioService<S>
where
    S: DocumentStore,
{
    store: Arc<S>,
}

impl<S> SavePortfolioService<S>
where
    S: DocumentStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S> SavePortfolioUseCase for SavePortfolioService<S>
where
    S: DocumentStore,
{
    async fn execute(
        &self,
        fields: Map<String, Value>,
        expected_revision: Option<u64>,
    ) -> Result<SaveOutcome, SavePortfolioError> {
        self.store
            .save(fields, expected_revision)
            .await
            .map_err(|e| match e {
                PortfolioStoreError::Conflict { expected, actual } => {
                    SavePortfolioError::Conflict { expected, actual }
                }
                PortfolioStoreError::AllBackendsFailed(failures) => {
                    SavePortfolioError::SaveFailed(failures.join("; "))
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::portfolio::application::ports::outgoing::DocumentBackend;
    use crate::modules::portfolio::application::service::{MemoryBackend, PortfolioStore};
    use serde_json::json;

    fn fields(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    #[tokio::test]
    async fn save_round_trips_through_the_store() {
        let backend = MemoryBackend::new("file");
        let store = Arc::new(PortfolioStore::new(vec![
            Arc::clone(&backend) as Arc<dyn DocumentBackend>
        ]));
        let service = SavePortfolioService::new(Arc::clone(&store));

        let outcome = service
            .execute(fields(json!({ "heroName": "Ada", "layout": "circular" })), None)
            .await
            .unwrap();

        assert_eq!(outcome.saved.revision, 1);
        let loaded = store.load().await;
        assert_eq!(loaded.document.hero_name, "Ada");
        assert_eq!(loaded, outcome.saved);
    }

    #[tokio::test]
    async fn conflict_is_mapped() {
        let store = Arc::new(PortfolioStore::new(vec![
            MemoryBackend::new("file") as Arc<dyn DocumentBackend>
        ]));
        let service = SavePortfolioService::new(store);

        let result = service.execute(fields(json!({ "heroName": "Ada" })), Some(5)).await;

        assert!(matches!(
            result,
            Err(SavePortfolioError::Conflict {
                expected: 5,
                actual: 0
            })
        ));
    }

    #[tokio::test]
    async fn total_failure_is_mapped_to_save_failed() {
        let backend = MemoryBackend::new("file");
        backend.set_failing(true);
        let store = Arc::new(PortfolioStore::new(vec![backend as Arc<dyn DocumentBackend>]));
        let service = SavePortfolioService::new(store);

        let result = service.execute(fields(json!({ "heroName": "Ada" })), None).await;

        match result {
            Err(SavePortfolioError::SaveFailed(msg)) => assert!(msg.contains("file down")),
            other => panic!("expected SaveFailed, got {other:?}"),
        }
    }
}
