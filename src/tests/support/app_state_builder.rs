use actix_web::web;
use std::sync::Arc;

use crate::auth::application::ports::incoming::use_cases::LoginAdminUseCase;
use crate::multimedia::application::domain::UploadPolicy;
use crate::multimedia::application::ports::outgoing::AssetStorage;
use crate::multimedia::application::service::{FetchUploadService, UploadImageService};
use crate::multimedia::application::MultimediaUseCases;
use crate::portfolio::application::ports::outgoing::{DocumentBackend, DocumentStore};
use crate::portfolio::application::service::{
    EditPortfolioService, GetPortfolioService, MemoryBackend, PortfolioStore,
    SavePortfolioService,
};
use crate::portfolio::application::PortfolioUseCases;
use crate::portfolio::domain::VersionedDocument;
use crate::tests::support::stubs::{StubAssetStorage, StubLoginAdminUseCase};
use crate::AppState;

/// Builds an `AppState` over in-memory backends. Portfolio services are the real ones.
pub struct TestAppStateBuilder {
    backends: Vec<Arc<MemoryBackend>>,
    login_admin: Arc<dyn LoginAdminUseCase + Send + Sync>,
    upload_policy: UploadPolicy,
    upload_storage: Arc<dyn AssetStorage>,
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self {
            backends: vec![MemoryBackend::holding("memory", VersionedDocument::seed())],
            login_admin: Arc::new(StubLoginAdminUseCase),
            upload_policy: UploadPolicy::default(),
            upload_storage: Arc::new(StubAssetStorage),
        }
    }
}

impl TestAppStateBuilder {
    pub fn with_backends(mut self, backends: Vec<Arc<MemoryBackend>>) -> Self {
        self.backends = backends;
        self
    }

    pub fn with_login_admin(mut self, uc: impl LoginAdminUseCase + Send + Sync + 'static) -> Self {
        self.login_admin = Arc::new(uc);
        self
    }

    pub fn with_upload_storage(
        mut self,
        policy: UploadPolicy,
        storage: Arc<dyn AssetStorage>,
    ) -> Self {
        self.upload_policy = policy;
        self.upload_storage = storage;
        self
    }

    pub fn build(self) -> web::Data<AppState> {
        let backends: Vec<Arc<dyn DocumentBackend>> = self
            .backends
            .into_iter()
            .map(|b| b as Arc<dyn DocumentBackend>)
            .collect();
        let store = Arc::new(PortfolioStore::new(backends));

        let portfolio = PortfolioUseCases {
            get: Arc::new(GetPortfolioService::new(Arc::clone(&store))),
            save: Arc::new(SavePortfolioService::new(Arc::clone(&store))),
            edit: Arc::new(EditPortfolioService::new(Arc::clone(&store))),
        };

        let multimedia = MultimediaUseCases {
            upload_image: Arc::new(UploadImageService::new(
                self.upload_policy,
                Arc::clone(&self.upload_storage),
            )),
            fetch_upload: Arc::new(FetchUploadService::new(self.upload_storage)),
        };

        let document_store: Arc<dyn DocumentStore> = store;

        web::Data::new(AppState {
            portfolio,
            login_admin: self.login_admin,
            multimedia,
            document_store,
        })
    }
}
