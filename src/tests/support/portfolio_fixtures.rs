use actix_web::dev::ServiceResponse;
use actix_web::{test, web, App};
use std::sync::Arc;

use crate::portfolio::application::service::MemoryBackend;
use crate::portfolio::domain::VersionedDocument;
use crate::shared::api::json_config::custom_json_config;
use crate::tests::support::app_state_builder::TestAppStateBuilder;
use crate::tests::support::auth_helper::test_token_provider;

/// Seed document at `revision` whose first project has a cover image.
pub fn document_with_cover(revision: u64) -> VersionedDocument {
    let mut doc = VersionedDocument::seed();
    doc.revision = revision;
    doc.document.projects[0].image_url = "https://cdn.example.com/cover.png".to_string();
    doc
}

/// Runs one request against an app backed by `backend` alone.
pub async fn send(
    backend: Arc<MemoryBackend>,
    configure: impl FnOnce(&mut web::ServiceConfig),
    req: test::TestRequest,
) -> ServiceResponse {
    let app_state = TestAppStateBuilder::default()
        .with_backends(vec![backend])
        .build();
    let app = test::init_service(
        App::new()
            .app_data(app_state)
            .app_data(web::Data::new(test_token_provider()))
            .app_data(custom_json_config())
            .configure(configure),
    )
    .await;

    test::call_service(&app, req.to_request()).await
}
