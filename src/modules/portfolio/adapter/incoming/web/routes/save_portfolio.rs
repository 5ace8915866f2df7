use actix_web::{post, web, HttpRequest, Responder};
use serde_json::{Map, Value};
use tracing::{error, info};

use crate::api::schemas::{ErrorResponse, OkResponse};
use crate::auth::adapter::incoming::web::extractors::AdminUser;
use crate::modules::portfolio::application::ports::incoming::use_cases::SavePortfolioError;
use crate::modules::portfolio::domain::PortfolioDocument;
use crate::shared::api::revision::{expected_revision, with_etag};
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Save the portfolio document
///
/// Accepts a whole or partial document. Top-level fields present in the body replace the
/// stored ones, everything else is kept. Send the last `ETag` in `If-Match` to refuse the
/// write when someone else saved in between.
#[utoipa::path(
    post,
    path = "/api/portfolio",
    tag = "portfolio",
    security(("bearer_auth" = [])),
    request_body = PortfolioDocument,
    params(("If-Match" = Option<String>, Header, description = "Expected revision")),
    responses(
        (status = 200, description = "Saved", body = OkResponse,
            headers(("ETag" = String, description = "New revision"))),
        (status = 400, description = "Malformed body or If-Match", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 409, description = "Revision conflict", body = ErrorResponse),
        (
            status = 500,
            description = "Every backend rejected the write",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "code": "SAVE_FAILED",
                "error": "Failed to save data"
            })
        ),
    )
)]
#[post("/api/portfolio")]
pub async fn save_portfolio_handler(
    admin: AdminUser,
    req: HttpRequest,
    body: web::Json<Map<String, Value>>,
    data: web::Data<AppState>,
) -> impl Responder {
    let expected = match expected_revision(&req) {
        Ok(expected) => expected,
        Err(resp) => return resp,
    };

    match data.portfolio.save.execute(body.into_inner(), expected).await {
        Ok(outcome) => {
            info!(
                admin = %admin.email,
                revision = outcome.saved.revision,
                ignored = outcome.rejected.len(),
                "Portfolio saved"
            );
            with_etag(ApiResponse::ok(), outcome.saved.revision)
        }

        Err(SavePortfolioError::Conflict { expected, actual }) => ApiResponse::conflict(
            "REVISION_CONFLICT",
            &format!("Document changed since revision {expected} (now {actual})"),
        ),

        Err(SavePortfolioError::SaveFailed(e)) => {
            error!(error = %e, "Portfolio save failed");
            ApiResponse::save_failed()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::portfolio::application::service::MemoryBackend;
    use crate::modules::portfolio::domain::VersionedDocument;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::auth_helper::{admin_bearer, test_token_provider};
    use actix_web::{
        http::header::{ETAG, IF_MATCH},
        test, App,
    };
    use serde_json::json;
    use std::sync::Arc;

    async fn post(
        backends: Vec<Arc<MemoryBackend>>,
        req: test::TestRequest,
    ) -> actix_web::dev::ServiceResponse {
        let app_state = TestAppStateBuilder::default()
            .with_backends(backends)
            .build();
        let app = test::init_service(
            App::new()
                .app_data(app_state)
                .app_data(web::Data::new(test_token_provider()))
                .service(save_portfolio_handler),
        )
        .await;

        test::call_service(&app, req.uri("/api/portfolio").to_request()).await
    }

    #[actix_web::test]
    async fn partial_save_merges_and_bumps_revision() {
        let backend = MemoryBackend::holding("primary", VersionedDocument::seed());

        let resp = post(
            vec![backend.clone()],
            test::TestRequest::post()
                .insert_header(("Authorization", admin_bearer()))
                .set_json(json!({ "heroName": "Jane Doe" })),
        )
        .await;

        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers().get(ETAG).unwrap(), "\"1\"");
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "success": true }));

        let stored = backend.stored().unwrap();
        assert_eq!(stored.revision, 1);
        assert_eq!(stored.document.hero_name, "Jane Doe");
        assert_eq!(stored.document.projects, VersionedDocument::seed().document.projects);
    }

    #[actix_web::test]
    async fn requires_admin_token() {
        let resp = post(
            vec![MemoryBackend::new("primary")],
            test::TestRequest::post().set_json(json!({ "heroName": "x" })),
        )
        .await;

        assert_eq!(resp.status(), 401);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], "MISSING_AUTH_HEADER");
    }

    #[actix_web::test]
    async fn stale_if_match_is_409() {
        let mut stored = VersionedDocument::seed();
        stored.revision = 5;

        let resp = post(
            vec![MemoryBackend::holding("primary", stored)],
            test::TestRequest::post()
                .insert_header(("Authorization", admin_bearer()))
                .insert_header((IF_MATCH, "\"4\""))
                .set_json(json!({ "heroName": "x" })),
        )
        .await;

        assert_eq!(resp.status(), 409);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], "REVISION_CONFLICT");
    }

    #[actix_web::test]
    async fn every_backend_down_is_save_failed() {
        let backend = MemoryBackend::new("primary");
        backend.set_failing(true);

        let resp = post(
            vec![backend],
            test::TestRequest::post()
                .insert_header(("Authorization", admin_bearer()))
                .set_json(json!({ "aboutText": "x" })),
        )
        .await;

        assert_eq!(resp.status(), 500);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(
            body,
            json!({ "success": false, "code": "SAVE_FAILED", "error": "Failed to save data" })
        );
    }
}
