use actix_web::{delete, patch, post, web, HttpRequest, Responder};
use tracing::info;

use super::edit_response::edit_response;
use crate::api::schemas::{ErrorResponse, OkResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::AdminUser;
use crate::modules::portfolio::application::ports::incoming::use_cases::EditCommand;
use crate::modules::portfolio::domain::{Project, ProjectChanges};
use crate::shared::api::revision::expected_revision;
use crate::AppState;

/// Add a project
///
/// Appends a project built from the "New Project" template with the next free id.
#[utoipa::path(
    post,
    path = "/api/portfolio/projects",
    tag = "portfolio",
    security(("bearer_auth" = [])),
    params(("If-Match" = Option<String>, Header, description = "Expected revision")),
    responses(
        (status = 201, description = "Project added", body = inline(SuccessResponse<Project>)),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 409, description = "Revision conflict", body = ErrorResponse),
        (status = 500, description = "Save failed", body = ErrorResponse),
    )
)]
#[post("/api/portfolio/projects")]
pub async fn add_project_handler(
    _admin: AdminUser,
    req: HttpRequest,
    data: web::Data<AppState>,
) -> impl Responder {
    let expected = match expected_revision(&req) {
        Ok(expected) => expected,
        Err(resp) => return resp,
    };

    let result = data.portfolio.edit.execute(EditCommand::AddProject, expected).await;
    if let Ok(outcome) = &result {
        info!(revision = outcome.revision, "Project added");
    }
    edit_response(result, true)
}

/// Edit a project
///
/// `imageUrl` is the cover step. Any other field belongs to the details step and needs a
/// cover image, either already stored or sent in the same request. `ctaLink: null` clears
/// the link; omitted fields are left alone.
#[utoipa::path(
    patch,
    path = "/api/portfolio/projects/{id}",
    tag = "portfolio",
    security(("bearer_auth" = [])),
    request_body = ProjectChanges,
    params(
        ("id" = i64, Path, description = "Project id"),
        ("If-Match" = Option<String>, Header, description = "Expected revision"),
    ),
    responses(
        (status = 200, description = "Project saved", body = inline(SuccessResponse<Project>)),
        (status = 404, description = "Unknown project", body = ErrorResponse),
        (
            status = 422,
            description = "Details changed without a cover image",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "code": "COVER_IMAGE_REQUIRED",
                "error": "Set a cover image before editing project details"
            })
        ),
        (status = 409, description = "Revision conflict", body = ErrorResponse),
        (status = 500, description = "Save failed", body = ErrorResponse),
    )
)]
#[patch("/api/portfolio/projects/{id}")]
pub async fn update_project_handler(
    _admin: AdminUser,
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<ProjectChanges>,
    data: web::Data<AppState>,
) -> impl Responder {
    let expected = match expected_revision(&req) {
        Ok(expected) => expected,
        Err(resp) => return resp,
    };

    let command = EditCommand::UpdateProject {
        id: path.into_inner(),
        changes: body.into_inner(),
    };
    edit_response(data.portfolio.edit.execute(command, expected).await, false)
}

/// Delete a project
#[utoipa::path(
    delete,
    path = "/api/portfolio/projects/{id}",
    tag = "portfolio",
    security(("bearer_auth" = [])),
    params(
        ("id" = i64, Path, description = "Project id"),
        ("If-Match" = Option<String>, Header, description = "Expected revision"),
    ),
    responses(
        (status = 200, description = "Project removed", body = OkResponse),
        (status = 404, description = "Unknown project", body = ErrorResponse),
        (status = 409, description = "Revision conflict", body = ErrorResponse),
        (status = 500, description = "Save failed", body = ErrorResponse),
    )
)]
#[delete("/api/portfolio/projects/{id}")]
pub async fn remove_project_handler(
    _admin: AdminUser,
    req: HttpRequest,
    path: web::Path<i64>,
    data: web::Data<AppState>,
) -> impl Responder {
    let expected = match expected_revision(&req) {
        Ok(expected) => expected,
        Err(resp) => return resp,
    };

    let id = path.into_inner();
    let result = data
        .portfolio
        .edit
        .execute(EditCommand::RemoveProject { id }, expected)
        .await;
    if result.is_ok() {
        info!(project_id = id, "Project removed");
    }
    edit_response(result, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::portfolio::application::service::MemoryBackend;
    use crate::modules::portfolio::domain::VersionedDocument;
    use crate::tests::support::auth_helper::admin_bearer;
    use crate::tests::support::portfolio_fixtures::{document_with_cover, send};
    use actix_web::{
        http::header::{ETAG, IF_MATCH},
        test,
    };
    use serde_json::{json, Value};

    fn routes(cfg: &mut web::ServiceConfig) {
        cfg.service(add_project_handler)
            .service(update_project_handler)
            .service(remove_project_handler);
    }

    #[actix_web::test]
    async fn add_then_delete_keeps_ids_monotonic() {
        let backend = MemoryBackend::holding("primary", VersionedDocument::seed());

        let resp = send(
            backend.clone(),
            routes,
            test::TestRequest::post()
                .uri("/api/portfolio/projects")
                .insert_header(("Authorization", admin_bearer())),
        )
        .await;
        assert_eq!(resp.status(), 201);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["id"], 2);
        assert_eq!(body["data"]["title"], "New Project");
        assert_eq!(body["data"]["ctaLink"], "");

        let resp = send(
            backend.clone(),
            routes,
            test::TestRequest::delete()
                .uri("/api/portfolio/projects/1")
                .insert_header(("Authorization", admin_bearer())),
        )
        .await;
        assert_eq!(resp.status(), 200);

        let ids: Vec<i64> = backend
            .stored()
            .unwrap()
            .document
            .projects
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![2]);
    }

    #[actix_web::test]
    async fn details_without_cover_is_422() {
        let backend = MemoryBackend::holding("primary", VersionedDocument::seed());

        let resp = send(
            backend.clone(),
            routes,
            test::TestRequest::patch()
                .uri("/api/portfolio/projects/1")
                .insert_header(("Authorization", admin_bearer()))
                .set_json(json!({ "title": "X" })),
        )
        .await;

        assert_eq!(resp.status(), 422);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], "COVER_IMAGE_REQUIRED");
        assert_eq!(backend.stored().unwrap().revision, 0);
    }

    #[actix_web::test]
    async fn cover_and_details_in_one_request() {
        let backend = MemoryBackend::holding("primary", VersionedDocument::seed());

        let resp = send(
            backend.clone(),
            routes,
            test::TestRequest::patch()
                .uri("/api/portfolio/projects/1")
                .insert_header(("Authorization", admin_bearer()))
                .set_json(json!({
                    "imageUrl": "https://cdn.example.com/cover.png",
                    "title": "X",
                    "tagsText": "#Rust, , #Web "
                })),
        )
        .await;

        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers().get(ETAG).unwrap(), "\"1\"");
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["title"], "X");
        assert_eq!(body["data"]["tags"], json!(["#Rust", "#Web"]));

        let stored = backend.stored().unwrap();
        assert_eq!(stored.document.projects[0].title, "X");
    }

    #[actix_web::test]
    async fn null_cta_link_clears_it() {
        let mut doc = document_with_cover(3);
        doc.document.projects[0].cta_link = Some("https://example.com".to_string());
        let backend = MemoryBackend::holding("primary", doc);

        let resp = send(
            backend.clone(),
            routes,
            test::TestRequest::patch()
                .uri("/api/portfolio/projects/1")
                .insert_header(("Authorization", admin_bearer()))
                .insert_header((IF_MATCH, "\"3\""))
                .set_json(json!({ "ctaLink": null })),
        )
        .await;

        assert_eq!(resp.status(), 200);
        assert_eq!(backend.stored().unwrap().document.projects[0].cta_link, None);
    }

    #[actix_web::test]
    async fn unknown_project_is_404() {
        let resp = send(
            MemoryBackend::holding("primary", VersionedDocument::seed()),
            routes,
            test::TestRequest::delete()
                .uri("/api/portfolio/projects/42")
                .insert_header(("Authorization", admin_bearer())),
        )
        .await;

        assert_eq!(resp.status(), 404);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], "PROJECT_NOT_FOUND");
    }

    #[actix_web::test]
    async fn stale_if_match_is_409() {
        let resp = send(
            MemoryBackend::holding("primary", document_with_cover(2)),
            routes,
            test::TestRequest::post()
                .uri("/api/portfolio/projects")
                .insert_header(("Authorization", admin_bearer()))
                .insert_header((IF_MATCH, "\"1\"")),
        )
        .await;

        assert_eq!(resp.status(), 409);
    }

    #[actix_web::test]
    async fn anonymous_edit_is_401() {
        let resp = send(
            MemoryBackend::holding("primary", VersionedDocument::seed()),
            routes,
            test::TestRequest::post().uri("/api/portfolio/projects"),
        )
        .await;

        assert_eq!(resp.status(), 401);
    }
}
