use actix_web::{delete, patch, post, web, HttpRequest, Responder};
use serde::Deserialize;
use utoipa::ToSchema;

use super::edit_response::edit_response;
use crate::api::schemas::{ErrorResponse, OkResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::AdminUser;
use crate::modules::portfolio::application::ports::incoming::use_cases::EditCommand;
use crate::modules::portfolio::domain::{Section, SectionChanges, SectionType};
use crate::shared::api::revision::expected_revision;
use crate::AppState;

/// Both fields optional: `{}` appends an empty text section.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct AddSectionRequest {
    #[serde(rename = "type")]
    pub kind: Option<SectionType>,
    pub content: Option<String>,
}

/// Append a section to a project
#[utoipa::path(
    post,
    path = "/api/portfolio/projects/{id}/sections",
    tag = "portfolio",
    security(("bearer_auth" = [])),
    request_body = AddSectionRequest,
    params(
        ("id" = i64, Path, description = "Project id"),
        ("If-Match" = Option<String>, Header, description = "Expected revision"),
    ),
    responses(
        (status = 201, description = "Section added", body = inline(SuccessResponse<Section>)),
        (status = 404, description = "Unknown project", body = ErrorResponse),
        (status = 422, description = "Project has no cover image", body = ErrorResponse),
        (status = 409, description = "Revision conflict", body = ErrorResponse),
        (status = 500, description = "Save failed", body = ErrorResponse),
    )
)]
#[post("/api/portfolio/projects/{id}/sections")]
pub async fn add_section_handler(
    _admin: AdminUser,
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<AddSectionRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let expected = match expected_revision(&req) {
        Ok(expected) => expected,
        Err(resp) => return resp,
    };

    let body = body.into_inner();
    let command = EditCommand::AddSection {
        project_id: path.into_inner(),
        kind: body.kind,
        content: body.content,
    };
    edit_response(data.portfolio.edit.execute(command, expected).await, true)
}

/// Change a section's type or content
#[utoipa::path(
    patch,
    path = "/api/portfolio/projects/{id}/sections/{section_id}",
    tag = "portfolio",
    security(("bearer_auth" = [])),
    request_body = SectionChanges,
    params(
        ("id" = i64, Path, description = "Project id"),
        ("section_id" = String, Path, description = "Section id"),
        ("If-Match" = Option<String>, Header, description = "Expected revision"),
    ),
    responses(
        (status = 200, description = "Section saved", body = inline(SuccessResponse<Section>)),
        (status = 404, description = "Unknown project or section", body = ErrorResponse),
        (status = 422, description = "Project has no cover image", body = ErrorResponse),
        (status = 409, description = "Revision conflict", body = ErrorResponse),
        (status = 500, description = "Save failed", body = ErrorResponse),
    )
)]
#[patch("/api/portfolio/projects/{id}/sections/{section_id}")]
pub async fn update_section_handler(
    _admin: AdminUser,
    req: HttpRequest,
    path: web::Path<(i64, String)>,
    body: web::Json<SectionChanges>,
    data: web::Data<AppState>,
) -> impl Responder {
    let expected = match expected_revision(&req) {
        Ok(expected) => expected,
        Err(resp) => return resp,
    };

    let (project_id, section_id) = path.into_inner();
    let command = EditCommand::UpdateSection {
        project_id,
        section_id,
        changes: body.into_inner(),
    };
    edit_response(data.portfolio.edit.execute(command, expected).await, false)
}

/// Remove a section, keeping the order of the rest
#[utoipa::path(
    delete,
    path = "/api/portfolio/projects/{id}/sections/{section_id}",
    tag = "portfolio",
    security(("bearer_auth" = [])),
    params(
        ("id" = i64, Path, description = "Project id"),
        ("section_id" = String, Path, description = "Section id"),
        ("If-Match" = Option<String>, Header, description = "Expected revision"),
    ),
    responses(
        (status = 200, description = "Section removed", body = OkResponse),
        (status = 404, description = "Unknown project or section", body = ErrorResponse),
        (status = 409, description = "Revision conflict", body = ErrorResponse),
        (status = 500, description = "Save failed", body = ErrorResponse),
    )
)]
#[delete("/api/portfolio/projects/{id}/sections/{section_id}")]
pub async fn remove_section_handler(
    _admin: AdminUser,
    req: HttpRequest,
    path: web::Path<(i64, String)>,
    data: web::Data<AppState>,
) -> impl Responder {
    let expected = match expected_revision(&req) {
        Ok(expected) => expected,
        Err(resp) => return resp,
    };

    let (project_id, section_id) = path.into_inner();
    let command = EditCommand::RemoveSection {
        project_id,
        section_id,
    };
    edit_response(data.portfolio.edit.execute(command, expected).await, false)
}
