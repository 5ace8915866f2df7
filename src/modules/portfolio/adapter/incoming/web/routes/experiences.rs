use actix_web::{delete, patch, post, web, HttpRequest, Responder};

use super::edit_response::edit_response;
use crate::api::schemas::{ErrorResponse, OkResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::AdminUser;
use crate::modules::portfolio::application::ports::incoming::use_cases::EditCommand;
use crate::modules::portfolio::domain::{Experience, ExperienceChanges};
use crate::shared::api::revision::expected_revision;
use crate::AppState;

/// Add an experience from the placeholder template
#[utoipa::path(
    post,
    path = "/api/portfolio/experiences",
    tag = "portfolio",
    security(("bearer_auth" = [])),
    params(("If-Match" = Option<String>, Header, description = "Expected revision")),
    responses(
        (status = 201, description = "Experience added", body = inline(SuccessResponse<Experience>)),
        (status = 409, description = "Revision conflict", body = ErrorResponse),
        (status = 500, description = "Save failed", body = ErrorResponse),
    )
)]
#[post("/api/portfolio/experiences")]
pub async fn add_experience_handler(
    _admin: AdminUser,
    req: HttpRequest,
    data: web::Data<AppState>,
) -> impl Responder {
    let expected = match expected_revision(&req) {
        Ok(expected) => expected,
        Err(resp) => return resp,
    };

    edit_response(
        data.portfolio
            .edit
            .execute(EditCommand::AddExperience, expected)
            .await,
        true,
    )
}

#[utoipa::path(
    patch,
    path = "/api/portfolio/experiences/{id}",
    tag = "portfolio",
    security(("bearer_auth" = [])),
    request_body = ExperienceChanges,
    params(
        ("id" = i64, Path, description = "Experience id"),
        ("If-Match" = Option<String>, Header, description = "Expected revision"),
    ),
    responses(
        (status = 200, description = "Experience saved", body = inline(SuccessResponse<Experience>)),
        (status = 404, description = "Unknown experience", body = ErrorResponse),
        (status = 409, description = "Revision conflict", body = ErrorResponse),
        (status = 500, description = "Save failed", body = ErrorResponse),
    )
)]
#[patch("/api/portfolio/experiences/{id}")]
pub async fn update_experience_handler(
    _admin: AdminUser,
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<ExperienceChanges>,
    data: web::Data<AppState>,
) -> impl Responder {
    let expected = match expected_revision(&req) {
        Ok(expected) => expected,
        Err(resp) => return resp,
    };

    let command = EditCommand::UpdateExperience {
        id: path.into_inner(),
        changes: body.into_inner(),
    };
    edit_response(data.portfolio.edit.execute(command, expected).await, false)
}

#[utoipa::path(
    delete,
    path = "/api/portfolio/experiences/{id}",
    tag = "portfolio",
    security(("bearer_auth" = [])),
    params(
        ("id" = i64, Path, description = "Experience id"),
        ("If-Match" = Option<String>, Header, description = "Expected revision"),
    ),
    responses(
        (status = 200, description = "Experience removed", body = OkResponse),
        (status = 404, description = "Unknown experience", body = ErrorResponse),
        (status = 409, description = "Revision conflict", body = ErrorResponse),
        (status = 500, description = "Save failed", body = ErrorResponse),
    )
)]
#[delete("/api/portfolio/experiences/{id}")]
pub async fn remove_experience_handler(
    _admin: AdminUser,
    req: HttpRequest,
    path: web::Path<i64>,
    data: web::Data<AppState>,
) -> impl Responder {
    let expected = match expected_revision(&req) {
        Ok(expected) => expected,
        Err(resp) => return resp,
    };

    let command = EditCommand::RemoveExperience {
        id: path.into_inner(),
    };
    edit_response(data.portfolio.edit.execute(command, expected).await, false)
}
