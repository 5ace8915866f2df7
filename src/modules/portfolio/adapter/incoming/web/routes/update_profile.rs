use actix_web::{patch, web, HttpRequest, Responder};

use super::edit_response::edit_response;
use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::AdminUser;
use crate::modules::portfolio::application::ports::incoming::use_cases::EditCommand;
use crate::modules::portfolio::domain::{PortfolioDocument, ProfileChanges};
use crate::shared::api::revision::expected_revision;
use crate::AppState;

/// Edit profile text, contact links and layout
///
/// Omitted fields are left alone. Answers with the whole updated document.
#[utoipa::path(
    patch,
    path = "/api/portfolio",
    tag = "portfolio",
    security(("bearer_auth" = [])),
    request_body = ProfileChanges,
    params(("If-Match" = Option<String>, Header, description = "Expected revision")),
    responses(
        (status = 200, description = "Profile saved", body = inline(SuccessResponse<PortfolioDocument>)),
        (status = 400, description = "Malformed body", body = ErrorResponse),
        (status = 409, description = "Revision conflict", body = ErrorResponse),
        (status = 500, description = "Save failed", body = ErrorResponse),
    )
)]
#[patch("/api/portfolio")]
pub async fn update_profile_handler(
    _admin: AdminUser,
    req: HttpRequest,
    body: web::Json<ProfileChanges>,
    data: web::Data<AppState>,
) -> impl Responder {
    let expected = match expected_revision(&req) {
        Ok(expected) => expected,
        Err(resp) => return resp,
    };

    let command = EditCommand::UpdateProfile(body.into_inner());
    edit_response(data.portfolio.edit.execute(command, expected).await, false)
}
