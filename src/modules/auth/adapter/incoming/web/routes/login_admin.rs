use actix_web::{post, web, Responder};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use utoipa::ToSchema;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::application::ports::incoming::use_cases::{LoginAdminError, LoginCredentials};
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Login request from the admin page
#[derive(Deserialize, ToSchema)]
pub struct LoginRequestDto {
    #[schema(example = "admin@portfolio.com")]
    pub email: String,

    #[schema(example = "admin123")]
    pub password: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Bearer token for the mutating routes
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    access_token: String,

    /// Token lifetime in seconds
    #[schema(example = 3600)]
    expires_in: i64,
}

/// Admin login
///
/// Exchanges the site owner's credentials for a short-lived bearer token.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body = LoginRequestDto,
    responses(
        (
            status = 200,
            description = "Login successful",
            body = inline(SuccessResponse<LoginResponse>),
            example = json!({
                "success": true,
                "data": {
                    "accessToken": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...",
                    "expiresIn": 3600
                }
            })
        ),
        (
            status = 400,
            description = "Malformed credentials",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "code": "VALIDATION_ERROR",
                "error": "Invalid email format"
            })
        ),
        (
            status = 401,
            description = "Invalid credentials",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "code": "INVALID_CREDENTIALS",
                "error": "Invalid email or password"
            })
        ),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/auth/login")]
pub async fn login_admin_handler(
    req: web::Json<LoginRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let dto = req.into_inner();

    let credentials = match LoginCredentials::new(&dto.email, &dto.password) {
        Ok(c) => c,
        Err(e) => return ApiResponse::bad_request("VALIDATION_ERROR", &e.to_string()),
    };

    info!(email = %credentials.email(), "Admin login attempt");

    match data.login_admin.execute(credentials).await {
        Ok(outcome) => {
            info!("Admin logged in");
            ApiResponse::success(LoginResponse {
                access_token: outcome.access_token,
                expires_in: outcome.expires_in,
            })
        }

        Err(LoginAdminError::InvalidCredentials) => {
            warn!("Login failed: Invalid credentials");
            ApiResponse::unauthorized("INVALID_CREDENTIALS", "Invalid email or password")
        }

        Err(LoginAdminError::PasswordVerificationFailed(ref e)) => {
            error!(error = %e, "Password verification failed");
            ApiResponse::internal_error()
        }

        Err(LoginAdminError::TokenGenerationFailed(ref e)) => {
            error!(error = %e, "Token generation failed");
            ApiResponse::internal_error()
        }
    }
}
