use actix_web::{dev::Payload, web, Error as ActixError, FromRequest, HttpRequest, HttpResponse};
use std::{
    future::{ready, Ready},
    sync::Arc,
};

use crate::auth::adapter::outgoing::jwt::{ACCESS_TOKEN_TYPE, ADMIN_ROLE};
use crate::auth::application::ports::outgoing::TokenProvider;
use crate::shared::api::ApiResponse;

/// The authenticated site owner. Every mutating route takes one.
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub email: String,
}

fn create_api_error(response: HttpResponse) -> ActixError {
    actix_web::error::InternalError::from_response("", response).into()
}

fn invalid_token() -> ActixError {
    create_api_error(ApiResponse::unauthorized(
        "INVALID_TOKEN",
        "Invalid or expired token",
    ))
}

impl FromRequest for AdminUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(token_provider) = req.app_data::<web::Data<Arc<dyn TokenProvider + Send + Sync>>>()
        else {
            tracing::error!("Token provider is not registered as app data");
            return ready(Err(create_api_error(ApiResponse::internal_error())));
        };

        let Some(token) = extract_token_from_header(req) else {
            return ready(Err(create_api_error(ApiResponse::unauthorized(
                "MISSING_AUTH_HEADER",
                "Missing or invalid authorization header",
            ))));
        };

        let claims = match token_provider.verify_token(&token) {
            Ok(claims) => claims,
            Err(e) => {
                tracing::warn!(error = %e, path = %req.path(), "Rejected bearer token");
                return ready(Err(invalid_token()));
            }
        };

        if claims.token_type != ACCESS_TOKEN_TYPE || claims.role != ADMIN_ROLE {
            tracing::warn!(
                token_type = %claims.token_type,
                role = %claims.role,
                "Token is not an admin access token"
            );
            return ready(Err(invalid_token()));
        }

        ready(Ok(AdminUser { email: claims.sub }))
    }
}

fn extract_token_from_header(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get("Authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
