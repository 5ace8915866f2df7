use std::sync::Arc;

use crate::auth::adapter::outgoing::jwt::{JwtConfig, JwtTokenService};
use crate::auth::application::ports::outgoing::TokenProvider;

pub const TEST_ADMIN_EMAIL: &str = "admin@portfolio.com";

pub fn test_jwt_service() -> JwtTokenService {
    JwtTokenService::new(JwtConfig {
        secret_key: "test_secret_key_for_testing_only_0123456789".to_string(),
        issuer: "portfolio-test".to_string(),
        access_token_expiry: 3600,
    })
}

pub fn test_token_provider() -> Arc<dyn TokenProvider + Send + Sync> {
    Arc::new(test_jwt_service())
}

/// `Authorization` header value for the test admin.
pub fn admin_bearer() -> String {
    let token = test_jwt_service()
        .generate_access_token(TEST_ADMIN_EMAIL)
        .expect("test token");
    format!("Bearer {token}")
}
