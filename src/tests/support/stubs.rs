use async_trait::async_trait;
use chrono::Utc;

use crate::auth::adapter::outgoing::jwt::ACCESS_TOKEN_TYPE;
use crate::auth::application::ports::incoming::use_cases::{
    LoginAdminError, LoginAdminUseCase, LoginCredentials, LoginOutcome,
};
use crate::auth::application::ports::outgoing::{TokenClaims, TokenError, TokenProvider};
use crate::multimedia::application::ports::outgoing::{
    AssetStorage, AssetStorageError, StoredAsset,
};

// ============================================================================
// Auth
// ============================================================================

/// Accepts any token and reports the configured role.
pub struct StubTokenProvider {
    role: String,
}

impl StubTokenProvider {
    pub fn with_role(role: &str) -> Self {
        Self {
            role: role.to_string(),
        }
    }
}

impl TokenProvider for StubTokenProvider {
    fn generate_access_token(&self, _subject: &str) -> Result<String, TokenError> {
        Ok("stub.token".to_string())
    }

    fn verify_token(&self, _token: &str) -> Result<TokenClaims, TokenError> {
        let now = Utc::now().timestamp();
        Ok(TokenClaims {
            sub: "someone@portfolio.com".to_string(),
            exp: now + 3600,
            iat: now,
            nbf: now,
            iss: "stub".to_string(),
            token_type: ACCESS_TOKEN_TYPE.to_string(),
            role: self.role.clone(),
        })
    }

    fn access_token_expiry(&self) -> i64 {
        3600
    }
}

pub struct StubLoginAdminUseCase;

#[async_trait]
impl LoginAdminUseCase for StubLoginAdminUseCase {
    async fn execute(&self, _credentials: LoginCredentials) -> Result<LoginOutcome, LoginAdminError> {
        Err(LoginAdminError::InvalidCredentials)
    }
}

// ============================================================================
// Multimedia
// ============================================================================

/// Pretends to store everything under a fixed CDN host; holds nothing.
pub struct StubAssetStorage;

#[async_trait]
impl AssetStorage for StubAssetStorage {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn store(
        &self,
        object_name: &str,
        _content_type: &str,
        _bytes: Vec<u8>,
    ) -> Result<String, AssetStorageError> {
        Ok(format!("https://assets.test/{object_name}"))
    }

    async fn fetch(&self, _file_name: &str) -> Result<Option<StoredAsset>, AssetStorageError> {
        Ok(None)
    }
}
