use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;

use crate::auth::application::domain::AdminAccount;
use crate::auth::application::ports::incoming::use_cases::{
    LoginAdminError, LoginAdminUseCase, LoginCredentials, LoginOutcome,
};
use crate::auth::application::ports::outgoing::{PasswordHasher, TokenProvider};

pub struct LoginAdminService {
    account: AdminAccount,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenProvider + Send + Sync>,
}

impl LoginAdminService {
    pub fn new(
        account: AdminAccount,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenProvider + Send + Sync>,
    ) -> Self {
        Self {
            account,
            hasher,
            tokens,
        }
    }
}

#[async_trait]
impl LoginAdminUseCase for LoginAdminService {
    async fn execute(&self, credentials: LoginCredentials) -> Result<LoginOutcome, LoginAdminError> {
        let email_matches = self.account.matches_email(credentials.email());

        // Verify even on an unknown email so both failures cost the same.
        let password_matches = self
            .hasher
            .verify_password(credentials.password(), self.account.password_hash())
            .await
            .map_err(|e| LoginAdminError::PasswordVerificationFailed(e.to_string()))?;

        if !(email_matches && password_matches) {
            warn!(email = %credentials.email(), "Admin login rejected");
            return Err(LoginAdminError::InvalidCredentials);
        }

        let access_token = self
            .tokens
            .generate_access_token(self.account.email())
            .map_err(|e| LoginAdminError::TokenGenerationFailed(e.to_string()))?;

        Ok(LoginOutcome {
            access_token,
            expires_in: self.tokens.access_token_expiry(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::application::ports::outgoing::{HashError, TokenClaims, TokenError};
    use mockall::mock;

    mock! {
        pub Hasher {}
        #[async_trait]
        impl PasswordHasher for Hasher {
            async fn hash_password(&self, password: &str) -> Result<String, HashError>;
            async fn verify_password(&self, password: &str, hash: &str) -> Result<bool, HashError>;
        }
    }

    mock! {
        pub Tokens {}
        impl TokenProvider for Tokens {
            fn generate_access_token(&self, subject: &str) -> Result<String, TokenError>;
            fn verify_token(&self, token: &str) -> Result<TokenClaims, TokenError>;
            fn access_token_expiry(&self) -> i64;
        }
    }

    fn account() -> AdminAccount {
        AdminAccount::new("admin@portfolio.com", "$argon2id$stored".to_string())
    }

    fn creds(email: &str) -> LoginCredentials {
        LoginCredentials::new(email, "admin123").unwrap()
    }

    fn tokens_issuing() -> MockTokens {
        let mut tokens = MockTokens::new();
        tokens
            .expect_generate_access_token()
            .withf(|subject| subject == "admin@portfolio.com")
            .returning(|_| Ok("signed.jwt.token".to_string()));
        tokens.expect_access_token_expiry().return_const(3600_i64);
        tokens
    }

    #[tokio::test]
    async fn valid_credentials_issue_a_token() {
        let mut hasher = MockHasher::new();
        hasher
            .expect_verify_password()
            .withf(|pw, hash| pw == "admin123" && hash == "$argon2id$stored")
            .times(1)
            .returning(|_, _| Ok(true));

        let service = LoginAdminService::new(account(), Arc::new(hasher), Arc::new(tokens_issuing()));
        let outcome = service.execute(creds("Admin@Portfolio.com")).await.unwrap();

        assert_eq!(outcome.access_token, "signed.jwt.token");
        assert_eq!(outcome.expires_in, 3600);
    }

    #[tokio::test]
    async fn wrong_password_is_rejected() {
        let mut hasher = MockHasher::new();
        hasher.expect_verify_password().returning(|_, _| Ok(false));
        let mut tokens = MockTokens::new();
        tokens.expect_generate_access_token().never();

        let service = LoginAdminService::new(account(), Arc::new(hasher), Arc::new(tokens));
        let result = service.execute(creds("admin@portfolio.com")).await;

        assert!(matches!(result, Err(LoginAdminError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn unknown_email_still_verifies_then_rejects() {
        let mut hasher = MockHasher::new();
        hasher
            .expect_verify_password()
            .times(1)
            .returning(|_, _| Ok(true));
        let mut tokens = MockTokens::new();
        tokens.expect_generate_access_token().never();

        let service = LoginAdminService::new(account(), Arc::new(hasher), Arc::new(tokens));
        let result = service.execute(creds("intruder@example.com")).await;

        assert!(matches!(result, Err(LoginAdminError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn hasher_failure_is_reported() {
        let mut hasher = MockHasher::new();
        hasher
            .expect_verify_password()
            .returning(|_, _| Err(HashError::VerifyFailed));

        let service = LoginAdminService::new(account(), Arc::new(hasher), Arc::new(MockTokens::new()));
        let result = service.execute(creds("admin@portfolio.com")).await;

        assert!(matches!(
            result,
            Err(LoginAdminError::PasswordVerificationFailed(_))
        ));
    }
}
