use async_trait::async_trait;
use email_address::EmailAddress;

// ========================= Credentials =========================

/// Validated login input.
#[derive(Debug, Clone)]
pub struct LoginCredentials {
    email: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginCredentialsError {
    #[error("Email cannot be empty")]
    EmptyEmail,

    #[error("Invalid email format")]
    InvalidEmailFormat,

    #[error("Password cannot be empty")]
    EmptyPassword,
}

impl LoginCredentials {
    pub fn new(email: &str, password: &str) -> Result<Self, LoginCredentialsError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(LoginCredentialsError::EmptyEmail);
        }
        if !EmailAddress::is_valid(email) {
            return Err(LoginCredentialsError::InvalidEmailFormat);
        }
        if password.is_empty() {
            return Err(LoginCredentialsError::EmptyPassword);
        }

        Ok(Self {
            email: email.to_lowercase(),
            password: password.to_string(),
        })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

// ====================== Outcome & errors ======================

#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub access_token: String,
    pub expires_in: i64,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum LoginAdminError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Password verification failed: {0}")]
    PasswordVerificationFailed(String),

    #[error("Token generation failed: {0}")]
    TokenGenerationFailed(String),
}

#[async_trait]
pub trait LoginAdminUseCase: Send + Sync {
    async fn execute(&self, credentials: LoginCredentials) -> Result<LoginOutcome, LoginAdminError>;
}
