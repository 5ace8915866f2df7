use email_address::EmailAddress;
use tracing::warn;

use crate::auth::application::domain::AdminAccount;
use crate::auth::application::ports::outgoing::PasswordHasher;
use crate::shared::config::{optional_var, required_var, ConfigError};

/// Where the admin password comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminSecret {
    /// Argon2 PHC string from `ADMIN_PASSWORD_HASH`.
    Hash(String),
    /// Plain `ADMIN_PASSWORD`, hashed once at startup.
    Plain(String),
}

#[derive(Debug, Clone)]
pub struct AdminConfig {
    pub email: String,
    pub secret: AdminSecret,
}

impl AdminConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let email = required_var("ADMIN_EMAIL")?;
        let secret = match (
            optional_var("ADMIN_PASSWORD_HASH"),
            optional_var("ADMIN_PASSWORD"),
        ) {
            (Some(hash), _) => AdminSecret::Hash(hash),
            (None, Some(plain)) => AdminSecret::Plain(plain),
            (None, None) => return Err(ConfigError::Missing("ADMIN_PASSWORD_HASH")),
        };

        Self::new(email, secret)
    }

    pub fn new(email: String, secret: AdminSecret) -> Result<Self, ConfigError> {
        if !EmailAddress::is_valid(email.trim()) {
            return Err(ConfigError::Invalid {
                key: "ADMIN_EMAIL",
                reason: "not a valid email address".to_string(),
            });
        }

        Ok(Self { email, secret })
    }

    /// Builds the account, hashing a plain password when that is all we have.
    pub async fn into_account(
        self,
        hasher: &dyn PasswordHasher,
    ) -> Result<AdminAccount, ConfigError> {
        let password_hash = match self.secret {
            AdminSecret::Hash(hash) => hash,
            AdminSecret::Plain(plain) => {
                warn!("ADMIN_PASSWORD is set in plain text; prefer ADMIN_PASSWORD_HASH");
                hasher
                    .hash_password(&plain)
                    .await
                    .map_err(|e| ConfigError::Invalid {
                        key: "ADMIN_PASSWORD",
                        reason: e.to_string(),
                    })?
            }
        };

        Ok(AdminAccount::new(&self.email, password_hash))
    }
}
