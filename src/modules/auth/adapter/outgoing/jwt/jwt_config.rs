use crate::shared::config::{optional_var, parse_var, required_var, ConfigError};

pub const DEFAULT_ISSUER: &str = "portfolio-backend";

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret_key: String,
    pub issuer: String,
    pub access_token_expiry: i64, // Expiration in seconds
}

impl JwtConfig {
    /// Load JWT configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let secret_key = required_var("JWT_SECRET")?;

        // HS256 wants at least 32 bytes of key material
        if secret_key.len() < 32 {
            return Err(ConfigError::Invalid {
                key: "JWT_SECRET",
                reason: "must be at least 32 characters long for HS256".to_string(),
            });
        }

        let access_token_expiry: i64 = parse_var("JWT_ACCESS_EXPIRY", 3600)?;
        if access_token_expiry <= 0 || access_token_expiry > 86400 {
            return Err(ConfigError::Invalid {
                key: "JWT_ACCESS_EXPIRY",
                reason: "must be between 1 and 86400 seconds".to_string(),
            });
        }

        let issuer = optional_var("JWT_ISSUER").unwrap_or_else(|| DEFAULT_ISSUER.to_string());

        Ok(Self {
            secret_key,
            issuer,
            access_token_expiry,
        })
    }
}
