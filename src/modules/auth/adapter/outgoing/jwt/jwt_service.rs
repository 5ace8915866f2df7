use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::fmt;

use crate::auth::application::ports::outgoing::{TokenClaims, TokenError, TokenProvider};

use super::jwt_config::JwtConfig;

pub const ACCESS_TOKEN_TYPE: &str = "access";
pub const ADMIN_ROLE: &str = "admin";

#[derive(Clone)]
pub struct JwtTokenService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

#[cfg(not(tarpaulin_include))]
impl fmt::Debug for JwtTokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtService")
            .field("issuer", &self.config.issuer)
            .finish()
    }
}

impl JwtTokenService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret_key.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret_key.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }
}

impl TokenProvider for JwtTokenService {
    fn generate_access_token(&self, subject: &str) -> Result<String, TokenError> {
        let now = Utc::now();
        let expiration = now + Duration::seconds(self.config.access_token_expiry);

        let claims = TokenClaims {
            sub: subject.to_string(),
            exp: expiration.timestamp(),
            iat: now.timestamp(),
            nbf: now.timestamp(),
            iss: self.config.issuer.clone(),
            token_type: ACCESS_TOKEN_TYPE.to_string(),
            role: ADMIN_ROLE.to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingError(e.to_string()))
    }

    fn verify_token(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 30;
        validation.validate_nbf = true;
        validation.set_issuer(&[self.config.issuer.as_str()]);

        let decoded =
            decode::<TokenClaims>(token, &self.decoding_key, &validation).map_err(|e| {
                use jsonwebtoken::errors::ErrorKind;

                match e.kind() {
                    ErrorKind::ExpiredSignature => {
                        tracing::debug!("Token verification failed: Token expired");
                        TokenError::TokenExpired
                    }
                    ErrorKind::ImmatureSignature => {
                        tracing::warn!("Token verification failed: Token not yet valid");
                        TokenError::TokenNotYetValid
                    }
                    ErrorKind::InvalidSignature => {
                        tracing::error!("Security alert: Invalid token signature detected");
                        TokenError::InvalidSignature
                    }
                    ErrorKind::InvalidIssuer => {
                        tracing::warn!("Token verification failed: Unexpected issuer");
                        TokenError::MalformedToken
                    }
                    ErrorKind::InvalidToken | ErrorKind::InvalidAlgorithm => {
                        tracing::error!("Security alert: Malformed or invalid algorithm token");
                        TokenError::MalformedToken
                    }
                    _ => {
                        tracing::warn!("Token verification failed: Malformed token");
                        TokenError::MalformedToken
                    }
                }
            })?;

        Ok(decoded.claims)
    }

    fn access_token_expiry(&self) -> i64 {
        self.config.access_token_expiry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-that-is-at-least-32-chars";

    fn service_with(secret: &str, issuer: &str, expiry: i64) -> JwtTokenService {
        JwtTokenService::new(JwtConfig {
            secret_key: secret.to_string(),
            issuer: issuer.to_string(),
            access_token_expiry: expiry,
        })
    }

    fn service() -> JwtTokenService {
        service_with(SECRET, "portfolio-test", 3600)
    }

    #[test]
    fn generated_token_verifies_with_admin_claims() {
        let service = service();

        let token = service
            .generate_access_token("admin@portfolio.com")
            .expect("Token should be generated");
        let claims = service.verify_token(&token).unwrap();

        assert_eq!(claims.sub, "admin@portfolio.com");
        assert_eq!(claims.token_type, ACCESS_TOKEN_TYPE);
        assert_eq!(claims.role, ADMIN_ROLE);
        assert_eq!(claims.iss, "portfolio-test");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn garbage_is_malformed() {
        let result = service().verify_token("invalid.jwt.token");
        assert_eq!(result.unwrap_err(), TokenError::MalformedToken);
    }

    #[test]
    fn expired_token_is_rejected() {
        // beyond the 30s leeway
        let service = service_with(SECRET, "portfolio-test", -35);
        let token = service.generate_access_token("admin@portfolio.com").unwrap();

        assert_eq!(
            service.verify_token(&token).unwrap_err(),
            TokenError::TokenExpired
        );
    }

    #[test]
    fn token_signed_with_another_secret_is_rejected() {
        let token = service()
            .generate_access_token("admin@portfolio.com")
            .unwrap();
        let other = service_with(&format!("{SECRET}_DIFFERENT"), "portfolio-test", 3600);

        assert_eq!(
            other.verify_token(&token).unwrap_err(),
            TokenError::InvalidSignature
        );
    }

    #[test]
    fn token_from_another_issuer_is_rejected() {
        let token = service_with(SECRET, "someone-else", 3600)
            .generate_access_token("admin@portfolio.com")
            .unwrap();

        assert!(service().verify_token(&token).is_err());
    }

    #[test]
    fn tampered_token_is_rejected() {
        let mut token = service()
            .generate_access_token("admin@portfolio.com")
            .unwrap();
        token.push('x');

        assert!(service().verify_token(&token).is_err());
    }

    #[test]
    fn reports_configured_expiry() {
        assert_eq!(service_with(SECRET, "x", 900).access_token_expiry(), 900);
    }

    #[test]
    fn debug_output_hides_the_secret() {
        let debug_str = format!("{:?}", service());
        assert!(debug_str.contains("JwtService"));
        assert!(!debug_str.contains(SECRET));
    }
}
