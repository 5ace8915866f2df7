// src/shared/config.rs
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Loads `.env.{RUST_ENV}` and falls back to `.env`.
pub fn load_env_files() -> String {
    let env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());

    let env_file = format!(".env.{}", env);
    if dotenvy::from_filename(&env_file).is_err() {
        dotenvy::dotenv().ok();
    }

    env
}

/// Trimmed value, `None` when unset or blank.
pub fn optional_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn required_var(key: &'static str) -> Result<String, ConfigError> {
    optional_var(key).ok_or(ConfigError::Missing(key))
}

pub fn parse_var<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match optional_var(key) {
        None => Ok(default),
        Some(raw) => raw.parse::<T>().map_err(|e| ConfigError::Invalid {
            key,
            reason: e.to_string(),
        }),
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: optional_var("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parse_var("PORT", 8080)?,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
