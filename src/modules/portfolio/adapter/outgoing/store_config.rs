use deadpool_redis::{Config, Runtime};
use sea_orm::{ConnectOptions, Database};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::modules::portfolio::adapter::outgoing::{
    FileDocumentBackend, PostgresDocumentBackend, RedisDocumentBackend,
};
use crate::modules::portfolio::application::ports::outgoing::DocumentBackend;
use crate::shared::config::{optional_var, ConfigError};

pub const DEFAULT_FILE_PATH: &str = "data/portfolio.json";

/// Which backends to build. Redis and PostgreSQL are optional; the file backend is always on.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub redis_url: Option<String>,
    pub database_url: Option<String>,
    pub file_path: PathBuf,
}

impl StoreConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let file_path =
            optional_var("PORTFOLIO_FILE_PATH").unwrap_or_else(|| DEFAULT_FILE_PATH.to_string());

        Ok(Self {
            redis_url: optional_var("REDIS_URL"),
            database_url: optional_var("DATABASE_URL"),
            file_path: PathBuf::from(file_path),
        })
    }

    /// Backends in preference order: Redis, PostgreSQL, file.
    ///
    /// A backend that cannot be set up is left out with a warning; the file backend is
    /// always present so the store has somewhere to write.
    pub async fn build_backends(&self) -> Vec<Arc<dyn DocumentBackend>> {
        let mut backends: Vec<Arc<dyn DocumentBackend>> = Vec::new();

        if let Some(url) = &self.redis_url {
            match Config::from_url(url).create_pool(Some(Runtime::Tokio1)) {
                Ok(pool) => {
                    info!("Redis backend enabled");
                    backends.push(Arc::new(RedisDocumentBackend::new(Arc::new(pool))));
                }
                Err(e) => warn!(error = %e, "Redis backend disabled"),
            }
        }

        if let Some(url) = &self.database_url {
            // Lazy pool: a database that is down at startup stays in the chain and is
            // retried on each request.
            let mut opt = ConnectOptions::new(url.clone());
            opt.max_connections(10)
                .connect_lazy(true)
                .connect_timeout(Duration::from_secs(5))
                .acquire_timeout(Duration::from_secs(5))
                .idle_timeout(Duration::from_secs(300))
                .max_lifetime(Duration::from_secs(1800))
                .sqlx_logging(false);

            match Database::connect(opt).await {
                Ok(conn) => {
                    info!("PostgreSQL backend enabled");
                    backends.push(Arc::new(PostgresDocumentBackend::new(Arc::new(conn))));
                }
                Err(e) => warn!(error = %e, "PostgreSQL backend disabled"),
            }
        }

        info!(path = %self.file_path.display(), "File backend enabled");
        backends.push(Arc::new(FileDocumentBackend::new(self.file_path.clone())));

        backends
    }
}
