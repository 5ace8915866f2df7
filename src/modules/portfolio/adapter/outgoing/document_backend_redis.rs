use async_trait::async_trait;
use deadpool_redis::{redis, Pool};
use std::sync::Arc;

use crate::modules::portfolio::application::ports::outgoing::{
    DocumentBackend, DocumentBackendError,
};
use crate::modules::portfolio::domain::VersionedDocument;

/// Redis-backed copy of the portfolio document.
///
/// ## Redis data model
/// ```text
/// portfolio:document -> '{"revision": n, "document": {...}}'
/// ```
/// No TTL: the key is overwritten on every save.
#[derive(Clone)]
pub struct RedisDocumentBackend {
    pool: Arc<Pool>,
}

impl RedisDocumentBackend {
    pub const KEY: &'static str = "portfolio:document";

    pub fn new(pool: Arc<Pool>) -> Self {
        Self { pool }
    }

    async fn get_conn(&self) -> Result<deadpool_redis::Connection, DocumentBackendError> {
        self.pool
            .get()
            .await
            .map_err(|e| DocumentBackendError::Connection(format!("Pool error: {}", e)))
    }
}

#[async_trait]
impl DocumentBackend for RedisDocumentBackend {
    fn name(&self) -> &'static str {
        "redis"
    }

    async fn read(&self) -> Result<Option<VersionedDocument>, DocumentBackendError> {
        let mut conn = self.get_conn().await?;

        let raw: Option<String> = redis::cmd("GET")
            .arg(Self::KEY)
            .query_async(&mut *conn)
            .await
            .map_err(|e| DocumentBackendError::Query(e.to_string()))?;

        raw.map(|s| decode(&s)).transpose()
    }

    async fn write(&self, document: &VersionedDocument) -> Result<(), DocumentBackendError> {
        let payload = encode(document)?;
        let mut conn = self.get_conn().await?;

        redis::cmd("SET")
            .arg(Self::KEY)
            .arg(payload)
            .query_async::<()>(&mut *conn)
            .await
            .map_err(|e| DocumentBackendError::Query(e.to_string()))
    }

    async fn ping(&self) -> Result<(), DocumentBackendError> {
        let mut conn = self.get_conn().await?;

        redis::cmd("PING")
            .query_async::<String>(&mut *conn)
            .await
            .map(|_| ())
            .map_err(|e| DocumentBackendError::Query(e.to_string()))
    }
}

fn encode(document: &VersionedDocument) -> Result<String, DocumentBackendError> {
    serde_json::to_string(&document.to_envelope())
        .map_err(|e| DocumentBackendError::Serialization(e.to_string()))
}

/// Unparseable payloads are an error so the store falls through to the next backend.
fn decode(raw: &str) -> Result<VersionedDocument, DocumentBackendError> {
    serde_json::from_str::<serde_json::Value>(raw)
        .map(VersionedDocument::from_envelope)
        .map_err(|e| DocumentBackendError::Serialization(e.to_string()))
}
