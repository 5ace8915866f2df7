mod document_backend_file;
mod document_backend_postgres;
mod document_backend_redis;
pub mod sea_orm_entity;
mod store_config;

pub use document_backend_file::FileDocumentBackend;
pub use document_backend_postgres::PostgresDocumentBackend;
pub use document_backend_redis::RedisDocumentBackend;
pub use store_config::StoreConfig;
