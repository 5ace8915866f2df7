mod document_backend;
mod document_store;

pub use document_backend::{DocumentBackend, DocumentBackendError};
pub use document_store::{DocumentStore, PortfolioStoreError, SaveOutcome};
