use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    sea_query::OnConflict, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, Set,
    Statement,
};
use std::sync::Arc;

use crate::modules::portfolio::adapter::outgoing::sea_orm_entity::portfolio_documents::{
    self, ActiveModel, Column, Entity,
};
use crate::modules::portfolio::application::ports::outgoing::{
    DocumentBackend, DocumentBackendError,
};
use crate::modules::portfolio::domain::{PortfolioDocument, VersionedDocument};

const DOCUMENT_ROW_ID: i32 = 1;

// ============================================================================
// Backend Implementation
// ============================================================================

#[derive(Clone)]
pub struct PostgresDocumentBackend {
    db: Arc<DatabaseConnection>,
}

impl PostgresDocumentBackend {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DocumentBackend for PostgresDocumentBackend {
    fn name(&self) -> &'static str {
        "postgres"
    }

    async fn read(&self) -> Result<Option<VersionedDocument>, DocumentBackendError> {
        let row = Entity::find_by_id(DOCUMENT_ROW_ID)
            .one(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(row.map(model_to_document))
    }

    async fn write(&self, document: &VersionedDocument) -> Result<(), DocumentBackendError> {
        let revision = i64::try_from(document.revision)
            .map_err(|e| DocumentBackendError::Serialization(e.to_string()))?;
        let data = serde_json::to_value(&document.document)
            .map_err(|e| DocumentBackendError::Serialization(e.to_string()))?;

        let model = ActiveModel {
            id: Set(DOCUMENT_ROW_ID),
            revision: Set(revision),
            data: Set(data),
            updated_at: Set(Utc::now().fixed_offset()),
        };

        Entity::insert(model)
            .on_conflict(
                OnConflict::column(Column::Id)
                    .update_columns([Column::Revision, Column::Data, Column::UpdatedAt])
                    .to_owned(),
            )
            .exec_without_returning(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(())
    }

    async fn ping(&self) -> Result<(), DocumentBackendError> {
        self.db
            .execute(Statement::from_string(
                self.db.get_database_backend(),
                "SELECT 1",
            ))
            .await
            .map(|_| ())
            .map_err(map_db_err)
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn model_to_document(model: portfolio_documents::Model) -> VersionedDocument {
    VersionedDocument {
        revision: u64::try_from(model.revision).unwrap_or(0),
        document: PortfolioDocument::from_value_lenient(model.data),
    }
}

fn map_db_err(e: DbErr) -> DocumentBackendError {
    match e {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => {
            DocumentBackendError::Connection(e.to_string())
        }
        _ => DocumentBackendError::Query(e.to_string()),
    }
}

// ============================================================================
// Tests
// ============================================================================
