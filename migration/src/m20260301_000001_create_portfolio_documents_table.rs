use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // =====================================================
        // Singleton document table (one row, id = 1)
        // =====================================================
        manager
            .create_table(
                Table::create()
                    .table(PortfolioDocuments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PortfolioDocuments::Id)
                            .integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PortfolioDocuments::Revision)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(PortfolioDocuments::Data)
                            .json_binary()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PortfolioDocuments::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                ALTER TABLE portfolio_documents
                ADD CONSTRAINT chk_portfolio_documents_singleton CHECK (id = 1);
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PortfolioDocuments::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum PortfolioDocuments {
    Table,
    Id,
    Revision,
    Data,
    UpdatedAt,
}
