use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Document::Table)
                    .if_not_exists()
                    .col(pk_auto(Document::Id))
                    .col(string(Document::Kind))
                    .col(json(Document::Data))
                    .col(integer(Document::Version).default(0))
                    .to_owned(),
            )
            .await?;

        // Listing walks one kind in id order
        manager
            .create_index(
                Index::create()
                    .name("idx_document_kind_id")
                    .table(Document::Table)
                    .col(Document::Kind)
                    .col(Document::Id)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Document::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Document {
    Table,
    Id,
    Kind,
    Data,
    Version,
}
