use sea_orm_migration::prelude::*;

use crate::m20260101_000001_create_articles::Articles;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Listing queries filter by status/category and order by created_at
        manager
            .create_index(
                Index::create()
                    .name("idx_articles_status")
                    .table(Articles::Table)
                    .col(Articles::Status)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_articles_category")
                    .table(Articles::Table)
                    .col(Articles::Category)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_articles_created")
                    .table(Articles::Table)
                    .col(Articles::CreatedAt)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in [
            "idx_articles_status",
            "idx_articles_category",
            "idx_articles_created",
        ] {
            manager
                .drop_index(Index::drop().name(name).table(Articles::Table).to_owned())
                .await?;
        }

        Ok(())
    }
}
