// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm_migration::prelude::*;

/// 创建文章表
#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Articles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Articles::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Articles::Title).string().not_null())
                    // Slug uniqueness is what makes concurrent probe-then-insert safe
                    .col(
                        ColumnDef::new(Articles::Slug)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Articles::Content).text().not_null())
                    .col(ColumnDef::new(Articles::Excerpt).text().null())
                    .col(
                        ColumnDef::new(Articles::Category)
                            .string()
                            .not_null()
                            .default("general"),
                    )
                    .col(ColumnDef::new(Articles::Source).string().null())
                    .col(ColumnDef::new(Articles::SourceUrl).string().null())
                    .col(ColumnDef::new(Articles::ImageUrl).string().null())
                    .col(
                        ColumnDef::new(Articles::Author)
                            .string()
                            .not_null()
                            .default("Staff"),
                    )
                    .col(
                        ColumnDef::new(Articles::Status)
                            .string()
                            .not_null()
                            .default("published"),
                    )
                    .col(
                        ColumnDef::new(Articles::IsScraped)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Articles::IsAiRewritten)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Articles::Views)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Articles::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Articles::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Articles::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Articles {
    Table,
    Id,
    Title,
    Slug,
    Content,
    Excerpt,
    Category,
    Source,
    SourceUrl,
    ImageUrl,
    Author,
    Status,
    IsScraped,
    IsAiRewritten,
    Views,
    CreatedAt,
    UpdatedAt,
}
