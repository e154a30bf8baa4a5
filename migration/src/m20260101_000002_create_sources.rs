// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm_migration::prelude::*;

/// 创建RSS源与抓取源表
#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RssSources::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RssSources::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(RssSources::Name).string().not_null())
                    .col(
                        ColumnDef::new(RssSources::Url)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(RssSources::Category)
                            .string()
                            .not_null()
                            .default("general"),
                    )
                    .col(
                        ColumnDef::new(RssSources::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(RssSources::LastFetched)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(RssSources::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ScrapeSources::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ScrapeSources::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ScrapeSources::Name).string().not_null())
                    .col(
                        ColumnDef::new(ScrapeSources::Url)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(ScrapeSources::Category)
                            .string()
                            .not_null()
                            .default("general"),
                    )
                    .col(
                        ColumnDef::new(ScrapeSources::ArticleSelector)
                            .string()
                            .not_null()
                            .default("article"),
                    )
                    .col(
                        ColumnDef::new(ScrapeSources::TitleSelector)
                            .string()
                            .not_null()
                            .default("h1, h2"),
                    )
                    .col(
                        ColumnDef::new(ScrapeSources::ContentSelector)
                            .string()
                            .not_null()
                            .default("p"),
                    )
                    .col(
                        ColumnDef::new(ScrapeSources::ImageSelector)
                            .string()
                            .not_null()
                            .default("img"),
                    )
                    .col(
                        ColumnDef::new(ScrapeSources::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(ScrapeSources::LastScraped)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(ScrapeSources::CreatedAt)
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
            .drop_table(Table::drop().table(ScrapeSources::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RssSources::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum RssSources {
    Table,
    Id,
    Name,
    Url,
    Category,
    Active,
    LastFetched,
    CreatedAt,
}

#[derive(DeriveIden)]
enum ScrapeSources {
    Table,
    Id,
    Name,
    Url,
    Category,
    ArticleSelector,
    TitleSelector,
    ContentSelector,
    ImageSelector,
    Active,
    LastScraped,
    CreatedAt,
}
