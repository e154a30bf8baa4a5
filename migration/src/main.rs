// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm_migration::prelude::*;

/// 迁移命令行入口
///
/// 目标库由 `DATABASE_URL` 指定，例如 `DATABASE_URL=sqlite://newsfront.db?mode=rwc cargo run -p migration -- up`
#[tokio::main]
async fn main() {
    cli::run_cli(migration::Migrator).await;
}
