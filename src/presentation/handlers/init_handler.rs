// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::extract::{Extension, Json};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::domain::models::source::SourceKind;
use crate::domain::repositories::source_repository::SourceRepository;
use crate::domain::services::article_service::ArticleService;
use crate::presentation::errors::AppError;

/// 初始化存储
///
/// 迁移在启动时已执行，这里补写默认来源（幂等）并返回计数
pub async fn init(
    Extension(sources): Extension<Arc<dyn SourceRepository>>,
    Extension(articles): Extension<Arc<ArticleService>>,
) -> Result<Json<Value>, AppError> {
    let seeded = sources.seed_defaults().await?;

    Ok(Json(json!({
        "success": true,
        "message": "Database initialized",
        "seeded": {
            "rss_sources": seeded.rss_inserted,
            "scrape_sources": seeded.scrape_inserted,
        },
        "stats": {
            "articles": articles.count().await?,
            "rss_sources": sources.count(SourceKind::Rss).await?,
            "scrape_sources": sources.count(SourceKind::Scrape).await?,
        },
    })))
}
