// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::extract::{Extension, Json, Path};
use std::sync::Arc;

use crate::domain::models::article::Article;
use crate::domain::repositories::article_repository::RepositoryError;
use crate::domain::services::article_service::ArticleService;
use crate::presentation::errors::AppError;

/// 按 slug 读取已发布文章
pub async fn get_article(
    Extension(service): Extension<Arc<ArticleService>>,
    Path(slug): Path<String>,
) -> Result<Json<Article>, AppError> {
    match service.open_published(&slug).await? {
        Some(article) => Ok(Json(article)),
        None => Err(RepositoryError::NotFound.into()),
    }
}
