// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;

use tracing::warn;

use crate::domain::models::article::{Article, ArticleStatus};
use crate::domain::repositories::article_repository::{ArticleRepository, RepositoryError};

/// 文章读取服务
pub struct ArticleService {
    articles: Arc<dyn ArticleRepository>,
}

impl ArticleService {
    pub fn new(articles: Arc<dyn ArticleRepository>) -> Self {
        Self { articles }
    }

    /// 打开一篇已发布文章并记录一次阅读
    ///
    /// 阅读计数是尽力而为的写入：失败只记录告警，不影响返回结果。
    /// 非 `Published` 状态的文章视为不存在。
    pub async fn open_published(&self, slug: &str) -> Result<Option<Article>, RepositoryError> {
        let Some(mut article) = self.articles.find_by_slug(slug).await? else {
            return Ok(None);
        };
        if article.status != ArticleStatus::Published {
            return Ok(None);
        }

        match self.articles.increment_views(article.id).await {
            Ok(()) => article.views += 1,
            Err(e) => warn!(slug, error = %e, "Failed to record article view"),
        }
        Ok(Some(article))
    }

    /// 文章总数
    pub async fn count(&self) -> Result<u64, RepositoryError> {
        self.articles.count().await
    }
}
