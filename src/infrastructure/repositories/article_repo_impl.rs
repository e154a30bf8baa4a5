// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::domain::models::article::{Article, ArticleStatus, Category, NewArticle};
use crate::domain::repositories::article_repository::{ArticleRepository, RepositoryError};
use crate::infrastructure::database::entities::article as article_entity;
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{sea_query::Expr, *};
use std::sync::Arc;

/// 文章仓库实现
pub struct ArticleRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl ArticleRepositoryImpl {
    /// 创建新的文章仓库实例
    ///
    /// # 参数
    ///
    /// * `db` - 数据库连接
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

/// 唯一约束冲突单独映射，其余保持为数据库错误
pub(crate) fn map_write_error(err: DbErr) -> RepositoryError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => RepositoryError::Conflict(detail),
        _ => RepositoryError::Database(err),
    }
}

fn to_domain(m: article_entity::Model) -> Result<Article, RepositoryError> {
    let status = m
        .status
        .parse::<ArticleStatus>()
        .map_err(RepositoryError::Corrupt)?;

    Ok(Article {
        id: m.id,
        title: m.title,
        slug: m.slug,
        content: m.content,
        excerpt: m.excerpt,
        category: Category::parse(&m.category),
        source: m.source,
        source_url: m.source_url,
        image_url: m.image_url,
        author: m.author,
        status,
        is_scraped: m.is_scraped,
        is_ai_rewritten: m.is_ai_rewritten,
        views: m.views,
        created_at: m.created_at.with_timezone(&Utc),
        updated_at: m.updated_at.with_timezone(&Utc),
    })
}

#[async_trait]
impl ArticleRepository for ArticleRepositoryImpl {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Article>, RepositoryError> {
        let model = article_entity::Entity::find()
            .filter(article_entity::Column::Slug.eq(slug))
            .one(self.db.as_ref())
            .await?;

        model.map(to_domain).transpose()
    }

    async fn insert(&self, article: &NewArticle) -> Result<i32, RepositoryError> {
        let now = Utc::now();
        let model = article_entity::ActiveModel {
            id: NotSet,
            title: Set(article.title.clone()),
            slug: Set(article.slug.clone()),
            content: Set(article.content.clone()),
            excerpt: Set(Some(article.excerpt.clone())),
            category: Set(article.category.to_string()),
            source: Set(Some(article.source.clone())),
            source_url: Set(article.source_url.clone()),
            image_url: Set(article.image_url.clone()),
            author: Set(article.author.clone()),
            status: Set(article.status.to_string()),
            is_scraped: Set(article.is_scraped),
            is_ai_rewritten: Set(false),
            views: Set(0),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        let result = article_entity::Entity::insert(model)
            .exec(self.db.as_ref())
            .await
            .map_err(map_write_error)?;
        Ok(result.last_insert_id)
    }

    async fn increment_views(&self, id: i32) -> Result<(), RepositoryError> {
        let result = article_entity::Entity::update_many()
            .col_expr(
                article_entity::Column::Views,
                Expr::col(article_entity::Column::Views).add(1),
            )
            .filter(article_entity::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await?;

        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        let total = article_entity::Entity::find()
            .count(self.db.as_ref())
            .await?;
        Ok(total)
    }
}
