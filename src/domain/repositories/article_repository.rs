// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::article::{Article, NewArticle};
use async_trait::async_trait;
use sea_orm::DbErr;
use thiserror::Error;

/// 仓库错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// 数据库错误
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
    /// 记录未找到
    #[error("Record not found")]
    NotFound,
    /// 唯一约束冲突
    #[error("Unique constraint violated: {0}")]
    Conflict(String),
    /// 存储中的值无法映射回领域类型
    #[error("Corrupt row: {0}")]
    Corrupt(String),
}

/// 文章仓库特质
///
/// 采集协调器只依赖其中的 `find_by_slug` 与 `insert`；
/// 其余方法供读取方与初始化端点使用
#[async_trait]
pub trait ArticleRepository: Send + Sync {
    /// 根据 slug 查找文章
    ///
    /// # 返回值
    ///
    /// * `Ok(Some(Article))` - 找到文章
    /// * `Ok(None)` - slug 未被占用
    /// * `Err(RepositoryError)` - 查询失败
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Article>, RepositoryError>;

    /// 插入新文章，返回存储分配的ID
    ///
    /// slug 已被占用时返回 `RepositoryError::Conflict`，单条语句原子写入
    async fn insert(&self, article: &NewArticle) -> Result<i32, RepositoryError>;

    /// 阅读数加一
    async fn increment_views(&self, id: i32) -> Result<(), RepositoryError>;

    /// 文章总数
    async fn count(&self) -> Result<u64, RepositoryError>;
}
