// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::article_repository::RepositoryError;
use crate::domain::models::source::{Source, SourceKind};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// 默认来源写入结果
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedOutcome {
    pub rss_inserted: u64,
    pub scrape_inserted: u64,
}

/// 来源登记仓库特质
///
/// 采集管线对来源只做两件事：列出活跃来源、写回运行时间戳
#[async_trait]
pub trait SourceRepository: Send + Sync {
    /// 列出指定类型的活跃来源，只按 `active` 过滤
    async fn list_active(&self, kind: SourceKind) -> Result<Vec<Source>, RepositoryError>;

    /// 记录一次运行尝试（无论成败）
    ///
    /// # 参数
    ///
    /// * `kind` - 来源类型，决定写 `last_fetched` 还是 `last_scraped`
    /// * `source_id` - 来源ID
    /// * `at` - 运行时间
    async fn mark_run(
        &self,
        kind: SourceKind,
        source_id: i32,
        at: DateTime<Utc>,
    ) -> Result<(), RepositoryError>;

    /// 表为空时写入默认来源，URL 冲突忽略
    async fn seed_defaults(&self) -> Result<SeedOutcome, RepositoryError>;

    /// 指定类型的来源总数（含非活跃）
    async fn count(&self, kind: SourceKind) -> Result<u64, RepositoryError>;
}
