// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use thiserror::Error;

use crate::domain::repositories::article_repository::RepositoryError;
use crate::engines::traits::EngineError;

/// 采集管线错误类型
///
/// 除 `Config` 外，其余错误都只影响单个来源或单条候选文章，
/// 由协调器记录进运行报告而不会中断整次运行
#[derive(Error, Debug)]
pub enum IngestError {
    /// 配置缺失或非法，在触碰任何来源之前终止
    #[error("configuration error: {0}")]
    Config(String),

    /// 单个来源的网络、超时或 HTTP 状态错误
    #[error("fetch failed: {0}")]
    SourceFetch(String),

    /// 解析或选择器匹配失败
    #[error("extraction failed: {0}")]
    Extraction(String),

    /// 存储读写失败
    #[error("storage error: {0}")]
    Storage(String),

    /// 来源在子管线运行时限内未完成
    #[error("run exceeded {0}s deadline")]
    Timeout(u64),
}

impl From<EngineError> for IngestError {
    fn from(err: EngineError) -> Self {
        IngestError::SourceFetch(err.to_string())
    }
}

impl From<RepositoryError> for IngestError {
    fn from(err: RepositoryError) -> Self {
        IngestError::Storage(err.to_string())
    }
}

impl From<config::ConfigError> for IngestError {
    fn from(err: config::ConfigError) -> Self {
        IngestError::Config(err.to_string())
    }
}
