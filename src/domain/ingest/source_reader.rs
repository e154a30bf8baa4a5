// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::candidate::SourceItems;
use crate::domain::models::source::{Source, SourceKind};
use crate::utils::errors::IngestError;
use async_trait::async_trait;

/// 来源读取器
///
/// 对一个来源执行一次抓取并提取候选文章。错误只描述该来源本身，
/// 由协调器记录后继续处理其他来源。
#[async_trait]
pub trait SourceReader: Send + Sync {
    /// 读取一个来源
    ///
    /// # 返回值
    ///
    /// * `Ok(SourceItems)` - 至多 `max_items` 个条目（含被丢弃的）
    /// * `Err(IngestError::SourceFetch)` - 网络、超时或状态码错误
    /// * `Err(IngestError::Extraction)` - 内容无法解析或选择器无效
    async fn read(&self, source: &Source, max_items: usize) -> Result<SourceItems, IngestError>;

    /// 读取器负责的来源类型
    fn kind(&self) -> SourceKind;
}
