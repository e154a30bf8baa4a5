// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 包含的服务：
/// - 内容规范化（content_normalizer）：slug、摘要与展示正文
/// - 采集协调（ingestion_service）：来源读取、去重与入库
/// - 文章读取（article_service）：公开读取与阅读计数
pub mod article_service;
pub mod content_normalizer;
pub mod ingestion_service;
