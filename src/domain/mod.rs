// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含系统的核心业务逻辑，包括：
/// - 领域模型（models）：文章、来源与运行报告
/// - 仓库接口（repositories）：数据持久化抽象接口
/// - 采集接口（ingest）：来源读取抽象
/// - 服务（services）：内容规范化、采集协调与读取
///
/// 领域层不依赖于任何外部实现。
pub mod ingest;
pub mod models;
pub mod repositories;
pub mod services;
