// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 文章、来源、候选条目与运行报告
pub mod article;
pub mod candidate;
pub mod run_report;
pub mod source;
