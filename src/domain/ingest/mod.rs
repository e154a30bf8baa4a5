// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 采集领域模块
///
/// 定义来源读取接口，RSS 与网页抓取实现位于基础设施层
pub mod source_reader;
