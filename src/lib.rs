// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 包含核心业务实体、服务和仓库接口
pub mod domain;

/// 引擎模块
///
/// 共享的 HTTP 抓取引擎
pub mod engines;

/// 基础设施模块
///
/// 数据库、仓库实现、来源读取器与指标导出
pub mod infrastructure;

/// 表示层模块
///
/// 处理HTTP请求和响应，包括路由、处理器和中间件
pub mod presentation;

/// 工具模块
///
/// 错误类型与日志初始化
pub mod utils;

/// 工作器模块
///
/// 后台采集调度
pub mod workers;
