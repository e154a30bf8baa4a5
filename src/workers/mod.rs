// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 后台工作器模块
///
/// 可选的进程内采集调度器
pub mod ingest_scheduler;
