// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库接口模块
///
/// 领域层只依赖这些特质，具体实现位于 `infrastructure::repositories`
pub mod article_repository;
pub mod source_repository;
