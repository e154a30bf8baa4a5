// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库实现模块
///
/// 基于 SeaORM 的文章与来源仓库
pub mod article_repo_impl;
pub mod source_repo_impl;
