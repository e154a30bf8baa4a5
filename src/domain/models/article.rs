// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 文章实体
///
/// 已发布内容的基本单元。`slug` 由标题派生，一经分配保持不变，
/// 在全部文章中唯一。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    /// 存储分配的自增ID
    pub id: i32,
    pub title: String,
    /// URL 安全的唯一标识，`[a-z0-9-]`，不超过100字符
    pub slug: String,
    /// HTML 正文
    pub content: String,
    pub excerpt: Option<String>,
    pub category: Category,
    /// 来源显示名称
    pub source: Option<String>,
    /// 原文链接
    pub source_url: Option<String>,
    pub image_url: Option<String>,
    pub author: String,
    pub status: ArticleStatus,
    /// 由网页抓取器生成时为 true
    pub is_scraped: bool,
    /// 保留字段，本服务不会写入
    pub is_ai_rewritten: bool,
    /// 阅读次数，仅由读取方累加
    pub views: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 待插入的文章
///
/// 由协调器在完成 slug 探测与内容规范化后构造
#[derive(Debug, Clone, PartialEq)]
pub struct NewArticle {
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: String,
    pub category: Category,
    pub source: String,
    pub source_url: Option<String>,
    pub image_url: Option<String>,
    pub author: String,
    pub status: ArticleStatus,
    pub is_scraped: bool,
}

/// 文章分类
///
/// 固定枚举集合，未知值归入 `General`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    #[default]
    General,
    Politics,
    Business,
    Sports,
    Entertainment,
    Health,
    Technology,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::General,
        Category::Politics,
        Category::Business,
        Category::Sports,
        Category::Entertainment,
        Category::Health,
        Category::Technology,
    ];

    /// 宽松解析：忽略大小写与首尾空白，无法识别时返回 `General`
    pub fn parse(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::General => "general",
            Category::Politics => "politics",
            Category::Business => "business",
            Category::Sports => "sports",
            Category::Entertainment => "entertainment",
            Category::Health => "health",
            Category::Technology => "technology",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| format!("Unknown category: {}", s))
    }
}

/// 发布状态
///
/// 只有 `Published` 会出现在公开列表中
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ArticleStatus {
    #[default]
    Published,
    Draft,
    Archived,
}

impl fmt::Display for ArticleStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ArticleStatus::Published => write!(f, "published"),
            ArticleStatus::Draft => write!(f, "draft"),
            ArticleStatus::Archived => write!(f, "archived"),
        }
    }
}

impl FromStr for ArticleStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "published" => Ok(ArticleStatus::Published),
            "draft" => Ok(ArticleStatus::Draft),
            "archived" => Ok(ArticleStatus::Archived),
            _ => Err(format!("Unknown article status: {}", s)),
        }
    }
}
