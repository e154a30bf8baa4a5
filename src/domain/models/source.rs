// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::article::Category;

/// 来源类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// RSS / Atom 订阅源
    Rss,
    /// 基于选择器抓取的网页
    Scrape,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SourceKind::Rss => write!(f, "rss"),
            SourceKind::Scrape => write!(f, "scrape"),
        }
    }
}

/// 抓取源的选择器配置
///
/// 选择器是数据而非算法，默认值对应通用的 HTML 标签
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeSelectors {
    /// 候选文章元素
    pub article: String,
    /// 文章内的标题
    pub title: String,
    /// 文章内的正文段落，全部匹配拼接
    pub content: String,
    /// 文章内的图片，取第一个匹配
    pub image: String,
}

impl Default for ScrapeSelectors {
    fn default() -> Self {
        Self {
            article: "article".to_string(),
            title: "h1, h2".to_string(),
            content: "p".to_string(),
            image: "img".to_string(),
        }
    }
}

/// 来源配置及运行状态
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Source {
    pub id: i32,
    pub kind: SourceKind,
    pub name: String,
    pub url: String,
    /// 赋给该来源入库文章的分类
    pub category: Category,
    /// 非活跃来源在运行中被完全跳过
    pub active: bool,
    /// 最近一次运行尝试的时间（无论成败）
    pub last_run_at: Option<DateTime<Utc>>,
    /// 仅抓取源携带
    pub selectors: Option<ScrapeSelectors>,
}

impl Source {
    /// 抓取源的选择器，缺失时回退到默认值
    pub fn selectors_or_default(&self) -> ScrapeSelectors {
        self.selectors.clone().unwrap_or_default()
    }
}

/// 首次初始化存储时写入的默认来源
pub struct DefaultSource {
    pub name: &'static str,
    pub url: &'static str,
    pub category: Category,
}

pub const DEFAULT_RSS_SOURCES: &[DefaultSource] = &[
    DefaultSource {
        name: "GhanaWeb",
        url: "https://www.ghanaweb.com/GhanaHomePage/rss_headline.php",
        category: Category::General,
    },
    DefaultSource {
        name: "Graphic Online",
        url: "https://www.graphic.com.gh/feed",
        category: Category::General,
    },
    DefaultSource {
        name: "Ghana Business News",
        url: "https://www.ghanabusinessnews.com/feed",
        category: Category::Business,
    },
    DefaultSource {
        name: "3News",
        url: "https://3news.com/feed/",
        category: Category::General,
    },
    DefaultSource {
        name: "Joy Online",
        url: "https://www.myjoyonline.com/feed/",
        category: Category::General,
    },
    DefaultSource {
        name: "CitiFM",
        url: "https://citifmonline.com/feed/",
        category: Category::General,
    },
    DefaultSource {
        name: "Football Ghana",
        url: "https://footballghana.com/feed/",
        category: Category::Sports,
    },
];

pub const DEFAULT_SCRAPE_SOURCES: &[DefaultSource] = &[
    DefaultSource {
        name: "GhanaWeb",
        url: "https://www.ghanaweb.com",
        category: Category::General,
    },
    DefaultSource {
        name: "Graphic Online",
        url: "https://www.graphic.com.gh",
        category: Category::General,
    },
];
