// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 来源读取实现
///
/// - RSS / Atom 订阅源（rss_fetcher）
/// - 基于 CSS 选择器的网页抓取（web_scraper）
pub mod rss_fetcher;
pub mod web_scraper;

use url::Url;

/// 将相对地址解析为绝对地址，仅保留 http(s)
pub(crate) fn resolve_url(base: &str, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() || href.starts_with("data:") || href.starts_with("javascript:") {
        return None;
    }
    let resolved = match Url::parse(href) {
        Ok(url) => url,
        Err(_) => Url::parse(base).ok()?.join(href).ok()?,
    };
    matches!(resolved.scheme(), "http" | "https").then(|| resolved.to_string())
}
