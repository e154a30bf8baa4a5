// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! RSS / Atom 订阅源读取
//!
//! 通过抓取引擎获取订阅内容，使用 feed-rs 解析后逐条转换为候选文章。

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use feed_rs::model::Entry;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::resolve_url;
use crate::domain::ingest::source_reader::SourceReader;
use crate::domain::models::candidate::{Candidate, SourceItems};
use crate::domain::models::source::{Source, SourceKind};
use crate::domain::services::content_normalizer::plain_text;
use crate::engines::traits::{FetchEngine, FetchRequest};
use crate::utils::errors::IngestError;

static IMG_SRC_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)<img\b[^>]*?\bsrc\s*=\s*["']([^"']+)["']"#)
        .expect("Failed to compile img src regex")
});

/// RSS 读取器
pub struct RssFetcher {
    engine: Arc<dyn FetchEngine>,
    timeout: Duration,
}

impl RssFetcher {
    pub fn new(engine: Arc<dyn FetchEngine>, timeout: Duration) -> Self {
        Self { engine, timeout }
    }
}

#[async_trait]
impl SourceReader for RssFetcher {
    async fn read(&self, source: &Source, max_items: usize) -> Result<SourceItems, IngestError> {
        let request = FetchRequest::get(&source.url, self.timeout);
        let response = self.engine.fetch(&request).await?;

        debug!(
            source = %source.name,
            engine = self.engine.name(),
            status = response.status_code,
            content_type = %response.content_type,
            bytes = response.content.len(),
            elapsed_ms = response.response_time_ms,
            "Feed fetched"
        );

        parse_feed(&response.content, &response.final_url, max_items)
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Rss
    }
}

/// 解析订阅内容，按订阅顺序取前 `max_items` 条
pub fn parse_feed(
    content: &str,
    feed_url: &str,
    max_items: usize,
) -> Result<SourceItems, IngestError> {
    let feed = feed_rs::parser::parse(content.as_bytes())
        .map_err(|e| IngestError::Extraction(format!("feed parse error: {}", e)))?;

    let mut items = SourceItems::default();
    for entry in feed.entries.iter().take(max_items) {
        match entry_to_candidate(entry, feed_url) {
            Some(candidate) => items.candidates.push(candidate),
            None => items.discarded += 1,
        }
    }
    Ok(items)
}

fn entry_to_candidate(entry: &Entry, feed_url: &str) -> Option<Candidate> {
    let title = entry
        .title
        .as_ref()
        .map(|t| plain_text(&t.content))
        .filter(|t| !t.is_empty())?;

    let body = entry
        .content
        .as_ref()
        .and_then(|c| c.body.clone())
        .filter(|b| !b.trim().is_empty())
        .or_else(|| entry.summary.as_ref().map(|s| s.content.clone()))
        .filter(|b| !b.trim().is_empty())?;

    let link = entry
        .links
        .iter()
        .map(|l| l.href.trim())
        .find(|href| !href.is_empty())
        .map(str::to_string);

    let base = link.as_deref().unwrap_or(feed_url);
    let image_url = entry_image(entry, &body).and_then(|src| resolve_url(base, &src));

    Some(Candidate {
        title,
        body,
        link,
        image_url,
        is_scraped: false,
    })
}

/// 配图优先级：媒体缩略图，图片类媒体内容（含 enclosure），正文中的第一张图
fn entry_image(entry: &Entry, body: &str) -> Option<String> {
    let thumbnail = entry
        .media
        .iter()
        .flat_map(|m| m.thumbnails.iter())
        .map(|t| t.image.uri.clone())
        .next();
    if thumbnail.is_some() {
        return thumbnail;
    }

    let media_image = entry
        .media
        .iter()
        .flat_map(|m| m.content.iter())
        .filter(|c| {
            c.content_type
                .as_ref()
                .is_some_and(|t| t.to_string().starts_with("image/"))
        })
        .find_map(|c| c.url.as_ref().map(|u| u.to_string()));
    if media_image.is_some() {
        return media_image;
    }

    IMG_SRC_RE
        .captures(body)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
#[path = "rss_fetcher_test.rs"]
mod tests;
