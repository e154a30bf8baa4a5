// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 基于选择器的网页抓取
//!
//! 每个抓取源配置文章、标题、正文与图片四个 CSS 选择器。

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use super::resolve_url;
use crate::domain::ingest::source_reader::SourceReader;
use crate::domain::models::candidate::{Candidate, SourceItems};
use crate::domain::models::source::{ScrapeSelectors, Source, SourceKind};
use crate::engines::traits::{FetchEngine, FetchRequest};
use crate::utils::errors::IngestError;

static LINK_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("Failed to parse link selector"));

/// 网页抓取器
pub struct WebScraper {
    engine: Arc<dyn FetchEngine>,
    timeout: Duration,
}

impl WebScraper {
    pub fn new(engine: Arc<dyn FetchEngine>, timeout: Duration) -> Self {
        Self { engine, timeout }
    }
}

#[async_trait]
impl SourceReader for WebScraper {
    async fn read(&self, source: &Source, max_items: usize) -> Result<SourceItems, IngestError> {
        let request = FetchRequest::get(&source.url, self.timeout)
            .with_header("accept", "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8");
        let response = self.engine.fetch(&request).await?;

        debug!(
            source = %source.name,
            engine = self.engine.name(),
            status = response.status_code,
            content_type = %response.content_type,
            bytes = response.content.len(),
            elapsed_ms = response.response_time_ms,
            "Page fetched"
        );

        // Html is not Send, parse only after the last await
        extract_articles(
            &response.content,
            &response.final_url,
            &source.selectors_or_default(),
            max_items,
        )
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Scrape
    }
}

struct CompiledSelectors {
    article: Selector,
    title: Selector,
    content: Selector,
    image: Selector,
}

impl CompiledSelectors {
    fn compile(selectors: &ScrapeSelectors) -> Result<Self, IngestError> {
        Ok(Self {
            article: parse_selector("article", &selectors.article)?,
            title: parse_selector("title", &selectors.title)?,
            content: parse_selector("content", &selectors.content)?,
            image: parse_selector("image", &selectors.image)?,
        })
    }
}

fn parse_selector(role: &str, raw: &str) -> Result<Selector, IngestError> {
    Selector::parse(raw).map_err(|e| {
        IngestError::Extraction(format!("invalid {} selector '{}': {}", role, raw, e))
    })
}

/// 从页面中提取候选文章
///
/// 没有任何元素匹配文章选择器时视为提取失败；标题或正文为空的元素被丢弃。
pub fn extract_articles(
    html: &str,
    page_url: &str,
    selectors: &ScrapeSelectors,
    max_items: usize,
) -> Result<SourceItems, IngestError> {
    let compiled = CompiledSelectors::compile(selectors)?;
    let document = Html::parse_document(html);

    let elements: Vec<ElementRef> = document.select(&compiled.article).collect();
    if elements.is_empty() {
        return Err(IngestError::Extraction(format!(
            "no elements match article selector '{}'",
            selectors.article
        )));
    }

    let mut items = SourceItems::default();
    for element in elements.into_iter().take(max_items) {
        match element_to_candidate(element, page_url, &compiled) {
            Some(candidate) => items.candidates.push(candidate),
            None => items.discarded += 1,
        }
    }
    Ok(items)
}

fn element_to_candidate(
    element: ElementRef,
    page_url: &str,
    selectors: &CompiledSelectors,
) -> Option<Candidate> {
    let title = element
        .select(&selectors.title)
        .next()
        .map(element_text)
        .filter(|t| !t.is_empty())?;

    // 正文最终作为 HTML 存储，解码后的文本需要重新转义
    let paragraphs: Vec<String> = element
        .select(&selectors.content)
        .map(element_text)
        .filter(|p| !p.is_empty())
        .map(|p| html_escape::encode_text(&p).into_owned())
        .collect();
    if paragraphs.is_empty() {
        return None;
    }

    let image_url = element.select(&selectors.image).next().and_then(|img| {
        let attrs = img.value();
        attrs
            .attr("src")
            .filter(|s| !s.trim().is_empty())
            .or_else(|| attrs.attr("data-src"))
            .and_then(|src| resolve_url(page_url, src))
    });

    let link = element
        .select(&LINK_SELECTOR)
        .filter_map(|a| a.value().attr("href"))
        .find_map(|href| resolve_url(page_url, href))
        .unwrap_or_else(|| page_url.to_string());

    Some(Candidate {
        title,
        body: paragraphs.join("\n\n"),
        link: Some(link),
        image_url,
        is_scraped: true,
    })
}

/// 元素内全部文本节点先拼接再折叠空白，内联标签边界不引入空格
fn element_text(element: ElementRef) -> String {
    let text: String = element.text().collect();
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
#[path = "web_scraper_test.rs"]
mod tests;
