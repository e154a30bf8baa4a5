// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 采集协调器
//!
//! 对每类来源：列出活跃来源，有界并发地逐个读取，逐条规范化、
//! 探测唯一 slug 并插入，最后写回来源的运行时间。单个来源或单条候选的
//! 失败只进入运行报告，不会中断其他来源。运行截止时间按来源执行：
//! 超时的来源记为失败并照常写回运行时间，已完成的来源结果保留。

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use futures::stream::{self, StreamExt};
use tracing::{debug, info, info_span, instrument, warn, Instrument};
use uuid::Uuid;

use crate::config::settings::IngestSettings;
use crate::domain::ingest::source_reader::SourceReader;
use crate::domain::models::article::{ArticleStatus, NewArticle};
use crate::domain::models::candidate::Candidate;
use crate::domain::models::run_report::{IngestionSummary, RunReport, SourceOutcome};
use crate::domain::models::source::{Source, SourceKind};
use crate::domain::repositories::article_repository::{ArticleRepository, RepositoryError};
use crate::domain::repositories::source_repository::SourceRepository;
use crate::domain::services::content_normalizer::{
    excerpt, slugify, to_display_content, MAX_SLUG_LEN,
};
use crate::infrastructure::metrics;
use crate::utils::errors::IngestError;

/// slug 为空时的基础值
pub const FALLBACK_SLUG: &str = "article";

/// 插入撞上唯一约束后重新探测的次数上限
pub const MAX_INSERT_ATTEMPTS: usize = 5;

/// 单个基础 slug 的后缀探测上限
const MAX_SLUG_PROBES: u32 = 10_000;

/// 协调器运行参数
#[derive(Debug, Clone)]
pub struct IngestConfig {
    pub max_concurrent_sources: usize,
    pub max_items_per_source: usize,
    pub excerpt_length: usize,
    pub default_author: String,
    /// `None` 表示不设运行时限
    pub run_timeout: Option<Duration>,
}

impl From<&IngestSettings> for IngestConfig {
    fn from(settings: &IngestSettings) -> Self {
        Self {
            max_concurrent_sources: settings.max_concurrent_sources.max(1),
            max_items_per_source: settings.max_items_per_source,
            excerpt_length: settings.excerpt_length,
            default_author: settings.default_author.clone(),
            run_timeout: (settings.run_timeout_secs > 0)
                .then(|| Duration::from_secs(settings.run_timeout_secs)),
        }
    }
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            max_concurrent_sources: 4,
            max_items_per_source: 20,
            excerpt_length: 220,
            default_author: "Staff".to_string(),
            run_timeout: Some(Duration::from_secs(55)),
        }
    }
}

/// 一次子管线运行的截止时间，所有来源共享
#[derive(Debug, Clone, Copy)]
struct RunDeadline {
    at: tokio::time::Instant,
    limit_secs: u64,
}

impl RunDeadline {
    fn starting_now(limit: Duration) -> Self {
        Self {
            at: tokio::time::Instant::now() + limit,
            limit_secs: limit.as_secs(),
        }
    }
}

/// 采集服务
///
/// 所有依赖在构造时显式注入，服务本身无状态，可跨请求共享
pub struct IngestionService {
    articles: Arc<dyn ArticleRepository>,
    sources: Arc<dyn SourceRepository>,
    rss_reader: Arc<dyn SourceReader>,
    scrape_reader: Arc<dyn SourceReader>,
    config: IngestConfig,
}

impl IngestionService {
    pub fn new(
        articles: Arc<dyn ArticleRepository>,
        sources: Arc<dyn SourceRepository>,
        rss_reader: Arc<dyn SourceReader>,
        scrape_reader: Arc<dyn SourceReader>,
        config: IngestConfig,
    ) -> Self {
        Self {
            articles,
            sources,
            rss_reader,
            scrape_reader,
            config,
        }
    }

    /// 处理全部活跃的 RSS 来源
    pub async fn run_rss_ingestion(&self) -> Result<RunReport, IngestError> {
        self.run_kind(SourceKind::Rss).await
    }

    /// 处理全部活跃的抓取来源
    pub async fn run_scrape_ingestion(&self) -> Result<RunReport, IngestError> {
        self.run_kind(SourceKind::Scrape).await
    }

    /// 并发运行两条子管线并等待两者结束，任一失败不影响另一条
    pub async fn run_all(&self) -> IngestionSummary {
        let (rss, scrape) = tokio::join!(self.run_rss_ingestion(), self.run_scrape_ingestion());
        IngestionSummary { rss, scrape }
    }

    async fn run_kind(&self, kind: SourceKind) -> Result<RunReport, IngestError> {
        let run_id = Uuid::new_v4();
        let span = info_span!("ingest_run", %kind, %run_id);

        async move {
            metrics::record_run(kind);
            let started = Instant::now();
            let deadline = self.config.run_timeout.map(RunDeadline::starting_now);

            let report = self.run_sources(kind, deadline).await?;

            info!(
                sources = report.sources_processed,
                inserted = report.articles_inserted,
                errors = report.per_source_errors.len(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Ingestion run completed"
            );
            Ok(report)
        }
        .instrument(span)
        .await
        .inspect_err(|e: &IngestError| warn!(%kind, error = %e, "Ingestion run failed"))
    }

    async fn run_sources(
        &self,
        kind: SourceKind,
        deadline: Option<RunDeadline>,
    ) -> Result<RunReport, IngestError> {
        let sources = self.sources.list_active(kind).await?;
        let reader = self.reader(kind);
        debug!(reader = %reader.kind(), count = sources.len(), "Dispatching sources");

        let mut outcomes: Vec<(usize, SourceOutcome)> = stream::iter(sources.into_iter().enumerate())
            .map(|(idx, source)| async move {
                (idx, self.process_source(reader, source, deadline).await)
            })
            .buffer_unordered(self.config.max_concurrent_sources)
            .collect()
            .await;
        outcomes.sort_by_key(|(idx, _)| *idx);

        let mut report = RunReport::empty(kind);
        for (_, outcome) in outcomes {
            report.absorb(outcome);
        }
        Ok(report)
    }

    fn reader(&self, kind: SourceKind) -> &dyn SourceReader {
        match kind {
            SourceKind::Rss => self.rss_reader.as_ref(),
            SourceKind::Scrape => self.scrape_reader.as_ref(),
        }
    }

    #[instrument(skip_all, fields(source = %source.name, source_id = source.id))]
    async fn process_source(
        &self,
        reader: &dyn SourceReader,
        source: Source,
        deadline: Option<RunDeadline>,
    ) -> SourceOutcome {
        let started = Instant::now();
        let mut outcome = SourceOutcome::new(&source.name);
        let mut discarded = 0;

        let work = self.ingest_source(reader, &source, &mut outcome, &mut discarded);
        match deadline {
            Some(deadline) => {
                if tokio::time::timeout_at(deadline.at, work).await.is_err() {
                    warn!(url = %source.url, "Run deadline reached, source abandoned");
                    outcome.record_error(IngestError::Timeout(deadline.limit_secs));
                }
            }
            None => work.await,
        }

        if let Err(e) = self
            .sources
            .mark_run(source.kind, source.id, Utc::now())
            .await
        {
            warn!(error = %e, "Failed to record source run time");
            outcome.record_error(IngestError::from(e));
        }

        metrics::record_source(
            source.kind,
            outcome.summary.items_inserted,
            discarded,
            outcome.errors.len(),
            started.elapsed(),
        );
        info!(
            considered = outcome.summary.items_considered,
            inserted = outcome.summary.items_inserted,
            discarded,
            "Source processed"
        );
        outcome
    }

    /// 读取一个来源并逐条入库，进度直接写入 `outcome`，被截止时间打断时已入库的计数保留
    async fn ingest_source(
        &self,
        reader: &dyn SourceReader,
        source: &Source,
        outcome: &mut SourceOutcome,
        discarded: &mut usize,
    ) {
        match reader.read(source, self.config.max_items_per_source).await {
            Ok(items) => {
                outcome.summary.items_considered = items.considered();
                *discarded = items.discarded;

                for candidate in items.candidates {
                    match self.store_candidate(source, candidate).await {
                        Ok(slug) => {
                            debug!(%slug, "Article inserted");
                            outcome.summary.items_inserted += 1;
                        }
                        Err(e) => {
                            warn!(error = %e, "Candidate could not be stored");
                            outcome.record_error(e);
                        }
                    }
                }
            }
            Err(e) => {
                warn!(url = %source.url, error = %e, "Source failed");
                outcome.record_error(e);
            }
        }
    }

    /// 规范化并插入一条候选，返回最终使用的 slug
    async fn store_candidate(
        &self,
        source: &Source,
        candidate: Candidate,
    ) -> Result<String, IngestError> {
        let base = slug_base(&candidate.title);
        let content = to_display_content(&candidate.body);
        let summary = excerpt(&candidate.body, self.config.excerpt_length);

        for attempt in 1..=MAX_INSERT_ATTEMPTS {
            let slug = self.next_free_slug(&base).await?;
            let article = NewArticle {
                title: candidate.title.clone(),
                slug: slug.clone(),
                content: content.clone(),
                excerpt: summary.clone(),
                category: source.category,
                source: source.name.clone(),
                source_url: candidate.link.clone(),
                image_url: candidate.image_url.clone(),
                author: self.config.default_author.clone(),
                status: ArticleStatus::Published,
                is_scraped: candidate.is_scraped,
            };

            match self.articles.insert(&article).await {
                Ok(_) => return Ok(slug),
                Err(RepositoryError::Conflict(_)) => {
                    debug!(%slug, attempt, "Slug claimed concurrently, probing again");
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(IngestError::Storage(format!(
            "could not claim a unique slug for '{}' after {} attempts",
            base, MAX_INSERT_ATTEMPTS
        )))
    }

    /// 依次探测 `base`、`base-1`、`base-2`……返回第一个未占用的值
    async fn next_free_slug(&self, base: &str) -> Result<String, IngestError> {
        if self.articles.find_by_slug(base).await?.is_none() {
            return Ok(base.to_string());
        }
        for n in 1..=MAX_SLUG_PROBES {
            let candidate = with_suffix(base, n);
            if self.articles.find_by_slug(&candidate).await?.is_none() {
                return Ok(candidate);
            }
        }
        Err(IngestError::Storage(format!(
            "no free slug for '{}' within {} probes",
            base, MAX_SLUG_PROBES
        )))
    }
}

/// 由标题得到基础 slug，空值回退为 `article`
pub fn slug_base(title: &str) -> String {
    let slug = slugify(title);
    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug
    }
}

/// 拼接数字后缀，必要时截短基础部分使总长不超过上限
pub fn with_suffix(base: &str, n: u32) -> String {
    let suffix = format!("-{}", n);
    let keep = MAX_SLUG_LEN.saturating_sub(suffix.len()).min(base.len());
    // slugify output is ASCII
    let head = base[..keep].trim_end_matches('-');
    format!("{}{}", head, suffix)
}

#[cfg(test)]
#[path = "ingestion_service_test.rs"]
mod tests;
