// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::*;
use crate::domain::ingest::source_reader::SourceReader;
use crate::domain::models::article::{Article, NewArticle};
use crate::domain::models::candidate::SourceItems;
use crate::domain::models::source::{Source, SourceKind};
use crate::domain::repositories::article_repository::{ArticleRepository, RepositoryError};
use crate::domain::repositories::source_repository::{SeedOutcome, SourceRepository};
use crate::domain::services::ingestion_service::IngestConfig;
use crate::utils::errors::IngestError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicUsize, Ordering};

/// 只记录 `list_active` 调用次数的空来源仓库
#[derive(Default)]
struct CountingSources {
    listed: AtomicUsize,
}

#[async_trait]
impl SourceRepository for CountingSources {
    async fn list_active(&self, _kind: SourceKind) -> Result<Vec<Source>, RepositoryError> {
        self.listed.fetch_add(1, Ordering::SeqCst);
        Ok(Vec::new())
    }

    async fn mark_run(
        &self,
        _kind: SourceKind,
        _source_id: i32,
        _at: DateTime<Utc>,
    ) -> Result<(), RepositoryError> {
        Ok(())
    }

    async fn seed_defaults(&self) -> Result<SeedOutcome, RepositoryError> {
        Ok(SeedOutcome::default())
    }

    async fn count(&self, _kind: SourceKind) -> Result<u64, RepositoryError> {
        Ok(0)
    }
}

struct NoArticles;

#[async_trait]
impl ArticleRepository for NoArticles {
    async fn find_by_slug(&self, _slug: &str) -> Result<Option<Article>, RepositoryError> {
        Ok(None)
    }

    async fn insert(&self, _article: &NewArticle) -> Result<i32, RepositoryError> {
        Ok(1)
    }

    async fn increment_views(&self, _id: i32) -> Result<(), RepositoryError> {
        Ok(())
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        Ok(0)
    }
}

struct EmptyReader(SourceKind);

#[async_trait]
impl SourceReader for EmptyReader {
    async fn read(&self, _source: &Source, _max_items: usize) -> Result<SourceItems, IngestError> {
        Ok(SourceItems::default())
    }

    fn kind(&self) -> SourceKind {
        self.0
    }
}

#[tokio::test(start_paused = true)]
async fn test_scheduler_runs_both_pipelines_each_tick() {
    let sources = Arc::new(CountingSources::default());
    let service = Arc::new(IngestionService::new(
        Arc::new(NoArticles),
        sources.clone(),
        Arc::new(EmptyReader(SourceKind::Rss)),
        Arc::new(EmptyReader(SourceKind::Scrape)),
        IngestConfig::default(),
    ));

    let handle = IngestScheduler::new(service, Duration::from_secs(60)).start();

    // First tick fires immediately, then one per interval
    tokio::time::sleep(Duration::from_secs(125)).await;
    handle.abort();

    assert_eq!(sources.listed.load(Ordering::SeqCst), 6);
}
