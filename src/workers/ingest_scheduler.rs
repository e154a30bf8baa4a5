// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::services::ingestion_service::IngestionService;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

/// 进程内采集调度器
///
/// 按固定间隔调用 `run_all`，上一次运行未结束时跳过错过的触发
pub struct IngestScheduler {
    service: Arc<IngestionService>,
    interval: Duration,
}

impl IngestScheduler {
    pub fn new(service: Arc<IngestionService>, interval: Duration) -> Self {
        Self { service, interval }
    }

    /// 运行调度循环
    pub async fn run(&self) {
        info!(
            interval_secs = self.interval.as_secs(),
            "Ingest scheduler started"
        );

        let mut interval = tokio::time::interval(self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            interval.tick().await;

            let summary = self.service.run_all().await;
            for (kind, outcome) in [("rss", &summary.rss), ("scrape", &summary.scrape)] {
                if let Err(e) = outcome {
                    warn!(kind, error = %e, "Scheduled ingestion failed");
                }
            }
            info!(
                inserted = summary.articles_inserted(),
                "Scheduled ingestion finished"
            );
        }
    }

    /// 启动后台运行
    pub fn start(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            self.run().await;
        })
    }
}

#[cfg(test)]
#[path = "ingest_scheduler_test.rs"]
mod tests;
