// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::MetricsSettings;
use crate::domain::models::source::SourceKind;
use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Duration;
use tracing::{info, warn};

pub const INGEST_RUNS_TOTAL: &str = "ingest_runs_total";
pub const INGEST_ARTICLES_INSERTED_TOTAL: &str = "ingest_articles_inserted_total";
pub const INGEST_SOURCE_ERRORS_TOTAL: &str = "ingest_source_errors_total";
pub const INGEST_ITEMS_DISCARDED_TOTAL: &str = "ingest_items_discarded_total";
pub const INGEST_SOURCE_DURATION_MS: &str = "ingest_source_duration_ms";

/// 启动 Prometheus 导出器并注册指标说明
///
/// 未启用时不安装记录器，宏调用为空操作
pub fn init_metrics(settings: &MetricsSettings) {
    if !settings.enabled {
        return;
    }

    let addr: SocketAddr = match settings.listen_addr.parse() {
        Ok(addr) => addr,
        Err(e) => {
            warn!(
                "Invalid metrics address '{}': {}. Metrics exporter disabled.",
                settings.listen_addr, e
            );
            return;
        }
    };

    // Ignore error if address is already in use (for development/testing)
    if let Err(e) = PrometheusBuilder::new().with_http_listener(addr).install() {
        warn!("Failed to install Prometheus recorder: {}. This might happen if the port is already in use.", e);
        return;
    }

    describe_metrics();
    info!("Metrics exporter listening on {}", addr);
}

fn describe_metrics() {
    describe_counter!(INGEST_RUNS_TOTAL, "Ingestion sub-pipeline runs started");
    describe_counter!(
        INGEST_ARTICLES_INSERTED_TOTAL,
        "Articles inserted by the ingestion pipeline"
    );
    describe_counter!(
        INGEST_SOURCE_ERRORS_TOTAL,
        "Source or candidate failures recorded in run reports"
    );
    describe_counter!(
        INGEST_ITEMS_DISCARDED_TOTAL,
        "Feed or page items discarded for missing title or body"
    );
    describe_histogram!(
        INGEST_SOURCE_DURATION_MS,
        "Time spent processing a single source in milliseconds"
    );
}

pub fn record_run(kind: SourceKind) {
    counter!(INGEST_RUNS_TOTAL, "kind" => kind.to_string()).increment(1);
}

pub fn record_source(
    kind: SourceKind,
    inserted: usize,
    discarded: usize,
    errors: usize,
    elapsed: Duration,
) {
    let kind = kind.to_string();
    counter!(INGEST_ARTICLES_INSERTED_TOTAL, "kind" => kind.clone()).increment(inserted as u64);
    counter!(INGEST_ITEMS_DISCARDED_TOTAL, "kind" => kind.clone()).increment(discarded as u64);
    counter!(INGEST_SOURCE_ERRORS_TOTAL, "kind" => kind.clone()).increment(errors as u64);
    histogram!(INGEST_SOURCE_DURATION_MS, "kind" => kind).record(elapsed.as_millis() as f64);
}
