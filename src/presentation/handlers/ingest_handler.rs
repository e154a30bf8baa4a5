// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use axum::{
    extract::{Extension, Json},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tracing::error;

use crate::domain::models::run_report::{IngestionSummary, RunReport};
use crate::domain::services::ingestion_service::IngestionService;
use crate::utils::errors::IngestError;

#[derive(Serialize)]
struct CronResponse {
    success: bool,
    #[serde(flatten)]
    report: RunReport,
    timestamp: DateTime<Utc>,
}

#[derive(Serialize)]
struct CronAllResponse {
    success: bool,
    #[serde(flatten)]
    summary: IngestionSummary,
    timestamp: DateTime<Utc>,
}

/// 运行 RSS 子管线
pub async fn run_rss(Extension(service): Extension<Arc<IngestionService>>) -> Response {
    single_run_response(service.run_rss_ingestion().await)
}

/// 运行网页抓取子管线
pub async fn run_scrape(Extension(service): Extension<Arc<IngestionService>>) -> Response {
    single_run_response(service.run_scrape_ingestion().await)
}

/// 同时运行两条子管线
///
/// 部分失败不改变状态码，失败的一侧以 `{"error": ...}` 出现在响应体中
pub async fn run_all(Extension(service): Extension<Arc<IngestionService>>) -> Response {
    let summary = service.run_all().await;
    Json(CronAllResponse {
        success: true,
        summary,
        timestamp: Utc::now(),
    })
    .into_response()
}

fn single_run_response(result: Result<RunReport, IngestError>) -> Response {
    match result {
        Ok(report) => Json(CronResponse {
            success: true,
            report,
            timestamp: Utc::now(),
        })
        .into_response(),
        Err(e) => {
            error!("Ingestion run failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "success": false, "error": e.to_string() })),
            )
                .into_response()
        }
    }
}
