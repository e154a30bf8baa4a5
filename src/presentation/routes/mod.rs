// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::Settings;
use crate::domain::repositories::source_repository::SourceRepository;
use crate::domain::services::article_service::ArticleService;
use crate::domain::services::ingestion_service::{IngestConfig, IngestionService};
use crate::engines::reqwest_engine::ReqwestEngine;
use crate::engines::traits::FetchEngine;
use crate::infrastructure::repositories::article_repo_impl::ArticleRepositoryImpl;
use crate::infrastructure::repositories::source_repo_impl::SourceRepositoryImpl;
use crate::infrastructure::sources::rss_fetcher::RssFetcher;
use crate::infrastructure::sources::web_scraper::WebScraper;
use crate::presentation::handlers::{article_handler, ingest_handler, init_handler};
use crate::presentation::middleware::trigger_auth::{trigger_auth_middleware, TriggerAuth};
use crate::utils::errors::IngestError;
use axum::{middleware, routing::get, Extension, Router};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;

/// 路由依赖的服务
#[derive(Clone)]
pub struct AppServices {
    pub ingestion: Arc<IngestionService>,
    pub articles: Arc<ArticleService>,
    pub sources: Arc<dyn SourceRepository>,
    pub trigger_auth: Arc<TriggerAuth>,
}

impl AppServices {
    /// 按配置装配全部服务
    ///
    /// # 返回值
    ///
    /// * `Ok(AppServices)` - 装配完成
    /// * `Err(IngestError::Config)` - 触发授权配置非法或 HTTP 客户端无法构建
    pub fn from_settings(
        settings: &Settings,
        db: Arc<DatabaseConnection>,
    ) -> Result<Self, IngestError> {
        let trigger_auth = Arc::new(TriggerAuth::from_settings(&settings.trigger)?);

        let engine: Arc<dyn FetchEngine> = Arc::new(
            ReqwestEngine::new(&settings.ingest.user_agent)
                .map_err(|e| IngestError::Config(format!("http client: {}", e)))?,
        );
        let fetch_timeout = Duration::from_secs(settings.ingest.fetch_timeout_secs);

        let article_repo = Arc::new(ArticleRepositoryImpl::new(db.clone()));
        let source_repo: Arc<dyn SourceRepository> = Arc::new(SourceRepositoryImpl::new(db));

        let ingestion = Arc::new(IngestionService::new(
            article_repo.clone(),
            source_repo.clone(),
            Arc::new(RssFetcher::new(engine.clone(), fetch_timeout)),
            Arc::new(WebScraper::new(engine, fetch_timeout)),
            IngestConfig::from(&settings.ingest),
        ));

        Ok(Self {
            ingestion,
            articles: Arc::new(ArticleService::new(article_repo)),
            sources: source_repo,
            trigger_auth,
        })
    }
}

/// 创建应用路由
///
/// 触发端点（`/api/cron/*`、`/api/init`）受 [`TriggerAuth`] 保护，其余公开
pub fn routes(services: AppServices) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/v1/version", get(version))
        .route("/api/articles/{slug}", get(article_handler::get_article));

    let trigger_routes = Router::new()
        .route(
            "/api/cron/rss",
            get(ingest_handler::run_rss).post(ingest_handler::run_rss),
        )
        .route(
            "/api/cron/scrape",
            get(ingest_handler::run_scrape).post(ingest_handler::run_scrape),
        )
        .route(
            "/api/cron/all",
            get(ingest_handler::run_all).post(ingest_handler::run_all),
        )
        .route("/api/init", get(init_handler::init))
        .layer(middleware::from_fn_with_state(
            services.trigger_auth.clone(),
            trigger_auth_middleware,
        ));

    Router::new()
        .merge(public_routes)
        .merge(trigger_routes)
        .layer(Extension(services.ingestion))
        .layer(Extension(services.articles))
        .layer(Extension(services.sources))
        .layer(TraceLayer::new_for_http())
}

/// 健康检查端点
///
/// # 返回值
///
/// 返回"OK"字符串
pub async fn health_check() -> &'static str {
    "OK"
}

/// 版本信息端点
///
/// # 返回值
///
/// 返回应用版本号
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
