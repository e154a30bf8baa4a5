// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{add_rss_source, create_test_app, rss_feed};
use axum::http::StatusCode;
use newsfront::domain::models::article::{ArticleStatus, Category, NewArticle};
use newsfront::domain::models::source::{DEFAULT_RSS_SOURCES, DEFAULT_SCRAPE_SOURCES};
use newsfront::domain::repositories::article_repository::ArticleRepository;
use newsfront::infrastructure::repositories::article_repo_impl::ArticleRepositoryImpl;
use sea_orm::ConnectionTrait;
use serde_json::Value;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SHARED_SECRET: &str = r#"
[trigger]
mode = "shared_secret"
secret = "s3cret"
"#;

const TRUSTED_SCHEDULER: &str = r#"
[trigger]
mode = "trusted_scheduler"
scheduler_header = "x-vercel-cron"
scheduler_value = "1"
"#;

fn article(slug: &str, status: ArticleStatus) -> NewArticle {
    NewArticle {
        title: "Readable".to_string(),
        slug: slug.to_string(),
        content: "<p>Readable</p>".to_string(),
        excerpt: "Readable".to_string(),
        category: Category::Health,
        source: "Desk".to_string(),
        source_url: None,
        image_url: None,
        author: "Staff".to_string(),
        status,
        is_scraped: false,
    }
}

#[tokio::test]
async fn test_health_and_version_are_public() {
    let app = create_test_app(SHARED_SECRET).await;

    let response = app.server.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.text(), "OK");

    let response = app.server.get("/v1/version").await;
    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_cron_rss_reports_run() {
    let app = create_test_app("").await;
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(
                rss_feed(&[("Cedi Gains Against Dollar", "Markets rallied.")]),
                "application/rss+xml",
            ),
        )
        .mount(&mock)
        .await;
    add_rss_source(&app.db, "Markets", &format!("{}/feed", mock.uri()), true).await;

    let response = app.server.get("/api/cron/rss").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["success"], true);
    assert_eq!(body["kind"], "rss");
    assert_eq!(body["sourcesProcessed"], 1);
    assert_eq!(body["articlesInserted"], 1);
    assert_eq!(body["perSourceErrors"].as_array().unwrap().len(), 0);
    assert_eq!(body["sources"][0]["itemsConsidered"], 1);
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_cron_scrape_with_empty_registry() {
    let app = create_test_app("").await;

    let response = app.server.post("/api/cron/scrape").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["success"], true);
    assert_eq!(body["sourcesProcessed"], 0);
    assert_eq!(body["articlesInserted"], 0);
}

#[tokio::test]
async fn test_cron_all_survives_one_failed_pipeline() {
    let app = create_test_app("").await;
    app.db
        .execute_unprepared("DROP TABLE rss_sources")
        .await
        .unwrap();

    let response = app.server.get("/api/cron/all").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["success"], true);
    assert!(body["rss"]["error"].is_string());
    assert_eq!(body["scrape"]["sourcesProcessed"], 0);

    let response = app.server.get("/api/cron/rss").await;
    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.json::<Value>();
    assert_eq!(body["success"], false);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_shared_secret_guards_trigger_routes() {
    let app = create_test_app(SHARED_SECRET).await;

    for route in ["/api/cron/rss", "/api/cron/scrape", "/api/cron/all", "/api/init"] {
        let response = app.server.get(route).await;
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED, "{}", route);
    }

    let response = app
        .server
        .get("/api/cron/rss")
        .add_header("Authorization", "Bearer wrong")
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<Value>()["error"], "Unauthorized");

    let response = app
        .server
        .get("/api/cron/rss")
        .add_header("Authorization", "Bearer s3cret")
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_trusted_scheduler_header_is_accepted() {
    let app = create_test_app(TRUSTED_SCHEDULER).await;

    let response = app.server.get("/api/cron/all").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let response = app
        .server
        .get("/api/cron/all")
        .add_header("x-vercel-cron", "1")
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_init_seeds_once_and_reports_stats() {
    let app = create_test_app("").await;

    let response = app.server.get("/api/init").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["success"], true);
    assert_eq!(body["seeded"]["rss_sources"], DEFAULT_RSS_SOURCES.len());
    assert_eq!(body["seeded"]["scrape_sources"], DEFAULT_SCRAPE_SOURCES.len());
    assert_eq!(body["stats"]["articles"], 0);
    assert_eq!(body["stats"]["rss_sources"], DEFAULT_RSS_SOURCES.len());

    let body = app.server.get("/api/init").await.json::<Value>();
    assert_eq!(body["seeded"]["rss_sources"], 0);
    assert_eq!(body["seeded"]["scrape_sources"], 0);
    assert_eq!(body["stats"]["scrape_sources"], DEFAULT_SCRAPE_SOURCES.len());
}

#[tokio::test]
async fn test_get_article_counts_views() {
    let app = create_test_app("").await;
    let repo = ArticleRepositoryImpl::new(app.db.clone());
    repo.insert(&article("readable", ArticleStatus::Published))
        .await
        .unwrap();

    let response = app.server.get("/api/articles/readable").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["slug"], "readable");
    assert_eq!(body["category"], "health");
    assert_eq!(repo.find_by_slug("readable").await.unwrap().unwrap().views, 1);
}

#[tokio::test]
async fn test_get_article_hides_missing_and_unpublished() {
    let app = create_test_app("").await;
    let repo = ArticleRepositoryImpl::new(app.db.clone());
    repo.insert(&article("draft-piece", ArticleStatus::Draft))
        .await
        .unwrap();

    let response = app.server.get("/api/articles/draft-piece").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    let response = app.server.get("/api/articles/nothing-here").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    assert_eq!(repo.find_by_slug("draft-piece").await.unwrap().unwrap().views, 0);
}
