// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum_test::TestServer;
use chrono::Utc;
use newsfront::config::settings::Settings;
use newsfront::domain::models::article::Category;
use newsfront::infrastructure::database::connection;
use newsfront::infrastructure::database::entities::{rss_source, scrape_source};
use newsfront::presentation::routes::{self, AppServices};
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};
use std::sync::Arc;

#[allow(dead_code)]
pub struct TestApp {
    pub server: TestServer,
    pub db: Arc<DatabaseConnection>,
    pub services: AppServices,
}

/// 内存 SQLite，单连接保证所有查询落在同一个库上
pub async fn setup_db() -> Arc<DatabaseConnection> {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opt).await.unwrap();
    connection::run_migrations(&db).await.unwrap();
    Arc::new(db)
}

/// 在默认配置上叠加额外的 TOML 片段
pub fn test_settings(extra: &str) -> Settings {
    let toml = format!(
        r#"
        [database]
        url = "sqlite::memory:"

        [ingest]
        fetch_timeout_secs = 5
        run_timeout_secs = 30

        {}
        "#,
        extra
    );
    Settings::from_toml_str(&toml).unwrap()
}

pub async fn create_test_app(extra_settings: &str) -> TestApp {
    let db = setup_db().await;
    let settings = test_settings(extra_settings);
    let services = AppServices::from_settings(&settings, db.clone()).unwrap();
    let server = TestServer::new(routes::routes(services.clone())).unwrap();

    TestApp {
        server,
        db,
        services,
    }
}

pub async fn add_rss_source(db: &DatabaseConnection, name: &str, url: &str, active: bool) -> i32 {
    rss_source::ActiveModel {
        name: Set(name.to_string()),
        url: Set(url.to_string()),
        category: Set(Category::General.to_string()),
        active: Set(active),
        last_fetched: Set(None),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
    .id
}

pub async fn add_scrape_source(db: &DatabaseConnection, name: &str, url: &str) -> i32 {
    scrape_source::ActiveModel {
        name: Set(name.to_string()),
        url: Set(url.to_string()),
        category: Set(Category::Sports.to_string()),
        article_selector: Set("article".to_string()),
        title_selector: Set("h1, h2".to_string()),
        content_selector: Set("p".to_string()),
        image_selector: Set("img".to_string()),
        active: Set(true),
        last_scraped: Set(None),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
    .id
}

/// 生成一个 RSS 2.0 文档
pub fn rss_feed(items: &[(&str, &str)]) -> String {
    let items: String = items
        .iter()
        .enumerate()
        .map(|(i, (title, body))| {
            format!(
                "<item><title>{}</title><link>https://news.example.com/{}</link><description><![CDATA[{}]]></description></item>",
                title, i, body
            )
        })
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><rss version="2.0"><channel><title>Test</title><link>https://news.example.com</link><description>Test feed</description>{}</channel></rss>"#,
        items
    )
}

/// 生成一个包含若干 `<article>` 的页面，`None` 标题生成空标题
pub fn scrape_page(items: &[(Option<&str>, &str)]) -> String {
    let articles: String = items
        .iter()
        .map(|(title, body)| {
            format!(
                "<article><h2>{}</h2><p>{}</p></article>",
                title.unwrap_or(""),
                body
            )
        })
        .collect();
    format!("<html><body>{}</body></html>", articles)
}
