// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{add_rss_source, add_scrape_source, setup_db};
use chrono::{TimeZone, Utc};
use newsfront::domain::models::article::{ArticleStatus, Category, NewArticle};
use newsfront::domain::models::source::{SourceKind, DEFAULT_RSS_SOURCES, DEFAULT_SCRAPE_SOURCES};
use newsfront::domain::repositories::article_repository::{ArticleRepository, RepositoryError};
use newsfront::domain::repositories::source_repository::SourceRepository;
use newsfront::infrastructure::database::entities::{rss_source, scrape_source};
use newsfront::infrastructure::repositories::article_repo_impl::ArticleRepositoryImpl;
use newsfront::infrastructure::repositories::source_repo_impl::SourceRepositoryImpl;
use sea_orm::EntityTrait;

fn new_article(slug: &str) -> NewArticle {
    NewArticle {
        title: "Budget Reading".to_string(),
        slug: slug.to_string(),
        content: "<p>Body</p>".to_string(),
        excerpt: "Body".to_string(),
        category: Category::Business,
        source: "Graphic Online".to_string(),
        source_url: Some("https://www.graphic.com.gh/budget".to_string()),
        image_url: None,
        author: "Staff".to_string(),
        status: ArticleStatus::Published,
        is_scraped: false,
    }
}

#[tokio::test]
async fn test_article_insert_and_find_by_slug() {
    let db = setup_db().await;
    let repo = ArticleRepositoryImpl::new(db);

    let id = repo.insert(&new_article("budget-reading")).await.unwrap();
    let found = repo.find_by_slug("budget-reading").await.unwrap().unwrap();

    assert_eq!(found.id, id);
    assert_eq!(found.category, Category::Business);
    assert_eq!(found.status, ArticleStatus::Published);
    assert_eq!(found.excerpt.as_deref(), Some("Body"));
    assert_eq!(found.views, 0);
    assert!(!found.is_ai_rewritten);
    assert!(repo.find_by_slug("missing").await.unwrap().is_none());
}

#[tokio::test]
async fn test_article_duplicate_slug_is_conflict() {
    let db = setup_db().await;
    let repo = ArticleRepositoryImpl::new(db);

    repo.insert(&new_article("budget-reading")).await.unwrap();
    let err = repo.insert(&new_article("budget-reading")).await.unwrap_err();

    assert!(matches!(err, RepositoryError::Conflict(_)), "got {:?}", err);
    assert_eq!(repo.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_article_increment_views() {
    let db = setup_db().await;
    let repo = ArticleRepositoryImpl::new(db);

    let id = repo.insert(&new_article("views")).await.unwrap();
    repo.increment_views(id).await.unwrap();
    repo.increment_views(id).await.unwrap();

    assert_eq!(repo.find_by_slug("views").await.unwrap().unwrap().views, 2);
}

#[tokio::test]
async fn test_seed_defaults_only_fills_empty_tables() {
    let db = setup_db().await;
    let repo = SourceRepositoryImpl::new(db);

    let first = repo.seed_defaults().await.unwrap();
    assert_eq!(first.rss_inserted, DEFAULT_RSS_SOURCES.len() as u64);
    assert_eq!(first.scrape_inserted, DEFAULT_SCRAPE_SOURCES.len() as u64);

    let second = repo.seed_defaults().await.unwrap();
    assert_eq!(second.rss_inserted, 0);
    assert_eq!(second.scrape_inserted, 0);

    assert_eq!(
        repo.count(SourceKind::Rss).await.unwrap(),
        DEFAULT_RSS_SOURCES.len() as u64
    );
    assert_eq!(
        repo.count(SourceKind::Scrape).await.unwrap(),
        DEFAULT_SCRAPE_SOURCES.len() as u64
    );
}

#[tokio::test]
async fn test_seed_defaults_leaves_curated_registry_alone() {
    let db = setup_db().await;
    add_rss_source(&db, "Local", "http://localhost/feed", true).await;
    let repo = SourceRepositoryImpl::new(db);

    let outcome = repo.seed_defaults().await.unwrap();

    assert_eq!(outcome.rss_inserted, 0);
    assert_eq!(outcome.scrape_inserted, DEFAULT_SCRAPE_SOURCES.len() as u64);
    assert_eq!(repo.count(SourceKind::Rss).await.unwrap(), 1);
}

#[tokio::test]
async fn test_list_active_skips_inactive_sources() {
    let db = setup_db().await;
    add_rss_source(&db, "On", "http://localhost/on", true).await;
    add_rss_source(&db, "Off", "http://localhost/off", false).await;
    add_scrape_source(&db, "Page", "http://localhost/page").await;
    let repo = SourceRepositoryImpl::new(db);

    let rss = repo.list_active(SourceKind::Rss).await.unwrap();
    assert_eq!(rss.len(), 1);
    assert_eq!(rss[0].name, "On");
    assert_eq!(rss[0].kind, SourceKind::Rss);
    assert!(rss[0].selectors.is_none());

    let scrape = repo.list_active(SourceKind::Scrape).await.unwrap();
    assert_eq!(scrape.len(), 1);
    assert_eq!(scrape[0].category, Category::Sports);
    let selectors = scrape[0].selectors.as_ref().unwrap();
    assert_eq!(selectors.article, "article");
    assert_eq!(selectors.title, "h1, h2");
}

#[tokio::test]
async fn test_mark_run_writes_kind_specific_timestamp() {
    let db = setup_db().await;
    let rss_id = add_rss_source(&db, "Feed", "http://localhost/feed", true).await;
    let scrape_id = add_scrape_source(&db, "Page", "http://localhost/page").await;
    let repo = SourceRepositoryImpl::new(db.clone());
    let at = Utc.with_ymd_and_hms(2026, 3, 1, 8, 30, 0).unwrap();

    repo.mark_run(SourceKind::Rss, rss_id, at).await.unwrap();
    repo.mark_run(SourceKind::Scrape, scrape_id, at).await.unwrap();

    let feed = rss_source::Entity::find_by_id(rss_id)
        .one(db.as_ref())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(feed.last_fetched.map(|t| t.with_timezone(&Utc)), Some(at));

    let page = scrape_source::Entity::find_by_id(scrape_id)
        .one(db.as_ref())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(page.last_scraped.map(|t| t.with_timezone(&Utc)), Some(at));
}

#[tokio::test]
async fn test_mark_run_unknown_source_is_not_found() {
    let db = setup_db().await;
    let repo = SourceRepositoryImpl::new(db);

    let err = repo
        .mark_run(SourceKind::Rss, 999, Utc::now())
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound));
}
