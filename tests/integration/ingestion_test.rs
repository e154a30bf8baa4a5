// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{add_rss_source, add_scrape_source, create_test_app, rss_feed, scrape_page};
use newsfront::domain::models::article::Category;
use newsfront::domain::repositories::article_repository::ArticleRepository;
use newsfront::infrastructure::database::entities::rss_source;
use newsfront::infrastructure::repositories::article_repo_impl::ArticleRepositoryImpl;
use sea_orm::EntityTrait;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn serve(server: &MockServer, route: &str, body: String, content_type: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, content_type))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_rss_run_assigns_suffixed_slugs_across_runs() {
    let app = create_test_app("").await;
    let mock = MockServer::start().await;
    serve(
        &mock,
        "/feed",
        rss_feed(&[
            ("Same Title", "<p>First telling</p>"),
            ("Same Title", "Second telling"),
            ("Other Story", "Plain body\n\nSecond paragraph"),
        ]),
        "application/rss+xml",
    )
    .await;
    add_rss_source(&app.db, "Feed", &format!("{}/feed", mock.uri()), true).await;

    let first = app.services.ingestion.run_rss_ingestion().await.unwrap();
    assert_eq!(first.sources_processed, 1);
    assert_eq!(first.articles_inserted, 3);
    assert!(first.per_source_errors.is_empty());

    let second = app.services.ingestion.run_rss_ingestion().await.unwrap();
    assert_eq!(second.articles_inserted, 3);

    let repo = ArticleRepositoryImpl::new(app.db.clone());
    for slug in [
        "same-title",
        "same-title-1",
        "same-title-2",
        "same-title-3",
        "other-story",
        "other-story-1",
    ] {
        assert!(
            repo.find_by_slug(slug).await.unwrap().is_some(),
            "missing {}",
            slug
        );
    }
    assert_eq!(repo.count().await.unwrap(), 6);

    let other = repo.find_by_slug("other-story").await.unwrap().unwrap();
    assert_eq!(other.content, "<p>Plain body</p>\n<p>Second paragraph</p>");
    assert_eq!(other.excerpt.as_deref(), Some("Plain body Second paragraph"));
    assert_eq!(other.source.as_deref(), Some("Feed"));
    assert_eq!(other.category, Category::General);
    assert_eq!(other.author, "Staff");
    assert!(!other.is_scraped);

    let first_telling = repo.find_by_slug("same-title").await.unwrap().unwrap();
    assert_eq!(first_telling.content, "<p>First telling</p>");
}

#[tokio::test]
async fn test_failing_source_does_not_stop_the_run() {
    let app = create_test_app("").await;
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock)
        .await;
    serve(
        &mock,
        "/good",
        rss_feed(&[("Healthy Feed Story", "Body")]),
        "application/rss+xml",
    )
    .await;
    let broken_id = add_rss_source(&app.db, "Broken", &format!("{}/broken", mock.uri()), true).await;
    add_rss_source(&app.db, "Good", &format!("{}/good", mock.uri()), true).await;

    let report = app.services.ingestion.run_rss_ingestion().await.unwrap();

    assert_eq!(report.sources_processed, 2);
    assert_eq!(report.articles_inserted, 1);
    assert_eq!(report.per_source_errors.len(), 1);
    assert_eq!(report.per_source_errors[0].source, "Broken");
    assert_eq!(report.sources[0].source, "Broken");
    assert_eq!(report.sources[1].items_inserted, 1);

    let broken = rss_source::Entity::find_by_id(broken_id)
        .one(app.db.as_ref())
        .await
        .unwrap()
        .unwrap();
    assert!(broken.last_fetched.is_some());
}

#[tokio::test]
async fn test_inactive_sources_are_never_fetched() {
    let app = create_test_app("").await;
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock)
        .await;
    add_rss_source(&app.db, "Paused", &format!("{}/feed", mock.uri()), false).await;

    let report = app.services.ingestion.run_rss_ingestion().await.unwrap();

    assert_eq!(report.sources_processed, 0);
    assert_eq!(report.articles_inserted, 0);
}

#[tokio::test]
async fn test_scrape_run_discards_untitled_elements() {
    let app = create_test_app("").await;
    let mock = MockServer::start().await;
    serve(
        &mock,
        "/news",
        scrape_page(&[
            (Some("Black Stars Qualify"), "The team won 2-0."),
            (None, "Orphan paragraph"),
        ]),
        "text/html",
    )
    .await;
    let page_url = format!("{}/news", mock.uri());
    add_scrape_source(&app.db, "Sports Desk", &page_url).await;

    let report = app.services.ingestion.run_scrape_ingestion().await.unwrap();

    assert_eq!(report.articles_inserted, 1);
    assert_eq!(report.sources[0].items_considered, 2);
    assert!(report.per_source_errors.is_empty());

    let repo = ArticleRepositoryImpl::new(app.db.clone());
    let article = repo
        .find_by_slug("black-stars-qualify")
        .await
        .unwrap()
        .unwrap();
    assert!(article.is_scraped);
    assert_eq!(article.category, Category::Sports);
    assert_eq!(article.source_url.as_deref(), Some(page_url.as_str()));
    assert_eq!(article.content, "<p>The team won 2-0.</p>");
    assert_eq!(repo.count().await.unwrap(), 1);
}
