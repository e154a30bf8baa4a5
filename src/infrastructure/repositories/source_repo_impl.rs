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

use crate::domain::models::article::Category;
use crate::domain::models::source::{
    ScrapeSelectors, Source, SourceKind, DEFAULT_RSS_SOURCES, DEFAULT_SCRAPE_SOURCES,
};
use crate::domain::repositories::article_repository::RepositoryError;
use crate::domain::repositories::source_repository::{SeedOutcome, SourceRepository};
use crate::infrastructure::database::entities::{rss_source, scrape_source};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{sea_query::OnConflict, *};
use std::sync::Arc;
use tracing::info;

/// 来源仓库实现
///
/// RSS 与抓取源分表存储，对外统一为 [`Source`]
pub struct SourceRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl SourceRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    async fn seed_rss(&self) -> Result<u64, RepositoryError> {
        if rss_source::Entity::find().count(self.db.as_ref()).await? > 0 {
            return Ok(0);
        }
        let now = Utc::now();
        let models = DEFAULT_RSS_SOURCES.iter().map(|d| rss_source::ActiveModel {
            id: NotSet,
            name: Set(d.name.to_string()),
            url: Set(d.url.to_string()),
            category: Set(d.category.to_string()),
            active: Set(true),
            last_fetched: Set(None),
            created_at: Set(now.into()),
        });

        let inserted = rss_source::Entity::insert_many(models)
            .on_conflict(
                OnConflict::column(rss_source::Column::Url)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(self.db.as_ref())
            .await?;
        Ok(inserted)
    }

    async fn seed_scrape(&self) -> Result<u64, RepositoryError> {
        if scrape_source::Entity::find().count(self.db.as_ref()).await? > 0 {
            return Ok(0);
        }
        let now = Utc::now();
        let defaults = ScrapeSelectors::default();
        let models = DEFAULT_SCRAPE_SOURCES.iter().map(|d| scrape_source::ActiveModel {
            id: NotSet,
            name: Set(d.name.to_string()),
            url: Set(d.url.to_string()),
            category: Set(d.category.to_string()),
            article_selector: Set(defaults.article.clone()),
            title_selector: Set(defaults.title.clone()),
            content_selector: Set(defaults.content.clone()),
            image_selector: Set(defaults.image.clone()),
            active: Set(true),
            last_scraped: Set(None),
            created_at: Set(now.into()),
        });

        let inserted = scrape_source::Entity::insert_many(models)
            .on_conflict(
                OnConflict::column(scrape_source::Column::Url)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(self.db.as_ref())
            .await?;
        Ok(inserted)
    }
}

fn rss_to_domain(m: rss_source::Model) -> Source {
    Source {
        id: m.id,
        kind: SourceKind::Rss,
        name: m.name,
        url: m.url,
        category: Category::parse(&m.category),
        active: m.active,
        last_run_at: m.last_fetched.map(|t| t.with_timezone(&Utc)),
        selectors: None,
    }
}

fn scrape_to_domain(m: scrape_source::Model) -> Source {
    Source {
        id: m.id,
        kind: SourceKind::Scrape,
        name: m.name,
        url: m.url,
        category: Category::parse(&m.category),
        active: m.active,
        last_run_at: m.last_scraped.map(|t| t.with_timezone(&Utc)),
        selectors: Some(ScrapeSelectors {
            article: m.article_selector,
            title: m.title_selector,
            content: m.content_selector,
            image: m.image_selector,
        }),
    }
}

#[async_trait]
impl SourceRepository for SourceRepositoryImpl {
    async fn list_active(&self, kind: SourceKind) -> Result<Vec<Source>, RepositoryError> {
        let sources = match kind {
            SourceKind::Rss => rss_source::Entity::find()
                .filter(rss_source::Column::Active.eq(true))
                .order_by_asc(rss_source::Column::Id)
                .all(self.db.as_ref())
                .await?
                .into_iter()
                .map(rss_to_domain)
                .collect(),
            SourceKind::Scrape => scrape_source::Entity::find()
                .filter(scrape_source::Column::Active.eq(true))
                .order_by_asc(scrape_source::Column::Id)
                .all(self.db.as_ref())
                .await?
                .into_iter()
                .map(scrape_to_domain)
                .collect(),
        };
        Ok(sources)
    }

    async fn mark_run(
        &self,
        kind: SourceKind,
        source_id: i32,
        at: DateTime<Utc>,
    ) -> Result<(), RepositoryError> {
        let result = match kind {
            SourceKind::Rss => {
                rss_source::Entity::update_many()
                    .set(rss_source::ActiveModel {
                        last_fetched: Set(Some(at.into())),
                        ..Default::default()
                    })
                    .filter(rss_source::Column::Id.eq(source_id))
                    .exec(self.db.as_ref())
                    .await?
            }
            SourceKind::Scrape => {
                scrape_source::Entity::update_many()
                    .set(scrape_source::ActiveModel {
                        last_scraped: Set(Some(at.into())),
                        ..Default::default()
                    })
                    .filter(scrape_source::Column::Id.eq(source_id))
                    .exec(self.db.as_ref())
                    .await?
            }
        };

        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn seed_defaults(&self) -> Result<SeedOutcome, RepositoryError> {
        let outcome = SeedOutcome {
            rss_inserted: self.seed_rss().await?,
            scrape_inserted: self.seed_scrape().await?,
        };
        if outcome.rss_inserted + outcome.scrape_inserted > 0 {
            info!(
                rss = outcome.rss_inserted,
                scrape = outcome.scrape_inserted,
                "Seeded default sources"
            );
        }
        Ok(outcome)
    }

    async fn count(&self, kind: SourceKind) -> Result<u64, RepositoryError> {
        let total = match kind {
            SourceKind::Rss => rss_source::Entity::find().count(self.db.as_ref()).await?,
            SourceKind::Scrape => scrape_source::Entity::find().count(self.db.as_ref()).await?,
        };
        Ok(total)
    }
}
