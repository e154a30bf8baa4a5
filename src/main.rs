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

use newsfront::config::settings::Settings;
use newsfront::infrastructure::database::connection;
use newsfront::infrastructure::metrics;
use newsfront::presentation::routes::{self, AppServices};
use newsfront::utils::telemetry;
use newsfront::workers::ingest_scheduler::IngestScheduler;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::info;

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting newsfront...");

    // 2. Load configuration
    let settings = Arc::new(Settings::new()?);
    info!("Configuration loaded");

    metrics::init_metrics(&settings.metrics);

    // 3. Connect to database
    let db = connection::create_pool(&settings.database).await?;
    let db = Arc::new(db);
    info!("Database connection established");

    info!("Running database migrations...");
    connection::run_migrations(db.as_ref()).await?;
    info!("Database migrations applied");

    // 4. Wire services
    let services = AppServices::from_settings(&settings, db.clone())?;
    info!(mode = %settings.trigger.mode, "Trigger authorization configured");

    let seeded = services.sources.seed_defaults().await?;
    info!(
        rss = seeded.rss_inserted,
        scrape = seeded.scrape_inserted,
        "Source registry ready"
    );

    // 5. Optional in-process scheduler
    if settings.ingest.schedule_interval_secs > 0 {
        IngestScheduler::new(
            services.ingestion.clone(),
            Duration::from_secs(settings.ingest.schedule_interval_secs),
        )
        .start();
    }

    // 6. Start HTTP server
    let app = routes::routes(services);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
