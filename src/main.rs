// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use skygraph::application::use_cases::engagement_charts::EngagementChartsUseCase;
use skygraph::config::settings::Settings;
use skygraph::domain::charts::ChartRenderer;
use skygraph::domain::repositories::storage_repository::StorageRepository;
use skygraph::domain::social::client::SocialClient;
use skygraph::infrastructure::bluesky::BlueskyClient;
use skygraph::infrastructure::charts::SvgChartRenderer;
use skygraph::infrastructure::storage::LocalStorage;
use skygraph::presentation::routes;
use skygraph::utils::telemetry;
use skygraph::workers::chart_retention_worker::ChartRetentionWorker;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting skygraph...");

    // 2. Load configuration
    let settings = Settings::new()?;
    info!("Configuration loaded");

    // 3. Initialize Prometheus Metrics
    skygraph::infrastructure::metrics::init_metrics(&settings.metrics)?;

    // 4. Initialize Components
    let bluesky = Arc::new(BlueskyClient::new(&settings.bluesky)?);
    match bluesky.login().await {
        Ok(()) => info!("Bluesky session established"),
        // The server still starts; every request retries the login.
        Err(e) => warn!("Bluesky login failed at startup: {}", e),
    }

    let client: Arc<dyn SocialClient> = bluesky;
    let renderer: Arc<dyn ChartRenderer> = Arc::new(SvgChartRenderer::new(&settings.chart));
    let local_storage = LocalStorage::new(&settings.storage.local_path);
    info!("Chart storage at {}", local_storage.base_path().display());
    let storage: Arc<dyn StorageRepository> = Arc::new(local_storage);

    ChartRetentionWorker::new(storage.clone(), &settings.storage).start();

    let use_case = Arc::new(EngagementChartsUseCase::new(
        client,
        renderer,
        storage,
        settings.storage.public_prefix.clone(),
        &settings.chart,
    ));

    // 5. Start HTTP server
    let app = routes::routes(use_case, &settings.storage.local_path);

    let addr = settings.listen_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
