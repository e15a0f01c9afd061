// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use metrics::{describe_counter, describe_histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing::{info, warn};

use crate::config::settings::MetricsSettings;

/// 初始化指标系统
///
/// 未启用时不安装记录器，各处的指标宏成为空操作
pub fn init_metrics(settings: &MetricsSettings) -> anyhow::Result<()> {
    if !settings.enabled {
        info!("Metrics exporter disabled");
        return Ok(());
    }

    let addr: SocketAddr = settings.listen_addr.parse()?;

    // Ignore error if address is already in use (for development/testing)
    if let Err(e) = PrometheusBuilder::new().with_http_listener(addr).install() {
        warn!(
            "Failed to install Prometheus recorder: {}. This might happen if the port is already in use.",
            e
        );
        return Ok(());
    }

    describe_counter!(
        "links_processed_total",
        "Total number of post links submitted, labelled by endpoint and outcome"
    );
    describe_counter!(
        "charts_rendered_total",
        "Total number of chart images rendered and stored"
    );
    describe_counter!(
        "charts_expired_total",
        "Total number of chart files removed by the retention sweep"
    );
    describe_counter!(
        "bluesky_requests_total",
        "Total number of Bluesky XRPC requests, labelled by endpoint and HTTP status"
    );
    describe_histogram!(
        "process_duration_seconds",
        "Time spent turning a post link into charts"
    );

    info!("Metrics exporter listening on {}", addr);
    Ok(())
}
