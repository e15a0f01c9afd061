// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::use_cases::engagement_charts::EngagementChartsUseCase;
use crate::presentation::handlers::{chart_handler, page_handler};
use axum::{
    routing::{get, post},
    Extension, Router,
};
use std::path::Path;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// 创建应用路由
///
/// # 参数
///
/// * `use_case` - 图表生成用例
/// * `static_dir` - 图表文件所在目录，挂载在 `/static`
///
/// # 返回值
///
/// 返回配置好的路由
pub fn routes(use_case: Arc<EngagementChartsUseCase>, static_dir: impl AsRef<Path>) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/version", get(version));

    let app_routes = Router::new()
        .route("/", get(page_handler::index))
        .route("/process", post(chart_handler::process))
        .route("/generate", post(chart_handler::generate))
        .nest_service("/static", ServeDir::new(static_dir.as_ref()))
        .layer(Extension(use_case));

    Router::new()
        .merge(public_routes)
        .merge(app_routes)
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
