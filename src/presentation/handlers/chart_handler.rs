// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{rejection::JsonRejection, Extension, Json},
    http::StatusCode,
};
use metrics::counter;
use std::sync::Arc;
use tracing::{error, warn};

use crate::{
    application::{
        dto::{
            chart_request::ChartRequestDto,
            chart_response::{GenerateResponseDto, ProcessResponseDto},
        },
        use_cases::engagement_charts::{EngagementChartsUseCase, EngagementError},
    },
    presentation::errors::AppError,
};

/// 处理页面提交的帖子链接，返回互动总览图地址
///
/// # 返回值
///
/// * 成功：`{"graph_image": "...", ...}`
/// * 失败：`{"error": "..."}`，状态码见 [`AppError`]
pub async fn process(
    Extension(use_case): Extension<Arc<EngagementChartsUseCase>>,
    payload: Result<Json<ChartRequestDto>, JsonRejection>,
) -> Result<Json<ProcessResponseDto>, AppError> {
    let Json(request) = payload.inspect_err(|e| warn!("Rejected /process body: {}", e))?;

    let result = use_case.graph(&request).await;
    record_outcome("process", &result);
    let result = result.inspect_err(log_failure)?;

    Ok(Json(result.into()))
}

/// 分别生成点赞图与转发图
///
/// 没有任何互动时返回空对象
pub async fn generate(
    Extension(use_case): Extension<Arc<EngagementChartsUseCase>>,
    payload: Result<Json<ChartRequestDto>, JsonRejection>,
) -> Result<(StatusCode, Json<GenerateResponseDto>), AppError> {
    let Json(request) = payload.inspect_err(|e| warn!("Rejected /generate body: {}", e))?;

    let result = use_case.charts(&request).await;
    record_outcome("generate", &result);
    let result = result.inspect_err(log_failure)?;

    Ok((StatusCode::OK, Json(result.into())))
}

fn record_outcome<T>(endpoint: &'static str, result: &Result<T, EngagementError>) {
    let outcome = if result.is_ok() { "ok" } else { "error" };
    counter!("links_processed_total", "endpoint" => endpoint, "outcome" => outcome).increment(1);
}

fn log_failure(e: &EngagementError) {
    match e {
        EngagementError::EmptyLink
        | EngagementError::InvalidLink(_)
        | EngagementError::ActorNotFound(_)
        | EngagementError::NoEngagement => warn!("{}", e),
        _ => error!("Error generating charts: {}", e),
    }
}
