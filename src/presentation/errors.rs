// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::application::use_cases::engagement_charts::EngagementError;

/// 应用错误类型
///
/// 封装所有可能的应用层错误，统一渲染为 `{"error": "..."}`
#[derive(Debug)]
pub struct AppError(anyhow::Error);

impl AppError {
    pub fn status(&self) -> StatusCode {
        if self.0.downcast_ref::<JsonRejection>().is_some() {
            return StatusCode::BAD_REQUEST;
        }

        match self.0.downcast_ref::<EngagementError>() {
            Some(EngagementError::EmptyLink) | Some(EngagementError::InvalidLink(_)) => {
                StatusCode::BAD_REQUEST
            }
            Some(EngagementError::ActorNotFound(_)) | Some(EngagementError::NoEngagement) => {
                StatusCode::NOT_FOUND
            }
            Some(EngagementError::Social(_)) | Some(EngagementError::UndatedEngagement { .. }) => {
                StatusCode::BAD_GATEWAY
            }
            Some(EngagementError::Chart(_)) | Some(EngagementError::Storage(_)) | None => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = match self.0.downcast_ref::<JsonRejection>() {
            Some(rejection) => format!("Invalid request body: {}", rejection.body_text()),
            None => self.0.to_string(),
        };

        if status.is_server_error() {
            error!("Request failed ({}): {}", status, error_message);
        }

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
