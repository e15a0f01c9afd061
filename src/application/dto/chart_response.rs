// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

use crate::application::use_cases::engagement_charts::{ChartsResult, GraphResult};

/// `/process` 响应
#[derive(Debug, Deserialize, Serialize)]
pub struct ProcessResponseDto {
    /// 图表图片地址，页面直接作为 `<img>` 的 src
    pub graph_image: String,
    pub handle: String,
    pub post_url: String,
    pub likes: usize,
    pub reposts: usize,
}

/// `/generate` 响应，没有数据的图表不会出现
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GenerateResponseDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub likes_chart: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reposts_chart: Option<String>,
}

impl From<GraphResult> for ProcessResponseDto {
    fn from(result: GraphResult) -> Self {
        Self {
            graph_image: result.graph.url,
            handle: result.handle,
            post_url: result.post_url,
            likes: result.likes,
            reposts: result.reposts,
        }
    }
}

impl From<ChartsResult> for GenerateResponseDto {
    fn from(result: ChartsResult) -> Self {
        Self {
            likes_chart: result.likes_chart.map(|chart| chart.url),
            reposts_chart: result.reposts_chart.map(|chart| chart.url),
        }
    }
}
