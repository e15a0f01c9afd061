// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use thiserror::Error;

use crate::domain::models::chart::Chart;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChartError {
    #[error("Chart has nothing to draw")]
    Empty,
    #[error("Invalid color: {0}")]
    InvalidColor(String),
    #[error("Failed to render chart: {0}")]
    Render(String),
}

/// 渲染后的图片
#[derive(Debug, Clone)]
pub struct RenderedChart {
    pub bytes: Vec<u8>,
    pub extension: &'static str,
}

/// 图表渲染器
pub trait ChartRenderer: Send + Sync {
    /// 将图表描述渲染为图片
    fn render(&self, chart: &Chart) -> Result<RenderedChart, ChartError>;

    /// 渲染器名称
    fn name(&self) -> &'static str;
}
