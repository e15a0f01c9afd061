// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::engagement::DailyCount;

/// 图表在存储中的键前缀
pub const CHART_KEY_PREFIX: &str = "charts";

/// 图表种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Likes,
    Reposts,
    /// 点赞与转发合并的总览图
    Engagement,
}

impl ChartKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::Likes => "likes",
            ChartKind::Reposts => "reposts",
            ChartKind::Engagement => "engagement",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 一个柱状图面板
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartPanel {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// `#rrggbb`
    pub color: String,
    pub series: Vec<DailyCount>,
}

/// 与渲染后端无关的图表描述
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chart {
    pub kind: ChartKind,
    pub title: String,
    pub subtitle: Option<String>,
    pub panels: Vec<ChartPanel>,
}

/// 已保存的图表
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredChart {
    pub kind: ChartKind,
    /// 存储键
    pub key: String,
    /// 对外访问地址
    pub url: String,
}
