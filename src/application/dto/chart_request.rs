// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// 图表请求数据传输对象
///
/// 页面提交的帖子链接
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct ChartRequestDto {
    /// Bluesky 帖子链接
    #[serde(default)]
    #[validate(length(max = 2048, message = "Link is too long"))]
    pub link: String,
}
