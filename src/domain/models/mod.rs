// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了系统的核心业务实体，包括：
/// - 帖子链接（post_link）：解析后的 Bluesky 帖子地址
/// - 互动记录（engagement）：点赞、转发及按日统计
/// - 图表（chart）：与渲染后端无关的柱状图描述
pub mod chart;
pub mod engagement;
pub mod post_link;
