// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含系统的核心业务逻辑，包括：
/// - 领域模型（models）：帖子链接、互动统计与图表描述
/// - 社交平台接口（social）：获取点赞与转发数据的抽象
/// - 图表接口（charts）：将图表描述渲染为图片的抽象
/// - 仓库接口（repositories）：图表文件持久化抽象接口
///
/// 领域层不依赖于任何外部实现。
pub mod charts;
pub mod models;
pub mod repositories;
pub mod social;
