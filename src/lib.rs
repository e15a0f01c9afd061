// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 包含帖子互动图表的用例编排与数据传输对象
pub mod application;

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 包含帖子链接、互动统计、图表描述以及外部服务接口
pub mod domain;

/// 基础设施模块
///
/// 提供 Bluesky API 客户端、图表渲染、文件存储与指标导出
pub mod infrastructure;

/// 表示层模块
///
/// 处理HTTP请求和响应，包括路由、处理器和错误映射
pub mod presentation;

/// 工具模块
///
/// 提供通用的工具函数和辅助功能
pub mod utils;

/// 后台工作器模块
///
/// 定期清理过期图表
pub mod workers;
