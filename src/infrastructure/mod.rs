// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施层模块
///
/// 该模块包含系统的技术实现细节，负责与外部系统的交互。
///
/// 包含的子模块：
/// - Bluesky（bluesky）：基于 reqwest 的 XRPC 客户端
/// - 图表（charts）：基于 plotters 的 SVG 柱状图渲染
/// - 指标（metrics）：Prometheus 指标导出
/// - 存储（storage）：图表文件的本地与内存存储
///
/// 基础设施层依赖于领域层的抽象接口。
pub mod bluesky;
pub mod charts;
pub mod metrics;
pub mod storage;
