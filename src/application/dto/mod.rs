// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 数据传输对象模块
///
/// 定义 `/process` 与 `/generate` 的请求和响应格式
pub mod chart_request;
pub mod chart_response;
