// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 图表渲染实现
pub mod svg_renderer;

pub use svg_renderer::SvgChartRenderer;
