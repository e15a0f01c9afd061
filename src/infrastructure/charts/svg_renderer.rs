// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use plotters::coord::Shift;
use plotters::prelude::*;

use crate::config::settings::ChartSettings;
use crate::domain::charts::{ChartError, ChartRenderer, RenderedChart};
use crate::domain::models::chart::{Chart, ChartPanel};

const FONT: &str = "sans-serif";

/// SVG 柱状图渲染器
///
/// 每个面板占用 `width × height`，多个面板自上而下排列。
/// 文本以 `<text>` 元素输出，不依赖系统字体
pub struct SvgChartRenderer {
    width: u32,
    height: u32,
    title_color: String,
}

impl SvgChartRenderer {
    pub fn new(settings: &ChartSettings) -> Self {
        Self {
            width: settings.width,
            height: settings.height,
            title_color: settings.title_color.clone(),
        }
    }

    fn draw(&self, chart: &Chart, buf: &mut String) -> Result<(), ChartError> {
        let title_color = parse_hex_color(&self.title_color)?;
        let colors = chart
            .panels
            .iter()
            .map(|panel| parse_hex_color(&panel.color))
            .collect::<Result<Vec<_>, _>>()?;

        let header = if chart.subtitle.is_some() { 80 } else { 50 };
        let size = (
            self.width,
            header + self.height * chart.panels.len() as u32,
        );

        let root = SVGBackend::with_string(buf, size).into_drawing_area();
        root.fill(&WHITE).map_err(render_error)?;

        let mut body = root
            .titled(&chart.title, (FONT, 28).into_font().color(&title_color))
            .map_err(render_error)?;
        if let Some(subtitle) = &chart.subtitle {
            body = body
                .titled(subtitle, (FONT, 14).into_font().color(&BLACK))
                .map_err(render_error)?;
        }

        let areas = body.split_evenly((chart.panels.len(), 1));
        for ((panel, color), area) in chart.panels.iter().zip(colors).zip(areas.iter()) {
            draw_panel(area, panel, color)?;
        }

        root.present().map_err(render_error)?;
        Ok(())
    }
}

impl ChartRenderer for SvgChartRenderer {
    fn render(&self, chart: &Chart) -> Result<RenderedChart, ChartError> {
        if chart.panels.is_empty() || chart.panels.iter().any(|p| p.series.is_empty()) {
            return Err(ChartError::Empty);
        }

        let mut buf = String::new();
        self.draw(chart, &mut buf)?;

        Ok(RenderedChart {
            bytes: buf.into_bytes(),
            extension: "svg",
        })
    }

    fn name(&self) -> &'static str {
        "svg"
    }
}

fn draw_panel(
    area: &DrawingArea<SVGBackend<'_>, Shift>,
    panel: &ChartPanel,
    color: RGBColor,
) -> Result<(), ChartError> {
    let buckets = panel.series.len() as u32;
    let y_max = panel.series.iter().map(|d| d.count).max().unwrap_or(0) + 1;
    let labels: Vec<String> = panel
        .series
        .iter()
        .map(|d| d.date.format("%Y-%m-%d").to_string())
        .collect();

    let mut chart = ChartBuilder::on(area)
        .caption(&panel.title, (FONT, 18).into_font())
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d((0u32..buckets).into_segmented(), 0u32..y_max)
        .map_err(render_error)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(panel.x_label.as_str())
        .y_desc(panel.y_label.as_str())
        .x_labels(labels.len())
        .x_label_formatter(&|value| segment_label(value, &labels))
        .draw()
        .map_err(render_error)?;

    chart
        .draw_series(
            Histogram::vertical(&chart)
                .style(color.filled())
                .margin(10)
                .data(
                    panel
                        .series
                        .iter()
                        .enumerate()
                        .map(|(i, day)| (i as u32, day.count)),
                ),
        )
        .map_err(render_error)?;

    Ok(())
}

fn segment_label(value: &SegmentValue<u32>, labels: &[String]) -> String {
    match value {
        SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => {
            labels.get(*i as usize).cloned().unwrap_or_default()
        }
        SegmentValue::Last => String::new(),
    }
}

fn render_error<E: std::fmt::Display>(e: E) -> ChartError {
    ChartError::Render(e.to_string())
}

/// 解析 `#rrggbb` 颜色
pub fn parse_hex_color(value: &str) -> Result<RGBColor, ChartError> {
    let hex = value.strip_prefix('#').unwrap_or(value);
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ChartError::InvalidColor(value.to_string()));
    }
    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| ChartError::InvalidColor(value.to_string()))
    };
    Ok(RGBColor(channel(0)?, channel(2)?, channel(4)?))
}
