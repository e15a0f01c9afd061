// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::response::Html;

const INDEX_HTML: &str = include_str!("../../../assets/index.html");

/// 首页
///
/// 单页表单：提交链接到 `/process` 并展示返回的图片
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
