// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::http::StatusCode;
use serde_json::{json, Value};

use super::helpers::{create_test_app, like, repost, FakeSocialClient};

const LINK: &str = "https://bsky.app/profile/alice.bsky.social/post/3kxyz";

fn author() -> FakeSocialClient {
    FakeSocialClient::with_author("alice.bsky.social", "did:plc:alice123")
}

#[tokio::test]
async fn test_generate_returns_both_charts() {
    let mut client = author();
    client.likes = vec![like("bob.bsky.social", "2024-05-01T10:00:00Z")];
    client.reposts = vec![repost("carol.bsky.social", "2024-05-02T10:00:00Z")];
    let app = create_test_app(client);

    let response = app.server.post("/generate").json(&json!({ "link": LINK })).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    let likes_chart = body["likes_chart"].as_str().unwrap();
    let reposts_chart = body["reposts_chart"].as_str().unwrap();
    assert!(likes_chart.ends_with("/likes.svg"));
    assert!(reposts_chart.ends_with("/reposts.svg"));

    let likes_svg = app.server.get(likes_chart).await.text();
    assert!(likes_svg.contains("Likes Over Time for @alice.bsky.social"));
    let reposts_svg = app.server.get(reposts_chart).await.text();
    assert!(reposts_svg.contains("Reposts Over Time for @alice.bsky.social"));
}

#[tokio::test]
async fn test_generate_omits_missing_series() {
    let mut client = author();
    client.likes = vec![like("bob.bsky.social", "2024-05-01T10:00:00Z")];
    let app = create_test_app(client);

    let body: Value = app
        .server
        .post("/generate")
        .json(&json!({ "link": LINK }))
        .await
        .json();

    assert!(body.get("likes_chart").is_some());
    assert!(body.get("reposts_chart").is_none());
}

#[tokio::test]
async fn test_generate_without_engagement_returns_empty_object() {
    let app = create_test_app(author());

    let response = app.server.post("/generate").json(&json!({ "link": LINK })).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>(), json!({}));
}

#[tokio::test]
async fn test_generate_requests_write_distinct_files() {
    let mut client = author();
    client.likes = vec![like("bob.bsky.social", "2024-05-01T10:00:00Z")];
    let app = create_test_app(client);

    let first: Value = app.server.post("/generate").json(&json!({ "link": LINK })).await.json();
    let second: Value = app.server.post("/generate").json(&json!({ "link": LINK })).await.json();

    assert_ne!(first["likes_chart"], second["likes_chart"]);
}
