// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::http::StatusCode;
use serde_json::{json, Value};
use skygraph::domain::social::client::SocialError;

use super::helpers::{create_test_app, like, repost, FakeSocialClient};

const HANDLE: &str = "alice.bsky.social";
const DID: &str = "did:plc:alice123";
const POST_LINK: &str = "https://bsky.app/profile/alice.bsky.social/post/3kxyz";

fn busy_post() -> FakeSocialClient {
    let mut client = FakeSocialClient::with_author(HANDLE, DID);
    client.likes = vec![
        like("bob.bsky.social", "2024-05-01T10:00:00.000Z"),
        like("carol.bsky.social", "2024-05-01T12:00:00.000Z"),
        like("dave.bsky.social", "2024-05-03T08:30:00.000Z"),
    ];
    client.reposts = vec![repost("erin.bsky.social", "2024-05-02T09:00:00.000Z")];
    client
}

#[tokio::test]
async fn test_process_returns_graph_image_that_is_served() {
    let app = create_test_app(busy_post());

    let response = app
        .server
        .post("/process")
        .json(&json!({ "link": POST_LINK }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    let graph_image = body["graph_image"].as_str().unwrap();
    assert!(graph_image.starts_with("/static/charts/"));
    assert!(graph_image.ends_with("/engagement.svg"));
    assert_eq!(body["handle"], HANDLE);
    assert_eq!(body["post_url"], POST_LINK);
    assert_eq!(body["likes"], 3);
    assert_eq!(body["reposts"], 1);

    let image = app.server.get(graph_image).await;
    assert_eq!(image.status_code(), StatusCode::OK);
    let svg = image.text();
    assert!(svg.contains("<svg"));
    assert!(svg.contains("Engagement for @alice.bsky.social"));
}

#[tokio::test]
async fn test_process_queries_the_resolved_post_uri() {
    let app = create_test_app(busy_post());

    app.server
        .post("/process")
        .json(&json!({ "link": format!("  {}?ref=share  ", POST_LINK) }))
        .await
        .assert_status_ok();

    let uris = app.client.requested_uris.lock().unwrap().clone();
    assert_eq!(uris.len(), 2);
    assert!(uris
        .iter()
        .all(|uri| uri == "at://did:plc:alice123/app.bsky.feed.post/3kxyz"));
}

#[tokio::test]
async fn test_process_accepts_did_links_and_displays_handle() {
    let app = create_test_app(busy_post());

    let response = app
        .server
        .post("/process")
        .json(&json!({ "link": "https://bsky.app/profile/did:plc:alice123/post/3kxyz" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["handle"], HANDLE);
    assert_eq!(body["post_url"], POST_LINK);
}

#[tokio::test]
async fn test_process_rejects_empty_link() {
    let app = create_test_app(busy_post());

    for body in [json!({ "link": "" }), json!({ "link": "   " }), json!({})] {
        let response = app.server.post("/process").json(&body).await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>(), json!({ "error": "No link provided" }));
    }
    assert_eq!(
        app.client
            .feed_calls
            .load(std::sync::atomic::Ordering::SeqCst),
        0
    );
}

#[tokio::test]
async fn test_process_rejects_invalid_link() {
    let app = create_test_app(busy_post());

    let response = app
        .server
        .post("/process")
        .json(&json!({ "link": "https://example.com/not/a/post" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"], "Invalid link format.");
}

#[tokio::test]
async fn test_process_rejects_non_json_body() {
    let app = create_test_app(busy_post());

    let response = app.server.post("/process").text("link=abc").await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let error = response.json::<Value>()["error"].as_str().unwrap().to_string();
    assert!(error.starts_with("Invalid request body"));
}

#[tokio::test]
async fn test_process_unknown_handle_is_not_found() {
    let app = create_test_app(busy_post());

    let response = app
        .server
        .post("/process")
        .json(&json!({ "link": "https://bsky.app/profile/ghost.bsky.social/post/3kxyz" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert!(response.json::<Value>()["error"]
        .as_str()
        .unwrap()
        .contains("ghost.bsky.social"));
}

#[tokio::test]
async fn test_process_without_engagement_is_not_found() {
    let app = create_test_app(FakeSocialClient::with_author(HANDLE, DID));

    let response = app
        .server
        .post("/process")
        .json(&json!({ "link": POST_LINK }))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(
        response.json::<Value>()["error"],
        "No likes or reposts found for this post."
    );
}

#[tokio::test]
async fn test_process_upstream_failure_is_bad_gateway() {
    let mut client = busy_post();
    client.feed_error = Some(SocialError::Authentication(
        "Invalid identifier or password (401)".to_string(),
    ));
    let app = create_test_app(client);

    let response = app
        .server
        .post("/process")
        .json(&json!({ "link": POST_LINK }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_GATEWAY);
    assert!(response.json::<Value>()["error"]
        .as_str()
        .unwrap()
        .contains("Authentication failed"));
}

#[tokio::test]
async fn test_index_page_posts_to_process() {
    let app = create_test_app(busy_post());

    let response = app.server.get("/").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let html = response.text();
    assert!(html.contains("function processLink()"));
    assert!(html.contains("fetch(\"/process\""));
    assert!(html.contains("graph_image"));
}

#[tokio::test]
async fn test_process_with_only_undated_engagement_reports_it() {
    let mut client = FakeSocialClient::with_author(HANDLE, DID);
    client.likes = vec![like("bob.bsky.social", "sometime last week")];
    let app = create_test_app(client);

    let response = app
        .server
        .post("/process")
        .json(&json!({ "link": POST_LINK }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_GATEWAY);
    assert_eq!(
        response.json::<Value>()["error"],
        "Found 1 likes and 0 reposts, but none had a usable timestamp."
    );
}
