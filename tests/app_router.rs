mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};

#[tokio::test]
async fn test_trailing_slash_is_trimmed() {
    let (state, _store) = common::create_test_state();
    let server = common::app_server(state);

    server
        .post("/shorten/")
        .json(&json!({ "originalUrl": "https://example.com/docs", "alias": "docs" }))
        .await
        .assert_status(StatusCode::CREATED);

    let response = server.get("/info/docs/").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["originalUrl"], "https://example.com/docs");
}

#[tokio::test]
async fn test_redirect_records_socket_peer() {
    let (state, store) = common::create_test_state();
    common::insert_link(&store, "abc12345", "https://example.com/x", None);
    let server = common::app_server(state);

    let response = server.get("/abc12345/").await;

    response.assert_status(StatusCode::MOVED_PERMANENTLY);
    assert_eq!(response.header("location"), "https://example.com/x");

    let analytics = server.get("/analytics/abc12345").await.json::<Value>();
    assert_eq!(analytics["clickCount"], 1);
    assert_eq!(analytics["lastFiveIps"], json!(["127.0.0.1"]));
}

#[tokio::test]
async fn test_health_through_full_stack() {
    let (state, _store) = common::create_test_state();
    let server = common::app_server(state);

    server.get("/health").await.assert_status_ok();
}
