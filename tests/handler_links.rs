mod common;

use axum::http::{HeaderName, HeaderValue, StatusCode};
use chrono::{Duration, Utc};
use serde_json::{Value, json};

#[tokio::test]
async fn test_info_after_one_redirect() {
    let (state, _store) = common::create_test_state();
    let server = common::test_server(state, None);

    server
        .post("/shorten")
        .json(&json!({ "originalUrl": "https://example.com", "alias": "ex1" }))
        .await
        .assert_status(StatusCode::CREATED);
    server.get("/ex1").await;

    let response = server.get("/info/ex1").await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["originalUrl"], "https://example.com/");
    assert_eq!(body["clickCount"], 1);
    assert!(body["createdAt"].is_string());
    assert!(body.get("shortId").is_none());
}

#[tokio::test]
async fn test_info_not_found() {
    let (state, _store) = common::create_test_state();
    let server = common::test_server(state, None);

    server
        .get("/info/missing")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_info_reports_expired_link() {
    let (state, store) = common::create_test_state();
    common::insert_link(
        &store,
        "old00001",
        "https://example.com/old",
        Some(Utc::now() - Duration::days(2)),
    );
    let server = common::test_server(state, None);

    let response = server.get("/info/old00001").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["originalUrl"], "https://example.com/old");
}

#[tokio::test]
async fn test_delete_then_everything_is_not_found() {
    let (state, store) = common::create_test_state();
    let server = common::test_server(state, None);

    server
        .post("/shorten")
        .json(&json!({ "originalUrl": "https://example.com", "alias": "ex1" }))
        .await;
    server.get("/ex1").await;

    let response = server.delete("/delete/ex1").await;
    response.assert_status(StatusCode::NO_CONTENT);
    assert!(response.text().is_empty());

    server.get("/ex1").await.assert_status(StatusCode::NOT_FOUND);
    server.get("/info/ex1").await.assert_status(StatusCode::NOT_FOUND);
    server
        .get("/analytics/ex1")
        .await
        .assert_status(StatusCode::NOT_FOUND);
    assert_eq!(store.lock().unwrap().total_clicks(), 0);
}

#[tokio::test]
async fn test_delete_not_found() {
    let (state, _store) = common::create_test_state();
    let server = common::test_server(state, None);

    let response = server.delete("/delete/missing").await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["error"]["code"], "not_found");
}

#[tokio::test]
async fn test_delete_expired_link() {
    let (state, store) = common::create_test_state();
    common::insert_link(
        &store,
        "old00001",
        "https://example.com",
        Some(Utc::now() - Duration::hours(1)),
    );
    let server = common::test_server(state, None);

    server
        .delete("/delete/old00001")
        .await
        .assert_status(StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_all_links_empty() {
    let (state, _store) = common::create_test_state();
    let server = common::test_server(state, None);

    let response = server.get("/all-links").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!([]));
}

#[tokio::test]
async fn test_all_links_lists_every_link() {
    let (state, _store) = common::create_test_state_with(common::settings(true), None);
    let server = common::test_server(state, None);

    server
        .post("/shorten")
        .json(&json!({ "originalUrl": "https://a.example", "alias": "first" }))
        .await;
    let created = server
        .post("/shorten")
        .json(&json!({ "originalUrl": "https://b.example" }))
        .await
        .json::<Value>();

    for ip in ["10.0.0.1", "10.0.0.2"] {
        server
            .get("/first")
            .add_header(
                HeaderName::from_static("x-real-ip"),
                HeaderValue::from_static(ip),
            )
            .await;
    }

    let response = server.get("/all-links").await;
    response.assert_status_ok();

    let items = response.json::<Value>();
    let items = items.as_array().unwrap();
    assert_eq!(items.len(), 2);

    let first = items.iter().find(|i| i["shortId"] == "first").unwrap();
    assert_eq!(first["originalUrl"], "https://a.example/");
    assert_eq!(first["shortUrl"], "http://sho.rt/first");
    assert_eq!(first["clickCount"], 2);
    assert_eq!(first["lastFiveIps"], json!(["10.0.0.2", "10.0.0.1"]));
    assert!(first["id"].is_string());
    assert!(first["createdAt"].is_string());

    let generated = items
        .iter()
        .find(|i| i["shortId"] == created["shortId"])
        .unwrap();
    assert_eq!(generated["shortUrl"], created["shortUrl"]);
    assert_eq!(generated["id"], created["id"]);
    assert_eq!(generated["clickCount"], 0);
    assert_eq!(generated["lastFiveIps"], json!([]));
}
