mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};
use snaplink::domain::mode::ServiceMode;

#[tokio::test]
async fn test_shorten_success() {
    let server = common::create_test_server(common::create_test_state(ServiceMode::Public));

    let response = server
        .post("/shorten")
        .json(&json!({ "url": "https://example.com" }))
        .await;

    response.assert_status_ok();

    let body: Value = response.json();
    let code = body["short_code"].as_str().unwrap();

    assert_eq!(body["original_url"], "https://example.com");
    assert_eq!(code.len(), 6);
    assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_eq!(body["short_url"], format!("{}/{}", common::BASE_URL, code));
}

#[tokio::test]
async fn test_shorten_same_url_returns_same_code() {
    let server = common::create_test_server(common::create_test_state(ServiceMode::Public));
    let payload = json!({ "url": "https://example.com/page?x=1" });

    let first: Value = server.post("/shorten").json(&payload).await.json();
    let second: Value = server.post("/shorten").json(&payload).await.json();

    assert_eq!(first["short_code"], second["short_code"]);
}

#[tokio::test]
async fn test_shorten_different_urls_get_different_codes() {
    let server = common::create_test_server(common::create_test_state(ServiceMode::Public));

    let first: Value = server
        .post("/shorten")
        .json(&json!({ "url": "https://a.example.com" }))
        .await
        .json();
    let second: Value = server
        .post("/shorten")
        .json(&json!({ "url": "https://b.example.com" }))
        .await
        .json();

    assert_ne!(first["short_code"], second["short_code"]);
}

#[tokio::test]
async fn test_shorten_invalid_url() {
    let server = common::create_test_server(common::create_test_state(ServiceMode::Public));

    let response = server
        .post("/shorten")
        .json(&json!({ "url": "not-a-valid-url" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "validation_error");
}

#[tokio::test]
async fn test_shorten_rejects_non_http_scheme() {
    let server = common::create_test_server(common::create_test_state(ServiceMode::Public));

    let response = server
        .post("/shorten")
        .json(&json!({ "url": "ftp://files.example.com/a.txt" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_shorten_missing_body_field() {
    let server = common::create_test_server(common::create_test_state(ServiceMode::Public));

    let response = server.post("/shorten").json(&json!({})).await;

    assert!(response.status_code().is_client_error());
}

#[tokio::test]
async fn test_user_shorten_requires_token() {
    let server = common::create_test_server(common::create_test_state(ServiceMode::Accounts));

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://example.com" }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(response.header("www-authenticate"), "Bearer");
}

#[tokio::test]
async fn test_user_shorten_never_deduplicates() {
    let server = common::create_test_server(common::create_test_state(ServiceMode::Accounts));
    let token = common::register_and_login(&server, "alice").await;
    let payload = json!({ "url": "https://example.com" });

    let first: Value = server
        .post("/api/shorten")
        .add_header("Authorization", common::bearer(&token))
        .json(&payload)
        .await
        .json();
    let second: Value = server
        .post("/api/shorten")
        .add_header("Authorization", common::bearer(&token))
        .json(&payload)
        .await
        .json();

    assert_eq!(first["original_url"], "https://example.com");
    assert_ne!(first["short_code"], second["short_code"]);
}

#[tokio::test]
async fn test_public_routes_absent_in_accounts_mode() {
    let server = common::create_test_server(common::create_test_state(ServiceMode::Accounts));

    let response = server
        .post("/shorten")
        .json(&json!({ "url": "https://example.com" }))
        .await;

    // `/shorten` falls through to the redirect route, which only accepts GET.
    assert!(response.status_code().is_client_error());
}

#[tokio::test]
async fn test_capacity_exhausted_returns_500() {
    let mut options = common::options(ServiceMode::Public);
    options.generator = snaplink::utils::code_generator::CodeGenerator::new("x", 1).unwrap();
    options.max_attempts = 3;

    let state = common::create_test_state_with(
        snaplink::infrastructure::persistence::Repositories::in_memory(),
        options,
    );
    let server = common::create_test_server(state);

    server
        .post("/shorten")
        .json(&json!({ "url": "https://first.example.com" }))
        .await
        .assert_status_ok();

    let response = server
        .post("/shorten")
        .json(&json!({ "url": "https://second.example.com" }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "internal_error");
    assert_eq!(body["error"]["details"]["attempts"], 3);
}
