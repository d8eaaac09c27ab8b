mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};
use snaplink::domain::mode::ServiceMode;
use snaplink::infrastructure::persistence::Repositories;
use snaplink::utils::code_generator::CodeGenerator;

#[tokio::test]
async fn test_redirect_success() {
    let server = common::create_test_server(common::create_test_state(ServiceMode::Public));

    let created: Value = server
        .post("/shorten")
        .json(&json!({ "url": "https://example.com/target?q=rust&page=2" }))
        .await
        .json();
    let code = created["short_code"].as_str().unwrap();

    let response = server.get(&format!("/{code}")).await;

    assert_eq!(response.status_code(), 307);

    let location = response.header("location");
    assert_eq!(location, "https://example.com/target?q=rust&page=2");
}

#[tokio::test]
async fn test_codes_from_punctuation_alphabet_resolve() {
    let mut options = common::options(ServiceMode::Public);
    options.generator = CodeGenerator::new("-._~", 8).unwrap();

    let state = common::create_test_state_with(Repositories::in_memory(), options);
    let server = common::create_test_server(state);

    for i in 0..10 {
        let url = format!("https://example.com/{i}");
        let created: Value = server
            .post("/shorten")
            .json(&json!({ "url": url }))
            .await
            .json();
        let code = created["short_code"].as_str().unwrap();

        let response = server.get(&format!("/{code}")).await;

        assert_eq!(response.status_code(), 307, "code {code:?} did not resolve");
        assert_eq!(response.header("location"), url.as_str());
    }
}

#[tokio::test]
async fn test_redirect_not_found() {
    let server = common::create_test_server(common::create_test_state(ServiceMode::Public));

    let response = server.get("/nonexistent").await;

    response.assert_status(StatusCode::NOT_FOUND);

    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "not_found");
    assert_eq!(body["error"]["details"]["code"], "nonexistent");
}

#[tokio::test]
async fn test_redirect_is_public_in_accounts_mode() {
    let server = common::create_test_server(common::create_test_state(ServiceMode::Accounts));
    let token = common::register_and_login(&server, "alice").await;

    let created: Value = server
        .post("/api/shorten")
        .add_header("Authorization", common::bearer(&token))
        .json(&json!({ "url": "https://example.com" }))
        .await
        .json();
    let code = created["short_code"].as_str().unwrap();

    let response = server.get(&format!("/{code}")).await;

    assert_eq!(response.status_code(), 307);
    assert_eq!(response.header("location"), "https://example.com");
}

#[tokio::test]
async fn test_redirects_are_counted_in_accounts_mode() {
    let server = common::create_test_server(common::create_test_state(ServiceMode::Accounts));
    let token = common::register_and_login(&server, "alice").await;

    let created: Value = server
        .post("/api/shorten")
        .add_header("Authorization", common::bearer(&token))
        .json(&json!({ "url": "https://example.com" }))
        .await
        .json();
    let code = created["short_code"].as_str().unwrap();

    for _ in 0..3 {
        assert_eq!(server.get(&format!("/{code}")).await.status_code(), 307);
    }

    let listing: Value = server
        .get("/api/links")
        .add_header("Authorization", common::bearer(&token))
        .await
        .json();

    assert_eq!(listing["items"][0]["click_count"], 3);
}

#[tokio::test]
async fn test_redirects_are_not_counted_in_public_mode() {
    let server = common::create_test_server(common::create_test_state(ServiceMode::Public));

    let created: Value = server
        .post("/shorten")
        .json(&json!({ "url": "https://example.com" }))
        .await
        .json();
    let code = created["short_code"].as_str().unwrap();

    server.get(&format!("/{code}")).await;
    server.get(&format!("/{code}")).await;

    let listing: Value = server.get("/links").await.json();
    assert_eq!(listing["items"][0]["click_count"], 0);
}
