mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};
use snaplink::domain::mode::ServiceMode;

fn accounts_server() -> axum_test::TestServer {
    common::create_test_server(common::create_test_state(ServiceMode::Accounts))
}

#[tokio::test]
async fn test_register_success() {
    let server = accounts_server();

    let response = server
        .post("/auth/register")
        .json(&json!({ "username": "alice", "password": "correct-horse" }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let body: Value = response.json();
    assert_eq!(body["username"], "alice");
    assert!(body["id"].is_i64());
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let server = accounts_server();
    let payload = json!({ "username": "alice", "password": "correct-horse" });

    server.post("/auth/register").json(&payload).await;
    let response = server.post("/auth/register").json(&payload).await;

    response.assert_status(StatusCode::CONFLICT);

    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "conflict");
}

#[tokio::test]
async fn test_register_validation() {
    let server = accounts_server();

    let response = server
        .post("/auth/register")
        .json(&json!({ "username": "alice", "password": "short" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert!(body["error"]["details"]["password"].is_array());

    server
        .post("/auth/register")
        .json(&json!({ "username": "a b", "password": "correct-horse" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_returns_token() {
    let server = accounts_server();

    let token = common::register_and_login(&server, "alice").await;

    assert_eq!(token.len(), 43);
}

#[tokio::test]
async fn test_login_wrong_password() {
    let server = accounts_server();
    common::register_and_login(&server, "alice").await;

    let response = server
        .post("/auth/login")
        .json(&json!({ "username": "alice", "password": "wrong-password" }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_unknown_user() {
    let server = accounts_server();

    server
        .post("/auth/login")
        .json(&json!({ "username": "ghost", "password": "correct-horse" }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_revokes_token() {
    let server = accounts_server();
    let token = common::register_and_login(&server, "alice").await;

    server
        .post("/auth/logout")
        .add_header("Authorization", common::bearer(&token))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    server
        .get("/api/links")
        .add_header("Authorization", common::bearer(&token))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_each_login_issues_independent_token() {
    let server = accounts_server();
    let first = common::register_and_login(&server, "alice").await;

    let second: Value = server
        .post("/auth/login")
        .json(&json!({ "username": "alice", "password": "correct-horse" }))
        .await
        .json();
    let second = second["token"].as_str().unwrap().to_string();

    assert_ne!(first, second);

    server
        .post("/auth/logout")
        .add_header("Authorization", common::bearer(&first))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    server
        .get("/api/links")
        .add_header("Authorization", common::bearer(&second))
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_auth_routes_absent_in_public_mode() {
    let server = common::create_test_server(common::create_test_state(ServiceMode::Public));

    let response = server
        .post("/auth/register")
        .json(&json!({ "username": "alice", "password": "correct-horse" }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}
