#![allow(dead_code)]

use axum_test::TestServer;
use serde_json::{Value, json};
use std::sync::Arc;
use snaplink::domain::mode::ServiceMode;
use snaplink::infrastructure::cache::NullCache;
use snaplink::infrastructure::persistence::Repositories;
use snaplink::routes::build_router;
use snaplink::state::{AppState, ServiceOptions};
use snaplink::utils::code_generator::CodeGenerator;

pub const BASE_URL: &str = "http://s.test";

pub fn options(mode: ServiceMode) -> ServiceOptions {
    ServiceOptions {
        mode,
        base_url: BASE_URL.to_string(),
        generator: CodeGenerator::default(),
        max_attempts: 10,
        signing_secret: "test-signing-secret".to_string(),
    }
}

pub fn create_test_state(mode: ServiceMode) -> AppState {
    create_test_state_with(Repositories::in_memory(), options(mode))
}

pub fn create_test_state_with(repositories: Repositories, options: ServiceOptions) -> AppState {
    AppState::new(repositories, Arc::new(NullCache::new()), options)
}

pub fn create_test_server(state: AppState) -> TestServer {
    TestServer::new(build_router(state)).unwrap()
}

/// Registers `username` and returns a fresh bearer token.
pub async fn register_and_login(server: &TestServer, username: &str) -> String {
    let credentials = json!({ "username": username, "password": "correct-horse" });

    server
        .post("/auth/register")
        .json(&credentials)
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    let response = server.post("/auth/login").json(&credentials).await;
    response.assert_status_ok();

    let body: Value = response.json();
    body["token"].as_str().unwrap().to_string()
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}
