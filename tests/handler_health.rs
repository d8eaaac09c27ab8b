mod common;

use async_trait::async_trait;
use axum::http::StatusCode;
use serde_json::{Value, json};
use snaplink::domain::mode::ServiceMode;
use snaplink::infrastructure::cache::{CacheError, CacheResult, CacheService};
use snaplink::infrastructure::persistence::Repositories;
use snaplink::state::AppState;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Cache double: can be switched to "down", records writes.
#[derive(Default)]
struct TestCache {
    down: bool,
    entries: Mutex<HashMap<String, String>>,
}

#[async_trait]
impl CacheService for TestCache {
    async fn get_url(&self, short_code: &str) -> CacheResult<Option<String>> {
        if self.down {
            return Err(CacheError::ConnectionError("down".to_string()));
        }
        Ok(self.entries.lock().unwrap().get(short_code).cloned())
    }

    async fn set_url(&self, short_code: &str, original_url: &str, _ttl: Option<u64>) -> CacheResult<()> {
        if self.down {
            return Err(CacheError::ConnectionError("down".to_string()));
        }
        self.entries
            .lock()
            .unwrap()
            .insert(short_code.to_string(), original_url.to_string());
        Ok(())
    }

    async fn health_check(&self) -> bool {
        !self.down
    }

    fn backend_name(&self) -> &'static str {
        "test"
    }
}

fn server_with_cache(cache: Arc<TestCache>) -> axum_test::TestServer {
    let state = AppState::new(
        Repositories::in_memory(),
        cache,
        common::options(ServiceMode::Public),
    );
    common::create_test_server(state)
}

#[tokio::test]
async fn test_health_endpoint_success() {
    let server = common::create_test_server(common::create_test_state(ServiceMode::Public));

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["mode"], "public");
    assert_eq!(json["checks"]["storage"]["status"], "ok");
    assert_eq!(json["checks"]["cache"]["status"], "ok");
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn test_health_reports_accounts_mode() {
    let server = common::create_test_server(common::create_test_state(ServiceMode::Accounts));

    let json = server.get("/health").await.json::<Value>();

    assert_eq!(json["mode"], "accounts");
}

#[tokio::test]
async fn test_health_degraded_when_cache_down() {
    let server = server_with_cache(Arc::new(TestCache {
        down: true,
        ..Default::default()
    }));

    let response = server.get("/health").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);

    let json = response.json::<Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["cache"]["status"], "error");
    assert_eq!(json["checks"]["storage"]["status"], "ok");
}

#[tokio::test]
async fn test_redirect_survives_cache_outage() {
    let server = server_with_cache(Arc::new(TestCache {
        down: true,
        ..Default::default()
    }));

    let created: Value = server
        .post("/shorten")
        .json(&json!({ "url": "https://example.com" }))
        .await
        .json();
    let code = created["short_code"].as_str().unwrap();

    let response = server.get(&format!("/{code}")).await;

    assert_eq!(response.status_code(), 307);
    assert_eq!(response.header("location"), "https://example.com");
}

#[tokio::test]
async fn test_redirect_populates_cache() {
    let cache = Arc::new(TestCache::default());
    let server = server_with_cache(cache.clone());

    let created: Value = server
        .post("/shorten")
        .json(&json!({ "url": "https://example.com" }))
        .await
        .json();
    let code = created["short_code"].as_str().unwrap();

    server.get(&format!("/{code}")).await;

    assert_eq!(
        cache.entries.lock().unwrap().get(code).map(String::as_str),
        Some("https://example.com")
    );
}
