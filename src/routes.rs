//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{code}`       - Short link redirect (always)
//! - `GET  /health`       - Health check: storage, cache (always)
//! - `POST /shorten`, `GET /links` - Anonymous shortening (public mode)
//! - `/auth/*`            - Register, login, logout (accounts mode)
//! - `/api/*`             - Owned links, Bearer token required (accounts mode)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Authentication** - Bearer token on `/api/*` and `/auth/logout`
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::{auth, tracing};
use crate::domain::mode::ServiceMode;
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds the router for the state's service mode, without path normalization.
pub fn build_router(state: AppState) -> Router {
    let router = Router::new()
        .route("/health", get(health_handler))
        .route("/{code}", get(redirect_handler));

    let router = match state.mode {
        ServiceMode::Public => router.merge(api::routes::public_routes()),
        ServiceMode::Accounts => {
            let session = api::routes::session_routes()
                .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
            let protected = api::routes::protected_routes()
                .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

            router
                .nest("/auth", api::routes::auth_routes().merge(session))
                .nest("/api", protected)
        }
    };

    router.with_state(state).layer(tracing::layer())
}

/// Constructs the application service with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(build_router(state))
}
