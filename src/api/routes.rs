//! API route configuration.
//!
//! Which routes exist depends on the [`crate::domain::mode::ServiceMode`];
//! [`crate::routes`] picks the groups to mount.

use crate::api::handlers::{
    links_handler, login_handler, logout_handler, register_handler, shorten_handler,
    user_links_handler, user_shorten_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Anonymous routes of the public mode.
///
/// # Endpoints
///
/// - `POST /shorten` - Shorten a URL (deduplicated)
/// - `GET  /links`   - List all links (paginated)
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/links", get(links_handler))
}

/// Account routes that need no token.
///
/// # Endpoints
///
/// - `POST /register` - Create an account
/// - `POST /login`    - Issue a bearer token
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register_handler))
        .route("/login", post(login_handler))
}

/// Account routes that require a bearer token, mounted under `/auth`.
///
/// # Endpoints
///
/// - `POST /logout` - Revoke the presented token
pub fn session_routes() -> Router<AppState> {
    Router::new().route("/logout", post(logout_handler))
}

/// Link routes scoped to the authenticated user, mounted under `/api`.
///
/// # Endpoints
///
/// - `POST /shorten` - Shorten a URL (always a new link)
/// - `GET  /links`   - List the caller's links (paginated)
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(user_shorten_handler))
        .route("/links", get(user_links_handler))
}
