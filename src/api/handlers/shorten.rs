//! Handlers for link shortening endpoints.

use axum::{Extension, Json, extract::State};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::api::middleware::auth::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a public short link.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com" }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "original_url": "https://example.com",
///   "short_code": "aB3xY9",
///   "short_url": "http://localhost:3000/aB3xY9"
/// }
/// ```
///
/// Shortening a URL that already has a public link returns that link.
///
/// # Errors
///
/// Returns 400 Bad Request if validation fails.
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<Json<ShortenResponse>, AppError> {
    create_link(&state, payload, None).await
}

/// Creates a short link owned by the authenticated user.
///
/// # Endpoint
///
/// `POST /api/shorten` (Bearer token required)
///
/// Request and response bodies match [`shorten_handler`]. Every call mints a
/// new link, even for a URL the user has shortened before.
pub async fn user_shorten_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<ShortenRequest>,
) -> Result<Json<ShortenResponse>, AppError> {
    create_link(&state, payload, Some(user.id)).await
}

async fn create_link(
    state: &AppState,
    payload: ShortenRequest,
    owner_id: Option<i64>,
) -> Result<Json<ShortenResponse>, AppError> {
    payload.validate()?;

    let link = state
        .link_service
        .create(&payload.url, owner_id, state.mode.dedup_policy())
        .await?;

    let short_url = state.short_url(&link.short_code);

    Ok(Json(ShortenResponse::new(link, short_url)))
}
