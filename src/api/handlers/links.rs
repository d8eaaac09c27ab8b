//! Handlers for link listing.

use axum::{
    Extension, Json,
    extract::{Query, State},
};
use serde_json::json;

use crate::api::dto::links::{LinkItem, LinkListResponse, PaginationMeta};
use crate::api::dto::pagination::PaginationParams;
use crate::api::middleware::auth::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

/// Lists every link in insertion order.
///
/// # Endpoint
///
/// `GET /links`
///
/// # Query Parameters
///
/// - `page` (optional): Page number (default: 1)
/// - `page_size` (optional): Items per page (default: 25, max: 100)
///
/// # Errors
///
/// Returns 400 Bad Request if pagination parameters are invalid.
pub async fn links_handler(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<LinkListResponse>, AppError> {
    list_links(&state, params, None).await
}

/// Lists the authenticated user's links.
///
/// # Endpoint
///
/// `GET /api/links` (Bearer token required)
///
/// Same parameters and response as [`links_handler`], restricted to links
/// the caller owns.
pub async fn user_links_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<LinkListResponse>, AppError> {
    list_links(&state, params, Some(user.id)).await
}

async fn list_links(
    state: &AppState,
    params: PaginationParams,
    owner_id: Option<i64>,
) -> Result<Json<LinkListResponse>, AppError> {
    let (offset, limit) = params
        .validate_and_get_offset_limit()
        .map_err(|e| AppError::bad_request(e, json!({})))?;

    let (links, total_items) = tokio::try_join!(
        state.link_service.list_for_owner(owner_id, offset, limit),
        state.link_service.count_for_owner(owner_id)
    )?;

    let items = links
        .into_iter()
        .map(|link| {
            let short_url = state.short_url(&link.short_code);
            LinkItem::new(link, short_url)
        })
        .collect();

    Ok(Json(LinkListResponse {
        pagination: PaginationMeta::new(params.page(), params.page_size(), total_items),
        items,
    }))
}
