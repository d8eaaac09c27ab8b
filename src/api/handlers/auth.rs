//! Handlers for account registration, login, and logout.

use axum::{Extension, Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::auth::{CredentialsRequest, LoginResponse, RegisterResponse};
use crate::api::middleware::auth::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

/// Registers a new account.
///
/// # Endpoint
///
/// `POST /auth/register`
///
/// # Errors
///
/// - 400 if the username or password fails validation
/// - 409 if the username is taken
pub async fn register_handler(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    payload.validate()?;

    let user = state
        .auth_service
        .register(&payload.username, &payload.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            id: user.id,
            username: user.username,
        }),
    ))
}

/// Exchanges credentials for a bearer token.
///
/// # Endpoint
///
/// `POST /auth/login`
///
/// The token is shown once; send it as `Authorization: Bearer <token>`.
///
/// # Errors
///
/// Returns 401 on an unknown username or wrong password.
pub async fn login_handler(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let token = state
        .auth_service
        .login(&payload.username, &payload.password)
        .await?;

    Ok(Json(LoginResponse { token }))
}

/// Revokes the bearer token used for this request.
///
/// # Endpoint
///
/// `POST /auth/logout` (Bearer token required)
pub async fn logout_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<StatusCode, AppError> {
    state.auth_service.logout(&user.token).await?;

    Ok(StatusCode::NO_CONTENT)
}
