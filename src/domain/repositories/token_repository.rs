//! Repository trait for API token authentication.

use crate::domain::errors::RepositoryError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// API token issued to a user at login.
///
/// Only the keyed hash of the token is stored.
#[derive(Debug, Clone)]
pub struct ApiToken {
    pub id: i64,
    pub user_id: i64,
    pub token_hash: String,
    pub created_at: DateTime<Utc>,
    pub last_used_at: Option<DateTime<Utc>>,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl ApiToken {
    pub fn is_active(&self) -> bool {
        self.revoked_at.is_none()
    }
}

/// Repository interface for API token management.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgTokenRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryTokenRepository`] - In-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Stores a new token hash for a user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict(UniqueKey::TokenHash)` if the hash
    /// already exists.
    async fn create_token(&self, user_id: i64, token_hash: &str)
    -> Result<ApiToken, RepositoryError>;

    /// Finds a non-revoked token by hash.
    async fn find_active(&self, token_hash: &str) -> Result<Option<ApiToken>, RepositoryError>;

    /// Updates the `last_used_at` timestamp for a token.
    async fn update_last_used(&self, token_hash: &str) -> Result<(), RepositoryError>;

    /// Revokes a token. Returns `false` if it was unknown or already revoked.
    async fn revoke(&self, token_hash: &str) -> Result<bool, RepositoryError>;
}
