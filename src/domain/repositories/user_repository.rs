//! Repository trait for user accounts.

use crate::domain::entities::{NewUser, User};
use crate::domain::errors::RepositoryError;
use async_trait::async_trait;

/// Repository interface for registered users.
///
/// Usernames are unique; a duplicate insert fails with
/// `RepositoryError::Conflict(UniqueKey::Username)`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, new_user: NewUser) -> Result<User, RepositoryError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepositoryError>;

    async fn count(&self) -> Result<i64, RepositoryError>;
}
