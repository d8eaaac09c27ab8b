//! Repository trait for short link data access.

use crate::domain::entities::{Link, NewLink};
use crate::domain::errors::RepositoryError;
use async_trait::async_trait;

/// Storage contract the link registry and redirect resolver are built on.
///
/// Implementations must guarantee:
///
/// - `short_code` is unique across all links; a colliding insert fails with
///   [`RepositoryError::Conflict`]`(UniqueKey::ShortCode)`
/// - `original_url` is unique among public links (no owner); a colliding
///   insert fails with `Conflict(UniqueKey::OriginalUrl)`
/// - [`LinkRepository::record_click`] increments the counter atomically
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryLinkRepository`] - In-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a new link with `click_count = 0`.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Conflict`] on a uniqueness violation and
    /// [`RepositoryError::Backend`] on any other storage failure.
    async fn insert(&self, new_link: NewLink) -> Result<Link, RepositoryError>;

    /// Finds a link by its short code.
    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, RepositoryError>;

    /// Finds the deduplicated public link for an exact original URL.
    async fn find_public_by_url(&self, original_url: &str)
    -> Result<Option<Link>, RepositoryError>;

    /// Atomically increments the click counter and returns the original URL.
    ///
    /// Returns `Ok(None)` when no link has this code.
    async fn record_click(&self, code: &str) -> Result<Option<String>, RepositoryError>;

    /// Lists links in insertion order.
    ///
    /// `owner_id = None` lists every link; `Some(id)` only that owner's links.
    async fn list(
        &self,
        owner_id: Option<i64>,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Link>, RepositoryError>;

    /// Counts links with the same owner filter as [`LinkRepository::list`].
    async fn count(&self, owner_id: Option<i64>) -> Result<i64, RepositoryError>;
}
