//! Redirect resolution from short code to original URL.

use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::errors::LinkError;
use crate::domain::mode::ClickTracking;
use crate::domain::repositories::LinkRepository;
use crate::infrastructure::cache::CacheService;

/// Resolves short codes for the redirect endpoint.
///
/// With click tracking enabled every resolution goes to storage, which
/// increments the counter and returns the URL in one atomic step; caching
/// would skip counts. Without it the cache is consulted first.
pub struct RedirectService {
    repository: Arc<dyn LinkRepository>,
    cache: Arc<dyn CacheService>,
    click_tracking: ClickTracking,
}

impl RedirectService {
    pub fn new(
        repository: Arc<dyn LinkRepository>,
        cache: Arc<dyn CacheService>,
        click_tracking: ClickTracking,
    ) -> Self {
        Self {
            repository,
            cache,
            click_tracking,
        }
    }

    /// Returns the original URL for `code`.
    ///
    /// # Errors
    ///
    /// - [`LinkError::NotFound`] if no link uses the code
    /// - [`LinkError::Persistence`] on storage failures
    pub async fn resolve(&self, code: &str) -> Result<String, LinkError> {
        match self.click_tracking {
            ClickTracking::Enabled => self
                .repository
                .record_click(code)
                .await?
                .ok_or_else(|| LinkError::not_found(code)),
            ClickTracking::Disabled => self.resolve_cached(code).await,
        }
    }

    async fn resolve_cached(&self, code: &str) -> Result<String, LinkError> {
        match self.cache.get_url(code).await {
            Ok(Some(url)) => {
                debug!(%code, "cache hit");
                return Ok(url);
            }
            Ok(None) => debug!(%code, "cache miss"),
            Err(e) => warn!(error = %e, %code, "cache read failed, falling back to storage"),
        }

        let link = self
            .repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| LinkError::not_found(code))?;

        if let Err(e) = self.cache.set_url(code, &link.original_url, None).await {
            warn!(error = %e, %code, "failed to populate cache");
        }

        Ok(link.original_url)
    }
}
