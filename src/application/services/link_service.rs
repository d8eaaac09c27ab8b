//! Link registry: short link creation, lookup, and listing.

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::entities::{Link, NewLink};
use crate::domain::errors::{LinkError, RepositoryError, UniqueKey};
use crate::domain::mode::DedupPolicy;
use crate::domain::repositories::LinkRepository;
use crate::utils::code_generator::{CodeGenerator, is_reserved};
use crate::utils::url_validator::validate_url;

/// Default bound on candidate codes tried per creation.
pub const DEFAULT_MAX_ATTEMPTS: usize = 10;

/// Service owning the code to link mapping.
///
/// Creation is an optimistic retry loop: generate a candidate, skip it if a
/// link already uses it, otherwise insert and let the storage uniqueness
/// constraint reject a candidate that a concurrent writer claimed in between.
/// No lock is held across the loop.
pub struct LinkService {
    repository: Arc<dyn LinkRepository>,
    generator: CodeGenerator,
    max_attempts: usize,
}

impl LinkService {
    /// Creates a new link service.
    ///
    /// `max_attempts` is clamped to at least one.
    pub fn new(
        repository: Arc<dyn LinkRepository>,
        generator: CodeGenerator,
        max_attempts: usize,
    ) -> Self {
        Self {
            repository,
            generator,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Finds the deduplicated public link for an exact original URL.
    pub async fn find_by_url(&self, original_url: &str) -> Result<Option<Link>, LinkError> {
        Ok(self.repository.find_public_by_url(original_url).await?)
    }

    /// Finds a link by its short code.
    pub async fn find_by_code(&self, code: &str) -> Result<Option<Link>, LinkError> {
        Ok(self.repository.find_by_code(code).await?)
    }

    /// Retrieves a link by code, failing with [`LinkError::NotFound`] on a miss.
    pub async fn get_by_code(&self, code: &str) -> Result<Link, LinkError> {
        self.find_by_code(code)
            .await?
            .ok_or_else(|| LinkError::not_found(code))
    }

    /// Creates a short link for `original_url`.
    ///
    /// # Deduplication
    ///
    /// With [`DedupPolicy::ByOriginalUrl`] an existing deduplicated public
    /// link for the same URL is returned unchanged. The policy only applies to
    /// public links; an owned creation always mints a new record.
    /// [`DedupPolicy::Never`] always mints a new record, even for a URL that
    /// already has one.
    ///
    /// # Errors
    ///
    /// - [`LinkError::InvalidUrl`] if the URL is not an absolute http(s) URL
    /// - [`LinkError::CapacityExhausted`] if every candidate collided
    /// - [`LinkError::Persistence`] on storage failures, unchanged
    pub async fn create(
        &self,
        original_url: &str,
        owner_id: Option<i64>,
        policy: DedupPolicy,
    ) -> Result<Link, LinkError> {
        validate_url(original_url).map_err(|e| LinkError::InvalidUrl {
            reason: e.to_string(),
        })?;

        let dedup = policy == DedupPolicy::ByOriginalUrl && owner_id.is_none();

        if dedup && let Some(existing) = self.find_by_url(original_url).await? {
            debug!(code = %existing.short_code, "returning existing link for URL");
            return Ok(existing);
        }

        for attempt in 1..=self.max_attempts {
            let candidate = self.generator.generate_candidate();

            if is_reserved(&candidate) || self.find_by_code(&candidate).await?.is_some() {
                debug!(attempt, code = %candidate, "candidate collided");
                continue;
            }

            let new_link = NewLink {
                original_url: original_url.to_string(),
                short_code: candidate,
                owner_id,
                deduplicated: dedup,
            };

            match self.insert(new_link).await {
                Ok(link) => {
                    info!(
                        id = link.id,
                        code = %link.short_code,
                        owner_id = ?link.owner_id,
                        attempt,
                        "link created"
                    );
                    return Ok(link);
                }
                Err(LinkError::DuplicateCandidate { code }) => {
                    debug!(attempt, %code, "candidate claimed concurrently");
                }
                Err(other) => return Err(other),
            }
        }

        warn!(
            attempts = self.max_attempts,
            code_space = ?self.generator.code_space(),
            "no free short code found"
        );

        Err(LinkError::CapacityExhausted {
            attempts: self.max_attempts,
        })
    }

    /// Lists links in insertion order.
    ///
    /// `owner_id = None` lists every link (public mode); `Some(id)` lists
    /// only that owner's links.
    pub async fn list_for_owner(
        &self,
        owner_id: Option<i64>,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Link>, LinkError> {
        Ok(self.repository.list(owner_id, offset, limit).await?)
    }

    /// Counts links with the same filter as [`Self::list_for_owner`].
    pub async fn count_for_owner(&self, owner_id: Option<i64>) -> Result<i64, LinkError> {
        Ok(self.repository.count(owner_id).await?)
    }

    /// Inserts one candidate, classifying uniqueness violations.
    ///
    /// A short code conflict becomes [`LinkError::DuplicateCandidate`]. A
    /// URL conflict on a deduplicated insert means a concurrent request
    /// inserted the same URL first; its record is returned.
    async fn insert(&self, new_link: NewLink) -> Result<Link, LinkError> {
        let code = new_link.short_code.clone();
        let original_url = new_link.original_url.clone();
        let deduplicated = new_link.deduplicated;

        match self.repository.insert(new_link).await {
            Ok(link) => Ok(link),
            Err(RepositoryError::Conflict(UniqueKey::ShortCode)) => {
                Err(LinkError::DuplicateCandidate { code })
            }
            Err(RepositoryError::Conflict(UniqueKey::OriginalUrl)) if deduplicated => self
                .find_by_url(&original_url)
                .await?
                .ok_or(LinkError::Persistence(RepositoryError::Conflict(
                    UniqueKey::OriginalUrl,
                ))),
            Err(other) => Err(other.into()),
        }
    }
}
