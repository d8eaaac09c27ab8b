//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};

/// A shortened URL with its ownership and click counter.
///
/// Every field except `click_count` is fixed at creation. `owner_id` is `None`
/// for public links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: i64,
    pub original_url: String,
    pub short_code: String,
    pub owner_id: Option<i64>,
    pub click_count: i64,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        id: i64,
        original_url: String,
        short_code: String,
        owner_id: Option<i64>,
        click_count: i64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            original_url,
            short_code,
            owner_id,
            click_count,
            created_at,
        }
    }

    /// Returns true if no user owns the link.
    pub fn is_public(&self) -> bool {
        self.owner_id.is_none()
    }

    /// Returns true if the link belongs to `owner_id`.
    pub fn is_owned_by(&self, owner_id: i64) -> bool {
        self.owner_id == Some(owner_id)
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub original_url: String,
    pub short_code: String,
    pub owner_id: Option<i64>,
    /// Claims the URL for deduplication: at most one such public link may
    /// exist per URL.
    pub deduplicated: bool,
}
