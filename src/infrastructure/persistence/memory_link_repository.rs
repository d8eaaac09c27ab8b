//! In-process implementation of the link repository.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::HashMap;

use crate::domain::entities::{Link, NewLink};
use crate::domain::errors::{RepositoryError, UniqueKey};
use crate::domain::repositories::LinkRepository;

#[derive(Default)]
struct LinkTable {
    /// Insertion order; `id` is the position plus one.
    links: Vec<Link>,
    by_code: HashMap<String, usize>,
    deduplicated_by_url: HashMap<String, usize>,
}

/// Link storage held in process memory.
///
/// All indexes live behind a single lock, so uniqueness checks and inserts are
/// one atomic step, as is the click increment. Contents are lost on restart.
#[derive(Default)]
pub struct MemoryLinkRepository {
    table: RwLock<LinkTable>,
}

impl MemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn page(offset: i64, limit: i64) -> (usize, usize) {
    (
        usize::try_from(offset).unwrap_or(0),
        usize::try_from(limit).unwrap_or(0),
    )
}

#[async_trait]
impl LinkRepository for MemoryLinkRepository {
    async fn insert(&self, new_link: NewLink) -> Result<Link, RepositoryError> {
        let mut table = self.table.write();

        if table.by_code.contains_key(&new_link.short_code) {
            return Err(RepositoryError::Conflict(UniqueKey::ShortCode));
        }
        let deduplicated = new_link.deduplicated && new_link.owner_id.is_none();
        if deduplicated && table.deduplicated_by_url.contains_key(&new_link.original_url) {
            return Err(RepositoryError::Conflict(UniqueKey::OriginalUrl));
        }

        let idx = table.links.len();
        let link = Link::new(
            idx as i64 + 1,
            new_link.original_url,
            new_link.short_code,
            new_link.owner_id,
            0,
            Utc::now(),
        );

        table.by_code.insert(link.short_code.clone(), idx);
        if deduplicated {
            table
                .deduplicated_by_url
                .insert(link.original_url.clone(), idx);
        }
        table.links.push(link.clone());

        Ok(link)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, RepositoryError> {
        let table = self.table.read();
        Ok(table.by_code.get(code).map(|&idx| table.links[idx].clone()))
    }

    async fn find_public_by_url(
        &self,
        original_url: &str,
    ) -> Result<Option<Link>, RepositoryError> {
        let table = self.table.read();
        Ok(table
            .deduplicated_by_url
            .get(original_url)
            .map(|&idx| table.links[idx].clone()))
    }

    async fn record_click(&self, code: &str) -> Result<Option<String>, RepositoryError> {
        let mut table = self.table.write();

        let Some(&idx) = table.by_code.get(code) else {
            return Ok(None);
        };

        let link = &mut table.links[idx];
        link.click_count += 1;
        Ok(Some(link.original_url.clone()))
    }

    async fn list(
        &self,
        owner_id: Option<i64>,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Link>, RepositoryError> {
        let (offset, limit) = page(offset, limit);
        let table = self.table.read();

        Ok(table
            .links
            .iter()
            .filter(|link| owner_id.is_none_or(|owner| link.is_owned_by(owner)))
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn count(&self, owner_id: Option<i64>) -> Result<i64, RepositoryError> {
        let table = self.table.read();
        let count = table
            .links
            .iter()
            .filter(|link| owner_id.is_none_or(|owner| link.is_owned_by(owner)))
            .count();
        Ok(count as i64)
    }
}
