//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::errors::RepositoryError;
use crate::domain::repositories::LinkRepository;

#[derive(sqlx::FromRow)]
struct LinkRow {
    id: i64,
    original_url: String,
    short_code: String,
    owner_id: Option<i64>,
    click_count: i64,
    created_at: DateTime<Utc>,
}

impl From<LinkRow> for Link {
    fn from(r: LinkRow) -> Self {
        Link::new(
            r.id,
            r.original_url,
            r.short_code,
            r.owner_id,
            r.click_count,
            r.created_at,
        )
    }
}

/// PostgreSQL repository for link storage and retrieval.
///
/// Uniqueness is enforced by the `links_short_code_key` constraint and the
/// partial `links_public_original_url_key` index; violations surface as
/// [`RepositoryError::Conflict`]. The index keys on `md5(original_url)`, so an
/// MD5 collision between two different URLs also reports
/// `Conflict(OriginalUrl)`.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn insert(&self, new_link: NewLink) -> Result<Link, RepositoryError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            INSERT INTO links (original_url, short_code, owner_id, deduplicated)
            VALUES ($1, $2, $3, $4)
            RETURNING id, original_url, short_code, owner_id, click_count, created_at
            "#,
        )
        .bind(&new_link.original_url)
        .bind(&new_link.short_code)
        .bind(new_link.owner_id)
        .bind(new_link.deduplicated && new_link.owner_id.is_none())
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, RepositoryError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, original_url, short_code, owner_id, click_count, created_at
            FROM links
            WHERE short_code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn find_public_by_url(
        &self,
        original_url: &str,
    ) -> Result<Option<Link>, RepositoryError> {
        // The md5 predicate lets the planner use the partial unique index.
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, original_url, short_code, owner_id, click_count, created_at
            FROM links
            WHERE md5(original_url) = md5($1)
              AND original_url = $1
              AND deduplicated
            "#,
        )
        .bind(original_url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn record_click(&self, code: &str) -> Result<Option<String>, RepositoryError> {
        let url = sqlx::query_scalar::<_, String>(
            r#"
            UPDATE links
            SET click_count = click_count + 1
            WHERE short_code = $1
            RETURNING original_url
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(url)
    }

    async fn list(
        &self,
        owner_id: Option<i64>,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Link>, RepositoryError> {
        let rows = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, original_url, short_code, owner_id, click_count, created_at
            FROM links
            WHERE ($1::bigint IS NULL OR owner_id = $1)
            ORDER BY id ASC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(owner_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Link::from).collect())
    }

    async fn count(&self, owner_id: Option<i64>) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM links WHERE ($1::bigint IS NULL OR owner_id = $1)",
        )
        .bind(owner_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(count)
    }
}
