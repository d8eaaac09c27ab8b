//! Repository implementations.
//!
//! # Repositories
//!
//! - [`PgLinkRepository`], [`PgUserRepository`], [`PgTokenRepository`] - PostgreSQL via SQLx
//! - [`MemoryLinkRepository`], [`MemoryUserRepository`], [`MemoryTokenRepository`] -
//!   process-local storage for development and tests
//!
//! [`Repositories`] bundles one backend's implementations behind trait objects.

pub mod memory_account_repository;
pub mod memory_link_repository;
pub mod pg_link_repository;
pub mod pg_token_repository;
pub mod pg_user_repository;

pub use memory_account_repository::{MemoryTokenRepository, MemoryUserRepository};
pub use memory_link_repository::MemoryLinkRepository;
pub use pg_link_repository::PgLinkRepository;
pub use pg_token_repository::PgTokenRepository;
pub use pg_user_repository::PgUserRepository;

use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::repositories::{LinkRepository, TokenRepository, UserRepository};

/// The set of repositories a running service uses.
#[derive(Clone)]
pub struct Repositories {
    pub links: Arc<dyn LinkRepository>,
    pub users: Arc<dyn UserRepository>,
    pub tokens: Arc<dyn TokenRepository>,
}

impl Repositories {
    /// PostgreSQL-backed repositories sharing one pool.
    pub fn postgres(pool: Arc<PgPool>) -> Self {
        Self {
            links: Arc::new(PgLinkRepository::new(pool.clone())),
            users: Arc::new(PgUserRepository::new(pool.clone())),
            tokens: Arc::new(PgTokenRepository::new(pool)),
        }
    }

    /// Empty in-memory repositories.
    pub fn in_memory() -> Self {
        Self {
            links: Arc::new(MemoryLinkRepository::new()),
            users: Arc::new(MemoryUserRepository::new()),
            tokens: Arc::new(MemoryTokenRepository::new()),
        }
    }
}
