//! Error types raised by repositories and domain services.
//!
//! Repositories speak [`RepositoryError`]; the link registry and redirect
//! resolver translate those into [`LinkError`], and the account services into
//! [`AuthError`]. The HTTP layer maps all three onto [`crate::error::AppError`].

use std::fmt;
use thiserror::Error;

/// Unique key a storage write collided on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueKey {
    ShortCode,
    /// Original URL among public (unowned) links.
    OriginalUrl,
    Username,
    TokenHash,
}

impl fmt::Display for UniqueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ShortCode => "short_code",
            Self::OriginalUrl => "original_url",
            Self::Username => "username",
            Self::TokenHash => "token_hash",
        };
        f.write_str(name)
    }
}

/// Failure reported by a storage backend.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("unique constraint violated on {0}")]
    Conflict(UniqueKey),

    #[error("storage backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl RepositoryError {
    /// Wraps any backend error.
    pub fn backend(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Backend(err.into())
    }
}

/// Errors produced by link creation and resolution.
#[derive(Debug, Error)]
pub enum LinkError {
    /// No link is registered under the code.
    #[error("short link `{code}` not found")]
    NotFound { code: String },

    /// A candidate code was already taken at insert time.
    ///
    /// Retried inside [`crate::application::services::LinkService::create`];
    /// callers never observe it.
    #[error("candidate code `{code}` is already taken")]
    DuplicateCandidate { code: String },

    /// Every attempt to find a free code collided.
    #[error("no unique short code found after {attempts} attempts")]
    CapacityExhausted { attempts: usize },

    #[error("invalid URL: {reason}")]
    InvalidUrl { reason: String },

    #[error(transparent)]
    Persistence(#[from] RepositoryError),
}

impl LinkError {
    pub fn not_found(code: impl Into<String>) -> Self {
        Self::NotFound { code: code.into() }
    }
}

/// Errors produced by registration, login, and token authentication.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("username `{0}` is already taken")]
    UsernameTaken(String),

    #[error("invalid username or password")]
    WrongCredentials,

    #[error("invalid or revoked token")]
    InvalidToken,

    #[error("password hashing failed: {0}")]
    PasswordHash(String),

    #[error("token generation failed: {0}")]
    TokenGeneration(String),

    #[error(transparent)]
    Persistence(#[from] RepositoryError),
}
