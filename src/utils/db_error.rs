//! Translation of SQLx errors into repository errors.

use crate::domain::errors::{RepositoryError, UniqueKey};

/// Maps a unique violation to the key it collided on.
///
/// Returns `None` for any other error, including unique violations on
/// constraints this service does not know about.
pub fn unique_violation_key(e: &sqlx::Error) -> Option<UniqueKey> {
    let db_err = e.as_database_error()?;

    if !db_err.is_unique_violation() {
        return None;
    }

    match db_err.constraint()? {
        "links_short_code_key" => Some(UniqueKey::ShortCode),
        "links_public_original_url_key" => Some(UniqueKey::OriginalUrl),
        "users_username_key" => Some(UniqueKey::Username),
        "api_tokens_token_hash_key" => Some(UniqueKey::TokenHash),
        _ => None,
    }
}

impl From<sqlx::Error> for RepositoryError {
    fn from(e: sqlx::Error) -> Self {
        match unique_violation_key(&e) {
            Some(key) => RepositoryError::Conflict(key),
            None => RepositoryError::backend(e),
        }
    }
}
