//! In-process implementations of the user and token repositories.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::HashMap;

use crate::domain::entities::{NewUser, User};
use crate::domain::errors::{RepositoryError, UniqueKey};
use crate::domain::repositories::{ApiToken, TokenRepository, UserRepository};

/// User storage held in process memory.
#[derive(Default)]
pub struct MemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, RepositoryError> {
        let mut users = self.users.write();

        if users.iter().any(|u| u.username == new_user.username) {
            return Err(RepositoryError::Conflict(UniqueKey::Username));
        }

        let user = User {
            id: users.len() as i64 + 1,
            username: new_user.username,
            password_hash: new_user.password_hash,
            created_at: Utc::now(),
        };
        users.push(user.clone());

        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        Ok(self
            .users
            .read()
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepositoryError> {
        Ok(self.users.read().iter().find(|u| u.id == id).cloned())
    }

    async fn count(&self) -> Result<i64, RepositoryError> {
        Ok(self.users.read().len() as i64)
    }
}

/// Token storage held in process memory, keyed by token hash.
#[derive(Default)]
pub struct MemoryTokenRepository {
    tokens: RwLock<HashMap<String, ApiToken>>,
}

impl MemoryTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenRepository for MemoryTokenRepository {
    async fn create_token(
        &self,
        user_id: i64,
        token_hash: &str,
    ) -> Result<ApiToken, RepositoryError> {
        let mut tokens = self.tokens.write();

        if tokens.contains_key(token_hash) {
            return Err(RepositoryError::Conflict(UniqueKey::TokenHash));
        }

        let token = ApiToken {
            id: tokens.len() as i64 + 1,
            user_id,
            token_hash: token_hash.to_string(),
            created_at: Utc::now(),
            last_used_at: None,
            revoked_at: None,
        };
        tokens.insert(token_hash.to_string(), token.clone());

        Ok(token)
    }

    async fn find_active(&self, token_hash: &str) -> Result<Option<ApiToken>, RepositoryError> {
        Ok(self
            .tokens
            .read()
            .get(token_hash)
            .filter(|t| t.is_active())
            .cloned())
    }

    async fn update_last_used(&self, token_hash: &str) -> Result<(), RepositoryError> {
        if let Some(token) = self.tokens.write().get_mut(token_hash) {
            token.last_used_at = Some(Utc::now());
        }
        Ok(())
    }

    async fn revoke(&self, token_hash: &str) -> Result<bool, RepositoryError> {
        let mut tokens = self.tokens.write();

        match tokens.get_mut(token_hash) {
            Some(token) if token.is_active() => {
                token.revoked_at = Some(Utc::now());
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
