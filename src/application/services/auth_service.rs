//! Account registration, login, and bearer token authentication.

use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::entities::{NewUser, User};
use crate::domain::errors::{AuthError, RepositoryError, UniqueKey};
use crate::domain::repositories::{TokenRepository, UserRepository};
use crate::utils::password::{hash_password, verify_password};

type HmacSha256 = Hmac<Sha256>;

/// Raw token entropy in bytes.
const TOKEN_BYTES: usize = 32;

/// Service for accounts-mode users and their API tokens.
///
/// Tokens are hashed with HMAC-SHA256 (keyed by `signing_secret`) before storage
/// and comparison. An attacker with read-only access to the database cannot verify
/// or forge tokens without the server-side secret.
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    tokens: Arc<dyn TokenRepository>,
    signing_secret: String,
}

impl AuthService {
    /// Creates a new authentication service.
    ///
    /// # Arguments
    ///
    /// - `users` - account storage
    /// - `tokens` - token storage
    /// - `signing_secret` - HMAC key; must match the value used when tokens were created
    pub fn new(
        users: Arc<dyn UserRepository>,
        tokens: Arc<dyn TokenRepository>,
        signing_secret: String,
    ) -> Self {
        Self {
            users,
            tokens,
            signing_secret,
        }
    }

    /// Hashes a raw token with HMAC-SHA256 using the server signing secret.
    ///
    /// Returns a 64-character lowercase hex-encoded MAC.
    fn hash_token(&self, token: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(self.signing_secret.as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(token.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Registers a new account.
    ///
    /// # Errors
    ///
    /// - [`AuthError::UsernameTaken`] if the username exists
    /// - [`AuthError::PasswordHash`] if hashing fails
    pub async fn register(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let password_hash = hash_password(password)?;

        let user = self
            .users
            .create(NewUser {
                username: username.to_string(),
                password_hash,
            })
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(UniqueKey::Username) => {
                    AuthError::UsernameTaken(username.to_string())
                }
                other => AuthError::Persistence(other),
            })?;

        info!(user_id = user.id, username = %user.username, "user registered");

        Ok(user)
    }

    /// Verifies credentials and issues a new raw bearer token.
    ///
    /// The raw token is returned once; only its keyed hash is persisted.
    /// Unknown usernames and wrong passwords are indistinguishable.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, AuthError> {
        let Some(user) = self.users.find_by_username(username).await? else {
            debug!(%username, "login for unknown user");
            return Err(AuthError::WrongCredentials);
        };

        if !verify_password(password, &user.password_hash)? {
            debug!(user_id = user.id, "login with wrong password");
            return Err(AuthError::WrongCredentials);
        }

        let token = generate_token()?;
        self.tokens
            .create_token(user.id, &self.hash_token(&token))
            .await?;

        info!(user_id = user.id, "token issued");

        Ok(token)
    }

    /// Resolves a raw bearer token to its owner's user id.
    ///
    /// On success the token's `last_used_at` is refreshed; failure to do so
    /// is logged and does not reject the request.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidToken`] for unknown or revoked tokens.
    pub async fn authenticate(&self, token: &str) -> Result<i64, AuthError> {
        let token_hash = self.hash_token(token);

        let Some(api_token) = self.tokens.find_active(&token_hash).await? else {
            return Err(AuthError::InvalidToken);
        };

        if let Err(e) = self.tokens.update_last_used(&token_hash).await {
            warn!(error = %e, token_id = api_token.id, "failed to update token last_used_at");
        }

        Ok(api_token.user_id)
    }

    /// Revokes a raw bearer token.
    pub async fn logout(&self, token: &str) -> Result<(), AuthError> {
        if self.tokens.revoke(&self.hash_token(token)).await? {
            Ok(())
        } else {
            Err(AuthError::InvalidToken)
        }
    }
}

/// Generates a URL-safe random token from 32 bytes of OS entropy.
fn generate_token() -> Result<String, AuthError> {
    let mut buffer = [0u8; TOKEN_BYTES];
    getrandom::fill(&mut buffer).map_err(|e| AuthError::TokenGeneration(e.to_string()))?;

    Ok(base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer))
}
