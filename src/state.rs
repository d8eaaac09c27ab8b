//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::{AuthService, LinkService, RedirectService};
use crate::domain::mode::ServiceMode;
use crate::domain::repositories::LinkRepository;
use crate::infrastructure::cache::CacheService;
use crate::infrastructure::persistence::Repositories;
use crate::utils::code_generator::CodeGenerator;

/// Settings that shape request handling, independent of storage.
#[derive(Debug, Clone)]
pub struct ServiceOptions {
    pub mode: ServiceMode,
    /// Prefix prepended to codes in returned short links.
    pub base_url: String,
    pub generator: CodeGenerator,
    pub max_attempts: usize,
    /// HMAC key for API tokens; unused in public mode.
    pub signing_secret: String,
}

/// Application state shared across all HTTP handlers.
///
/// Cheap to clone: every service sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub redirect_service: Arc<RedirectService>,
    pub auth_service: Arc<AuthService>,
    pub links: Arc<dyn LinkRepository>,
    pub cache: Arc<dyn CacheService>,
    pub mode: ServiceMode,
    pub base_url: String,
}

impl AppState {
    /// Wires services over the given storage and cache.
    pub fn new(
        repositories: Repositories,
        cache: Arc<dyn CacheService>,
        options: ServiceOptions,
    ) -> Self {
        let link_service = Arc::new(LinkService::new(
            repositories.links.clone(),
            options.generator,
            options.max_attempts,
        ));

        let redirect_service = Arc::new(RedirectService::new(
            repositories.links.clone(),
            cache.clone(),
            options.mode.click_tracking(),
        ));

        let auth_service = Arc::new(AuthService::new(
            repositories.users,
            repositories.tokens,
            options.signing_secret,
        ));

        Self {
            link_service,
            redirect_service,
            auth_service,
            links: repositories.links,
            cache,
            mode: options.mode,
            base_url: options.base_url,
        }
    }

    /// Builds the public short link for `code`.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), code)
    }
}
