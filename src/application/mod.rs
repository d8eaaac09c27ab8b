//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! validation, and business rules. Services consume repository traits and provide
//! a clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Short code allocation, lookup, and listing
//! - [`services::redirect_service::RedirectService`] - Code resolution and click counting
//! - [`services::auth_service::AuthService`] - Account registration and bearer tokens

pub mod services;
