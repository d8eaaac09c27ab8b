//! Domain layer containing business entities and storage contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Link and user records
//! - [`repositories`] - Storage traits implemented by the infrastructure layer
//! - [`errors`] - Repository, link, and authentication error types
//! - [`mode`] - Service variants and the dedup/click-tracking policies they select
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Repository traits define contracts implemented by infrastructure layer
//! - Business logic is encapsulated in services (see [`crate::application::services`])

pub mod entities;
pub mod errors;
pub mod mode;
pub mod repositories;
