//! Core domain entities representing the business data model.
//!
//! # Entity Types
//!
//! - [`Link`] - A shortened URL mapping
//! - [`User`] - An account that owns links (accounts mode only)
//!
//! Entities follow the "New Type" pattern with separate structs for creation
//! (`NewLink`, `NewUser`).

pub mod link;
pub mod user;

pub use link::{Link, NewLink};
pub use user::{NewUser, User};
