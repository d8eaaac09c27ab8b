//! Utility functions for code generation, validation, and storage errors.
//!
//! - [`code_generator`] - Random short code generation
//! - [`url_validator`] - Syntactic URL checks
//! - [`password`] - Argon2id password hashing
//! - [`db_error`] - SQLx error classification

pub mod code_generator;
pub mod db_error;
pub mod password;
pub mod url_validator;
