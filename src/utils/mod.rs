//! Helper functions used across the application.
//!
//! - [`password`] - Argon2id password hashing and verification
//! - [`token`] - Session token generation and keyed hashing
//! - [`cookie`] - Session cookie parsing and `Set-Cookie` construction

pub mod cookie;
pub mod password;
pub mod token;
