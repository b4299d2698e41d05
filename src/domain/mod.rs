//! Domain layer containing business entities and logic.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`identity`] - The per-request [`identity::CurrentUser`] and the admin policy
//! - [`access`] - Guard decisions (`Login` / `Admin`)
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Repository traits define contracts implemented by infrastructure layer
//! - Business logic is encapsulated in services (see [`crate::application::services`])
//!
//! # Request Identity Flow
//!
//! 1. `set_current_user` middleware reads the session cookie
//! 2. [`crate::application::services::AuthService::resolve`] turns it into a [`identity::CurrentUser`]
//! 3. Guards call [`access::authorize`] on that value before the handler runs

pub mod access;
pub mod entities;
pub mod identity;
pub mod repositories;
