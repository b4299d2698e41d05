//! Infrastructure layer: concrete adapters for the domain repository traits.
//!
//! - [`persistence`] - PostgreSQL repositories built on SQLx
//! - [`database`] - Connection pool setup and migrations

pub mod database;
pub mod persistence;
