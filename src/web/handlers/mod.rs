//! HTML page handlers plus the JSON health check.

pub mod comments;
pub mod health;
pub mod home;
pub mod posts;
pub mod users;

pub use health::health_handler;
pub use home::home;
