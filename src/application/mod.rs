//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a clean API for HTTP
//! handlers.
//!
//! # Available Services
//!
//! - [`services::auth_service::AuthService`] - Registration, sessions and identity resolution
//! - [`services::post_service::PostService`] - Post listing and administration
//! - [`services::comment_service::CommentService`] - Comments and their ownership rules
//!
//! [`session_sweeper`] runs in the background and purges expired sessions.

pub mod services;
pub mod session_sweeper;
