//! Business logic services for the application layer.

pub mod auth_service;
pub mod comment_service;
pub mod post_service;

pub use auth_service::AuthService;
pub use comment_service::CommentService;
pub use post_service::PostService;
