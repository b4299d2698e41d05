//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx with
//! bound parameters.
//!
//! # Repositories
//!
//! - [`PgUserRepository`] - Accounts and roles
//! - [`PgPostRepository`] - Posts (deletion is transactional with comments)
//! - [`PgCommentRepository`] - Comments
//! - [`PgSessionRepository`] - Session store

pub mod pg_comment_repository;
pub mod pg_post_repository;
pub mod pg_session_repository;
pub mod pg_user_repository;

pub use pg_comment_repository::PgCommentRepository;
pub use pg_post_repository::PgPostRepository;
pub use pg_session_repository::PgSessionRepository;
pub use pg_user_repository::PgUserRepository;
