//! Repository trait for comments.

use crate::domain::entities::{Comment, NewComment};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing comments.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgCommentRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Creates a comment.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors, including a
    /// foreign key violation when the post vanished concurrently.
    async fn create(&self, new_comment: NewComment) -> Result<Comment, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Comment>, AppError>;

    /// Lists the comments of a post, oldest first.
    async fn list_for_post(&self, post_id: i64) -> Result<Vec<Comment>, AppError>;

    /// Replaces the content and bumps `updated_at`.
    ///
    /// Returns `Ok(None)` if the comment does not exist.
    async fn update(&self, id: i64, content: String) -> Result<Option<Comment>, AppError>;

    /// Returns `Ok(true)` if a comment was removed.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}
