//! Repository trait for blog posts.

use crate::domain::entities::{NewPost, Post, PostPatch};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing posts.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgPostRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Creates a new post.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors, including a missing author.
    async fn create(&self, new_post: NewPost) -> Result<Post, AppError>;

    /// Finds a post by primary key.
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, AppError>;

    /// Lists posts newest first.
    ///
    /// # Arguments
    ///
    /// - `offset` - Number of posts to skip
    /// - `limit` - Maximum number of posts to return
    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Post>, AppError>;

    /// Counts all posts.
    async fn count(&self) -> Result<i64, AppError>;

    /// Replaces title and content and bumps `updated_at`.
    ///
    /// Returns `Ok(None)` if the post does not exist.
    async fn update(&self, id: i64, patch: PostPatch) -> Result<Option<Post>, AppError>;

    /// Deletes a post together with its comments.
    ///
    /// Returns `Ok(true)` if a post was removed, `Ok(false)` if none matched.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}
