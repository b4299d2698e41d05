//! Post management service.

use serde_json::json;
use std::sync::Arc;

use crate::domain::entities::{NewPost, Page, Post, PostPatch};
use crate::domain::identity::AuthenticatedUser;
use crate::domain::repositories::PostRepository;
use crate::error::AppError;

/// Default page size of the post index.
pub const DEFAULT_PER_PAGE: u32 = 10;
/// Largest page size a visitor may request.
pub const MAX_PER_PAGE: u32 = 100;

/// Service for reading and administering blog posts.
///
/// Write operations are only reachable through admin-guarded routes; the
/// service itself does not re-check the role.
pub struct PostService {
    repository: Arc<dyn PostRepository>,
}

impl PostService {
    pub fn new(repository: Arc<dyn PostRepository>) -> Self {
        Self { repository }
    }

    /// Lists posts newest first.
    ///
    /// `per_page` is clamped to `1..=MAX_PER_PAGE`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `page` is 0.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list(&self, page: u32, per_page: u32) -> Result<Page<Post>, AppError> {
        if page == 0 {
            return Err(AppError::bad_request(
                "Page must be greater than 0",
                json!({ "page": page }),
            ));
        }
        let per_page = per_page.clamp(1, MAX_PER_PAGE);
        let offset = i64::from(page - 1) * i64::from(per_page);

        let total = self.repository.count().await?;
        let items = self.repository.list(offset, i64::from(per_page)).await?;

        Ok(Page {
            items,
            page,
            per_page,
            total,
        })
    }

    /// Returns the `limit` most recent posts.
    pub async fn recent(&self, limit: u32) -> Result<Vec<Post>, AppError> {
        self.repository.list(0, i64::from(limit)).await
    }

    /// Total number of posts. Doubles as the database health probe.
    pub async fn count(&self) -> Result<i64, AppError> {
        self.repository.count().await
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the post does not exist.
    pub async fn get(&self, id: i64) -> Result<Post, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| post_not_found(id))
    }

    /// Publishes a post written by `author`.
    pub async fn create(
        &self,
        author: &AuthenticatedUser,
        title: &str,
        content: &str,
    ) -> Result<Post, AppError> {
        let post = self
            .repository
            .create(NewPost {
                author_id: author.id,
                title: title.trim().to_string(),
                content: content.to_string(),
            })
            .await?;

        tracing::info!(post_id = post.id, author_id = author.id, "Post created");
        Ok(post)
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the post does not exist.
    pub async fn update(&self, id: i64, title: &str, content: &str) -> Result<Post, AppError> {
        let patch = PostPatch {
            title: title.trim().to_string(),
            content: content.to_string(),
        };

        let post = self
            .repository
            .update(id, patch)
            .await?
            .ok_or_else(|| post_not_found(id))?;

        tracing::info!(post_id = id, "Post updated");
        Ok(post)
    }

    /// Deletes a post and its comments.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the post does not exist.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !self.repository.delete(id).await? {
            return Err(post_not_found(id));
        }

        tracing::info!(post_id = id, "Post deleted");
        Ok(())
    }
}

fn post_not_found(id: i64) -> AppError {
    AppError::not_found("Post not found", json!({ "post_id": id }))
}
