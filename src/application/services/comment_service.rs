//! Comment service with ownership rules.

use serde_json::json;
use std::sync::Arc;

use crate::domain::entities::{Comment, NewComment};
use crate::domain::identity::AuthenticatedUser;
use crate::domain::repositories::{CommentRepository, PostRepository};
use crate::error::AppError;

/// Service for commenting on posts.
///
/// # Ownership
///
/// - Any signed-in user may comment on an existing post
/// - Only the author may edit a comment
/// - The author or an admin may delete a comment
pub struct CommentService {
    comments: Arc<dyn CommentRepository>,
    posts: Arc<dyn PostRepository>,
}

impl CommentService {
    pub fn new(comments: Arc<dyn CommentRepository>, posts: Arc<dyn PostRepository>) -> Self {
        Self { comments, posts }
    }

    /// Comments of a post, oldest first.
    pub async fn list_for_post(&self, post_id: i64) -> Result<Vec<Comment>, AppError> {
        self.comments.list_for_post(post_id).await
    }

    /// Adds a comment to `post_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the post does not exist.
    pub async fn create(
        &self,
        author: &AuthenticatedUser,
        post_id: i64,
        content: &str,
    ) -> Result<Comment, AppError> {
        if self.posts.find_by_id(post_id).await?.is_none() {
            return Err(AppError::not_found(
                "Post not found",
                json!({ "post_id": post_id }),
            ));
        }

        let comment = self
            .comments
            .create(NewComment {
                post_id,
                author_id: author.id,
                content: content.trim().to_string(),
            })
            .await?;

        tracing::info!(comment_id = comment.id, post_id, author_id = author.id, "Comment created");
        Ok(comment)
    }

    /// Loads a comment the viewer is allowed to edit.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the comment does not exist.
    /// Returns [`AppError::Forbidden`] if the viewer is not the author.
    pub async fn get_for_edit(
        &self,
        viewer: &AuthenticatedUser,
        id: i64,
    ) -> Result<Comment, AppError> {
        let comment = self.find(id).await?;

        if !comment.is_authored_by(viewer.id) {
            return Err(AppError::forbidden(
                "You can only edit your own comments",
                json!({ "comment_id": id }),
            ));
        }

        Ok(comment)
    }

    /// Replaces the content of a comment owned by `viewer`.
    ///
    /// # Errors
    ///
    /// Same as [`CommentService::get_for_edit`].
    pub async fn update(
        &self,
        viewer: &AuthenticatedUser,
        id: i64,
        content: &str,
    ) -> Result<Comment, AppError> {
        self.get_for_edit(viewer, id).await?;

        let comment = self
            .comments
            .update(id, content.trim().to_string())
            .await?
            .ok_or_else(|| comment_not_found(id))?;

        tracing::info!(comment_id = id, "Comment updated");
        Ok(comment)
    }

    /// Deletes a comment and returns the id of the post it belonged to.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the comment does not exist.
    /// Returns [`AppError::Forbidden`] if the viewer is neither the author nor an admin.
    pub async fn delete(&self, viewer: &AuthenticatedUser, id: i64) -> Result<i64, AppError> {
        let comment = self.find(id).await?;

        if !comment.is_authored_by(viewer.id) && !viewer.is_admin() {
            return Err(AppError::forbidden(
                "You can only delete your own comments",
                json!({ "comment_id": id }),
            ));
        }

        if !self.comments.delete(id).await? {
            return Err(comment_not_found(id));
        }

        tracing::info!(comment_id = id, by = viewer.id, "Comment deleted");
        Ok(comment.post_id)
    }

    async fn find(&self, id: i64) -> Result<Comment, AppError> {
        self.comments
            .find_by_id(id)
            .await?
            .ok_or_else(|| comment_not_found(id))
    }
}

fn comment_not_found(id: i64) -> AppError {
    AppError::not_found("Comment not found", json!({ "comment_id": id }))
}
