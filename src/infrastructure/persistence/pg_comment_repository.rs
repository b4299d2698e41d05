//! PostgreSQL implementation of comment repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Comment, NewComment};
use crate::domain::repositories::CommentRepository;
use crate::error::AppError;

const POST_FOREIGN_KEY: &str = "comments_post_id_fkey";

/// PostgreSQL repository for comments.
pub struct PgCommentRepository {
    pool: Arc<PgPool>,
}

impl PgCommentRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct CommentRow {
    id: i64,
    post_id: i64,
    author_id: i64,
    author_name: String,
    content: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Comment {
            id: row.id,
            post_id: row.post_id,
            author_id: row.author_id,
            author_name: row.author_name,
            content: row.content,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// The post can vanish between the caller's existence check and the insert.
fn insert_error(e: sqlx::Error, post_id: i64) -> AppError {
    let post_missing = e.as_database_error().is_some_and(|db| {
        db.is_foreign_key_violation() && db.constraint() == Some(POST_FOREIGN_KEY)
    });

    if post_missing {
        AppError::not_found("Post not found", json!({ "post_id": post_id }))
    } else {
        e.into()
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    async fn create(&self, new_comment: NewComment) -> Result<Comment, AppError> {
        let row: CommentRow = sqlx::query_as(
            r#"
            WITH inserted AS (
                INSERT INTO comments (post_id, author_id, content)
                VALUES ($1, $2, $3)
                RETURNING id, post_id, author_id, content, created_at, updated_at
            )
            SELECT i.id, i.post_id, i.author_id, u.name AS author_name, i.content,
                   i.created_at, i.updated_at
            FROM inserted i
            JOIN users u ON u.id = i.author_id
            "#,
        )
        .bind(new_comment.post_id)
        .bind(new_comment.author_id)
        .bind(&new_comment.content)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|e| insert_error(e, new_comment.post_id))?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Comment>, AppError> {
        let row: Option<CommentRow> = sqlx::query_as(
            r#"
            SELECT c.id, c.post_id, c.author_id, u.name AS author_name, c.content,
                   c.created_at, c.updated_at
            FROM comments c
            JOIN users u ON u.id = c.author_id
            WHERE c.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Comment::from))
    }

    async fn list_for_post(&self, post_id: i64) -> Result<Vec<Comment>, AppError> {
        let rows: Vec<CommentRow> = sqlx::query_as(
            r#"
            SELECT c.id, c.post_id, c.author_id, u.name AS author_name, c.content,
                   c.created_at, c.updated_at
            FROM comments c
            JOIN users u ON u.id = c.author_id
            WHERE c.post_id = $1
            ORDER BY c.created_at, c.id
            "#,
        )
        .bind(post_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Comment::from).collect())
    }

    async fn update(&self, id: i64, content: String) -> Result<Option<Comment>, AppError> {
        let row: Option<CommentRow> = sqlx::query_as(
            r#"
            WITH updated AS (
                UPDATE comments
                SET content = $2, updated_at = NOW()
                WHERE id = $1
                RETURNING id, post_id, author_id, content, created_at, updated_at
            )
            SELECT c.id, c.post_id, c.author_id, u.name AS author_name, c.content,
                   c.created_at, c.updated_at
            FROM updated c
            JOIN users u ON u.id = c.author_id
            "#,
        )
        .bind(id)
        .bind(&content)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Comment::from))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
