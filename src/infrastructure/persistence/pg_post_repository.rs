//! PostgreSQL implementation of post repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewPost, Post, PostPatch};
use crate::domain::repositories::PostRepository;
use crate::error::AppError;

/// PostgreSQL repository for posts.
///
/// Every read joins `users` to fill in the author's display name.
pub struct PgPostRepository {
    pool: Arc<PgPool>,
}

impl PgPostRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct PostRow {
    id: i64,
    author_id: i64,
    author_name: String,
    title: String,
    content: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Post {
            id: row.id,
            author_id: row.author_id,
            author_name: row.author_name,
            title: row.title,
            content: row.content,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    async fn create(&self, new_post: NewPost) -> Result<Post, AppError> {
        let row: PostRow = sqlx::query_as(
            r#"
            WITH inserted AS (
                INSERT INTO posts (author_id, title, content)
                VALUES ($1, $2, $3)
                RETURNING id, author_id, title, content, created_at, updated_at
            )
            SELECT i.id, i.author_id, u.name AS author_name, i.title, i.content,
                   i.created_at, i.updated_at
            FROM inserted i
            JOIN users u ON u.id = i.author_id
            "#,
        )
        .bind(new_post.author_id)
        .bind(&new_post.title)
        .bind(&new_post.content)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, AppError> {
        let row: Option<PostRow> = sqlx::query_as(
            r#"
            SELECT p.id, p.author_id, u.name AS author_name, p.title, p.content,
                   p.created_at, p.updated_at
            FROM posts p
            JOIN users u ON u.id = p.author_id
            WHERE p.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Post::from))
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Post>, AppError> {
        let rows: Vec<PostRow> = sqlx::query_as(
            r#"
            SELECT p.id, p.author_id, u.name AS author_name, p.title, p.content,
                   p.created_at, p.updated_at
            FROM posts p
            JOIN users u ON u.id = p.author_id
            ORDER BY p.created_at DESC, p.id DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Post::from).collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn update(&self, id: i64, patch: PostPatch) -> Result<Option<Post>, AppError> {
        let row: Option<PostRow> = sqlx::query_as(
            r#"
            WITH updated AS (
                UPDATE posts
                SET title = $2, content = $3, updated_at = NOW()
                WHERE id = $1
                RETURNING id, author_id, title, content, created_at, updated_at
            )
            SELECT p.id, p.author_id, u.name AS author_name, p.title, p.content,
                   p.created_at, p.updated_at
            FROM updated p
            JOIN users u ON u.id = p.author_id
            "#,
        )
        .bind(id)
        .bind(&patch.title)
        .bind(&patch.content)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Post::from))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM comments WHERE post_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(result.rows_affected() > 0)
    }
}
