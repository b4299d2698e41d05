//! Repository trait for login sessions.

use crate::domain::entities::{NewSession, Session};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Repository interface backing the session store.
///
/// Sessions are keyed by the HMAC of their token; raw tokens are never
/// persisted.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgSessionRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Stores a new session.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the token hash already exists.
    async fn create(&self, new_session: NewSession) -> Result<Session, AppError>;

    /// Finds a session by token hash, expired or not.
    async fn find_by_token_hash(&self, token_hash: &str) -> Result<Option<Session>, AppError>;

    /// Deletes a session by token hash. Returns `Ok(true)` if one was removed.
    async fn delete_by_token_hash(&self, token_hash: &str) -> Result<bool, AppError>;

    /// Deletes every session that expired at or before `now`.
    ///
    /// Returns the number of removed sessions.
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, AppError>;
}
