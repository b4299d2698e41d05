//! Account registration, login sessions and per-request identity resolution.

use chrono::{Duration, Utc};
use serde_json::json;
use std::sync::Arc;

use crate::domain::entities::{NewSession, NewUser, Role, User};
use crate::domain::identity::{AdminPolicy, AuthenticatedUser, CurrentUser};
use crate::domain::repositories::{SessionRepository, UserRepository};
use crate::error::AppError;
use crate::utils::password::{PasswordError, hash_password, verify_credentials};
use crate::utils::token::{self, TokenHasher};

/// Service behind registration, login/logout and `set_current_user`.
///
/// Session tokens are random 48-character strings handed to the browser in
/// a cookie. Only their HMAC-SHA256 (keyed by `signing_secret`) is stored,
/// so a leaked `sessions` table cannot be replayed without the secret.
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    sessions: Arc<dyn SessionRepository>,
    hasher: TokenHasher,
    session_ttl: Duration,
    admin_policy: AdminPolicy,
}

impl AuthService {
    /// Creates a new authentication service.
    ///
    /// # Arguments
    ///
    /// - `signing_secret` - HMAC key; must stay stable across restarts or every session is lost
    /// - `session_ttl` - lifetime of a new session
    /// - `admin_policy` - rule applied when resolving the effective role
    pub fn new(
        users: Arc<dyn UserRepository>,
        sessions: Arc<dyn SessionRepository>,
        signing_secret: impl Into<Vec<u8>>,
        session_ttl: Duration,
        admin_policy: AdminPolicy,
    ) -> Self {
        Self {
            users,
            sessions,
            hasher: TokenHasher::new(signing_secret),
            session_ttl,
            admin_policy,
        }
    }

    /// Registers a member account.
    ///
    /// The email is trimmed and lower-cased before storage.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the email is already registered.
    /// Returns [`AppError::Internal`] on hashing or database errors.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<User, AppError> {
        let email = normalize_email(email);

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict(
                "An account with this email already exists",
                json!({ "email": email }),
            ));
        }

        let password = password.to_string();
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(blocking_task_failed)?
            .map_err(|e| {
                AppError::internal("Password hashing failed", json!({ "source": e.to_string() }))
            })?;

        let user = self
            .users
            .create(NewUser {
                name: name.trim().to_string(),
                email,
                password_hash,
                role: Role::Member,
            })
            .await?;

        tracing::info!(user_id = user.id, "User registered");

        Ok(user)
    }

    /// Verifies credentials and opens a session.
    ///
    /// Returns the user and the raw session token to put in the cookie.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] with the same message whether the
    /// email is unknown or the password is wrong.
    pub async fn login(&self, email: &str, password: &str) -> Result<(User, String), AppError> {
        let email = normalize_email(email);
        let invalid = || AppError::unauthorized("Invalid email or password", json!({}));

        let user = self.users.find_by_email(&email).await?;

        let password = password.to_string();
        let stored_hash = user.as_ref().map(|u| u.password_hash.clone());
        let verified = tokio::task::spawn_blocking(move || {
            verify_credentials(&password, stored_hash.as_deref())
        })
        .await
        .map_err(blocking_task_failed)?;

        let user = match (user, verified) {
            (Some(user), Ok(())) => user,
            (Some(user), Err(PasswordError::MalformedHash)) => {
                tracing::warn!(user_id = user.id, "Stored password hash is malformed");
                return Err(invalid());
            }
            _ => {
                tracing::debug!("Login rejected");
                return Err(invalid());
            }
        };

        let token = self.open_session(user.id).await?;

        tracing::info!(user_id = user.id, "User logged in");

        Ok((user, token))
    }

    /// Creates a session for `user_id` and returns its raw token.
    pub async fn open_session(&self, user_id: i64) -> Result<String, AppError> {
        let token = token::generate_token();

        self.sessions
            .create(NewSession {
                user_id,
                token_hash: self.hasher.hash(&token),
                expires_at: Utc::now() + self.session_ttl,
            })
            .await?;

        Ok(token)
    }

    /// Ends the session identified by `token`. Unknown tokens are ignored.
    pub async fn logout(&self, token: &str) -> Result<(), AppError> {
        if !token::is_well_formed(token) {
            return Ok(());
        }
        if self
            .sessions
            .delete_by_token_hash(&self.hasher.hash(token))
            .await?
        {
            tracing::debug!("Session closed");
        }
        Ok(())
    }

    /// Resolves a session token into the request identity.
    ///
    /// Never fails: malformed, unknown or expired tokens, deleted users and
    /// store errors all resolve to [`CurrentUser::Anonymous`].
    pub async fn resolve(&self, token: &str) -> CurrentUser {
        match self.try_resolve(token).await {
            Ok(Some(user)) => CurrentUser::User(user),
            Ok(None) => CurrentUser::Anonymous,
            Err(e) => {
                tracing::warn!(error = %e, "Session lookup failed; treating visitor as anonymous");
                CurrentUser::Anonymous
            }
        }
    }

    async fn try_resolve(&self, token: &str) -> Result<Option<AuthenticatedUser>, AppError> {
        if !token::is_well_formed(token) {
            return Ok(None);
        }

        let token_hash = self.hasher.hash(token);
        let Some(session) = self.sessions.find_by_token_hash(&token_hash).await? else {
            return Ok(None);
        };

        if session.is_expired() {
            if let Err(e) = self.sessions.delete_by_token_hash(&token_hash).await {
                tracing::debug!(error = %e, "Failed to drop expired session");
            }
            return Ok(None);
        }

        let user = self.users.find_by_id(session.user_id).await?;
        Ok(user.map(|u| self.admin_policy.identify(&u)))
    }

    /// Deletes expired sessions and returns how many were removed.
    pub async fn purge_expired(&self) -> Result<u64, AppError> {
        self.sessions.delete_expired(Utc::now()).await
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn blocking_task_failed(e: tokio::task::JoinError) -> AppError {
    AppError::internal("Password task failed", json!({ "source": e.to_string() }))
}
