//! Background task that purges expired login sessions.

use std::sync::Arc;
use std::time::Duration;
use tokio::time::{self, MissedTickBehavior};

use crate::application::services::AuthService;

/// Deletes expired sessions every `every` until the runtime shuts down.
///
/// Expired sessions are already rejected at lookup time; the sweeper only
/// keeps the table from growing. Failures are logged and retried on the
/// next tick.
pub async fn run_session_sweeper(auth: Arc<AuthService>, every: Duration) {
    let mut ticker = time::interval(every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        sweep_once(&auth).await;
    }
}

/// Runs a single purge pass and returns the number of removed sessions.
pub async fn sweep_once(auth: &AuthService) -> u64 {
    match auth.purge_expired().await {
        Ok(0) => 0,
        Ok(removed) => {
            tracing::info!(removed, "Purged expired sessions");
            removed
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to purge expired sessions");
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::identity::AdminPolicy;
    use crate::domain::repositories::{MockSessionRepository, MockUserRepository};
    use crate::error::AppError;
    use serde_json::json;

    fn auth(sessions: MockSessionRepository) -> AuthService {
        AuthService::new(
            Arc::new(MockUserRepository::new()),
            Arc::new(sessions),
            "secret",
            chrono::Duration::hours(1),
            AdminPolicy::RoleFlag,
        )
    }

    #[tokio::test]
    async fn test_sweep_once_reports_removed_count() {
        let mut sessions = MockSessionRepository::new();
        sessions.expect_delete_expired().times(1).returning(|_| Ok(3));

        assert_eq!(sweep_once(&auth(sessions)).await, 3);
    }

    #[tokio::test]
    async fn test_sweep_once_swallows_errors() {
        let mut sessions = MockSessionRepository::new();
        sessions
            .expect_delete_expired()
            .times(1)
            .returning(|_| Err(AppError::internal("db down", json!({}))));

        assert_eq!(sweep_once(&auth(sessions)).await, 0);
    }
}
