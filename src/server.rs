//! HTTP server initialization and runtime setup.
//!
//! Handles the database connection, service wiring, the session sweeper and
//! the Axum server lifecycle.

use crate::application::services::{AuthService, CommentService, PostService};
use crate::application::session_sweeper::run_session_sweeper;
use crate::config::Config;
use crate::infrastructure::database;
use crate::infrastructure::persistence::{
    PgCommentRepository, PgPostRepository, PgSessionRepository, PgUserRepository,
};
use crate::routes::{RouterOptions, app_router};
use crate::state::AppState;
use crate::utils::cookie::SessionCookie;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use std::net::SocketAddr;
use std::sync::Arc;

/// Builds the services over PostgreSQL repositories.
pub fn build_state(config: &Config, pool: PgPool) -> Result<AppState> {
    let pool = Arc::new(pool);
    let users = Arc::new(PgUserRepository::new(pool.clone()));
    let sessions = Arc::new(PgSessionRepository::new(pool.clone()));
    let posts = Arc::new(PgPostRepository::new(pool.clone()));
    let comments = Arc::new(PgCommentRepository::new(pool));

    let session_ttl = chrono::Duration::from_std(config.session_ttl())
        .context("SESSION_TTL_SECONDS is out of range")?;

    let auth_service = Arc::new(AuthService::new(
        users,
        sessions,
        config.session_signing_secret.as_bytes(),
        session_ttl,
        config.admin_policy.clone(),
    ));
    let post_service = Arc::new(PostService::new(posts.clone()));
    let comment_service = Arc::new(CommentService::new(comments, posts));

    let cookie = SessionCookie {
        name: config.session_cookie_name.clone(),
        max_age_seconds: config.session_ttl_seconds,
        secure: config.is_production(),
    };

    Ok(AppState::new(
        auth_service,
        post_service,
        comment_service,
        cookie,
    ))
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool (with retries)
/// - Embedded migrations
/// - Services and application state
/// - Background session sweeper
/// - Axum HTTP server with graceful shutdown on Ctrl+C
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = database::connect(&config.database_url, &config.pool_settings()).await?;
    tracing::info!("Connected to database");

    database::migrate(&pool).await?;
    tracing::info!("Migrations applied");

    let state = build_state(&config, pool)?;

    tokio::spawn(run_session_sweeper(
        state.auth_service.clone(),
        config.session_sweep_interval(),
    ));
    tracing::info!(
        every_secs = config.session_sweep_interval_seconds,
        "Session sweeper started"
    );

    let app = app_router(state, RouterOptions::from(&config));

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid LISTEN address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
