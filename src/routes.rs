//! Top-level router combining every route group.
//!
//! # Route Structure
//!
//! - `GET  /`            - Home page (public)
//! - `GET  /health`      - Health check: database (public, JSON)
//! - `/users/*`          - Register, login, logout (public, strict rate limit)
//! - `/posts/*`          - Post pages (create/edit/delete need an admin)
//! - `/comments/*`       - Comment actions (need a signed-in user)
//! - `/assets/*`         - Static files
//!
//! # Middleware (outermost first)
//!
//! - **Path normalization** - Trailing slash handling
//! - **Tracing** - Structured request/response logging
//! - **Current user** - Session cookie resolved into a `CurrentUser`
//! - **Rate limiting** - Per-IP token buckets (optional)
//! - **Guards** - `login_required` / `admin_required` on individual routes

use std::path::PathBuf;

use axum::routing::get;
use axum::{Router, middleware};
use serde_json::json;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;

use crate::config::Config;
use crate::error::AppError;
use crate::state::AppState;
use crate::web::handlers::{health_handler, home};
use crate::web::middleware::{rate_limit, set_current_user, tracing};
use crate::web::routes::{comment_routes, post_routes, user_routes};

/// Knobs of [`app_router`] that do not belong in [`AppState`].
#[derive(Debug, Clone)]
pub struct RouterOptions {
    /// Directory served under `/assets`.
    pub assets_dir: PathBuf,
    /// Per-IP rate limiting. Requires the server to provide `ConnectInfo`.
    pub rate_limit: bool,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            assets_dir: PathBuf::from("assets"),
            rate_limit: true,
        }
    }
}

impl From<&Config> for RouterOptions {
    fn from(config: &Config) -> Self {
        Self {
            assets_dir: PathBuf::from(&config.assets_dir),
            rate_limit: config.rate_limit,
        }
    }
}

/// Constructs the application router with trailing-slash normalization.
pub fn app_router(state: AppState, options: RouterOptions) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state, options))
}

/// Constructs the router with all routes and middleware.
///
/// `set_current_user` wraps every route, so the identity is resolved
/// before any guard runs. Static assets are mounted outside it.
pub fn router(state: AppState, options: RouterOptions) -> Router {
    let mut account = Router::new().nest("/users", user_routes());
    let mut browsing = Router::new()
        .route("/", get(home))
        .nest("/posts", post_routes())
        .nest("/comments", comment_routes());

    if options.rate_limit {
        account = account.layer(rate_limit::secure_layer());
        browsing = browsing.layer(rate_limit::layer());
    }

    Router::new()
        .merge(account)
        .merge(browsing)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            set_current_user,
        ))
        .route("/health", get(health_handler))
        .nest_service("/assets", ServeDir::new(options.assets_dir))
        .fallback(not_found)
        .with_state(state)
        .layer(tracing::layer())
}

async fn not_found() -> AppError {
    AppError::not_found("Page not found", json!({}))
}
