//! Route groups of the blog.
//!
//! Guards are attached per route with `route_layer`, so an unmatched path
//! still falls through to the 404 instead of a login redirect.

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::state::AppState;
use crate::web::handlers::{comments, posts, users};
use crate::web::middleware::{admin_required, login_required};

/// Account routes, mounted under `/users`.
///
/// - `GET|POST /register`
/// - `GET|POST /login`
/// - `GET /logout`
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/register",
            get(users::register_form).post(users::register_submit),
        )
        .route("/login", get(users::login_form).post(users::login_submit))
        .route("/logout", get(users::logout))
}

/// Post routes, mounted under `/posts`.
///
/// Public: `GET /index`, `GET /detail/{pid}`.
/// Admin only: `GET|POST /create`, `GET|POST /edit/{pid}`, `GET /delete/{pid}`.
pub fn post_routes() -> Router<AppState> {
    let admin = Router::new()
        .route("/create", get(posts::create_form).post(posts::create_submit))
        .route(
            "/edit/{pid}",
            get(posts::edit_form).post(posts::edit_submit),
        )
        .route("/delete/{pid}", get(posts::delete))
        .route_layer(middleware::from_fn(admin_required));

    Router::new()
        .route("/index", get(posts::index))
        .route("/detail/{pid}", get(posts::detail))
        .merge(admin)
}

/// Comment routes, mounted under `/comments`. All require a signed-in user.
///
/// - `POST /create/{pid}`
/// - `GET|POST /edit/{cid}`
/// - `GET /delete/{cid}`
pub fn comment_routes() -> Router<AppState> {
    Router::new()
        .route("/create/{pid}", post(comments::create))
        .route(
            "/edit/{cid}",
            get(comments::edit_form).post(comments::edit_submit),
        )
        .route("/delete/{cid}", get(comments::delete))
        .route_layer(middleware::from_fn(login_required))
}
