use std::sync::Arc;

use crate::application::services::{AuthService, CommentService, PostService};
use crate::utils::cookie::SessionCookie;

/// Shared application state injected into every handler and middleware.
///
/// Built once in [`crate::server::run`] (or by a test harness) and cloned
/// per request; every field is cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub post_service: Arc<PostService>,
    pub comment_service: Arc<CommentService>,
    pub session_cookie: Arc<SessionCookie>,
}

impl AppState {
    pub fn new(
        auth_service: Arc<AuthService>,
        post_service: Arc<PostService>,
        comment_service: Arc<CommentService>,
        session_cookie: SessionCookie,
    ) -> Self {
        Self {
            auth_service,
            post_service,
            comment_service,
            session_cookie: Arc::new(session_cookie),
        }
    }
}
