//! Session cookie → [`CurrentUser`] resolution and the identity extractors.

use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::domain::access::AccessDenied;
use crate::domain::identity::{AuthenticatedUser, CurrentUser};
use crate::state::AppState;
use crate::utils::cookie::read_cookie;
use crate::web::views::{ErrorPage, Nav};

/// Resolves the visitor's identity and stores it in the request extensions.
///
/// Installed as an outer layer on the whole router, so the identity is in
/// place before any guard or handler looks at it.
///
/// # Cookie Format
///
/// ```text
/// Cookie: _blog_app_session=<token>
/// ```
///
/// The cookie name comes from `SESSION_COOKIE_NAME`. A missing cookie, or a
/// token that cannot be resolved, yields [`CurrentUser::Anonymous`]; this
/// middleware never rejects a request.
///
/// Error pages produced by [`crate::error::AppError`] are rendered without
/// the request; for signed-in visitors they are re-rendered here with the
/// visitor's navigation bar.
pub async fn set_current_user(
    State(st): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let current = match read_cookie(req.headers(), &st.session_cookie.name) {
        Some(token) => st.auth_service.resolve(&token).await,
        None => CurrentUser::Anonymous,
    };

    if let CurrentUser::User(user) = &current {
        tracing::debug!(user_id = user.id, admin = user.is_admin(), "Visitor identified");
    }

    let nav = Nav::from(&current);
    req.extensions_mut().insert(current);
    let mut response = next.run(req).await;

    if !nav.signed_in {
        return response;
    }
    match response.extensions_mut().remove::<ErrorPage>() {
        Some(mut page) => {
            page.nav = nav;
            (response.status(), page).into_response()
        }
        None => response,
    }
}

/// Reads the identity stored by [`set_current_user`].
///
/// Never rejects; a request that did not pass through the middleware is anonymous.
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .unwrap_or_default())
    }
}

/// The signed-in user, for handlers behind a guard.
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AccessDenied;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .and_then(CurrentUser::user)
            .cloned()
            .ok_or(AccessDenied::Unauthenticated)
    }
}
