//! `login_required` / `admin_required` route guards.
//!
//! Both are plain `from_fn` middlewares attached with `route_layer`, so they
//! only wrap the routes they are listed on. They read the [`CurrentUser`]
//! left by [`super::current_user::set_current_user`] and either pass the
//! request through unchanged or answer on their own:
//!
//! - anonymous visitor → `303 See Other` to `/users/login`
//! - signed in but not admin (admin routes) → `403 Forbidden` page

use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::domain::access::{Access, AccessDenied, authorize};
use crate::domain::identity::CurrentUser;
use crate::web::views::{ErrorPage, Nav};

pub const LOGIN_PATH: &str = "/users/login";

/// Lets any signed-in user through.
pub async fn login_required(req: Request, next: Next) -> Response {
    guard(Access::Login, req, next).await
}

/// Lets only users whose effective role is admin through.
pub async fn admin_required(req: Request, next: Next) -> Response {
    guard(Access::Admin, req, next).await
}

async fn guard(access: Access, req: Request, next: Next) -> Response {
    let current = req
        .extensions()
        .get::<CurrentUser>()
        .cloned()
        .unwrap_or_default();

    match authorize(access, &current) {
        Ok(_) => next.run(req).await,
        Err(denied) => {
            tracing::info!(
                method = %req.method(),
                path = %req.uri().path(),
                reason = reason(denied),
                "Access denied"
            );
            denial_response(denied, Nav::from(&current))
        }
    }
}

fn reason(denied: AccessDenied) -> &'static str {
    match denied {
        AccessDenied::Unauthenticated => "unauthenticated",
        AccessDenied::Forbidden => "forbidden",
    }
}

fn denial_response(denied: AccessDenied, nav: Nav) -> Response {
    match denied {
        AccessDenied::Unauthenticated => Redirect::to(LOGIN_PATH).into_response(),
        AccessDenied::Forbidden => (
            StatusCode::FORBIDDEN,
            ErrorPage::new(
                nav,
                StatusCode::FORBIDDEN,
                "You do not have permission to access this page.",
            ),
        )
            .into_response(),
    }
}

impl IntoResponse for AccessDenied {
    fn into_response(self) -> Response {
        denial_response(self, Nav::default())
    }
}
