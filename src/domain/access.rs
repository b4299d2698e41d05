//! Access decisions behind the `login_required` and `admin_required` guards.
//!
//! The decision is a pure function of the required [`Access`] level and the
//! request's [`CurrentUser`]. A denial is final for the request: the guard
//! answers with its own response and the wrapped handler never runs.

use crate::domain::identity::{AuthenticatedUser, CurrentUser};

/// Access level a guard requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Any authenticated user.
    Login,
    /// An authenticated user whose effective role is admin.
    Admin,
}

/// Why a guard refused the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDenied {
    /// No identity was resolved for the request.
    Unauthenticated,
    /// An identity exists but its role is insufficient.
    Forbidden,
}

/// Decides whether `current` satisfies `access`.
///
/// Returns the authenticated identity on success.
pub fn authorize(access: Access, current: &CurrentUser) -> Result<&AuthenticatedUser, AccessDenied> {
    let user = current.user().ok_or(AccessDenied::Unauthenticated)?;

    match access {
        Access::Login => Ok(user),
        Access::Admin if user.is_admin() => Ok(user),
        Access::Admin => Err(AccessDenied::Forbidden),
    }
}
