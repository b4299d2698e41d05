//! Web middleware.
//!
//! - [`current_user`] - Resolves the session cookie into a `CurrentUser` (outer layer)
//! - [`guard`] - `login_required` / `admin_required` route guards
//! - [`rate_limit`] - Per-IP token buckets
//! - [`tracing`] - Request spans and latency logging

pub mod current_user;
pub mod guard;
pub mod rate_limit;
pub mod tracing;

pub use current_user::set_current_user;
pub use guard::{admin_required, login_required};
