//! Browser-facing layer: server-rendered HTML pages.
//!
//! Uses Askama templates from `templates/`.
//!
//! # Modules
//!
//! - [`handlers`] - Page handlers
//! - [`middleware`] - Identity resolution, guards, rate limiting, tracing
//! - [`routes`] - Route groups with their guards
//! - [`forms`] - Form payloads and validation rules
//! - [`views`] - Display models rendered by the templates

pub mod forms;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod views;
