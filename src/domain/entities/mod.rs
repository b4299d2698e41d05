//! Core domain entities representing the blog's data model.
//!
//! # Entity Types
//!
//! - [`User`] - A registered account with a [`Role`]
//! - [`Post`] - An article written by an admin
//! - [`Comment`] - A reply to a post
//! - [`Session`] - A server-side login session
//!
//! Creation inputs live next to their entity (`NewUser`, `NewPost`,
//! `NewComment`, `NewSession`), as does [`PostPatch`] for edits.

pub mod comment;
pub mod page;
pub mod post;
pub mod session;
pub mod user;

pub use comment::{Comment, NewComment};
pub use page::Page;
pub use post::{NewPost, Post, PostPatch};
pub use session::{NewSession, Session};
pub use user::{NewUser, Role, User};
