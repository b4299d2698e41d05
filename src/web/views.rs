//! Display models handed to the templates.
//!
//! Templates only print fields and test booleans; every decision (who may
//! edit what, date formatting, pagination links) is made here.

use askama::Template;
use askama_web::WebTemplate;
use chrono::{DateTime, Utc};

use crate::domain::entities::{Comment, Page, Post};
use crate::domain::identity::{AuthenticatedUser, CurrentUser};

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";
const EXCERPT_CHARS: usize = 280;

fn format_date(at: DateTime<Utc>) -> String {
    at.format(DATE_FORMAT).to_string()
}

/// Navigation bar state. `Default` is the signed-out bar.
#[derive(Debug, Clone, Default)]
pub struct Nav {
    pub signed_in: bool,
    pub user_name: String,
    pub is_admin: bool,
}

impl From<&CurrentUser> for Nav {
    fn from(current: &CurrentUser) -> Self {
        match current.user() {
            Some(user) => Nav::from(user),
            None => Nav::default(),
        }
    }
}

impl From<&AuthenticatedUser> for Nav {
    fn from(user: &AuthenticatedUser) -> Self {
        Nav {
            signed_in: true,
            user_name: user.name.clone(),
            is_admin: user.is_admin(),
        }
    }
}

/// A post as shown in lists.
#[derive(Debug, Clone)]
pub struct PostSummary {
    pub id: i64,
    pub title: String,
    pub author_name: String,
    pub published: String,
    pub excerpt: String,
}

impl From<&Post> for PostSummary {
    fn from(post: &Post) -> Self {
        PostSummary {
            id: post.id,
            title: post.title.clone(),
            author_name: post.author_name.clone(),
            published: format_date(post.created_at),
            excerpt: post.excerpt(EXCERPT_CHARS),
        }
    }
}

/// A post on its detail page.
#[derive(Debug, Clone)]
pub struct PostView {
    pub id: i64,
    pub title: String,
    pub author_name: String,
    pub content: String,
    pub published: String,
    pub edited: bool,
    pub updated: String,
}

impl From<&Post> for PostView {
    fn from(post: &Post) -> Self {
        PostView {
            id: post.id,
            title: post.title.clone(),
            author_name: post.author_name.clone(),
            content: post.content.clone(),
            published: format_date(post.created_at),
            edited: post.is_edited(),
            updated: format_date(post.updated_at),
        }
    }
}

/// A comment plus the actions the viewer may take on it.
#[derive(Debug, Clone)]
pub struct CommentView {
    pub id: i64,
    pub author_name: String,
    pub content: String,
    pub posted: String,
    pub can_edit: bool,
    pub can_delete: bool,
}

impl CommentView {
    pub fn new(comment: &Comment, viewer: &CurrentUser) -> Self {
        let is_author = viewer
            .user()
            .is_some_and(|user| comment.is_authored_by(user.id));

        CommentView {
            id: comment.id,
            author_name: comment.author_name.clone(),
            content: comment.content.clone(),
            posted: format_date(comment.created_at),
            can_edit: is_author,
            can_delete: is_author || viewer.is_admin(),
        }
    }
}

/// Previous/next links of the post index.
#[derive(Debug, Clone)]
pub struct Pager {
    pub page: u32,
    pub per_page: u32,
    pub total_pages: u32,
    pub total: i64,
    pub has_prev: bool,
    pub prev_page: u32,
    pub has_next: bool,
    pub next_page: u32,
}

impl<T> From<&Page<T>> for Pager {
    fn from(page: &Page<T>) -> Self {
        Pager {
            page: page.page,
            per_page: page.per_page,
            total_pages: page.total_pages(),
            total: page.total,
            has_prev: page.has_prev(),
            prev_page: page.page.saturating_sub(1).max(1),
            has_next: page.has_next(),
            next_page: page.page.saturating_add(1),
        }
    }
}

/// Generic error page, shared by [`crate::error::AppError`] and the guards.
#[derive(Debug, Clone, Template, WebTemplate)]
#[template(path = "error.html")]
pub struct ErrorPage {
    pub nav: Nav,
    pub status: u16,
    pub title: String,
    pub message: String,
}

impl ErrorPage {
    pub fn new(nav: Nav, status: axum::http::StatusCode, message: impl Into<String>) -> Self {
        ErrorPage {
            nav,
            status: status.as_u16(),
            title: status.canonical_reason().unwrap_or("Error").to_string(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Role;
    use chrono::TimeZone;

    fn viewer(id: i64, role: Role) -> CurrentUser {
        CurrentUser::User(AuthenticatedUser {
            id,
            name: format!("user{id}"),
            email: format!("user{id}@blog.io"),
            role,
        })
    }

    fn comment(author_id: i64) -> Comment {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        Comment {
            id: 1,
            post_id: 5,
            author_id,
            author_name: "Ada".to_string(),
            content: "Nice".to_string(),
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn test_nav_reflects_identity() {
        let nav = Nav::from(&CurrentUser::Anonymous);
        assert!(!nav.signed_in);
        assert!(!nav.is_admin);

        let nav = Nav::from(&viewer(3, Role::Admin));
        assert!(nav.signed_in);
        assert!(nav.is_admin);
        assert_eq!(nav.user_name, "user3");
    }

    #[test]
    fn test_comment_actions_by_viewer() {
        let c = comment(7);

        let author = CommentView::new(&c, &viewer(7, Role::Member));
        assert!(author.can_edit && author.can_delete);

        let admin = CommentView::new(&c, &viewer(1, Role::Admin));
        assert!(!admin.can_edit);
        assert!(admin.can_delete);

        let stranger = CommentView::new(&c, &viewer(2, Role::Member));
        assert!(!stranger.can_edit && !stranger.can_delete);

        let anonymous = CommentView::new(&c, &CurrentUser::Anonymous);
        assert!(!anonymous.can_edit && !anonymous.can_delete);
        assert_eq!(anonymous.posted, "2024-03-01 09:30");
    }

    #[test]
    fn test_pager_links() {
        let page: Page<()> = Page {
            items: vec![],
            page: 2,
            per_page: 10,
            total: 25,
        };
        let pager = Pager::from(&page);
        assert_eq!(pager.total_pages, 3);
        assert!(pager.has_prev && pager.has_next);
        assert_eq!(pager.prev_page, 1);
        assert_eq!(pager.next_page, 3);
    }
}
