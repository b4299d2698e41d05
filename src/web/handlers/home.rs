//! Home page.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;

use crate::domain::identity::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;
use crate::web::views::{Nav, PostSummary};

/// Posts shown on the home page.
pub const RECENT_POSTS: u32 = 5;

#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct HomeTemplate {
    nav: Nav,
    posts: Vec<PostSummary>,
}

/// `GET /`
pub async fn home(
    State(st): State<AppState>,
    current: CurrentUser,
) -> Result<HomeTemplate, AppError> {
    let posts = st.post_service.recent(RECENT_POSTS).await?;

    Ok(HomeTemplate {
        nav: Nav::from(&current),
        posts: posts.iter().map(PostSummary::from).collect(),
    })
}
