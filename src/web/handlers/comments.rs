//! Comment actions. Every route here sits behind `login_required`; the
//! ownership rules live in [`crate::application::services::CommentService`].

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use validator::Validate;

use crate::domain::identity::{AuthenticatedUser, CurrentUser};
use crate::error::AppError;
use crate::state::AppState;
use crate::web::forms::{CommentForm, error_messages};
use crate::web::handlers::posts::render_detail;
use crate::web::views::Nav;

#[derive(Template, WebTemplate)]
#[template(path = "comments/edit.html")]
pub struct CommentEditTemplate {
    nav: Nav,
    comment_id: i64,
    post_id: i64,
    content: String,
    errors: Vec<String>,
}

fn detail_url(pid: i64) -> String {
    format!("/posts/detail/{pid}")
}

/// `POST /comments/create/{pid}`
///
/// Invalid input re-renders the post page with the draft and `422`.
pub async fn create(
    State(st): State<AppState>,
    user: AuthenticatedUser,
    Path(pid): Path<i64>,
    Form(form): Form<CommentForm>,
) -> Result<Response, AppError> {
    let form = form.trimmed();

    if let Err(errors) = form.validate() {
        let current = CurrentUser::User(user);
        let page = render_detail(&st, &current, pid, form.content, error_messages(&errors)).await?;
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response());
    }

    let comment = st.comment_service.create(&user, pid, &form.content).await?;

    Ok(Redirect::to(&format!("{}#comment-{}", detail_url(pid), comment.id)).into_response())
}

/// `GET /comments/edit/{cid}`
pub async fn edit_form(
    State(st): State<AppState>,
    user: AuthenticatedUser,
    Path(cid): Path<i64>,
) -> Result<CommentEditTemplate, AppError> {
    let comment = st.comment_service.get_for_edit(&user, cid).await?;

    Ok(CommentEditTemplate {
        nav: Nav::from(&user),
        comment_id: comment.id,
        post_id: comment.post_id,
        content: comment.content,
        errors: Vec::new(),
    })
}

/// `POST /comments/edit/{cid}`
pub async fn edit_submit(
    State(st): State<AppState>,
    user: AuthenticatedUser,
    Path(cid): Path<i64>,
    Form(form): Form<CommentForm>,
) -> Result<Response, AppError> {
    let form = form.trimmed();

    if let Err(errors) = form.validate() {
        // Ownership is checked before the form errors are shown.
        let comment = st.comment_service.get_for_edit(&user, cid).await?;
        let page = CommentEditTemplate {
            nav: Nav::from(&user),
            comment_id: cid,
            post_id: comment.post_id,
            content: form.content,
            errors: error_messages(&errors),
        };
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response());
    }

    let comment = st.comment_service.update(&user, cid, &form.content).await?;

    Ok(Redirect::to(&detail_url(comment.post_id)).into_response())
}

/// `GET /comments/delete/{cid}`
pub async fn delete(
    State(st): State<AppState>,
    user: AuthenticatedUser,
    Path(cid): Path<i64>,
) -> Result<Redirect, AppError> {
    let post_id = st.comment_service.delete(&user, cid).await?;

    Ok(Redirect::to(&detail_url(post_id)))
}
