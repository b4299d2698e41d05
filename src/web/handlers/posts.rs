//! Post pages. Create, edit and delete sit behind `admin_required`.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use validator::Validate;

use crate::domain::identity::{AuthenticatedUser, CurrentUser};
use crate::error::AppError;
use crate::state::AppState;
use crate::web::forms::{PaginationParams, PostForm, error_messages};
use crate::web::views::{CommentView, Nav, Pager, PostSummary, PostView};

#[derive(Template, WebTemplate)]
#[template(path = "posts/index.html")]
pub struct PostIndexTemplate {
    nav: Nav,
    posts: Vec<PostSummary>,
    pager: Pager,
}

#[derive(Template, WebTemplate)]
#[template(path = "posts/form.html")]
pub struct PostFormTemplate {
    nav: Nav,
    heading: String,
    action: String,
    submit_label: String,
    title: String,
    content: String,
    errors: Vec<String>,
}

impl PostFormTemplate {
    fn for_create(user: &AuthenticatedUser, form: PostForm, errors: Vec<String>) -> Self {
        PostFormTemplate {
            nav: Nav::from(user),
            heading: "New post".to_string(),
            action: "/posts/create".to_string(),
            submit_label: "Publish".to_string(),
            title: form.title,
            content: form.content,
            errors,
        }
    }

    fn for_edit(user: &AuthenticatedUser, pid: i64, form: PostForm, errors: Vec<String>) -> Self {
        PostFormTemplate {
            nav: Nav::from(user),
            heading: "Edit post".to_string(),
            action: format!("/posts/edit/{pid}"),
            submit_label: "Save".to_string(),
            title: form.title,
            content: form.content,
            errors,
        }
    }
}

#[derive(Template, WebTemplate)]
#[template(path = "posts/detail.html")]
pub struct PostDetailTemplate {
    nav: Nav,
    post: PostView,
    comments: Vec<CommentView>,
    can_comment: bool,
    can_manage: bool,
    comment_draft: String,
    comment_errors: Vec<String>,
}

/// Renders a post with its comments.
///
/// Shared with the comment handlers, which re-render this page when a new
/// comment fails validation.
pub(crate) async fn render_detail(
    st: &AppState,
    current: &CurrentUser,
    pid: i64,
    comment_draft: String,
    comment_errors: Vec<String>,
) -> Result<PostDetailTemplate, AppError> {
    let post = st.post_service.get(pid).await?;
    let comments = st.comment_service.list_for_post(pid).await?;

    Ok(PostDetailTemplate {
        nav: Nav::from(current),
        post: PostView::from(&post),
        comments: comments
            .iter()
            .map(|c| CommentView::new(c, current))
            .collect(),
        can_comment: current.is_authenticated(),
        can_manage: current.is_admin(),
        comment_draft,
        comment_errors,
    })
}

fn detail_url(pid: i64) -> String {
    format!("/posts/detail/{pid}")
}

/// `GET /posts/index?page=&per_page=`
pub async fn index(
    State(st): State<AppState>,
    current: CurrentUser,
    Query(params): Query<PaginationParams>,
) -> Result<PostIndexTemplate, AppError> {
    params.validate()?;
    let (page, per_page) = params.resolve();
    let page = st.post_service.list(page, per_page).await?;

    Ok(PostIndexTemplate {
        nav: Nav::from(&current),
        posts: page.items.iter().map(PostSummary::from).collect(),
        pager: Pager::from(&page),
    })
}

/// `GET /posts/detail/{pid}`
pub async fn detail(
    State(st): State<AppState>,
    current: CurrentUser,
    Path(pid): Path<i64>,
) -> Result<PostDetailTemplate, AppError> {
    render_detail(&st, &current, pid, String::new(), Vec::new()).await
}

/// `GET /posts/create`
pub async fn create_form(user: AuthenticatedUser) -> PostFormTemplate {
    PostFormTemplate::for_create(&user, PostForm::default(), Vec::new())
}

/// `POST /posts/create`
pub async fn create_submit(
    State(st): State<AppState>,
    user: AuthenticatedUser,
    Form(form): Form<PostForm>,
) -> Result<Response, AppError> {
    let form = form.trimmed();

    if let Err(errors) = form.validate() {
        let page = PostFormTemplate::for_create(&user, form, error_messages(&errors));
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response());
    }

    let post = st
        .post_service
        .create(&user, &form.title, &form.content)
        .await?;

    Ok(Redirect::to(&detail_url(post.id)).into_response())
}

/// `GET /posts/edit/{pid}`
pub async fn edit_form(
    State(st): State<AppState>,
    user: AuthenticatedUser,
    Path(pid): Path<i64>,
) -> Result<PostFormTemplate, AppError> {
    let post = st.post_service.get(pid).await?;
    let form = PostForm {
        title: post.title,
        content: post.content,
    };

    Ok(PostFormTemplate::for_edit(&user, pid, form, Vec::new()))
}

/// `POST /posts/edit/{pid}`
pub async fn edit_submit(
    State(st): State<AppState>,
    user: AuthenticatedUser,
    Path(pid): Path<i64>,
    Form(form): Form<PostForm>,
) -> Result<Response, AppError> {
    let form = form.trimmed();

    if let Err(errors) = form.validate() {
        let page = PostFormTemplate::for_edit(&user, pid, form, error_messages(&errors));
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response());
    }

    st.post_service
        .update(pid, &form.title, &form.content)
        .await?;

    Ok(Redirect::to(&detail_url(pid)).into_response())
}

/// `GET /posts/delete/{pid}`
///
/// Removes the post together with its comments.
pub async fn delete(
    State(st): State<AppState>,
    user: AuthenticatedUser,
    Path(pid): Path<i64>,
) -> Result<Redirect, AppError> {
    st.post_service.delete(pid).await?;
    tracing::info!(post_id = pid, admin_id = user.id, "Post removed by admin");

    Ok(Redirect::to("/posts/index"))
}
