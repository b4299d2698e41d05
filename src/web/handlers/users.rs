//! Registration, login and logout.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::{HeaderMap, StatusCode, header::SET_COOKIE},
    response::{IntoResponse, Redirect, Response},
};
use validator::Validate;

use crate::domain::identity::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::cookie::read_cookie;
use crate::web::forms::{LoginForm, RegisterForm, error_messages};
use crate::web::views::Nav;

#[derive(Template, WebTemplate)]
#[template(path = "users/register.html")]
pub struct RegisterTemplate {
    nav: Nav,
    name: String,
    email: String,
    errors: Vec<String>,
}

#[derive(Template, WebTemplate)]
#[template(path = "users/login.html")]
pub struct LoginTemplate {
    nav: Nav,
    email: String,
    errors: Vec<String>,
}

/// `GET /users/register`
pub async fn register_form(current: CurrentUser) -> RegisterTemplate {
    RegisterTemplate {
        nav: Nav::from(&current),
        name: String::new(),
        email: String::new(),
        errors: Vec::new(),
    }
}

/// `POST /users/register`
///
/// Creates a member account, signs it in and redirects home. Invalid input
/// re-renders the form with `422`, a taken email with `409`.
pub async fn register_submit(
    State(st): State<AppState>,
    current: CurrentUser,
    Form(form): Form<RegisterForm>,
) -> Result<Response, AppError> {
    let form = form.trimmed();

    let rerender = |status: StatusCode, errors: Vec<String>| {
        let page = RegisterTemplate {
            nav: Nav::from(&current),
            name: form.name.clone(),
            email: form.email.clone(),
            errors,
        };
        (status, page).into_response()
    };

    if let Err(errors) = form.validate() {
        return Ok(rerender(
            StatusCode::UNPROCESSABLE_ENTITY,
            error_messages(&errors),
        ));
    }

    let user = match st
        .auth_service
        .register(&form.name, &form.email, &form.password)
        .await
    {
        Ok(user) => user,
        Err(e @ AppError::Conflict { .. }) => {
            return Ok(rerender(StatusCode::CONFLICT, vec![e.message().to_string()]));
        }
        Err(e) => return Err(e),
    };

    let token = st.auth_service.open_session(user.id).await?;

    Ok((
        [(SET_COOKIE, st.session_cookie.issue(&token))],
        Redirect::to("/"),
    )
        .into_response())
}

/// `GET /users/login`
pub async fn login_form(current: CurrentUser) -> LoginTemplate {
    LoginTemplate {
        nav: Nav::from(&current),
        email: String::new(),
        errors: Vec::new(),
    }
}

/// `POST /users/login`
///
/// Wrong credentials re-render the form with `401` and a message that does
/// not reveal whether the email exists.
pub async fn login_submit(
    State(st): State<AppState>,
    current: CurrentUser,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let form = form.trimmed();

    let rerender = |status: StatusCode, errors: Vec<String>| {
        let page = LoginTemplate {
            nav: Nav::from(&current),
            email: form.email.clone(),
            errors,
        };
        (status, page).into_response()
    };

    if let Err(errors) = form.validate() {
        return Ok(rerender(
            StatusCode::UNPROCESSABLE_ENTITY,
            error_messages(&errors),
        ));
    }

    let token = match st.auth_service.login(&form.email, &form.password).await {
        Ok((_, token)) => token,
        Err(e @ AppError::Unauthorized { .. }) => {
            return Ok(rerender(
                StatusCode::UNAUTHORIZED,
                vec![e.message().to_string()],
            ));
        }
        Err(e) => return Err(e),
    };

    Ok((
        [(SET_COOKIE, st.session_cookie.issue(&token))],
        Redirect::to("/"),
    )
        .into_response())
}

/// `GET /users/logout`
///
/// Deletes the session (if any), clears the cookie and redirects home.
pub async fn logout(State(st): State<AppState>, headers: HeaderMap) -> Result<Response, AppError> {
    if let Some(token) = read_cookie(&headers, &st.session_cookie.name) {
        st.auth_service.logout(&token).await?;
    }

    Ok((
        [(SET_COOKIE, st.session_cookie.clear())],
        Redirect::to("/"),
    )
        .into_response())
}
