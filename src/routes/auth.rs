use axum::{extract::State, response::Redirect, Form};
use axum_extra::extract::CookieJar;
use passgate_user::{LoginInput, RegisterInput};
use serde::Deserialize;

use crate::auth::{removal_cookie, session_cookie, LOGIN_PATH};
use crate::error::AppError;
use crate::routes::AppState;

#[derive(Deserialize)]
pub struct RegisterForm {
    pub email: String,
    pub username: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// POST /api/register - Create an account, then send the visitor to the login page
#[tracing::instrument(skip(state, form), fields(username = %form.username))]
pub async fn post_register(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> Result<Redirect, AppError> {
    passgate_user::register(
        state.users.as_ref(),
        RegisterInput {
            email: form.email,
            username: form.username,
            password: form.password,
        },
    )
    .await?;

    Ok(Redirect::to(LOGIN_PATH))
}

/// POST /api/login - Check credentials and set the session cookie
#[tracing::instrument(skip(state, jar, form), fields(username = %form.username))]
pub async fn post_login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<(CookieJar, Redirect), AppError> {
    let user = passgate_user::login(
        state.users.as_ref(),
        LoginInput {
            username: form.username,
            password: form.password,
        },
    )
    .await?;

    let cookie = session_cookie(&state.tokens, &user.username)?;
    tracing::info!(user_id = %user.id, "User logged in");

    Ok((jar.add(cookie), Redirect::to("/dashboard")))
}

/// POST /api/logout - Drop the session cookie
///
/// The token itself stays valid until it expires.
#[tracing::instrument(skip(jar))]
pub async fn post_logout(jar: CookieJar) -> (CookieJar, Redirect) {
    (jar.remove(removal_cookie()), Redirect::to("/"))
}
