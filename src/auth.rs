//! Route protection
//!
//! Both credential transports funnel into [`resolve`]. [`CurrentUser`] reads
//! the session cookie and redirects anonymous visitors to the login page.
//! [`ApiUser`] reads the `Authorization: Bearer` header and answers 401.

use axum::{extract::FromRequestParts, http::request::Parts, response::Redirect};
use axum_extra::{
    TypedHeader,
    extract::{
        CookieJar,
        cookie::{Cookie, SameSite},
    },
    headers::{Authorization, authorization::Bearer},
};
use passgate_user::{TokenService, User, UserError, UserResult, UserStore};
use thiserror::Error;
use time::OffsetDateTime;

use crate::{error::AppError, routes::AppState};

pub const ACCESS_TOKEN_COOKIE: &str = "access_token";
pub const BEARER_PREFIX: &str = "Bearer ";
pub const LOGIN_PATH: &str = "/login";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credential")]
    InvalidCredential,

    #[error(transparent)]
    Store(#[from] UserError),
}

/// Resolve a raw token to the user it was issued for
///
/// Invalid tokens never reach the store. Valid ones cost exactly one
/// lookup by username.
pub async fn resolve<S: UserStore + ?Sized>(
    tokens: &TokenService,
    users: &S,
    token: &str,
) -> Result<User, AuthError> {
    let username = tokens.verify(token).ok_or(AuthError::InvalidCredential)?;

    users
        .find_by_username(&username)
        .await?
        .ok_or(AuthError::InvalidCredential)
}

/// Build the session cookie carrying a freshly issued token
pub fn session_cookie(tokens: &TokenService, username: &str) -> UserResult<Cookie<'static>> {
    let token = tokens.issue(username)?;
    let ttl = time::Duration::seconds(i64::try_from(tokens.ttl().as_secs()).unwrap_or(i64::MAX));

    Ok(Cookie::build((ACCESS_TOKEN_COOKIE, format!("{BEARER_PREFIX}{token}")))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(ttl)
        .expires(OffsetDateTime::now_utc().saturating_add(ttl))
        .build())
}

/// Cookie matching the session cookie, for removal on logout
pub fn removal_cookie() -> Cookie<'static> {
    Cookie::build(ACCESS_TOKEN_COOKIE).path("/").build()
}

/// Token carried by the session cookie, without its `Bearer ` prefix
fn cookie_token(jar: &CookieJar) -> Option<&str> {
    jar.get(ACCESS_TOKEN_COOKIE)?
        .value_trimmed()
        .strip_prefix(BEARER_PREFIX)
}

/// Authenticated user for page routes
pub struct CurrentUser(pub User);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Redirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);

        let Some(token) = cookie_token(&jar) else {
            tracing::debug!("Missing or malformed session cookie, redirecting to login");
            return Err(Redirect::to(LOGIN_PATH));
        };

        match resolve(&state.tokens, state.users.as_ref(), token).await {
            Ok(user) => Ok(CurrentUser(user)),
            Err(AuthError::InvalidCredential) => {
                tracing::warn!("Rejected session cookie, redirecting to login");
                Err(Redirect::to(LOGIN_PATH))
            }
            Err(AuthError::Store(e)) => {
                tracing::error!("Failed to load user for session: {:?}", e);
                Err(Redirect::to(LOGIN_PATH))
            }
        }
    }
}

/// Authenticated user for API routes
pub struct ApiUser(pub User);

impl FromRequestParts<AppState> for ApiUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| AppError::Unauthorized)?;

        match resolve(&state.tokens, state.users.as_ref(), bearer.token()).await {
            Ok(user) => Ok(ApiUser(user)),
            Err(AuthError::InvalidCredential) => {
                tracing::warn!("Rejected bearer token");
                Err(AppError::Unauthorized)
            }
            Err(AuthError::Store(e)) => Err(e.into()),
        }
    }
}
