//! Shared setup for HTTP-level tests

#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
};
use axum_extra::extract::cookie::Cookie;
use http_body_util::BodyExt;
use passgate::{AppState, auth::BEARER_PREFIX, config::JwtConfig};
use tower::ServiceExt;

pub const TEST_SECRET: &str = "test_secret_key_minimum_32_characters_long";
pub const TEST_EXPIRE_MINUTES: u64 = 30;

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

/// In-memory database with migrations applied
///
/// A single connection keeps every query on the same in-memory database.
pub async fn create_test_app() -> TestApp {
    let pool = passgate::db::create_pool("sqlite::memory:", 1)
        .await
        .expect("Failed to create test database");
    passgate::db::migrate(&pool)
        .await
        .expect("Failed to run migrations");

    let jwt = JwtConfig {
        secret: TEST_SECRET.to_string(),
        expire_minutes: TEST_EXPIRE_MINUTES,
    };
    let state = AppState::new(pool, &jwt);

    TestApp {
        router: passgate::create_router(state.clone()),
        state,
    }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn register(&self, email: &str, username: &str, password: &str) -> Response<Body> {
        self.post_form(
            "/api/register",
            &format!("email={email}&username={username}&password={password}"),
        )
        .await
    }

    pub async fn login(&self, username: &str, password: &str) -> Response<Body> {
        self.post_form(
            "/api/login",
            &format!("username={username}&password={password}"),
        )
        .await
    }

    pub async fn post_form(&self, uri: &str, body: &str) -> Response<Body> {
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body.to_owned()))
                .unwrap(),
        )
        .await
    }

    pub async fn post_with_cookie(&self, uri: &str, cookie: &str) -> Response<Body> {
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::COOKIE, cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn get_with_cookie(&self, uri: &str, cookie: &str) -> Response<Body> {
        self.send(
            Request::builder()
                .uri(uri)
                .header(header::COOKIE, cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    pub async fn get_with_bearer(&self, uri: &str, token: &str) -> Response<Body> {
        self.send(
            Request::builder()
                .uri(uri)
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    /// Register and log in, returning the `Set-Cookie` header of the login
    pub async fn signed_in(&self, email: &str, username: &str, password: &str) -> String {
        self.register(email, username, password).await;
        let response = self.login(username, password).await;

        set_cookie(&response).expect("login should set the session cookie")
    }

    pub async fn count_users(&self) -> i64 {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM user")
            .fetch_one(&self.state.db_pool)
            .await
            .unwrap();
        count
    }
}

/// `Set-Cookie` header value, as a browser would receive it
pub fn set_cookie<B>(response: &Response<B>) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .map(|value| value.to_str().unwrap().to_owned())
}

/// `name=value` pair to send back in a `Cookie` header
pub fn cookie_pair(set_cookie: &str) -> String {
    set_cookie.split(';').next().unwrap().trim().to_owned()
}

/// Raw token carried by a `Set-Cookie` header
pub fn token_from_set_cookie(set_cookie: &str) -> String {
    let cookie = Cookie::parse_encoded(set_cookie.to_owned()).unwrap();
    cookie
        .value_trimmed()
        .strip_prefix(BEARER_PREFIX)
        .unwrap()
        .to_owned()
}

pub fn location<B>(response: &Response<B>) -> Option<&str> {
    response
        .headers()
        .get(header::LOCATION)
        .map(|value| value.to_str().unwrap())
}

pub async fn body_string(response: Response<Body>) -> String {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(body.to_vec()).unwrap()
}
