mod auth;
mod health;
mod pages;
mod users;

use std::sync::Arc;

use axum::extract::FromRef;
use passgate_user::{SqliteUserStore, TokenService, UserStore};
use sqlx::SqlitePool;

use crate::config::JwtConfig;

pub use auth::*;
pub use health::*;
pub use pages::*;
pub use users::*;

#[derive(Clone, FromRef)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub users: Arc<dyn UserStore>,
    pub tokens: Arc<TokenService>,
}

impl AppState {
    pub fn new(db_pool: SqlitePool, jwt: &JwtConfig) -> Self {
        Self {
            users: Arc::new(SqliteUserStore::new(db_pool.clone())),
            tokens: Arc::new(TokenService::new(jwt.secret.as_bytes(), jwt.ttl())),
            db_pool,
        }
    }
}
