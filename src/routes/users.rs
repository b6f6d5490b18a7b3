use axum::{
    extract::{Query, State},
    Json,
};
use passgate_user::User;
use serde::{Deserialize, Serialize};

use crate::auth::ApiUser;
use crate::error::AppError;
use crate::routes::AppState;

/// Public view of a user; never includes the password hash
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub username: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            username: user.username,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub skip: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_limit() -> u64 {
    100
}

/// GET /api/me - The user the bearer token belongs to
pub async fn get_me(ApiUser(user): ApiUser) -> Json<UserResponse> {
    Json(user.into())
}

/// GET /api/users - Page through registered users
#[tracing::instrument(skip_all, fields(offset = pagination.skip, limit = pagination.limit))]
pub async fn get_users(
    State(state): State<AppState>,
    _current: ApiUser,
    Query(pagination): Query<Pagination>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let users = state
        .users
        .list(pagination.skip, pagination.limit)
        .await?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}
