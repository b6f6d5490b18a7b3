use sqlx::prelude::FromRow;

/// A registered user as stored
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct User {
    pub id: String,
    pub email: String,
    pub username: String,
    pub hashed_password: String,
    pub created_at: i64,
}

/// A user about to be inserted; the store assigns `id` and `created_at`
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub hashed_password: String,
}
