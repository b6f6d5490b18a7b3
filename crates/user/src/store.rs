use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::repository::{self, FindType};
use crate::{NewUser, User, UserError, UserResult};

/// Persistence of user records, keyed by unique email and username
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>>;

    async fn find_by_username(&self, username: &str) -> UserResult<Option<User>>;

    /// Insert a user and return it with its assigned id
    ///
    /// Fails with a conflict error if the email or username is taken.
    async fn insert(&self, user: NewUser) -> UserResult<User>;

    async fn list(&self, skip: u64, limit: u64) -> UserResult<Vec<User>>;
}

/// [`UserStore`] backed by the `user` table
///
/// Every call borrows one pooled connection and hands it back when the query
/// completes or fails.
#[derive(Clone)]
pub struct SqliteUserStore {
    pool: SqlitePool,
}

impl SqliteUserStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for SqliteUserStore {
    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>> {
        repository::find(&self.pool, FindType::Email(email.to_owned())).await
    }

    async fn find_by_username(&self, username: &str) -> UserResult<Option<User>> {
        repository::find(&self.pool, FindType::Username(username.to_owned())).await
    }

    async fn insert(&self, user: NewUser) -> UserResult<User> {
        repository::create(&self.pool, user)
            .await
            .map_err(map_unique_violation)
    }

    async fn list(&self, skip: u64, limit: u64) -> UserResult<Vec<User>> {
        repository::list(&self.pool, skip, limit).await
    }
}

// SQLite reports the offending column as "UNIQUE constraint failed: user.<column>".
fn map_unique_violation(err: UserError) -> UserError {
    let UserError::DatabaseError(sqlx::Error::Database(db_err)) = &err else {
        return err;
    };

    if !db_err.is_unique_violation() {
        return err;
    }

    if db_err.message().contains("user.email") {
        UserError::EmailAlreadyExists
    } else if db_err.message().contains("user.username") {
        UserError::UsernameTaken
    } else {
        err
    }
}
