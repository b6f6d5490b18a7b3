use std::{path::PathBuf, str::FromStr};

use passgate_user::{RegisterInput, SqliteUserStore, User};
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use sqlx_migrator::{Migrate, Plan};

pub struct TestState {
    pub pool: SqlitePool,
    pub store: SqliteUserStore,
}

pub async fn setup_test_state(path: PathBuf) -> anyhow::Result<TestState> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.to_str().unwrap()))?
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(opts).await?;
    let mut conn = pool.acquire().await?;
    passgate_db::migrator()?
        .run(&mut *conn, &Plan::apply_all())
        .await?;
    drop(conn);

    Ok(TestState {
        store: SqliteUserStore::new(pool.clone()),
        pool,
    })
}

#[allow(dead_code)]
pub async fn create_user(state: &TestState, name: impl Into<String>) -> anyhow::Result<User> {
    let name = name.into();
    let user = passgate_user::register(
        &state.store,
        RegisterInput {
            email: format!("{name}@passgate.localhost"),
            username: name,
            password: "my_password".to_owned(),
        },
    )
    .await?;

    Ok(user)
}

#[allow(dead_code)]
pub async fn count_users(state: &TestState) -> anyhow::Result<i64> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM user")
        .fetch_one(&state.pool)
        .await?;

    Ok(count)
}
