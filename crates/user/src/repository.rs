use passgate_db::table::User as UserTable;
use sea_query::{Expr, ExprTrait, Order, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::SqlitePool;
use time::OffsetDateTime;
use ulid::Ulid;

use crate::{NewUser, User, UserResult};

pub(crate) enum FindType {
    Email(String),
    Username(String),
}

const COLUMNS: [UserTable; 5] = [
    UserTable::Id,
    UserTable::Email,
    UserTable::Username,
    UserTable::HashedPassword,
    UserTable::CreatedAt,
];

pub(crate) async fn find(pool: &SqlitePool, arg_type: FindType) -> UserResult<Option<User>> {
    let mut statement = Query::select()
        .columns(COLUMNS)
        .from(UserTable::Table)
        .limit(1)
        .to_owned();

    match arg_type {
        FindType::Email(email) => statement.and_where(Expr::col(UserTable::Email).eq(email)),
        FindType::Username(username) => {
            statement.and_where(Expr::col(UserTable::Username).eq(username))
        }
    };

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, User, _>(&sql, values)
        .fetch_optional(pool)
        .await?)
}

pub(crate) async fn create(pool: &SqlitePool, input: NewUser) -> UserResult<User> {
    let user = User {
        id: Ulid::new().to_string(),
        email: input.email,
        username: input.username,
        hashed_password: input.hashed_password,
        created_at: OffsetDateTime::now_utc().unix_timestamp(),
    };

    let statement = Query::insert()
        .into_table(UserTable::Table)
        .columns(COLUMNS)
        .values_panic([
            user.id.clone().into(),
            user.email.clone().into(),
            user.username.clone().into(),
            user.hashed_password.clone().into(),
            user.created_at.into(),
        ])
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(pool).await?;

    Ok(user)
}

// SQLite binds integers as i64.
const MAX_SQL_INT: u64 = i64::MAX as u64;

pub(crate) async fn list(pool: &SqlitePool, skip: u64, limit: u64) -> UserResult<Vec<User>> {
    let statement = Query::select()
        .columns(COLUMNS)
        .from(UserTable::Table)
        .order_by(UserTable::CreatedAt, Order::Asc)
        .order_by(UserTable::Id, Order::Asc)
        .limit(Ord::min(limit, MAX_SQL_INT))
        .offset(Ord::min(skip, MAX_SQL_INT))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, User, _>(&sql, values)
        .fetch_all(pool)
        .await?)
}
