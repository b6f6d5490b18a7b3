mod user_create_email_idx;
mod user_create_table;
mod user_create_username_idx;

use sqlx_migrator::vec_box;

pub struct Migration;

sqlx_migrator::sqlite_migration!(
    Migration,
    "passgate",
    "m0001",
    vec_box![],
    vec_box![
        user_create_table::Operation,
        user_create_email_idx::Operation,
        user_create_username_idx::Operation
    ]
);
