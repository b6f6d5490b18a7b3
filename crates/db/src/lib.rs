use sqlx_migrator::{Info, Migrator};

mod m0001;
pub mod table;

/// Builds the migrator holding every schema migration, in order.
pub fn migrator() -> Result<Migrator<sqlx::Sqlite>, sqlx_migrator::Error> {
    let mut migrator = Migrator::default();
    migrator.add_migrations(vec![Box::new(m0001::Migration)])?;

    Ok(migrator)
}
