use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, DbConn};
use std::time::Duration;
use tracing::log::LevelFilter;

const DATABASE_URL: &str = "sqlite::memory:";

/// Connects to a fresh in-memory database with the schema applied.
///
/// The pool is pinned to a single long-lived connection because every
/// in-memory SQLite connection sees its own database.
pub async fn setup_database() -> DbConn {
    let mut opts = ConnectOptions::new(DATABASE_URL.to_owned());
    opts.max_connections(1)
        .min_connections(1)
        .idle_timeout(Duration::from_secs(60 * 60))
        .max_lifetime(Duration::from_secs(60 * 60))
        .sqlx_logging_level(LevelFilter::Debug);

    let conn = sea_orm::Database::connect(opts)
        .await
        .expect("failed to connect to database");

    Migrator::up(&conn, None)
        .await
        .expect("failed to apply migrations");

    conn
}
