//! Encore storage
//!
//! SQLite catalog layer for the scanning engine. Each vertical slice owns
//! its own queries (`artists`, `albums`, `songs`); [`SqliteRepository`] ties
//! them together behind the core `MediaRepository` trait so the scanner
//! never sees the database directly.
//!
//! # Example
//!
//! ```rust,no_run
//! use encore_storage::{create_pool, run_migrations, SqliteRepository};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://catalog.db").await?;
//! run_migrations(&pool).await?;
//! let repo = SqliteRepository::new(pool);
//! # Ok(())
//! # }
//! ```

mod error;
mod repository;

// Vertical slices
pub mod albums;
pub mod artists;
pub mod songs;

pub use error::StorageError;
pub use repository::SqliteRepository;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into the binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// Call once at startup to bring the catalog schema up to date.
///
/// # Errors
///
/// Returns an error if migrations fail to run
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://catalog.db>`)
///
/// # Errors
///
/// Returns an error if the connection fails
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    tracing::debug!(url = database_url, "catalog pool created");

    Ok(pool)
}

/// In-memory single-connection pool with the schema applied, for tests
#[cfg(test)]
pub(crate) async fn test_pool() -> SqlitePool {
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("failed to open in-memory database");
    run_migrations(&pool).await.expect("migrations failed");
    pool
}
