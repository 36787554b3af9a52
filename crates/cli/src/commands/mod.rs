//! CLI subcommands.

pub mod load;
pub mod migrate;
pub mod verify;

use sqlx::SqlitePool;
use thiserror::Error;

use customer_insights_api::db::{self, AccessMode};

/// Errors raised while preparing or loading the database.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Open a single writable connection, creating the database file if needed.
async fn connect(database_url: &str) -> Result<SqlitePool, LoadError> {
    tracing::info!(database_url, "Connecting to database...");
    Ok(db::create_pool(database_url, 1, AccessMode::ReadWrite).await?)
}
