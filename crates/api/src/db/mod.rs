//! Database operations for the customer insights SQLite store.
//!
//! # Database: `ecommerce.db`
//!
//! ## Tables
//!
//! - `users` - Customer records
//! - `orders` - Purchase transactions, `user_id` references `users.id`
//!
//! Every query here is a read. Orders whose `user_id` matches no user are
//! tolerated, so per-customer aggregates always use `LEFT JOIN` semantics.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/api/migrations/` and run via:
//! ```bash
//! cargo run -p customer-insights-cli -- migrate
//! ```

pub mod customers;
pub mod orders;
pub mod reports;
pub mod statistics;

use std::str::FromStr;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use thiserror::Error;

pub use customers::CustomerRepository;
pub use orders::OrderRepository;
pub use reports::ReportRepository;
pub use statistics::StatisticsRepository;

/// Schema migrations embedded at compile time.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

/// How a pool may touch the database file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessMode {
    /// Connections are opened read-only. Used by the API server.
    ReadOnly,
    /// Connections may write and create the file. Used by the CLI loader.
    ReadWrite,
}

/// Build connection options for a SQLite URL.
///
/// Foreign keys are not enforced: the dataset may contain orphaned orders and
/// the loader must be able to store them.
///
/// # Errors
///
/// Returns `sqlx::Error` if the URL cannot be parsed.
pub fn connect_options(
    database_url: &str,
    mode: AccessMode,
) -> Result<SqliteConnectOptions, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.foreign_keys(false);

    Ok(match mode {
        AccessMode::ReadOnly => options.read_only(true),
        AccessMode::ReadWrite => options.create_if_missing(true),
    })
}

/// Create a SQLite connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - SQLite connection string (e.g. `sqlite://ecommerce.db`)
/// * `max_connections` - Upper bound on pooled connections
/// * `mode` - Whether connections are opened read-only
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(
    database_url: &str,
    max_connections: u32,
    mode: AccessMode,
) -> Result<SqlitePool, sqlx::Error> {
    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(connect_options(database_url, mode)?)
        .await
}

/// Convert a `COUNT(*)`/`SUM(...)` result that must be non-negative.
fn non_negative(value: i64, what: &str) -> Result<i64, RepositoryError> {
    if value < 0 {
        return Err(RepositoryError::DataCorruption(format!(
            "{what} is negative: {value}"
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_options_accepts_sqlite_urls() {
        assert!(connect_options("sqlite://ecommerce.db", AccessMode::ReadOnly).is_ok());
        assert!(connect_options("sqlite::memory:", AccessMode::ReadWrite).is_ok());
    }

    #[test]
    fn test_non_negative() {
        assert_eq!(non_negative(3, "count").ok(), Some(3));
        assert!(matches!(
            non_negative(-1, "count"),
            Err(RepositoryError::DataCorruption(_))
        ));
    }
}
