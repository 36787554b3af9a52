//! Database migration command.
//!
//! Migrations live in `crates/api/migrations/` and are embedded into both the
//! API and this CLI at compile time.

use customer_insights_api::db::MIGRATOR;

use super::{LoadError, connect};

/// Apply every pending migration.
///
/// # Errors
///
/// Returns `LoadError` if the database cannot be opened or a migration fails.
pub async fn run(database_url: &str) -> Result<(), LoadError> {
    let pool = connect(database_url).await?;

    tracing::info!("Running migrations...");
    MIGRATOR.run(&pool).await?;

    tracing::info!("Migrations complete!");
    pool.close().await;
    Ok(())
}
