//! Post-load verification command.

use sqlx::SqlitePool;
use tracing::{info, warn};

use super::{LoadError, connect};

/// Row counts and reference integrity of the loaded dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::FromRow)]
pub struct VerifyReport {
    pub users: i64,
    pub orders: i64,
    /// Orders whose `user_id` matches a user.
    pub valid_orders: i64,
    /// Orders whose `user_id` matches no user.
    pub orphaned_orders: i64,
}

/// Report counts for the database at `database_url`.
///
/// # Errors
///
/// Returns `LoadError::Database` if the database cannot be queried.
pub async fn run(database_url: &str) -> Result<VerifyReport, LoadError> {
    let pool = connect(database_url).await?;
    let report = inspect(&pool).await?;
    pool.close().await;

    info!(users = report.users, orders = report.orders, "Table counts");
    info!(
        valid = report.valid_orders,
        total = report.orders,
        "Orders with valid user references"
    );
    if report.orphaned_orders > 0 {
        warn!(orphaned = report.orphaned_orders, "Orders reference missing users");
    }

    Ok(report)
}

/// Count rows and classify orders by whether their customer exists.
///
/// # Errors
///
/// Returns `LoadError::Database` if the query fails.
pub async fn inspect(pool: &SqlitePool) -> Result<VerifyReport, LoadError> {
    let report = sqlx::query_as::<_, VerifyReport>(
        r"
        SELECT
            (SELECT COUNT(*) FROM users) AS users,
            (SELECT COUNT(*) FROM orders) AS orders,
            (SELECT COUNT(*) FROM orders o JOIN users u ON o.user_id = u.id) AS valid_orders,
            (SELECT COUNT(*) FROM orders o
                WHERE NOT EXISTS (SELECT 1 FROM users u WHERE u.id = o.user_id)) AS orphaned_orders
        ",
    )
    .fetch_one(pool)
    .await?;

    Ok(report)
}
