//! Dataset-wide statistics.

use sqlx::SqlitePool;

use customer_insights_core::OrderStatus;

use super::{RepositoryError, non_negative};
use crate::models::CountryStatistics;

/// Number of countries reported by [`StatisticsRepository::top_countries`].
pub const TOP_COUNTRIES: i64 = 5;

/// Raw dataset totals before averages are derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::FromRow)]
pub struct DatasetTotals {
    pub total_customers: i64,
    pub total_orders: i64,
    pub total_items: i64,
    pub item_rows: i64,
    pub completed_orders: i64,
    pub shipped_orders: i64,
    pub cancelled_orders: i64,
}

/// Repository for cross-table statistics.
pub struct StatisticsRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> StatisticsRepository<'a> {
    /// Create a new statistics repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Customer, order and item totals.
    ///
    /// Orders are counted through `users LEFT JOIN orders`, so each order is
    /// counted once and orders referencing missing customers are excluded.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if item quantities sum below zero.
    pub async fn totals(&self) -> Result<DatasetTotals, RepositoryError> {
        let totals = sqlx::query_as::<_, DatasetTotals>(
            r"
            SELECT
                COUNT(DISTINCT u.id) AS total_customers,
                COUNT(o.order_id) AS total_orders,
                COALESCE(SUM(o.num_of_item), 0) AS total_items,
                COUNT(o.num_of_item) AS item_rows,
                COUNT(CASE WHEN o.status = ? THEN 1 END) AS completed_orders,
                COUNT(CASE WHEN o.status = ? THEN 1 END) AS shipped_orders,
                COUNT(CASE WHEN o.status = ? THEN 1 END) AS cancelled_orders
            FROM users u
            LEFT JOIN orders o ON u.id = o.user_id
            ",
        )
        .bind(OrderStatus::Complete.as_str())
        .bind(OrderStatus::Shipped.as_str())
        .bind(OrderStatus::Cancelled.as_str())
        .fetch_one(self.pool)
        .await?;

        non_negative(totals.total_items, "total items")?;
        Ok(totals)
    }

    /// Countries with the most orders.
    ///
    /// Customers without a country are skipped. Ties on order count are
    /// ordered by country name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn top_countries(&self, limit: i64) -> Result<Vec<CountryStatistics>, RepositoryError> {
        let countries = sqlx::query_as::<_, CountryStatistics>(
            r"
            SELECT
                u.country,
                COUNT(DISTINCT u.id) AS customer_count,
                COUNT(o.order_id) AS order_count
            FROM users u
            LEFT JOIN orders o ON u.id = o.user_id
            WHERE u.country IS NOT NULL
            GROUP BY u.country
            ORDER BY order_count DESC, u.country ASC
            LIMIT ?
            ",
        )
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(countries)
    }
}
