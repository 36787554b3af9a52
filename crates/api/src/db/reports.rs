//! Business reports: order status mix, demographics, monthly trends and top
//! customers.

use chrono::NaiveDate;
use sqlx::SqlitePool;

use super::RepositoryError;
use crate::models::{AgeGroupCount, MonthlyTrend, TopCustomer, TrafficSourceCount};

/// Most months reported by [`ReportRepository::monthly_trends`].
pub const TREND_MONTHS: i64 = 12;

/// Number of orders in one status. `status` is `None` for orders without one.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct StatusCount {
    pub status: Option<String>,
    pub count: i64,
}

/// Repository for report queries.
pub struct ReportRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ReportRepository<'a> {
    /// Create a new report repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Order count per distinct status, largest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn status_counts(&self) -> Result<Vec<StatusCount>, RepositoryError> {
        let counts = sqlx::query_as::<_, StatusCount>(
            r"
            SELECT status, COUNT(*) AS count
            FROM orders
            GROUP BY status
            ORDER BY count DESC, status ASC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(counts)
    }

    /// Customers with a known age, bucketed into age groups.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn age_groups(&self) -> Result<Vec<AgeGroupCount>, RepositoryError> {
        let groups = sqlx::query_as::<_, AgeGroupCount>(
            r"
            SELECT
                CASE
                    WHEN age < 18 THEN 'Under 18'
                    WHEN age BETWEEN 18 AND 25 THEN '18-25'
                    WHEN age BETWEEN 26 AND 35 THEN '26-35'
                    WHEN age BETWEEN 36 AND 50 THEN '36-50'
                    ELSE 'Over 50'
                END AS age_group,
                COUNT(*) AS count
            FROM users
            WHERE age IS NOT NULL
            GROUP BY age_group
            ORDER BY count DESC, age_group ASC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(groups)
    }

    /// Distinct customers and their orders per traffic source.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn traffic_sources(&self) -> Result<Vec<TrafficSourceCount>, RepositoryError> {
        let sources = sqlx::query_as::<_, TrafficSourceCount>(
            r"
            SELECT
                u.traffic_source,
                COUNT(DISTINCT u.id) AS user_count,
                COUNT(o.order_id) AS order_count
            FROM users u
            LEFT JOIN orders o ON u.id = o.user_id
            WHERE u.traffic_source IS NOT NULL
            GROUP BY u.traffic_source
            ORDER BY user_count DESC, u.traffic_source ASC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(sources)
    }

    /// Customers with at least one order, ranked by order count then items.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn top_customers(&self, limit: i64) -> Result<Vec<TopCustomer>, RepositoryError> {
        let customers = sqlx::query_as::<_, TopCustomer>(
            r"
            SELECT
                u.id, u.first_name, u.last_name, u.email, u.country,
                COUNT(o.order_id) AS order_count,
                COALESCE(SUM(o.num_of_item), 0) AS total_items
            FROM users u
            JOIN orders o ON u.id = o.user_id
            GROUP BY u.id
            ORDER BY order_count DESC, total_items DESC, u.id ASC
            LIMIT ?
            ",
        )
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(customers)
    }

    /// Order and item totals per month for orders placed on or after `since`,
    /// newest month first, at most [`TREND_MONTHS`] rows.
    ///
    /// Orders whose `created_at` is missing or not a date are skipped.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn monthly_trends(
        &self,
        since: NaiveDate,
    ) -> Result<Vec<MonthlyTrend>, RepositoryError> {
        let trends = sqlx::query_as::<_, MonthlyTrend>(
            r"
            SELECT
                strftime('%Y-%m', created_at) AS month,
                COUNT(*) AS orders,
                COALESCE(SUM(num_of_item), 0) AS total_items
            FROM orders
            WHERE created_at >= ?
              AND strftime('%Y-%m', created_at) IS NOT NULL
            GROUP BY month
            ORDER BY month DESC
            LIMIT ?
            ",
        )
        .bind(since.format("%Y-%m-%d").to_string())
        .bind(TREND_MONTHS)
        .fetch_all(self.pool)
        .await?;

        Ok(trends)
    }
}
