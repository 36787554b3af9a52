//! Order repository.

use sqlx::SqlitePool;

use customer_insights_core::{OrderStatus, PageRequest, UserId};

use super::{RepositoryError, non_negative};
use crate::models::{OrderRecord, OrderSummary};

/// Raw order aggregates before averages are derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::FromRow)]
pub struct OrderTotals {
    pub total_orders: i64,
    pub total_items: i64,
    /// Orders with a non-null `num_of_item`; the denominator of the average.
    pub item_rows: i64,
    pub completed_orders: i64,
    pub shipped_orders: i64,
    pub cancelled_orders: i64,
}

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Most recently created orders for a customer.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn recent_for_customer(
        &self,
        user_id: UserId,
        limit: i64,
    ) -> Result<Vec<OrderSummary>, RepositoryError> {
        let orders = sqlx::query_as::<_, OrderSummary>(
            r"
            SELECT order_id, status, num_of_item, created_at, shipped_at, delivered_at
            FROM orders
            WHERE user_id = ?
            ORDER BY created_at DESC, order_id DESC
            LIMIT ?
            ",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(orders)
    }

    /// One page of a customer's orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_customer(
        &self,
        user_id: UserId,
        page: PageRequest,
    ) -> Result<Vec<OrderRecord>, RepositoryError> {
        let orders = sqlx::query_as::<_, OrderRecord>(
            r"
            SELECT order_id, status, num_of_item, created_at,
                   shipped_at, delivered_at, returned_at
            FROM orders
            WHERE user_id = ?
            ORDER BY created_at DESC, order_id DESC
            LIMIT ? OFFSET ?
            ",
        )
        .bind(user_id)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(self.pool)
        .await?;

        Ok(orders)
    }

    /// Number of orders placed by a customer.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_for_customer(&self, user_id: UserId) -> Result<i64, RepositoryError> {
        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM orders WHERE user_id = ?")
            .bind(user_id)
            .fetch_one(self.pool)
            .await?;

        non_negative(total, "order count")
    }

    /// Order totals and status counts for a customer.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if item quantities sum below zero.
    pub async fn totals_for_customer(&self, user_id: UserId) -> Result<OrderTotals, RepositoryError> {
        let totals = sqlx::query_as::<_, OrderTotals>(
            r"
            SELECT
                COUNT(*) AS total_orders,
                COALESCE(SUM(num_of_item), 0) AS total_items,
                COUNT(num_of_item) AS item_rows,
                COUNT(CASE WHEN status = ? THEN 1 END) AS completed_orders,
                COUNT(CASE WHEN status = ? THEN 1 END) AS shipped_orders,
                COUNT(CASE WHEN status = ? THEN 1 END) AS cancelled_orders
            FROM orders
            WHERE user_id = ?
            ",
        )
        .bind(OrderStatus::Complete.as_str())
        .bind(OrderStatus::Shipped.as_str())
        .bind(OrderStatus::Cancelled.as_str())
        .bind(user_id)
        .fetch_one(self.pool)
        .await?;

        non_negative(totals.total_items, "total items")?;
        Ok(totals)
    }
}
