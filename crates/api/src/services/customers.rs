//! Customer queries.

use sqlx::SqlitePool;
use tracing::instrument;

use customer_insights_core::{PageRequest, Pagination, SearchTerm, UserId, average};

use super::QueryError;
use crate::db::orders::OrderTotals;
use crate::db::{CustomerRepository, OrderRepository};
use crate::models::{CustomerDetails, CustomerList, OrderRecord, OrderStatistics, Page};

/// Number of orders shown in a customer's recent activity.
pub const RECENT_ORDERS: i64 = 5;

/// Customer query service.
pub struct CustomerService<'a> {
    customers: CustomerRepository<'a>,
    orders: OrderRepository<'a>,
}

impl<'a> CustomerService<'a> {
    /// Create a new customer service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self {
            customers: CustomerRepository::new(pool),
            orders: OrderRepository::new(pool),
        }
    }

    /// One page of customers, optionally filtered by a search term.
    ///
    /// # Errors
    ///
    /// Returns `QueryError::Repository` if a query fails.
    #[instrument(skip(self, page), fields(page = page.page(), limit = page.limit()))]
    pub async fn list(
        &self,
        search: Option<SearchTerm>,
        page: PageRequest,
    ) -> Result<CustomerList, QueryError> {
        let items = self.customers.list(search.as_ref(), page).await?;
        let total = self.customers.count(search.as_ref()).await?;

        Ok(CustomerList {
            customers: Page {
                items,
                pagination: Pagination::new(page, total),
            },
            search,
        })
    }

    /// A customer with recent orders and order statistics.
    ///
    /// # Errors
    ///
    /// Returns `QueryError::CustomerNotFound` if no customer has this ID.
    /// Returns `QueryError::Repository` if a query fails.
    #[instrument(skip(self), fields(customer_id = %id))]
    pub async fn details(&self, id: UserId) -> Result<CustomerDetails, QueryError> {
        let customer = self
            .customers
            .get_profile(id)
            .await?
            .ok_or(QueryError::CustomerNotFound(id))?;

        let recent_orders = self.orders.recent_for_customer(id, RECENT_ORDERS).await?;
        let totals = self.orders.totals_for_customer(id).await?;

        Ok(CustomerDetails {
            customer,
            recent_orders,
            order_statistics: order_statistics(totals),
        })
    }

    /// One page of a customer's order history.
    ///
    /// # Errors
    ///
    /// Returns `QueryError::CustomerNotFound` if no customer has this ID.
    /// Returns `QueryError::Repository` if a query fails.
    #[instrument(skip(self, page), fields(customer_id = %id, page = page.page(), limit = page.limit()))]
    pub async fn orders(
        &self,
        id: UserId,
        page: PageRequest,
    ) -> Result<Page<OrderRecord>, QueryError> {
        if !self.customers.exists(id).await? {
            return Err(QueryError::CustomerNotFound(id));
        }

        let items = self.orders.list_for_customer(id, page).await?;
        let total = self.orders.count_for_customer(id).await?;

        Ok(Page {
            items,
            pagination: Pagination::new(page, total),
        })
    }
}

/// Derive per-customer statistics from raw totals.
fn order_statistics(totals: OrderTotals) -> OrderStatistics {
    OrderStatistics {
        total_orders: totals.total_orders,
        total_items: totals.total_items,
        avg_items_per_order: average(totals.total_items, totals.item_rows),
        completed_orders: totals.completed_orders,
        shipped_orders: totals.shipped_orders,
        cancelled_orders: totals.cancelled_orders,
    }
}
