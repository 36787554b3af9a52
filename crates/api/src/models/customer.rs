//! Customer payloads.

use serde::Serialize;

use customer_insights_core::{SearchTerm, UserId};

use super::order::{OrderStatistics, OrderSummary};
use super::response::Page;

/// One row of the customer list.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct CustomerSummary {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub created_at: Option<String>,
    /// Number of orders referencing this customer.
    pub order_count: i64,
}

/// Every stored customer column plus order aggregates.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct CustomerProfile {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub state: Option<String>,
    pub street_address: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub traffic_source: Option<String>,
    pub created_at: Option<String>,
    pub order_count: i64,
    /// Sum of `num_of_item` across the customer's orders, 0 without orders.
    pub total_items_ordered: i64,
}

/// A page of customers and the search term that filtered it.
#[derive(Debug, Clone)]
pub struct CustomerList {
    pub customers: Page<CustomerSummary>,
    pub search: Option<SearchTerm>,
}

/// Customer detail view.
#[derive(Debug, Clone, Serialize)]
pub struct CustomerDetails {
    pub customer: CustomerProfile,
    pub recent_orders: Vec<OrderSummary>,
    pub order_statistics: OrderStatistics,
}
