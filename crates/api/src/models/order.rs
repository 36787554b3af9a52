//! Order payloads.

use rust_decimal::Decimal;
use serde::Serialize;

use customer_insights_core::OrderId;

/// Order as shown in a customer's recent activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct OrderSummary {
    pub order_id: OrderId,
    pub status: Option<String>,
    pub num_of_item: Option<i64>,
    pub created_at: Option<String>,
    pub shipped_at: Option<String>,
    pub delivered_at: Option<String>,
}

/// Order as shown in a customer's paginated order history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct OrderRecord {
    pub order_id: OrderId,
    pub status: Option<String>,
    pub num_of_item: Option<i64>,
    pub created_at: Option<String>,
    pub shipped_at: Option<String>,
    pub delivered_at: Option<String>,
    pub returned_at: Option<String>,
}

/// Order aggregates for one customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderStatistics {
    pub total_orders: i64,
    pub total_items: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub avg_items_per_order: Decimal,
    pub completed_orders: i64,
    pub shipped_orders: i64,
    pub cancelled_orders: i64,
}
