//! Dataset-wide statistics payloads.

use rust_decimal::Decimal;
use serde::Serialize;

/// Totals across every customer and their orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverallStatistics {
    pub total_customers: i64,
    pub total_orders: i64,
    pub total_items: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub avg_items_per_order: Decimal,
    pub completed_orders: i64,
    pub shipped_orders: i64,
    pub cancelled_orders: i64,
}

/// Customer and order counts for one country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct CountryStatistics {
    pub country: String,
    pub customer_count: i64,
    pub order_count: i64,
}

/// Payload of `GET /api/statistics`.
#[derive(Debug, Clone, Serialize)]
pub struct StatisticsOverview {
    pub overall_statistics: OverallStatistics,
    pub top_countries: Vec<CountryStatistics>,
}
