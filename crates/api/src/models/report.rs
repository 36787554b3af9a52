//! Business report payloads.

use rust_decimal::Decimal;
use serde::Serialize;

use customer_insights_core::UserId;

/// Share of all orders in one status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusShare {
    pub status: Option<String>,
    pub count: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub percentage: Decimal,
}

/// Number of customers in an age bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct AgeGroupCount {
    pub age_group: String,
    pub count: i64,
}

/// Customers and orders attributed to one acquisition channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct TrafficSourceCount {
    pub traffic_source: String,
    pub user_count: i64,
    pub order_count: i64,
}

/// Payload of `GET /api/statistics/demographics`.
#[derive(Debug, Clone, Serialize)]
pub struct Demographics {
    pub age_groups: Vec<AgeGroupCount>,
    pub traffic_sources: Vec<TrafficSourceCount>,
}

/// A customer ranked by order volume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct TopCustomer {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub country: Option<String>,
    pub order_count: i64,
    pub total_items: i64,
}

/// Orders and items placed in one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct MonthlyTrend {
    /// `YYYY-MM`.
    pub month: String,
    pub orders: i64,
    pub total_items: i64,
}
