//! Response models for the insights API.
//!
//! Row types derive `sqlx::FromRow` and are serialized as-is; field names are
//! part of the public JSON contract. Aggregates computed after the query
//! (averages, percentages) are assembled by the services.

pub mod customer;
pub mod order;
pub mod report;
pub mod response;
pub mod statistics;

pub use customer::{CustomerDetails, CustomerList, CustomerProfile, CustomerSummary};
pub use order::{OrderRecord, OrderStatistics, OrderSummary};
pub use report::{
    AgeGroupCount, Demographics, MonthlyTrend, StatusShare, TopCustomer, TrafficSourceCount,
};
pub use response::{ApiResponse, CustomerListResponse, ErrorResponse, HealthResponse, Page, PaginatedResponse};
pub use statistics::{CountryStatistics, OverallStatistics, StatisticsOverview};
