//! Query services for the insights API.
//!
//! # Services
//!
//! - `customers` - Customer list, customer details and order history
//! - `statistics` - Dataset statistics and business reports
//!
//! Services compose repository calls and shape their rows into response
//! models. Derived numbers (averages, percentages) are computed here from the
//! raw integer aggregates.

pub mod customers;
pub mod statistics;

use thiserror::Error;

use customer_insights_core::UserId;

use crate::db::RepositoryError;

pub use customers::CustomerService;
pub use statistics::StatisticsService;

/// Errors that can occur while answering a query.
#[derive(Debug, Error)]
pub enum QueryError {
    /// No customer has the requested ID.
    #[error("customer {0} not found")]
    CustomerNotFound(UserId),

    /// Repository/database error.
    #[error("{0}")]
    Repository(#[from] RepositoryError),
}
