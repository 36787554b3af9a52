//! JSON envelopes shared by every endpoint.
//!
//! Successful responses carry `"success": true` and a `data` member; failures
//! carry `"success": false` with a fixed `error` label and a `message`.

use chrono::{DateTime, Utc};
use serde::Serialize;

use customer_insights_core::{Pagination, SearchTerm};

/// A window of results together with its pagination metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

/// `{success, data}` envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// Wrap a successful payload.
    pub const fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// `{success, data, pagination}` envelope.
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    pub success: bool,
    pub data: Vec<T>,
    pub pagination: Pagination,
}

impl<T> From<Page<T>> for PaginatedResponse<T> {
    fn from(page: Page<T>) -> Self {
        Self {
            success: true,
            data: page.items,
            pagination: page.pagination,
        }
    }
}

/// Customer list envelope. `search` is `null` when no filter was applied.
#[derive(Debug, Serialize)]
pub struct CustomerListResponse<T> {
    pub success: bool,
    pub data: Vec<T>,
    pub pagination: Pagination,
    pub search: Option<SearchTerm>,
}

/// Error envelope.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: &'static str,
    pub message: String,
}

impl ErrorResponse {
    /// Build a failure body.
    #[must_use]
    pub fn new(error: &'static str, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error,
            message: message.into(),
        }
    }
}

/// Liveness payload.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub timestamp: DateTime<Utc>,
}
