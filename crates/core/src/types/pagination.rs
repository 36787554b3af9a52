//! Offset pagination.
//!
//! Raw page/limit values are clamped rather than rejected: `page` is raised to
//! at least 1 and `limit` is clamped into `1..=MAX_LIMIT`. Rejecting input that
//! is not an integer at all happens at the transport boundary.

use serde::Serialize;

/// Page size used when the caller does not supply one.
pub const DEFAULT_LIMIT: i64 = 10;

/// Largest page size a caller may request.
pub const MAX_LIMIT: i64 = 100;

/// A normalized page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: i64,
    limit: i64,
    offset: i64,
}

impl PageRequest {
    /// Normalize raw page/limit values into a valid window.
    ///
    /// ```rust
    /// # use customer_insights_core::PageRequest;
    /// let request = PageRequest::normalize(0, 500);
    /// assert_eq!(request.page(), 1);
    /// assert_eq!(request.limit(), 100);
    /// assert_eq!(request.offset(), 0);
    ///
    /// let request = PageRequest::normalize(3, 25);
    /// assert_eq!(request.offset(), 50);
    /// ```
    #[must_use]
    pub const fn normalize(page: i64, limit: i64) -> Self {
        let page = if page < 1 { 1 } else { page };
        let limit = if limit < 1 {
            1
        } else if limit > MAX_LIMIT {
            MAX_LIMIT
        } else {
            limit
        };
        let offset = (page - 1).saturating_mul(limit);

        Self {
            page,
            limit,
            offset,
        }
    }

    /// Normalize optional values, substituting page 1 and [`DEFAULT_LIMIT`].
    #[must_use]
    pub fn from_optional(page: Option<i64>, limit: Option<i64>) -> Self {
        Self::normalize(page.unwrap_or(1), limit.unwrap_or(DEFAULT_LIMIT))
    }

    /// 1-based page number.
    #[must_use]
    pub const fn page(&self) -> i64 {
        self.page
    }

    /// Page size.
    #[must_use]
    pub const fn limit(&self) -> i64 {
        self.limit
    }

    /// Number of rows skipped before this page.
    #[must_use]
    pub const fn offset(&self) -> i64 {
        self.offset
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::normalize(1, DEFAULT_LIMIT)
    }
}

/// Number of pages needed to show `total` rows, `limit` per page.
///
/// An empty result set has zero pages.
#[must_use]
pub const fn page_count(total: i64, limit: i64) -> i64 {
    if total <= 0 || limit <= 0 {
        return 0;
    }
    (total + limit - 1) / limit
}

/// Pagination metadata attached to list responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl Pagination {
    /// Build metadata for a window over `total` matching rows.
    #[must_use]
    pub const fn new(request: PageRequest, total: i64) -> Self {
        let total_pages = page_count(total, request.limit);
        Self {
            page: request.page,
            limit: request.limit,
            total,
            total_pages,
            has_next: request.page < total_pages,
            has_prev: request.page > 1,
        }
    }
}
