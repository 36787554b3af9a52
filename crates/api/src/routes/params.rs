//! Query string and path parameter parsing.
//!
//! Parameters arrive as raw strings so that a non-integer `page` or `limit`
//! produces the API's own 400 body instead of axum's plain-text rejection.

use axum::extract::Query;
use axum::extract::rejection::QueryRejection;
use serde::Deserialize;

use customer_insights_core::{PageRequest, SearchTerm, UserId};

use crate::error::AppError;

/// Raw `?page&limit` parameters.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl PageQuery {
    /// Parse and normalize into a page window.
    ///
    /// # Errors
    ///
    /// Returns `AppError::InvalidPagination` if a value is not an integer.
    pub fn page_request(&self) -> Result<PageRequest, AppError> {
        page_request(self.page.as_deref(), self.limit.as_deref())
    }
}

/// Raw `?page&limit&search` parameters of the customer list.
#[derive(Debug, Default, Deserialize)]
pub struct CustomerListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub search: Option<String>,
}

impl CustomerListQuery {
    /// Parse and normalize into a page window.
    ///
    /// # Errors
    ///
    /// Returns `AppError::InvalidPagination` if a value is not an integer.
    pub fn page_request(&self) -> Result<PageRequest, AppError> {
        page_request(self.page.as_deref(), self.limit.as_deref())
    }

    /// The search term, if one was given.
    #[must_use]
    pub fn search_term(&self) -> Option<SearchTerm> {
        self.search.as_deref().and_then(SearchTerm::parse)
    }
}

/// Raw `?limit` parameter of the top-customers report.
#[derive(Debug, Default, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<String>,
}

impl LimitQuery {
    /// Parsed limit, `None` when absent.
    ///
    /// # Errors
    ///
    /// Returns `AppError::InvalidPagination` if the value is not an integer.
    pub fn limit(&self) -> Result<Option<i64>, AppError> {
        parse_int("limit", self.limit.as_deref())
    }
}

/// Unwrap a query extractor, turning a rejection into a 400.
///
/// # Errors
///
/// Returns `AppError::InvalidPagination` carrying the rejection text.
pub fn query<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, AppError> {
    query
        .map(|Query(value)| value)
        .map_err(|rejection| AppError::InvalidPagination(rejection.body_text()))
}

/// Parse a customer ID from a path segment.
///
/// # Errors
///
/// Returns `AppError::RouteNotFound` if the segment is not an integer, so
/// `/api/customers/abc` behaves like an unknown route. An all-digit segment
/// too large for an ID names no customer and returns
/// `AppError::CustomerNotFound`.
pub fn customer_id(raw: &str) -> Result<UserId, AppError> {
    raw.parse::<i64>().map(UserId::new).map_err(|_| {
        if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
            AppError::CustomerNotFound(raw.to_string())
        } else {
            AppError::RouteNotFound
        }
    })
}

fn page_request(page: Option<&str>, limit: Option<&str>) -> Result<PageRequest, AppError> {
    let page = parse_int("page", page)?;
    let limit = parse_int("limit", limit)?;
    Ok(PageRequest::from_optional(page, limit))
}

/// Parse an optional integer parameter. Only an absent key is `None`; a
/// blank value is rejected like any other non-integer.
fn parse_int(name: &str, raw: Option<&str>) -> Result<Option<i64>, AppError> {
    let Some(value) = raw.map(str::trim) else {
        return Ok(None);
    };

    value.parse::<i64>().map(Some).map_err(|_| {
        AppError::InvalidPagination(format!("{name} must be an integer, got '{value}'"))
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn page_query(page: Option<&str>, limit: Option<&str>) -> PageQuery {
        PageQuery {
            page: page.map(String::from),
            limit: limit.map(String::from),
        }
    }

    #[test]
    fn test_page_request_defaults() {
        let request = page_query(None, None).page_request().unwrap();
        assert_eq!(request, PageRequest::normalize(1, 10));
    }

    #[test]
    fn test_page_request_tolerates_whitespace() {
        let request = page_query(Some(" 2 "), Some("5\t")).page_request().unwrap();
        assert_eq!(request.page(), 2);
        assert_eq!(request.limit(), 5);
        assert_eq!(request.offset(), 5);
    }

    #[test]
    fn test_page_request_clamps() {
        let request = page_query(Some("-3"), Some("1000")).page_request().unwrap();
        assert_eq!(request.page(), 1);
        assert_eq!(request.limit(), 100);
    }

    #[test]
    fn test_page_request_rejects_non_integers() {
        assert!(matches!(
            page_query(Some("abc"), None).page_request(),
            Err(AppError::InvalidPagination(_))
        ));
        assert!(matches!(
            page_query(None, Some("2.5")).page_request(),
            Err(AppError::InvalidPagination(_))
        ));
    }

    #[test]
    fn test_blank_values_are_rejected() {
        assert!(matches!(
            page_query(Some(""), None).page_request(),
            Err(AppError::InvalidPagination(_))
        ));
        assert!(matches!(
            page_query(None, Some("  ")).page_request(),
            Err(AppError::InvalidPagination(_))
        ));
        assert!(matches!(
            LimitQuery {
                limit: Some(String::new())
            }
            .limit(),
            Err(AppError::InvalidPagination(_))
        ));
    }

    #[test]
    fn test_search_term() {
        let query = CustomerListQuery {
            search: Some("  john ".to_string()),
            ..Default::default()
        };
        assert_eq!(query.search_term().unwrap().as_str(), "john");

        let query = CustomerListQuery {
            search: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(query.search_term().is_none());
    }

    #[test]
    fn test_limit_query() {
        let query = LimitQuery {
            limit: Some("25".to_string()),
        };
        assert_eq!(query.limit().unwrap(), Some(25));
        assert_eq!(LimitQuery::default().limit().unwrap(), None);
        assert!(
            LimitQuery {
                limit: Some("many".to_string())
            }
            .limit()
            .is_err()
        );
    }

    #[test]
    fn test_customer_id() {
        assert_eq!(customer_id("42").unwrap(), UserId::new(42));
        assert!(matches!(customer_id("abc"), Err(AppError::RouteNotFound)));
        assert!(matches!(customer_id("1.5"), Err(AppError::RouteNotFound)));
        assert!(matches!(customer_id(""), Err(AppError::RouteNotFound)));
        assert!(matches!(
            customer_id("99999999999999999999"),
            Err(AppError::CustomerNotFound(id)) if id == "99999999999999999999"
        ));
    }
}
