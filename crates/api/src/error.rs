//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server errors to Sentry
//! before responding to the client. Every route handler returns
//! `Result<T, AppError>` and every failure is rendered as an `ErrorResponse`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::db::RepositoryError;
use crate::models::ErrorResponse;
use crate::services::QueryError;

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum AppError {
    /// No customer has the requested ID, as written in the request.
    #[error("Customer not found: {0}")]
    CustomerNotFound(String),

    /// `page` or `limit` was not an integer.
    #[error("Invalid pagination parameters: {0}")]
    InvalidPagination(String),

    /// No route matches the request.
    #[error("Route not found")]
    RouteNotFound,

    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),
}

impl From<QueryError> for AppError {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::CustomerNotFound(id) => Self::CustomerNotFound(id.to_string()),
            QueryError::Repository(err) => Self::Database(err),
        }
    }
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::CustomerNotFound(_) | Self::RouteNotFound => StatusCode::NOT_FOUND,
            Self::InvalidPagination(_) => StatusCode::BAD_REQUEST,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> ErrorResponse {
        match self {
            Self::CustomerNotFound(id) => ErrorResponse::new(
                "Customer not found",
                format!("Customer with ID {id} does not exist"),
            ),
            Self::InvalidPagination(message) => {
                ErrorResponse::new("Invalid pagination parameters", message.clone())
            }
            Self::RouteNotFound => {
                ErrorResponse::new("Not found", "The requested resource was not found")
            }
            // Don't expose internal error details to clients
            Self::Database(_) => {
                ErrorResponse::new("Internal server error", "An unexpected error occurred")
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status().is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        (self.status(), Json(self.body())).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use customer_insights_core::UserId;

    use super::*;

    async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::CustomerNotFound("42".to_string());
        assert_eq!(err.to_string(), "Customer not found: 42");

        let err = AppError::InvalidPagination("page must be an integer".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid pagination parameters: page must be an integer"
        );
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            AppError::CustomerNotFound("0".to_string()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(AppError::RouteNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::InvalidPagination("x".to_string()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Database(RepositoryError::DataCorruption("x".to_string())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_query_error_conversion() {
        let err = AppError::from(QueryError::CustomerNotFound(UserId::new(7)));
        assert!(matches!(err, AppError::CustomerNotFound(id) if id == "7"));

        let err = AppError::from(QueryError::Repository(RepositoryError::DataCorruption(
            "negative".to_string(),
        )));
        assert!(matches!(err, AppError::Database(_)));
    }

    #[tokio::test]
    async fn test_customer_not_found_body() {
        let (status, body) = body_json(AppError::CustomerNotFound("99".to_string())).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Customer not found");
        assert_eq!(body["message"], "Customer with ID 99 does not exist");
    }

    #[tokio::test]
    async fn test_internal_error_hides_details() {
        let (status, body) = body_json(AppError::Database(RepositoryError::DataCorruption(
            "total items is negative: -3".to_string(),
        )))
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal server error");
        assert_eq!(body["message"], "An unexpected error occurred");
        assert!(!body.to_string().contains("negative"));
    }
}
