//! HTTP route handlers for the insights API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /api/health                       - Liveness check
//! GET  /api/health/ready                 - Readiness check (database)
//!
//! # Customers
//! GET  /api/customers                    - Customer list (?page, ?limit, ?search)
//! GET  /api/customers/{id}               - Customer details
//! GET  /api/customers/{id}/orders        - Customer order history (?page, ?limit)
//!
//! # Statistics
//! GET  /api/statistics                   - Overall statistics and top countries
//! GET  /api/statistics/order-status      - Order status breakdown
//! GET  /api/statistics/demographics      - Age groups and traffic sources
//! GET  /api/statistics/monthly-trends    - Orders per month, last 12 months
//! GET  /api/statistics/top-customers     - Top customers (?limit)
//! ```
//!
//! Any other path answers with a JSON 404.

pub mod customers;
pub mod health;
pub mod params;
pub mod statistics;

use axum::{Router, routing::get};

use crate::error::AppError;
use crate::state::AppState;

/// Create the `/api/customers` router.
pub fn customer_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(customers::list))
        .route("/{id}", get(customers::details))
        .route("/{id}/orders", get(customers::orders))
}

/// Create the `/api/statistics` router.
pub fn statistics_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(statistics::overview))
        .route("/order-status", get(statistics::order_status))
        .route("/demographics", get(statistics::demographics))
        .route("/monthly-trends", get(statistics::monthly_trends))
        .route("/top-customers", get(statistics::top_customers))
}

/// Create the full API router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/health", get(health::health))
        .route("/api/health/ready", get(health::readiness))
        .nest("/api/customers", customer_routes())
        .nest("/api/statistics", statistics_routes())
        .fallback(not_found)
}

/// JSON 404 for unknown routes.
pub async fn not_found() -> AppError {
    AppError::RouteNotFound
}
