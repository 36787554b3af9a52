//! Integration tests for Customer Insights.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p customer-insights-integration-tests
//! ```
//!
//! Each test builds a fresh in-memory SQLite database, applies the embedded
//! migrations, seeds the rows it needs and drives the real router with
//! `tower::ServiceExt::oneshot`. No server or database file is required.
//!
//! # Test Categories
//!
//! - `customers` - Customer list, search and pagination
//! - `customer_details` - Customer details and order history
//! - `statistics` - Dataset statistics and reports
//! - `errors` - Error bodies and unknown routes

#![allow(clippy::missing_panics_doc)]

use axum::Router;
use chrono::{Datelike, Months, NaiveDate, Utc};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

use customer_insights_api::config::ApiConfig;
use customer_insights_api::db::{AccessMode, MIGRATOR, connect_options};
use customer_insights_api::state::AppState;

const MEMORY_URL: &str = "sqlite::memory:";

/// A migrated in-memory database and the router serving it.
pub struct TestContext {
    pub pool: SqlitePool,
    app: Router,
}

impl TestContext {
    /// Create an empty, migrated database.
    pub async fn new() -> Self {
        // One connection that never expires: each in-memory connection is its
        // own database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(
                connect_options(MEMORY_URL, AccessMode::ReadWrite)
                    .expect("Failed to parse database URL"),
            )
            .await
            .expect("Failed to open in-memory database");

        MIGRATOR
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        let state = AppState::new(ApiConfig::with_database_url(MEMORY_URL), pool.clone());

        Self {
            pool,
            app: customer_insights_api::app(state),
        }
    }

    /// Insert a customer row.
    pub async fn insert_user(&self, user: TestUser) {
        sqlx::query(
            r"
            INSERT INTO users (
                id, first_name, last_name, email, age, gender, country, city,
                traffic_source, created_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(user.id)
        .bind(user.first_name)
        .bind(user.last_name)
        .bind(user.email)
        .bind(user.age)
        .bind(user.gender)
        .bind(user.country)
        .bind(user.city)
        .bind(user.traffic_source)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .expect("Failed to insert user");
    }

    /// Insert an order row.
    pub async fn insert_order(&self, order: TestOrder) {
        sqlx::query(
            r"
            INSERT INTO orders (order_id, user_id, status, created_at, num_of_item)
            VALUES (?, ?, ?, ?, ?)
            ",
        )
        .bind(order.order_id)
        .bind(order.user_id)
        .bind(order.status)
        .bind(order.created_at)
        .bind(order.num_of_item)
        .execute(&self.pool)
        .await
        .expect("Failed to insert order");
    }

    /// Issue a GET request and parse the JSON body.
    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let response = self
            .app
            .clone()
            .oneshot(
                Request::builder()
                    .uri(uri)
                    .body(Body::empty())
                    .expect("Failed to build request"),
            )
            .await
            .expect("Router failed");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("Response is not JSON")
        };

        (status, body)
    }
}

/// Customer row builder.
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub traffic_source: Option<String>,
    pub created_at: Option<String>,
}

impl TestUser {
    /// A customer with only the required columns set.
    #[must_use]
    pub fn new(id: i64, first_name: &str, last_name: &str) -> Self {
        Self {
            id,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: format!(
                "{}.{}@example.com",
                first_name.to_lowercase(),
                last_name.to_lowercase()
            ),
            age: None,
            gender: None,
            country: None,
            city: None,
            traffic_source: None,
            created_at: None,
        }
    }

    #[must_use]
    pub fn email(mut self, email: &str) -> Self {
        self.email = email.to_string();
        self
    }

    #[must_use]
    pub const fn age(mut self, age: i64) -> Self {
        self.age = Some(age);
        self
    }

    #[must_use]
    pub fn country(mut self, country: &str) -> Self {
        self.country = Some(country.to_string());
        self
    }

    #[must_use]
    pub fn traffic_source(mut self, source: &str) -> Self {
        self.traffic_source = Some(source.to_string());
        self
    }

    #[must_use]
    pub fn created_at(mut self, created_at: &str) -> Self {
        self.created_at = Some(created_at.to_string());
        self
    }
}

/// Order row builder.
#[derive(Debug, Clone)]
pub struct TestOrder {
    pub order_id: i64,
    pub user_id: i64,
    pub status: Option<String>,
    pub created_at: Option<String>,
    pub num_of_item: Option<i64>,
}

impl TestOrder {
    /// An order with a status and item count.
    #[must_use]
    pub fn new(order_id: i64, user_id: i64, status: &str, num_of_item: i64) -> Self {
        Self {
            order_id,
            user_id,
            status: Some(status.to_string()),
            created_at: None,
            num_of_item: Some(num_of_item),
        }
    }

    #[must_use]
    pub fn created_at(mut self, created_at: &str) -> Self {
        self.created_at = Some(created_at.to_string());
        self
    }
}

/// Midnight UTC on the given day of January 2023, as the loader stores it.
#[must_use]
pub fn timestamp(day: u32) -> String {
    format!("2023-01-{:02} 00:00:00+00:00", day.clamp(1, 28))
}

/// The first day of the month `months` months before the current one.
#[must_use]
pub fn month_start(months: u32) -> NaiveDate {
    let today = Utc::now().date_naive();
    let start = today.with_day(1).expect("every month has a first day");
    start
        .checked_sub_months(Months::new(months))
        .expect("date in range")
}

/// Midnight UTC on `date`, as the loader stores it.
#[must_use]
pub fn date_timestamp(date: NaiveDate) -> String {
    format!("{} 00:00:00+00:00", date.format("%Y-%m-%d"))
}
