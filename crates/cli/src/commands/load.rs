//! CSV loading command.
//!
//! Replaces the contents of `users` and `orders` with the rows of two CSV
//! exports. Both tables are cleared and reloaded inside one transaction, so a
//! failed load leaves the previous data untouched.
//!
//! # CSV handling
//!
//! - Columns are matched by header name; extra columns are ignored
//! - Empty cells are stored as NULL
//! - An empty `num_of_item` is stored as 1
//! - Rows whose primary key was already loaded, or that violate a NOT NULL
//!   column, are skipped and counted

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, NaiveDateTime};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::{info, warn};

use super::{LoadError, connect};

/// `num_of_item` stored when the cell is empty.
const DEFAULT_NUM_OF_ITEM: i64 = 1;

/// Naive timestamp layouts accepted besides RFC 3339.
const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// One row of `users.csv`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UserRow {
    pub id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub state: Option<String>,
    pub street_address: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub traffic_source: Option<String>,
    pub created_at: Option<String>,
}

/// One row of `orders.csv`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OrderRow {
    pub order_id: i64,
    pub user_id: i64,
    pub status: Option<String>,
    pub gender: Option<String>,
    pub created_at: Option<String>,
    pub returned_at: Option<String>,
    pub shipped_at: Option<String>,
    pub delivered_at: Option<String>,
    pub num_of_item: Option<i64>,
}

/// Inserted and skipped row counts for one table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableLoad {
    pub inserted: u64,
    pub skipped: u64,
}

impl TableLoad {
    fn record(&mut self, rows_affected: u64) {
        if rows_affected == 0 {
            self.skipped += 1;
        } else {
            self.inserted += rows_affected;
        }
    }
}

/// Result of a full load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub users: TableLoad,
    pub orders: TableLoad,
}

/// Load both CSV files into the database at `database_url`.
///
/// # Errors
///
/// Returns `LoadError` if a file cannot be read or parsed, or if the database
/// rejects the transaction.
pub async fn run(database_url: &str, users: &Path, orders: &Path) -> Result<LoadSummary, LoadError> {
    info!(path = %users.display(), "Reading users");
    let user_rows: Vec<UserRow> = read_records(File::open(users)?)?;
    info!(path = %orders.display(), "Reading orders");
    let order_rows: Vec<OrderRow> = read_records(File::open(orders)?)?;

    let pool = connect(database_url).await?;
    let summary = load(&pool, &user_rows, &order_rows).await?;
    pool.close().await;

    info!(
        inserted = summary.users.inserted,
        skipped = summary.users.skipped,
        "Loaded users"
    );
    info!(
        inserted = summary.orders.inserted,
        skipped = summary.orders.skipped,
        "Loaded orders"
    );
    Ok(summary)
}

/// Parse every record of a CSV document with a header row.
///
/// # Errors
///
/// Returns `LoadError::Csv` on the first malformed record.
pub fn read_records<T, R>(reader: R) -> Result<Vec<T>, LoadError>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let records = reader.deserialize().collect::<Result<Vec<T>, _>>()?;
    Ok(records)
}

/// Replace both tables with the given rows in one transaction.
///
/// # Errors
///
/// Returns `LoadError::Database` if any statement fails; nothing is committed.
pub async fn load(
    pool: &SqlitePool,
    users: &[UserRow],
    orders: &[OrderRow],
) -> Result<LoadSummary, LoadError> {
    warn_on_timestamps("users", users.iter().map(|u| u.created_at.as_deref()));
    warn_on_timestamps("orders", orders.iter().map(|o| o.created_at.as_deref()));

    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM orders").execute(&mut *tx).await?;
    sqlx::query("DELETE FROM users").execute(&mut *tx).await?;

    let users = insert_users(&mut tx, users).await?;
    let orders = insert_orders(&mut tx, orders).await?;

    tx.commit().await?;
    Ok(LoadSummary { users, orders })
}

async fn insert_users(
    tx: &mut Transaction<'_, Sqlite>,
    rows: &[UserRow],
) -> Result<TableLoad, LoadError> {
    let mut counts = TableLoad::default();

    for row in rows {
        let result = sqlx::query(
            r"
            INSERT OR IGNORE INTO users (
                id, first_name, last_name, email, age, gender, state,
                street_address, postal_code, city, country, latitude, longitude,
                traffic_source, created_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(row.id)
        .bind(&row.first_name)
        .bind(&row.last_name)
        .bind(&row.email)
        .bind(row.age)
        .bind(&row.gender)
        .bind(&row.state)
        .bind(&row.street_address)
        .bind(&row.postal_code)
        .bind(&row.city)
        .bind(&row.country)
        .bind(row.latitude)
        .bind(row.longitude)
        .bind(&row.traffic_source)
        .bind(&row.created_at)
        .execute(&mut **tx)
        .await?;

        counts.record(result.rows_affected());
    }

    Ok(counts)
}

async fn insert_orders(
    tx: &mut Transaction<'_, Sqlite>,
    rows: &[OrderRow],
) -> Result<TableLoad, LoadError> {
    let mut counts = TableLoad::default();

    for row in rows {
        let result = sqlx::query(
            r"
            INSERT OR IGNORE INTO orders (
                order_id, user_id, status, gender, created_at,
                returned_at, shipped_at, delivered_at, num_of_item
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(row.order_id)
        .bind(row.user_id)
        .bind(&row.status)
        .bind(&row.gender)
        .bind(&row.created_at)
        .bind(&row.returned_at)
        .bind(&row.shipped_at)
        .bind(&row.delivered_at)
        .bind(row.num_of_item.unwrap_or(DEFAULT_NUM_OF_ITEM))
        .execute(&mut **tx)
        .await?;

        counts.record(result.rows_affected());
    }

    Ok(counts)
}

/// Whether a `created_at` cell looks like a timestamp SQLite can order by.
fn is_timestamp(value: &str) -> bool {
    let value = value.strip_suffix(" UTC").unwrap_or(value);

    DateTime::parse_from_rfc3339(value).is_ok()
        || DateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f%:z").is_ok()
        || TIMESTAMP_FORMATS
            .iter()
            .any(|format| NaiveDateTime::parse_from_str(value, format).is_ok())
}

/// Rows are stored as-is; unrecognized timestamps only sort unpredictably.
fn warn_on_timestamps<'a>(table: &str, values: impl Iterator<Item = Option<&'a str>>) {
    let unparsed = values.flatten().filter(|v| !is_timestamp(v)).count();
    if unparsed > 0 {
        warn!(table, unparsed, "Rows with unrecognized created_at timestamps");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use customer_insights_api::db::{self, AccessMode, MIGRATOR};

    use super::*;

    const USERS_CSV: &str = "\
id,first_name,last_name,email,age,gender,state,street_address,postal_code,city,country,latitude,longitude,traffic_source,created_at
1,John,Smith,john@example.com,34,M,Texas,1 Main St,73301,Austin,United States,30.26,-97.74,Search,2023-01-01 10:00:00+00:00
2,Ana,Lopez,ana@example.com,,F,,,,,Brasil,,,Email,2023-02-01 10:00:00 UTC
1,Dup,Licate,dup@example.com,20,M,,,,,,,,,
";

    const ORDERS_CSV: &str = "\
order_id,user_id,status,gender,created_at,returned_at,shipped_at,delivered_at,num_of_item
10,1,Complete,M,2023-03-01 10:00:00+00:00,,2023-03-02 10:00:00+00:00,2023-03-04 10:00:00+00:00,3
11,1,Shipped,M,2023-03-05 10:00:00+00:00,,,,
12,999,Processing,F,2023-03-06 10:00:00+00:00,,,,2
";

    async fn memory_pool() -> SqlitePool {
        let pool = db::create_pool("sqlite::memory:", 1, AccessMode::ReadWrite)
            .await
            .unwrap();
        MIGRATOR.run(&pool).await.unwrap();
        pool
    }

    #[test]
    fn test_read_users_empty_cells_are_none() {
        let users: Vec<UserRow> = read_records(USERS_CSV.as_bytes()).unwrap();

        assert_eq!(users.len(), 3);
        assert_eq!(users[0].age, Some(34));
        assert_eq!(users[0].postal_code.as_deref(), Some("73301"));
        assert_eq!(users[1].age, None);
        assert_eq!(users[1].state, None);
        assert_eq!(users[1].latitude, None);
        assert_eq!(users[1].traffic_source.as_deref(), Some("Email"));
    }

    #[test]
    fn test_read_orders() {
        let orders: Vec<OrderRow> = read_records(ORDERS_CSV.as_bytes()).unwrap();

        assert_eq!(orders.len(), 3);
        assert_eq!(orders[0].num_of_item, Some(3));
        assert_eq!(orders[1].num_of_item, None);
        assert_eq!(orders[1].shipped_at, None);
        assert_eq!(orders[2].user_id, 999);
    }

    #[test]
    fn test_read_records_rejects_bad_integer() {
        let csv = "order_id,user_id\nten,1\n";
        let result: Result<Vec<OrderRow>, _> = read_records(csv.as_bytes());
        assert!(matches!(result, Err(LoadError::Csv(_))));
    }

    #[test]
    fn test_is_timestamp() {
        assert!(is_timestamp("2019-12-28 11:56:00 UTC"));
        assert!(is_timestamp("2023-01-01 00:00:00+00:00"));
        assert!(is_timestamp("2023-01-01 00:00:00.123456+00:00"));
        assert!(is_timestamp("2023-01-01T10:00:00Z"));
        assert!(is_timestamp("2023-01-01 10:00:00"));
        assert!(!is_timestamp("yesterday"));
        assert!(!is_timestamp("2023-13-01 10:00:00"));
    }

    #[tokio::test]
    async fn test_load_counts_and_defaults() {
        let pool = memory_pool().await;
        let users: Vec<UserRow> = read_records(USERS_CSV.as_bytes()).unwrap();
        let orders: Vec<OrderRow> = read_records(ORDERS_CSV.as_bytes()).unwrap();

        let summary = load(&pool, &users, &orders).await.unwrap();

        assert_eq!(summary.users, TableLoad { inserted: 2, skipped: 1 });
        assert_eq!(summary.orders, TableLoad { inserted: 3, skipped: 0 });

        let (items,): (i64,) = sqlx::query_as("SELECT num_of_item FROM orders WHERE order_id = 11")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(items, DEFAULT_NUM_OF_ITEM);

        let (state,): (Option<String>,) = sqlx::query_as("SELECT state FROM users WHERE id = 2")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(state, None);
    }

    #[tokio::test]
    async fn test_load_replaces_existing_rows() {
        let pool = memory_pool().await;
        let users: Vec<UserRow> = read_records(USERS_CSV.as_bytes()).unwrap();
        let orders: Vec<OrderRow> = read_records(ORDERS_CSV.as_bytes()).unwrap();

        load(&pool, &users, &orders).await.unwrap();
        let summary = load(&pool, &users[..1], &[]).await.unwrap();

        assert_eq!(summary.users.inserted, 1);
        let (users_left, orders_left): (i64, i64) = sqlx::query_as(
            "SELECT (SELECT COUNT(*) FROM users), (SELECT COUNT(*) FROM orders)",
        )
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!((users_left, orders_left), (1, 0));
    }
}
