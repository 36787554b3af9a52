//! Customer repository.
//!
//! Customer rows are always joined to `orders` with `LEFT JOIN` so customers
//! without orders still appear with an `order_count` of 0.

use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use customer_insights_core::{PageRequest, SearchTerm, UserId};

use super::{RepositoryError, non_negative};
use crate::models::{CustomerProfile, CustomerSummary};

/// Columns matched by a customer search, OR-ed together.
const SEARCH_COLUMNS: [&str; 3] = ["u.first_name", "u.last_name", "u.email"];

/// Append the optional search predicate.
///
/// The pattern is always bound as a parameter. SQLite's `LIKE` folds ASCII
/// case, so `john` matches `John`.
fn push_search_filter(builder: &mut QueryBuilder<'_, Sqlite>, search: Option<&SearchTerm>) {
    let Some(term) = search else {
        return;
    };

    let pattern = term.like_pattern();
    builder.push(" WHERE (");
    for (i, column) in SEARCH_COLUMNS.iter().enumerate() {
        if i > 0 {
            builder.push(" OR ");
        }
        builder
            .push(*column)
            .push(" LIKE ")
            .push_bind(pattern.clone())
            .push(r" ESCAPE '\'");
    }
    builder.push(")");
}

/// Repository for customer database operations.
pub struct CustomerRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CustomerRepository<'a> {
    /// Create a new customer repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List customers, most recently created first.
    ///
    /// Ties on `created_at` are broken by descending `id` so the same inputs
    /// always produce the same pages.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(
        &self,
        search: Option<&SearchTerm>,
        page: PageRequest,
    ) -> Result<Vec<CustomerSummary>, RepositoryError> {
        let mut query = QueryBuilder::<Sqlite>::new(
            r"
            SELECT
                u.id, u.first_name, u.last_name, u.email, u.age, u.gender,
                u.country, u.city, u.created_at,
                COUNT(o.order_id) AS order_count
            FROM users u
            LEFT JOIN orders o ON u.id = o.user_id",
        );
        push_search_filter(&mut query, search);
        query
            .push(" GROUP BY u.id ORDER BY u.created_at DESC, u.id DESC LIMIT ")
            .push_bind(page.limit())
            .push(" OFFSET ")
            .push_bind(page.offset());

        let customers = query
            .build_query_as::<CustomerSummary>()
            .fetch_all(self.pool)
            .await?;

        Ok(customers)
    }

    /// Count customers matching the optional search, ignoring any page window.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self, search: Option<&SearchTerm>) -> Result<i64, RepositoryError> {
        let mut query = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM users u");
        push_search_filter(&mut query, search);

        let (total,): (i64,) = query.build_query_as().fetch_one(self.pool).await?;

        non_negative(total, "customer count")
    }

    /// Get a customer with order count and total items ordered.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_profile(&self, id: UserId) -> Result<Option<CustomerProfile>, RepositoryError> {
        let customer = sqlx::query_as::<_, CustomerProfile>(
            r"
            SELECT
                u.id, u.first_name, u.last_name, u.email, u.age, u.gender,
                u.state, u.street_address, u.postal_code, u.city, u.country,
                u.latitude, u.longitude, u.traffic_source, u.created_at,
                COUNT(o.order_id) AS order_count,
                COALESCE(SUM(o.num_of_item), 0) AS total_items_ordered
            FROM users u
            LEFT JOIN orders o ON u.id = o.user_id
            WHERE u.id = ?
            GROUP BY u.id
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(customer)
    }

    /// Check whether a customer exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn exists(&self, id: UserId) -> Result<bool, RepositoryError> {
        let row: Option<(UserId,)> = sqlx::query_as("SELECT id FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(row.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_filter_absent() {
        let mut query = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM users u");
        push_search_filter(&mut query, None);
        assert_eq!(query.sql(), "SELECT COUNT(*) FROM users u");
    }

    #[test]
    fn test_search_filter_binds_every_column() {
        let term = SearchTerm::parse("o'brien; DROP TABLE users");
        let mut query = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM users u");
        push_search_filter(&mut query, term.as_ref());

        let sql = query.sql();
        assert!(!sql.contains("brien"));
        assert!(!sql.contains("DROP"));
        assert_eq!(sql.matches(" LIKE ").count(), 3);
        assert_eq!(sql.matches(r"ESCAPE '\'").count(), 3);
        assert!(sql.contains("u.first_name LIKE"));
        assert!(sql.contains("u.last_name LIKE"));
        assert!(sql.contains("u.email LIKE"));
    }
}
