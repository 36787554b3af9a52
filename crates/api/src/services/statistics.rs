//! Dataset statistics and business reports.

use chrono::{Months, NaiveDate, Utc};
use sqlx::SqlitePool;
use tracing::instrument;

use customer_insights_core::{average, percentage};

use super::QueryError;
use crate::db::reports::{StatusCount, TREND_MONTHS};
use crate::db::statistics::{DatasetTotals, TOP_COUNTRIES};
use crate::db::{ReportRepository, StatisticsRepository};
use crate::models::{
    Demographics, MonthlyTrend, OverallStatistics, StatisticsOverview, StatusShare, TopCustomer,
};

/// Default number of customers in the top-customers report.
pub const DEFAULT_TOP_CUSTOMERS: i64 = 10;

/// Largest number of customers the top-customers report returns.
pub const MAX_TOP_CUSTOMERS: i64 = 100;

/// Statistics and report service.
pub struct StatisticsService<'a> {
    statistics: StatisticsRepository<'a>,
    reports: ReportRepository<'a>,
}

impl<'a> StatisticsService<'a> {
    /// Create a new statistics service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self {
            statistics: StatisticsRepository::new(pool),
            reports: ReportRepository::new(pool),
        }
    }

    /// Overall totals and the top countries by order count.
    ///
    /// # Errors
    ///
    /// Returns `QueryError::Repository` if a query fails.
    #[instrument(skip(self))]
    pub async fn overview(&self) -> Result<StatisticsOverview, QueryError> {
        let totals = self.statistics.totals().await?;
        let top_countries = self.statistics.top_countries(TOP_COUNTRIES).await?;

        Ok(StatisticsOverview {
            overall_statistics: overall_statistics(totals),
            top_countries,
        })
    }

    /// Order count and share of all orders per status.
    ///
    /// # Errors
    ///
    /// Returns `QueryError::Repository` if a query fails.
    #[instrument(skip(self))]
    pub async fn order_status(&self) -> Result<Vec<StatusShare>, QueryError> {
        let counts = self.reports.status_counts().await?;
        Ok(status_shares(counts))
    }

    /// Age group and traffic source breakdowns.
    ///
    /// # Errors
    ///
    /// Returns `QueryError::Repository` if a query fails.
    #[instrument(skip(self))]
    pub async fn demographics(&self) -> Result<Demographics, QueryError> {
        let age_groups = self.reports.age_groups().await?;
        let traffic_sources = self.reports.traffic_sources().await?;

        Ok(Demographics {
            age_groups,
            traffic_sources,
        })
    }

    /// Orders and items per month over the last twelve months, newest first.
    ///
    /// # Errors
    ///
    /// Returns `QueryError::Repository` if a query fails.
    #[instrument(skip(self))]
    pub async fn monthly_trends(&self) -> Result<Vec<MonthlyTrend>, QueryError> {
        let since = trend_window_start(Utc::now().date_naive());
        Ok(self.reports.monthly_trends(since).await?)
    }

    /// Customers with the most orders.
    ///
    /// `limit` defaults to [`DEFAULT_TOP_CUSTOMERS`] and is clamped into
    /// `1..=MAX_TOP_CUSTOMERS`.
    ///
    /// # Errors
    ///
    /// Returns `QueryError::Repository` if a query fails.
    #[instrument(skip(self))]
    pub async fn top_customers(&self, limit: Option<i64>) -> Result<Vec<TopCustomer>, QueryError> {
        let limit = top_customers_limit(limit);
        Ok(self.reports.top_customers(limit).await?)
    }
}

fn top_customers_limit(limit: Option<i64>) -> i64 {
    limit
        .unwrap_or(DEFAULT_TOP_CUSTOMERS)
        .clamp(1, MAX_TOP_CUSTOMERS)
}

/// First day counted by the monthly trends report.
fn trend_window_start(today: NaiveDate) -> NaiveDate {
    u32::try_from(TREND_MONTHS)
        .ok()
        .and_then(|months| today.checked_sub_months(Months::new(months)))
        .unwrap_or(NaiveDate::MIN)
}

fn overall_statistics(totals: DatasetTotals) -> OverallStatistics {
    OverallStatistics {
        total_customers: totals.total_customers,
        total_orders: totals.total_orders,
        total_items: totals.total_items,
        avg_items_per_order: average(totals.total_items, totals.item_rows),
        completed_orders: totals.completed_orders,
        shipped_orders: totals.shipped_orders,
        cancelled_orders: totals.cancelled_orders,
    }
}

/// Attach each status's percentage of the summed counts.
fn status_shares(counts: Vec<StatusCount>) -> Vec<StatusShare> {
    let total: i64 = counts.iter().map(|c| c.count).sum();

    counts
        .into_iter()
        .map(|c| StatusShare {
            percentage: percentage(c.count, total),
            status: c.status,
            count: c.count,
        })
        .collect()
}
