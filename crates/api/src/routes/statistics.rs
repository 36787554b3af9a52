//! Statistics and report route handlers.

use axum::{
    Json,
    extract::rejection::QueryRejection,
    extract::{Query, State},
};

use crate::error::Result;
use crate::models::{
    ApiResponse, Demographics, MonthlyTrend, StatisticsOverview, StatusShare, TopCustomer,
};
use crate::routes::params::{self, LimitQuery};
use crate::services::StatisticsService;
use crate::state::AppState;

/// `GET /api/statistics`
pub async fn overview(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<StatisticsOverview>>> {
    let overview = StatisticsService::new(state.pool()).overview().await?;
    Ok(Json(ApiResponse::ok(overview)))
}

/// `GET /api/statistics/order-status`
pub async fn order_status(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<StatusShare>>>> {
    let shares = StatisticsService::new(state.pool()).order_status().await?;
    Ok(Json(ApiResponse::ok(shares)))
}

/// `GET /api/statistics/demographics`
pub async fn demographics(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Demographics>>> {
    let demographics = StatisticsService::new(state.pool()).demographics().await?;
    Ok(Json(ApiResponse::ok(demographics)))
}

/// `GET /api/statistics/monthly-trends`
pub async fn monthly_trends(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<MonthlyTrend>>>> {
    let trends = StatisticsService::new(state.pool()).monthly_trends().await?;
    Ok(Json(ApiResponse::ok(trends)))
}

/// `GET /api/statistics/top-customers`
pub async fn top_customers(
    State(state): State<AppState>,
    query: std::result::Result<Query<LimitQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<TopCustomer>>>> {
    let limit = params::query(query)?.limit()?;
    let customers = StatisticsService::new(state.pool())
        .top_customers(limit)
        .await?;

    Ok(Json(ApiResponse::ok(customers)))
}
