//! Customer route handlers.

use axum::{
    Json,
    extract::rejection::QueryRejection,
    extract::{Path, Query, State},
};

use crate::error::Result;
use crate::models::{
    ApiResponse, CustomerDetails, CustomerListResponse, CustomerSummary, OrderRecord,
    PaginatedResponse,
};
use crate::routes::params::{self, CustomerListQuery, PageQuery};
use crate::services::CustomerService;
use crate::state::AppState;

/// `GET /api/customers`
pub async fn list(
    State(state): State<AppState>,
    query: std::result::Result<Query<CustomerListQuery>, QueryRejection>,
) -> Result<Json<CustomerListResponse<CustomerSummary>>> {
    let query = params::query(query)?;
    let page = query.page_request()?;

    let list = CustomerService::new(state.pool())
        .list(query.search_term(), page)
        .await?;

    Ok(Json(CustomerListResponse {
        success: true,
        data: list.customers.items,
        pagination: list.customers.pagination,
        search: list.search,
    }))
}

/// `GET /api/customers/{id}`
pub async fn details(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<CustomerDetails>>> {
    let id = params::customer_id(&id)?;
    let details = CustomerService::new(state.pool()).details(id).await?;

    Ok(Json(ApiResponse::ok(details)))
}

/// `GET /api/customers/{id}/orders`
pub async fn orders(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: std::result::Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<PaginatedResponse<OrderRecord>>> {
    let id = params::customer_id(&id)?;
    let page = params::query(query)?.page_request()?;

    let orders = CustomerService::new(state.pool()).orders(id, page).await?;

    Ok(Json(orders.into()))
}
