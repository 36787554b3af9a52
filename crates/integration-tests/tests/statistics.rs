//! Integration tests for dataset statistics and reports.

use axum::http::StatusCode;
use serde_json::{Value, json};

use customer_insights_integration_tests::{
    TestContext, TestOrder, TestUser, date_timestamp, month_start,
};

fn field<'a>(rows: &'a Value, name: &str) -> Vec<&'a Value> {
    rows.as_array()
        .expect("rows are an array")
        .iter()
        .map(|row| &row[name])
        .collect()
}

// ============================================================================
// Overview Tests
// ============================================================================

#[tokio::test]
async fn test_overview_of_empty_database() {
    let ctx = TestContext::new().await;

    let (status, body) = ctx.get("/api/statistics").await;

    assert_eq!(status, StatusCode::OK);
    let overall = &body["data"]["overall_statistics"];
    assert_eq!(overall["total_customers"], 0);
    assert_eq!(overall["total_orders"], 0);
    assert_eq!(overall["total_items"], 0);
    assert_eq!(overall["avg_items_per_order"].as_f64(), Some(0.0));
    assert_eq!(body["data"]["top_countries"], json!([]));
}

#[tokio::test]
async fn test_overview_totals_and_top_countries() {
    let ctx = TestContext::new().await;
    ctx.insert_user(TestUser::new(1, "Ann", "One").country("United States")).await;
    ctx.insert_user(TestUser::new(2, "Ben", "Two").country("United States")).await;
    ctx.insert_user(TestUser::new(3, "Cat", "Three").country("Brasil")).await;
    ctx.insert_user(TestUser::new(4, "Dan", "Four").country("China")).await;
    ctx.insert_user(TestUser::new(5, "Eve", "Five")).await;

    ctx.insert_order(TestOrder::new(10, 1, "Complete", 2)).await;
    ctx.insert_order(TestOrder::new(11, 1, "Shipped", 1)).await;
    ctx.insert_order(TestOrder::new(12, 2, "Complete", 4)).await;
    ctx.insert_order(TestOrder::new(13, 3, "Cancelled", 1)).await;
    ctx.insert_order(TestOrder::new(14, 3, "Cancelled", 1)).await;
    ctx.insert_order(TestOrder::new(15, 3, "Cancelled", 1)).await;
    ctx.insert_order(TestOrder::new(16, 4, "Processing", 3)).await;
    ctx.insert_order(TestOrder::new(17, 5, "Complete", 1)).await;
    // Orphaned: no user 999
    ctx.insert_order(TestOrder::new(18, 999, "Complete", 10)).await;

    let (status, body) = ctx.get("/api/statistics").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let overall = &body["data"]["overall_statistics"];
    assert_eq!(overall["total_customers"], 5);
    assert_eq!(overall["total_orders"], 8);
    assert_eq!(overall["total_items"], 14);
    assert_eq!(overall["avg_items_per_order"].as_f64(), Some(1.75));
    assert_eq!(overall["completed_orders"], 3);
    assert_eq!(overall["shipped_orders"], 1);
    assert_eq!(overall["cancelled_orders"], 3);

    assert_eq!(
        body["data"]["top_countries"],
        json!([
            {"country": "Brasil", "customer_count": 1, "order_count": 3},
            {"country": "United States", "customer_count": 2, "order_count": 3},
            {"country": "China", "customer_count": 1, "order_count": 1}
        ])
    );
}

#[tokio::test]
async fn test_top_countries_limited_to_five() {
    let ctx = TestContext::new().await;
    for (id, country) in (1..).zip(["G", "F", "E", "D", "C", "B", "A"]) {
        ctx.insert_user(TestUser::new(id, "User", country).country(&format!("Country {country}")))
            .await;
    }

    let (_, body) = ctx.get("/api/statistics").await;

    assert_eq!(
        field(&body["data"]["top_countries"], "country"),
        vec!["Country A", "Country B", "Country C", "Country D", "Country E"]
    );
}

// ============================================================================
// Report Tests
// ============================================================================

#[tokio::test]
async fn test_order_status_breakdown() {
    let ctx = TestContext::new().await;
    ctx.insert_user(TestUser::new(1, "Ann", "One")).await;
    ctx.insert_order(TestOrder::new(1, 1, "Complete", 1)).await;
    ctx.insert_order(TestOrder::new(2, 1, "Shipped", 1)).await;
    ctx.insert_order(TestOrder::new(3, 1, "Complete", 1)).await;
    ctx.insert_order(TestOrder::new(4, 1, "Cancelled", 1)).await;

    let (status, body) = ctx.get("/api/statistics/order-status").await;

    assert_eq!(status, StatusCode::OK);
    let rows = &body["data"];
    assert_eq!(field(rows, "status"), vec!["Complete", "Cancelled", "Shipped"]);
    assert_eq!(field(rows, "count"), vec![2, 1, 1]);

    let percentages: Vec<f64> = field(rows, "percentage")
        .into_iter()
        .map(|p| p.as_f64().expect("percentage is a number"))
        .collect();
    assert_eq!(percentages, vec![50.0, 25.0, 25.0]);
}

#[tokio::test]
async fn test_order_status_breakdown_empty() {
    let ctx = TestContext::new().await;

    let (status, body) = ctx.get("/api/statistics/order-status").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn test_demographics() {
    let ctx = TestContext::new().await;
    let ages = [(1, Some(17)), (2, Some(18)), (3, Some(25)), (4, Some(30)), (5, Some(40)), (6, Some(60)), (7, None)];
    for (id, age) in ages {
        let mut user = TestUser::new(id, "User", &format!("N{id}"));
        user.age = age;
        if id <= 2 {
            user = user.traffic_source("Search");
        } else if id == 3 {
            user = user.traffic_source("Email");
        }
        ctx.insert_user(user).await;
    }
    ctx.insert_order(TestOrder::new(1, 1, "Complete", 1)).await;
    ctx.insert_order(TestOrder::new(2, 1, "Complete", 1)).await;
    for order_id in 3..=5 {
        ctx.insert_order(TestOrder::new(order_id, 3, "Shipped", 1)).await;
    }

    let (status, body) = ctx.get("/api/statistics/demographics").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"]["age_groups"],
        json!([
            {"age_group": "18-25", "count": 2},
            {"age_group": "26-35", "count": 1},
            {"age_group": "36-50", "count": 1},
            {"age_group": "Over 50", "count": 1},
            {"age_group": "Under 18", "count": 1}
        ])
    );
    assert_eq!(
        body["data"]["traffic_sources"],
        json!([
            {"traffic_source": "Search", "user_count": 2, "order_count": 2},
            {"traffic_source": "Email", "user_count": 1, "order_count": 3}
        ])
    );
}

#[tokio::test]
async fn test_top_customers() {
    let ctx = TestContext::new().await;
    ctx.insert_user(TestUser::new(1, "Ann", "One").country("Japan")).await;
    ctx.insert_user(TestUser::new(2, "Ben", "Two")).await;
    ctx.insert_user(TestUser::new(3, "Cat", "Three")).await;
    ctx.insert_user(TestUser::new(4, "Dan", "Four")).await;

    ctx.insert_order(TestOrder::new(1, 1, "Complete", 1)).await;
    ctx.insert_order(TestOrder::new(2, 1, "Complete", 2)).await;
    ctx.insert_order(TestOrder::new(3, 1, "Complete", 2)).await;
    ctx.insert_order(TestOrder::new(4, 2, "Complete", 3)).await;
    ctx.insert_order(TestOrder::new(5, 2, "Complete", 3)).await;
    ctx.insert_order(TestOrder::new(6, 2, "Complete", 3)).await;
    ctx.insert_order(TestOrder::new(7, 3, "Complete", 1)).await;

    let (status, body) = ctx.get("/api/statistics/top-customers").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(field(&body["data"], "id"), vec![2, 1, 3]);
    assert_eq!(field(&body["data"], "total_items"), vec![9, 5, 1]);
    assert_eq!(body["data"][1]["country"], "Japan");
    assert_eq!(body["data"][1]["email"], "ann.one@example.com");

    let (_, body) = ctx.get("/api/statistics/top-customers?limit=2").await;
    assert_eq!(field(&body["data"], "id"), vec![2, 1]);

    let (_, body) = ctx.get("/api/statistics/top-customers?limit=0").await;
    assert_eq!(field(&body["data"], "id"), vec![2]);

    let (status, body) = ctx.get("/api/statistics/top-customers?limit=abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid pagination parameters");
}

#[tokio::test]
async fn test_monthly_trends() {
    let ctx = TestContext::new().await;
    ctx.insert_user(TestUser::new(1, "Ann", "One")).await;

    let last_month = month_start(1);
    let earlier = month_start(3);
    let old = month_start(24);

    ctx.insert_order(TestOrder::new(1, 1, "Complete", 2).created_at(&date_timestamp(last_month)))
        .await;
    ctx.insert_order(TestOrder::new(2, 1, "Shipped", 3).created_at(&date_timestamp(last_month)))
        .await;
    ctx.insert_order(TestOrder::new(3, 1, "Complete", 1).created_at(&date_timestamp(earlier)))
        .await;
    // Outside the twelve-month window
    ctx.insert_order(TestOrder::new(4, 1, "Complete", 5).created_at(&date_timestamp(old)))
        .await;
    // No timestamp
    ctx.insert_order(TestOrder::new(5, 1, "Complete", 7)).await;

    let (status, body) = ctx.get("/api/statistics/monthly-trends").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(
        body["data"],
        json!([
            {"month": last_month.format("%Y-%m").to_string(), "orders": 2, "total_items": 5},
            {"month": earlier.format("%Y-%m").to_string(), "orders": 1, "total_items": 1}
        ])
    );
}

#[tokio::test]
async fn test_monthly_trends_empty() {
    let ctx = TestContext::new().await;

    let (status, body) = ctx.get("/api/statistics/monthly-trends").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));
}
