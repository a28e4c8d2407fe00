//! Drives the HTTP router end to end without binding a socket.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use finrules::api::router;
use finrules::config::EngineConfig;

fn app() -> axum::Router {
    router(Arc::new(EngineConfig::default()))
}

async fn send(request: Request<Body>) -> (StatusCode, Value, Option<String>) {
    let response = app().oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let cache = response
        .headers()
        .get(header::CACHE_CONTROL)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body collects")
        .to_bytes();
    let body = serde_json::from_slice(&bytes).expect("json body");
    (status, body, cache)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("valid request")
}

fn post(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("valid request")
}

#[tokio::test]
async fn health_reports_ok() {
    let (status, body, cache) = send(get("/api/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(cache.as_deref(), Some("no-store"));
}

#[tokio::test]
async fn deposit_rates_list_offers_for_tenure() {
    let (status, body, _) = send(get("/api/deposit/rates?tenure=5")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tenure"], 5);
    assert_eq!(body["offers"][0]["institution"], "Suryoday Small Finance Bank");
    assert_eq!(body["offers"][0]["annualRatePercent"], 8.6);
    assert_eq!(body["offers"].as_array().map(Vec::len), Some(3));
}

#[tokio::test]
async fn deposit_get_projects_every_offer() {
    let (status, body, _) = send(get("/api/deposit?tenure=1&amount=1000")).await;
    assert_eq!(status, StatusCode::OK);
    let results = body["results"].as_array().expect("results array");
    assert_eq!(results.len(), 3);
    for result in results {
        assert_eq!(result["maturityAmount"], 1082);
    }
}

#[tokio::test]
async fn deposit_post_rejects_unsupported_tenure() {
    let (status, body, _) = send(post("/api/deposit", json!({"tenure": 2, "amount": 5000}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["error"]
            .as_str()
            .is_some_and(|e| e.contains("unsupported tenure")),
        "{body}"
    );
}

#[tokio::test]
async fn car_loan_post_returns_quote() {
    let (status, body, _) = send(post("/api/car-loan", json!({"price": 1_000_000.0}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "price": 1_000_000.0,
            "downPayment": 200_000,
            "monthlyInstallment": 19_908,
            "minimumMonthlyIncome": 199_080
        })
    );
}

#[tokio::test]
async fn car_loan_below_minimum_is_bad_request() {
    let (status, body, _) = send(get("/api/car-loan?price=5000")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "--price must be >= 100000");
}

#[tokio::test]
async fn budgeting_rules_over_http() {
    let (_, body, _) = send(get("/api/investment?income=100000")).await;
    assert_eq!(body["suggestedMonthlyInvestment"], 1000);

    let (_, body, _) = send(get("/api/debt-to-income?monthlyIncome=50000")).await;
    assert_eq!(body["maximumRecommendedDebt"], 18_000);

    let (_, body, _) = send(get(
        "/api/home-affordability?propertyPrice=500000&annualIncome=100000",
    ))
    .await;
    assert_eq!(body["verdict"], "affordable");
    assert_eq!(body["label"], "Affordable");

    let (_, body, _) = send(post(
        "/api/home-affordability",
        json!({"propertyPrice": 500_001.0, "annualIncome": 100_000.0}),
    ))
    .await;
    assert_eq!(body["verdict"], "not-affordable");
    assert_eq!(body["label"], "Not Affordable");
}

#[tokio::test]
async fn tax_includes_breakdown() {
    let (status, body, _) = send(get("/api/tax?grossIncome=1275000")).await;
    assert_eq!(status, StatusCode::OK);
    let tax = body["taxPayable"].as_f64().expect("numeric tax");
    assert!((tax - 62_400.0).abs() < 1e-6, "{tax}");
    assert_eq!(body["breakdown"]["rebateApplied"], false);
    assert_eq!(body["breakdown"]["slabs"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn tax_rebate_zeroes_small_liabilities() {
    let (_, body, _) = send(post("/api/tax", json!({"grossIncome": 1_000_000}))).await;
    assert_eq!(body["taxPayable"], 0.0);
    assert_eq!(body["retainedIncome"], 1_000_000.0);
    assert_eq!(body["breakdown"]["rebateApplied"], true);
}

#[tokio::test]
async fn unknown_route_is_json_not_found() {
    let (status, body, _) = send(get("/api/nope")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not found");
}
