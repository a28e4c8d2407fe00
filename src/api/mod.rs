use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    extract::{Json, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::config::EngineConfig;
use crate::core::{
    AffordabilityVerdict, DepositResult, LoanQuote, RateOffer, TaxBreakdown, evaluate_car_loan_with,
    project,
};

// Values a form starts out with when the caller leaves a field empty.
const DEFAULT_TENURE: u32 = 1;
const DEFAULT_DEPOSIT_AMOUNT: f64 = 1_000.0;
const DEFAULT_CAR_PRICE: f64 = 1_000_000.0;
const DEFAULT_INVESTMENT_INCOME: f64 = 100_000.0;
const DEFAULT_PROPERTY_PRICE: f64 = 5_000_000.0;
const DEFAULT_ANNUAL_INCOME: f64 = 1_000_000.0;
const DEFAULT_MONTHLY_INCOME: f64 = 50_000.0;
const DEFAULT_GROSS_INCOME: f64 = 1_000_000.0;

type AppState = Arc<EngineConfig>;

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RatesPayload {
    pub tenure: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DepositPayload {
    pub tenure: Option<u32>,
    #[serde(alias = "principal")]
    pub amount: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CarLoanPayload {
    #[serde(alias = "carPrice", alias = "car_price")]
    pub price: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InvestmentPayload {
    #[serde(alias = "investment")]
    pub income: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HomeAffordabilityPayload {
    #[serde(alias = "property_price")]
    pub property_price: Option<f64>,
    #[serde(alias = "annual_income")]
    pub annual_income: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DebtToIncomePayload {
    #[serde(alias = "monthly_income", alias = "income")]
    pub monthly_income: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TaxPayload {
    #[serde(alias = "gross_income", alias = "income")]
    pub gross_income: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatesResponse {
    pub tenure: u32,
    pub offers: Vec<RateOffer>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositResponse {
    pub tenure: u32,
    pub amount: f64,
    pub results: Vec<DepositResult>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarLoanResponse {
    pub price: f64,
    #[serde(flatten)]
    pub quote: LoanQuote,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentResponse {
    pub income: f64,
    pub suggested_monthly_investment: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeAffordabilityResponse {
    pub property_price: f64,
    pub annual_income: f64,
    pub verdict: AffordabilityVerdict,
    pub label: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtToIncomeResponse {
    pub monthly_income: f64,
    pub maximum_recommended_debt: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxResponse {
    pub gross_income: f64,
    pub tax_payable: f64,
    pub retained_income: f64,
    pub breakdown: TaxBreakdown,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn at_least(flag: &str, value: f64, min: f64) -> Result<f64, String> {
    if !value.is_finite() {
        return Err(format!("{flag} must be a finite number"));
    }
    if value < min {
        return Err(format!("{flag} must be >= {min}"));
    }
    Ok(value)
}

pub fn deposit_rates(config: &EngineConfig, payload: RatesPayload) -> Result<RatesResponse, String> {
    let tenure = payload.tenure.unwrap_or(DEFAULT_TENURE);
    let offers = config
        .deposits
        .offers_for(tenure)
        .map_err(|e| e.to_string())?;
    Ok(RatesResponse {
        tenure,
        offers: offers.to_vec(),
    })
}

pub fn deposit_returns(
    config: &EngineConfig,
    payload: DepositPayload,
) -> Result<DepositResponse, String> {
    let tenure = payload.tenure.unwrap_or(DEFAULT_TENURE);
    let amount = at_least(
        "--amount",
        payload.amount.unwrap_or(DEFAULT_DEPOSIT_AMOUNT),
        config.limits.deposit_amount,
    )?;
    let offers = config
        .deposits
        .offers_for(tenure)
        .map_err(|e| e.to_string())?;
    let results = project(amount, tenure, offers).map_err(|e| e.to_string())?;
    Ok(DepositResponse {
        tenure,
        amount,
        results,
    })
}

pub fn car_loan(config: &EngineConfig, payload: CarLoanPayload) -> Result<CarLoanResponse, String> {
    let price = at_least(
        "--price",
        payload.price.unwrap_or(DEFAULT_CAR_PRICE),
        config.limits.car_price,
    )?;
    let quote = evaluate_car_loan_with(price, &config.car_loan).map_err(|e| e.to_string())?;
    Ok(CarLoanResponse { price, quote })
}

pub fn investment(
    config: &EngineConfig,
    payload: InvestmentPayload,
) -> Result<InvestmentResponse, String> {
    let income = at_least(
        "--income",
        payload.income.unwrap_or(DEFAULT_INVESTMENT_INCOME),
        config.limits.investment_income,
    )?;
    let suggested_monthly_investment = config
        .rules
        .suggested_monthly_investment(income)
        .map_err(|e| e.to_string())?;
    Ok(InvestmentResponse {
        income,
        suggested_monthly_investment,
    })
}

pub fn home_affordability(
    config: &EngineConfig,
    payload: HomeAffordabilityPayload,
) -> Result<HomeAffordabilityResponse, String> {
    let property_price = at_least(
        "--property-price",
        payload.property_price.unwrap_or(DEFAULT_PROPERTY_PRICE),
        config.limits.property_price,
    )?;
    let annual_income = at_least(
        "--annual-income",
        payload.annual_income.unwrap_or(DEFAULT_ANNUAL_INCOME),
        config.limits.annual_income,
    )?;
    let verdict = config
        .rules
        .home_affordability(property_price, annual_income)
        .map_err(|e| e.to_string())?;
    Ok(HomeAffordabilityResponse {
        property_price,
        annual_income,
        verdict,
        label: verdict.label(),
    })
}

pub fn debt_to_income(
    config: &EngineConfig,
    payload: DebtToIncomePayload,
) -> Result<DebtToIncomeResponse, String> {
    let monthly_income = at_least(
        "--monthly-income",
        payload.monthly_income.unwrap_or(DEFAULT_MONTHLY_INCOME),
        config.limits.monthly_income,
    )?;
    let maximum_recommended_debt = config
        .rules
        .maximum_recommended_debt(monthly_income)
        .map_err(|e| e.to_string())?;
    Ok(DebtToIncomeResponse {
        monthly_income,
        maximum_recommended_debt,
    })
}

pub fn income_tax(config: &EngineConfig, payload: TaxPayload) -> Result<TaxResponse, String> {
    let gross_income = at_least(
        "--gross-income",
        payload.gross_income.unwrap_or(DEFAULT_GROSS_INCOME),
        config.limits.gross_income,
    )?;
    let breakdown = config
        .tax
        .breakdown(gross_income)
        .map_err(|e| e.to_string())?;
    let result = breakdown.result();
    Ok(TaxResponse {
        gross_income: result.gross_income,
        tax_payable: result.tax_payable,
        retained_income: result.retained_income(),
        breakdown,
    })
}

pub fn router(config: Arc<EngineConfig>) -> Router {
    Router::new()
        .route("/api/health", get(health_handler))
        .route(
            "/api/deposit/rates",
            get(rates_get_handler).post(rates_post_handler),
        )
        .route(
            "/api/deposit",
            get(deposit_get_handler).post(deposit_post_handler),
        )
        .route(
            "/api/car-loan",
            get(car_loan_get_handler).post(car_loan_post_handler),
        )
        .route(
            "/api/investment",
            get(investment_get_handler).post(investment_post_handler),
        )
        .route(
            "/api/home-affordability",
            get(home_get_handler).post(home_post_handler),
        )
        .route(
            "/api/debt-to-income",
            get(debt_get_handler).post(debt_post_handler),
        )
        .route("/api/tax", get(tax_get_handler).post(tax_post_handler))
        .fallback(not_found_handler)
        .with_state(config)
}

pub async fn run_http_server(port: u16, config: EngineConfig) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = router(Arc::new(config));

    let listener = TcpListener::bind(addr).await?;
    info!("finrules HTTP API listening on http://{addr}");
    info!("Local access: http://127.0.0.1:{port}/api/health");

    axum::serve(listener, app).await
}

async fn health_handler() -> Response {
    json_response(
        StatusCode::OK,
        HealthResponse {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
        },
    )
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn rates_get_handler(
    State(config): State<AppState>,
    Query(payload): Query<RatesPayload>,
) -> Response {
    respond("deposit/rates", deposit_rates(&config, payload))
}

async fn rates_post_handler(
    State(config): State<AppState>,
    Json(payload): Json<RatesPayload>,
) -> Response {
    respond("deposit/rates", deposit_rates(&config, payload))
}

async fn deposit_get_handler(
    State(config): State<AppState>,
    Query(payload): Query<DepositPayload>,
) -> Response {
    respond("deposit", deposit_returns(&config, payload))
}

async fn deposit_post_handler(
    State(config): State<AppState>,
    Json(payload): Json<DepositPayload>,
) -> Response {
    respond("deposit", deposit_returns(&config, payload))
}

async fn car_loan_get_handler(
    State(config): State<AppState>,
    Query(payload): Query<CarLoanPayload>,
) -> Response {
    respond("car-loan", car_loan(&config, payload))
}

async fn car_loan_post_handler(
    State(config): State<AppState>,
    Json(payload): Json<CarLoanPayload>,
) -> Response {
    respond("car-loan", car_loan(&config, payload))
}

async fn investment_get_handler(
    State(config): State<AppState>,
    Query(payload): Query<InvestmentPayload>,
) -> Response {
    respond("investment", investment(&config, payload))
}

async fn investment_post_handler(
    State(config): State<AppState>,
    Json(payload): Json<InvestmentPayload>,
) -> Response {
    respond("investment", investment(&config, payload))
}

async fn home_get_handler(
    State(config): State<AppState>,
    Query(payload): Query<HomeAffordabilityPayload>,
) -> Response {
    respond("home-affordability", home_affordability(&config, payload))
}

async fn home_post_handler(
    State(config): State<AppState>,
    Json(payload): Json<HomeAffordabilityPayload>,
) -> Response {
    respond("home-affordability", home_affordability(&config, payload))
}

async fn debt_get_handler(
    State(config): State<AppState>,
    Query(payload): Query<DebtToIncomePayload>,
) -> Response {
    respond("debt-to-income", debt_to_income(&config, payload))
}

async fn debt_post_handler(
    State(config): State<AppState>,
    Json(payload): Json<DebtToIncomePayload>,
) -> Response {
    respond("debt-to-income", debt_to_income(&config, payload))
}

async fn tax_get_handler(
    State(config): State<AppState>,
    Query(payload): Query<TaxPayload>,
) -> Response {
    respond("tax", income_tax(&config, payload))
}

async fn tax_post_handler(
    State(config): State<AppState>,
    Json(payload): Json<TaxPayload>,
) -> Response {
    respond("tax", income_tax(&config, payload))
}

fn respond<T: Serialize>(route: &'static str, result: Result<T, String>) -> Response {
    match result {
        Ok(body) => {
            info!(route, "calculation served");
            json_response(StatusCode::OK, body)
        }
        Err(msg) => {
            warn!(route, error = %msg, "rejected calculation request");
            error_response(StatusCode::BAD_REQUEST, &msg)
        }
    }
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}
