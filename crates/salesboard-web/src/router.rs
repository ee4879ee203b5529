//! Web router using Axum
//!
//! JSON endpoints over [`AnalyticsService`]. Fetch failures map to 502 with
//! a `retryable` hint, malformed query parameters to 400.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use salesboard_core::period::{parse_bound, Bound};
use salesboard_core::{
    paginate, AnalyticsService, CoreError, DataFetchError, DateRange, SalesRepository,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Rows fetched for the sales listing when `limit` is omitted
pub const DEFAULT_SALES_LIMIT: usize = 100;
pub const DEFAULT_PER_PAGE: usize = 10;

/// Create the web router
pub fn create_router<R>(service: Arc<AnalyticsService<R>>) -> Router
where
    R: SalesRepository + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(health_handler::<R>))
        .route("/api/analytics", get(analytics_handler::<R>))
        .route("/api/sales", get(sales_handler::<R>))
        .route("/api/customers", get(customers_handler::<R>))
        .route("/api/products", get(products_handler::<R>))
        .layer(cors)
        .with_state(service)
}

/// Error body shared by every endpoint
#[derive(Debug)]
pub enum ApiError {
    BadRequest(CoreError),
    Fetch(DataFetchError),
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        ApiError::BadRequest(err)
    }
}

impl From<DataFetchError> for ApiError {
    fn from(err: DataFetchError) -> Self {
        ApiError::Fetch(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(err) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": err.to_string(), "retryable": false })),
            )
                .into_response(),
            ApiError::Fetch(err) => {
                tracing::warn!("Sales backend request failed: {}", err);
                (
                    StatusCode::BAD_GATEWAY,
                    Json(json!({ "error": err.to_string(), "retryable": err.is_retryable() })),
                )
                    .into_response()
            }
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RangeParams {
    pub start: Option<String>,
    pub end: Option<String>,
}

impl RangeParams {
    /// Resolve to a range, filling missing bounds from the dashboard default
    pub fn resolve(&self) -> Result<DateRange, CoreError> {
        let fallback = DateRange::dashboard_default(Utc::now());
        let start = match self.start.as_deref() {
            Some(s) => parse_bound(s, Bound::Start)?,
            None => fallback.start,
        };
        let end = match self.end.as_deref() {
            Some(s) => parse_bound(s, Bound::End)?,
            None => fallback.end,
        };
        DateRange::new(start, end)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SalesParams {
    pub start: Option<String>,
    pub end: Option<String>,
    pub limit: Option<usize>,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

async fn health_handler<R: SalesRepository>(
    State(service): State<Arc<AnalyticsService<R>>>,
) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "source": service.source().label(),
    }))
}

async fn analytics_handler<R: SalesRepository>(
    State(service): State<Arc<AnalyticsService<R>>>,
    Query(params): Query<RangeParams>,
) -> Result<Response, ApiError> {
    let range = params.resolve()?;
    let report = service.get_analytics(range).await?;
    Ok(Json(report).into_response())
}

async fn sales_handler<R: SalesRepository>(
    State(service): State<Arc<AnalyticsService<R>>>,
    Query(params): Query<SalesParams>,
) -> Result<Response, ApiError> {
    let range = RangeParams {
        start: params.start,
        end: params.end,
    }
    .resolve()?;
    let limit = params.limit.unwrap_or(DEFAULT_SALES_LIMIT);

    let sales = service.get_sales(range, Some(limit)).await?;
    let page = paginate(
        &sales,
        params.page.unwrap_or(0),
        params.per_page.unwrap_or(DEFAULT_PER_PAGE),
    );
    Ok(Json(page).into_response())
}

async fn customers_handler<R: SalesRepository>(
    State(service): State<Arc<AnalyticsService<R>>>,
) -> Result<Response, ApiError> {
    let customers = service.get_customers().await?;
    Ok(Json(customers).into_response())
}

async fn products_handler<R: SalesRepository>(
    State(service): State<Arc<AnalyticsService<R>>>,
) -> Result<Response, ApiError> {
    let products = service.get_products().await?;
    Ok(Json(products).into_response())
}
