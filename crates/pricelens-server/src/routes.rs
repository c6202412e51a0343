use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use chrono::Utc;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use pricelens_core::AppError;

use crate::dto::{
    ComparePricesRequest, ComparePricesResponse, GetPriceRequest, HealthResponse, ProductResponse,
};
use crate::error::ApiError;
use crate::extract::JsonBody;
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Request bodies are a URL and a product name at most.
const MAX_BODY_BYTES: usize = 64 * 1024;

const PLACEHOLDER_IMAGE: &str =
    "https://images.unsplash.com/photo-1610945415295-d9bbf067e59c?w=400";

/// Build the router with all routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/get-price", post(get_price))
        .route("/compare-prices", post(compare_prices))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
}

/// The router plus the middleware stack the server runs with.
pub fn app(state: Arc<AppState>) -> Router {
    router(state)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

// ---------------------------------------------------------------------------
// Prices
// ---------------------------------------------------------------------------

#[utoipa::path(
    post,
    path = "/get-price",
    request_body = GetPriceRequest,
    responses(
        (status = 200, description = "Scraped product data", body = ProductResponse),
        (status = 400, description = "Missing URL, malformed JSON, unsupported site or refused URL", body = crate::dto::ErrorResponse),
        (status = 503, description = "Store could not be fetched", body = crate::dto::ErrorResponse),
        (status = 500, description = "Unexpected failure", body = crate::dto::ErrorResponse),
    ),
    tag = "prices"
)]
pub async fn get_price(
    State(state): State<Arc<AppState>>,
    JsonBody(body): JsonBody<GetPriceRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let url = body.url.unwrap_or_default();
    let result = state.service.lookup(&url).await?;

    Ok(axum::Json(ProductResponse::from(result)))
}

#[utoipa::path(
    post,
    path = "/compare-prices",
    request_body = ComparePricesRequest,
    responses(
        (status = 200, description = "Placeholder comparison with no prices", body = ComparePricesResponse),
        (status = 400, description = "Neither product name nor URL given, or malformed JSON", body = crate::dto::ErrorResponse),
    ),
    tag = "prices"
)]
pub async fn compare_prices(
    JsonBody(body): JsonBody<ComparePricesRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let product_name = non_blank(body.product_name);
    let url = non_blank(body.url);

    if product_name.is_none() && url.is_none() {
        return Err(AppError::InvalidInput("Product name or URL required".to_string()).into());
    }

    tracing::info!(?product_name, ?url, "Comparison requested, returning placeholder");

    let response = ComparePricesResponse {
        title: product_name.unwrap_or_else(|| "Product".to_string()),
        image: PLACEHOLDER_IMAGE.to_string(),
        prices: Vec::new(),
        website: "Multiple",
    };

    Ok(axum::Json(response))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    ),
    tag = "system"
)]
pub async fn health() -> impl IntoResponse {
    axum::Json(HealthResponse {
        status: "healthy",
        timestamp: Utc::now(),
    })
}
