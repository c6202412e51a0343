use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use pricelens_core::ExtractionResult;

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Price lookup
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct GetPriceRequest {
    /// Product page URL on Amazon, Flipkart or Snapdeal
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ProductResponse {
    /// Site the URL was routed to
    pub website: String,
    /// Product title, or "Title not found"
    pub title: String,
    /// Price text as shown on the page, or "Price not found"
    pub price: String,
    /// Product image URL, or "Image not found"
    pub image: String,
}

impl From<ExtractionResult> for ProductResponse {
    fn from(r: ExtractionResult) -> Self {
        Self {
            website: r.website,
            title: r.title,
            price: r.price,
            image: r.image,
        }
    }
}

// ---------------------------------------------------------------------------
// Comparison
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComparePricesRequest {
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct PlatformPrice {
    pub platform: String,
    pub price: u64,
    pub available: bool,
}

/// Placeholder comparison: echoes the product name and never lists prices.
///
/// Filling `prices` means fetching every supported site for the product
/// concurrently and merging whatever subset succeeds.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ComparePricesResponse {
    pub title: String,
    pub image: String,
    /// Always empty: cross-site comparison is not implemented
    pub prices: Vec<PlatformPrice>,
    pub website: &'static str,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}
