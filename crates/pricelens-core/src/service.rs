use crate::error::AppError;
use crate::models::{ExtractionRequest, ExtractionResult};
use crate::site::{Site, route};
use crate::traits::{Extractor, Fetcher};

/// Orchestrates one product lookup: validate → route → fetch → extract.
///
/// Generic over the fetcher and extractor via traits, enabling dependency
/// injection and testability without real HTTP. Holds no per-request state,
/// so one service can serve any number of concurrent lookups.
#[derive(Clone)]
pub struct PriceService<F, E>
where
    F: Fetcher,
    E: Extractor,
{
    fetcher: F,
    extractor: E,
}

impl<F, E> PriceService<F, E>
where
    F: Fetcher,
    E: Extractor,
{
    pub fn new(fetcher: F, extractor: E) -> Self {
        Self { fetcher, extractor }
    }

    /// Look up product data for a URL.
    ///
    /// 1. Trim and validate the URL (blank → `InvalidInput`)
    /// 2. Route to a site profile (no match → `UnsupportedSite`, nothing fetched)
    /// 3. Fetch the page with the profile's headers
    /// 4. Extract title, price and image, degrading missing fields to sentinels
    pub async fn lookup(&self, url: &str) -> Result<ExtractionResult, AppError> {
        let request = ExtractionRequest::new(url)?;
        let profile = route(&request.url)?;

        // 1. Fetch
        tracing::info!(site = %profile.site, url = %request.url, "Fetching product page");
        let html = self
            .fetcher
            .fetch(&request.url, profile.headers)
            .await
            .map_err(|e| {
                tracing::error!(site = %profile.site, error = %e, "Scraping failed");
                upstream_error(profile.site, e)
            })?;
        tracing::info!("Fetched {} bytes of HTML", html.len());

        // 2. Extract
        let result = self.extractor.extract(profile, &html);
        tracing::info!(
            site = %profile.site,
            title = result.has_title(),
            price = result.has_price(),
            image = result.has_image(),
            "Extraction complete"
        );

        Ok(result)
    }
}

/// Classify a fetch failure for a routed site.
///
/// A refused URL is the caller's fault and keeps its own kind; anything
/// else means the store could not be reached.
fn upstream_error(site: Site, err: AppError) -> AppError {
    match err {
        AppError::FetchFailed { source, .. } if matches!(*source, AppError::BlockedUrl(_)) => {
            *source
        }
        err @ AppError::BlockedUrl(_) => err,
        err => AppError::UpstreamUnavailable {
            site: site.as_str().to_string(),
            details: err.to_string(),
        },
    }
}
