use std::future::Future;

use crate::error::AppError;
use crate::models::ExtractionResult;
use crate::site::SiteProfile;

/// A request header as a `(name, value)` pair.
pub type Header = (&'static str, &'static str);

/// Fetches raw HTML content from a URL.
pub trait Fetcher: Send + Sync + Clone {
    /// Issue one GET with the given headers and return the response body.
    fn fetch(
        &self,
        url: &str,
        headers: &[Header],
    ) -> impl Future<Output = Result<String, AppError>> + Send;
}

/// Pulls product fields out of raw HTML according to a site profile.
///
/// Extraction never fails: a field that cannot be located is reported with
/// its sentinel value.
pub trait Extractor: Send + Sync + Clone {
    fn extract(&self, profile: &SiteProfile, html: &str) -> ExtractionResult;
}
