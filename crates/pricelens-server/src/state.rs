use pricelens_client::{ReqwestFetcher, SelectorExtractor};
use pricelens_core::retry::RetryPolicy;
use pricelens_core::{AppError, FetchConfig, PriceService, RetryingFetcher};

/// The lookup pipeline the server runs: reqwest with retries, selector extraction.
pub type LiveService = PriceService<RetryingFetcher<ReqwestFetcher>, SelectorExtractor>;

/// Shared application state, available to all route handlers via `State<Arc<AppState>>`.
pub struct AppState {
    pub service: LiveService,
}

impl AppState {
    /// Build state from configuration with SSRF protection enabled.
    pub fn new(config: &FetchConfig) -> Result<Self, AppError> {
        let fetcher = ReqwestFetcher::with_timeout(config.timeout)?;
        Ok(Self::from_fetcher(fetcher, config.retry_policy()))
    }

    /// Build state around an already configured fetcher.
    pub fn from_fetcher(fetcher: ReqwestFetcher, policy: RetryPolicy) -> Self {
        let fetcher = RetryingFetcher::new(fetcher, policy);
        Self {
            service: PriceService::new(fetcher, SelectorExtractor::new()),
        }
    }
}
