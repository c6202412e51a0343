use thiserror::Error;

/// Application-wide error types for PriceLens.
#[derive(Error, Debug)]
pub enum AppError {
    /// Request payload is missing or blank.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// URL matched none of the known site tokens.
    #[error("Website not supported: {0}")]
    UnsupportedSite(String),

    /// URL was refused before any request was made (scheme or SSRF guard).
    #[error("URL not allowed: {0}")]
    BlockedUrl(String),

    /// HTTP request failed or returned a non-2xx status.
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// Request timed out.
    #[error("Request timed out after {0} ms")]
    Timeout(u64),

    /// Network/connection error.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Every fetch attempt failed. `source` is the last attempt's error.
    #[error("Fetch failed after {attempts} attempt(s): {source}")]
    FetchFailed {
        attempts: u32,
        #[source]
        source: Box<AppError>,
    },

    /// The site a URL routed to could not be fetched.
    #[error("{site} temporarily unavailable: {details}")]
    UpstreamUnavailable { site: String, details: String },

    /// Invalid configuration value.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// JSON serialization/deserialization failed.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Generic error.
    #[error("{0}")]
    Generic(String),
}

impl AppError {
    /// Returns true if a failed fetch attempt is worth repeating.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AppError::HttpError(_) | AppError::Timeout(_) | AppError::NetworkError(_)
        )
    }

    /// Unwraps `FetchFailed` to the error of the last attempt.
    pub fn root_cause(&self) -> &AppError {
        match self {
            AppError::FetchFailed { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
