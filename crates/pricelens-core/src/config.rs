use std::time::Duration;

use crate::error::AppError;
use crate::retry::RetryPolicy;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(15_000);
pub const DEFAULT_MAX_RETRIES: u32 = 2;
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(1_000);

/// Fetch tuning shared by the server and the CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    /// Per-attempt request timeout.
    pub timeout: Duration,
    /// Retries after the first attempt (2 means up to 3 attempts).
    pub max_retries: u32,
    /// First backoff delay; doubles on every further retry.
    pub base_delay: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
            base_delay: DEFAULT_BASE_DELAY,
        }
    }
}

impl FetchConfig {
    /// Read configuration from environment variables.
    ///
    /// - `PRICELENS_FETCH_TIMEOUT_MS` (optional, defaults to 15000)
    /// - `PRICELENS_MAX_RETRIES` (optional, defaults to 2)
    /// - `PRICELENS_RETRY_BASE_DELAY_MS` (optional, defaults to 1000)
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let defaults = Self::default();

        let timeout_ms = parse_var(&lookup, "PRICELENS_FETCH_TIMEOUT_MS")?;
        if timeout_ms == Some(0) {
            return Err(AppError::ConfigError(
                "PRICELENS_FETCH_TIMEOUT_MS must be at least 1".into(),
            ));
        }

        let max_retries = parse_var(&lookup, "PRICELENS_MAX_RETRIES")?
            .map(|n| {
                u32::try_from(n).map_err(|_| {
                    AppError::ConfigError(format!("PRICELENS_MAX_RETRIES '{n}' is too large"))
                })
            })
            .transpose()?;
        let base_delay_ms = parse_var(&lookup, "PRICELENS_RETRY_BASE_DELAY_MS")?;

        Ok(Self {
            timeout: timeout_ms.map_or(defaults.timeout, Duration::from_millis),
            max_retries: max_retries.unwrap_or(defaults.max_retries),
            base_delay: base_delay_ms.map_or(defaults.base_delay, Duration::from_millis),
        })
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.max_retries,
            base_delay: self.base_delay,
        }
    }
}

fn parse_var(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<u64>, AppError> {
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw.trim().parse::<u64>().map(Some).map_err(|_| {
            AppError::ConfigError(format!(
                "Invalid {key} '{raw}': must be a non-negative integer"
            ))
        }),
    }
}
