//! Retry with exponential backoff for any [`Fetcher`].
//!
//! Wraps a single-attempt fetcher so every site shares one retry loop;
//! only the headers passed through differ per site.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use pricelens_core::retry::{RetryPolicy, RetryingFetcher};
//!
//! # use pricelens_core::traits::{Fetcher, Header};
//! # #[derive(Clone)] struct MyFetcher;
//! # impl Fetcher for MyFetcher {
//! #     async fn fetch(&self, _: &str, _: &[Header]) -> Result<String, pricelens_core::AppError> { todo!() }
//! # }
//! // Up to 3 attempts, sleeping 1s then 2s between them.
//! let policy = RetryPolicy {
//!     max_retries: 2,
//!     base_delay: Duration::from_secs(1),
//! };
//! let fetcher = RetryingFetcher::new(MyFetcher, policy);
//! ```

use std::sync::Arc;
use std::time::Duration;

use crate::config::{DEFAULT_BASE_DELAY, DEFAULT_MAX_RETRIES};
use crate::error::AppError;
use crate::traits::{Fetcher, Header};

/// How many times to retry and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Delay before the first retry. Doubles for every retry after that.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            base_delay: DEFAULT_BASE_DELAY,
        }
    }
}

impl RetryPolicy {
    /// No retries: a single attempt.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            base_delay: Duration::ZERO,
        }
    }

    /// Total attempts including the first.
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Sleep after the failed attempt number `attempt` (0-indexed):
    /// `base_delay * 2^attempt`.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor)
    }
}

/// Events emitted by [`RetryingFetcher`] for monitoring/logging.
#[derive(Debug)]
pub enum RetryEvent<'a> {
    /// One attempt failed. `retry_in` is `None` when no retry will follow.
    AttemptFailed {
        url: &'a str,
        attempt: u32,
        max_retries: u32,
        error: &'a AppError,
        retry_in: Option<Duration>,
    },
    /// Every attempt failed with a retryable error.
    Exhausted {
        url: &'a str,
        attempts: u32,
        error: &'a AppError,
    },
}

/// Trait for receiving retry events (decoupled logging).
pub trait RetryReporter: Send + Sync {
    fn report(&self, event: RetryEvent<'_>) {
        let _ = event;
    }
}

/// Reporter that uses the `tracing` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingRetryReporter;

impl RetryReporter for TracingRetryReporter {
    fn report(&self, event: RetryEvent<'_>) {
        match event {
            RetryEvent::AttemptFailed {
                url,
                attempt,
                max_retries,
                error,
                retry_in: Some(delay),
            } => {
                tracing::warn!(
                    %url,
                    %error,
                    delay_ms = %delay.as_millis(),
                    "Retry {}/{} after {}ms",
                    attempt + 1,
                    max_retries,
                    delay.as_millis()
                );
            }
            RetryEvent::AttemptFailed {
                url,
                attempt,
                error,
                retry_in: None,
                ..
            } => {
                tracing::debug!(%url, %error, attempt, "Fetch attempt failed, not retrying");
            }
            RetryEvent::Exhausted {
                url,
                attempts,
                error,
            } => {
                tracing::error!(%url, %error, attempts, "Fetch failed, retries exhausted");
            }
        }
    }
}

/// A [`Fetcher`] wrapper that retries failed attempts with exponential backoff.
///
/// Only retryable errors (see [`AppError::is_retryable`]) are repeated. The
/// final error is always [`AppError::FetchFailed`] carrying the last
/// attempt's error as its source.
pub struct RetryingFetcher<F, R = TracingRetryReporter> {
    inner: F,
    policy: RetryPolicy,
    reporter: Arc<R>,
}

impl<F: Clone, R> Clone for RetryingFetcher<F, R> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            policy: self.policy,
            reporter: Arc::clone(&self.reporter),
        }
    }
}

impl<F: Fetcher> RetryingFetcher<F> {
    /// Wrap an existing fetcher, logging retries through `tracing`.
    pub fn new(inner: F, policy: RetryPolicy) -> Self {
        Self {
            inner,
            policy,
            reporter: Arc::new(TracingRetryReporter),
        }
    }
}

impl<F: Fetcher, R: RetryReporter> RetryingFetcher<F, R> {
    /// Replace the event reporter.
    pub fn with_reporter<R2: RetryReporter>(self, reporter: R2) -> RetryingFetcher<F, R2> {
        RetryingFetcher {
            inner: self.inner,
            policy: self.policy,
            reporter: Arc::new(reporter),
        }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }
}

impl<F: Fetcher, R: RetryReporter> Fetcher for RetryingFetcher<F, R> {
    async fn fetch(&self, url: &str, headers: &[Header]) -> Result<String, AppError> {
        let mut attempt = 0u32;
        loop {
            let error = match self.inner.fetch(url, headers).await {
                Ok(body) => return Ok(body),
                Err(e) => e,
            };

            let retryable = error.is_retryable();
            let retry_in = (retryable && attempt < self.policy.max_retries)
                .then(|| self.policy.delay_for_attempt(attempt));

            self.reporter.report(RetryEvent::AttemptFailed {
                url,
                attempt,
                max_retries: self.policy.max_retries,
                error: &error,
                retry_in,
            });

            match retry_in {
                Some(delay) => {
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                None => {
                    let attempts = attempt + 1;
                    if retryable {
                        self.reporter.report(RetryEvent::Exhausted {
                            url,
                            attempts,
                            error: &error,
                        });
                    }
                    return Err(AppError::FetchFailed {
                        attempts,
                        source: Box::new(error),
                    });
                }
            }
        }
    }
}
