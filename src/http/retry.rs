//! Retry policies for HTTP requests.
//!
//! Only reads are retried. Draft creation, order submission and status
//! updates always go out exactly once.

use crate::error::HttpError;
use std::time::Duration;

/// Retry policy for an HTTP request.
#[derive(Debug, Clone, Default)]
pub enum RetryPolicy {
    /// Single attempt. Every write uses this.
    #[default]
    None,
    /// The client's configured read policy (see [`RetryConfig::idempotent`]).
    Idempotent,
    Custom(RetryConfig),
}

/// Backoff parameters for retried requests.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// Retries after the first attempt.
    pub max_retries: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub backoff_factor: f64,
    /// Spread each delay by up to ±25%.
    pub jitter: bool,
    /// Response statuses worth another attempt.
    pub retryable_statuses: Vec<u16>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::idempotent()
    }
}

impl RetryConfig {
    /// Reads: transport failures, 429 and gateway errors. The backend sits on
    /// a host that cold-starts, so the first request after idle often 502s.
    pub fn idempotent() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(250),
            max_delay: Duration::from_secs(8),
            backoff_factor: 2.0,
            jitter: true,
            retryable_statuses: vec![429, 502, 503, 504],
        }
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    pub fn with_jitter(mut self, jitter: bool) -> Self {
        self.jitter = jitter;
        self
    }

    /// Whether `error` is worth another attempt under this config.
    pub fn should_retry(&self, error: &HttpError) -> bool {
        match error {
            HttpError::ServerError { status, .. } => self.retryable_statuses.contains(status),
            HttpError::RateLimited { .. } => self.retryable_statuses.contains(&429),
            HttpError::Timeout => true,
            #[cfg(feature = "http")]
            HttpError::Reqwest(e) => e.is_connect() || e.is_timeout() || e.is_request(),
            _ => false,
        }
    }

    /// Backoff before retry number `attempt` (0-indexed), honouring a
    /// server-supplied `Retry-After` when it is longer.
    pub fn delay_for(&self, attempt: u32, error: &HttpError) -> Duration {
        let backoff = self.delay_for_attempt(attempt);
        match error {
            HttpError::RateLimited {
                retry_after_ms: Some(ms),
            } => backoff.max(Duration::from_millis(*ms)).min(self.max_delay),
            _ => backoff,
        }
    }

    /// Exponential backoff for retry number `attempt` (0-indexed), capped at
    /// `max_delay`.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let base = self.initial_delay.as_millis() as f64
            * self.backoff_factor.powi(attempt.min(i32::MAX as u32) as i32);
        let capped = base.min(self.max_delay.as_millis() as f64);

        let ms = if self.jitter {
            let spread = capped * 0.25;
            (capped + (rand::random::<f64>() - 0.5) * 2.0 * spread).max(0.0)
        } else {
            capped
        };

        Duration::from_millis(ms as u64)
    }
}
