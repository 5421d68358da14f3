//! Retry policies for HTTP requests.

use std::time::Duration;

use crate::error::HttpError;

/// Retry policy for an HTTP request.
#[derive(Debug, Clone, Default)]
pub enum RetryPolicy {
    /// Single attempt.
    #[default]
    None,
    /// Retry on transport failures, timeouts, 429 and 502/503/504.
    /// Default for OHLCV fetches.
    Idempotent,
    /// One quick retry; used for interactive token search.
    Search,
    /// User-provided retry logic.
    Custom(RetryConfig),
}

impl RetryPolicy {
    /// Resolved config, `None` for a single attempt.
    pub fn config(&self) -> Option<RetryConfig> {
        match self {
            RetryPolicy::None => None,
            RetryPolicy::Idempotent => Some(RetryConfig::idempotent()),
            RetryPolicy::Search => Some(RetryConfig::search()),
            RetryPolicy::Custom(c) => Some(c.clone()),
        }
    }
}

/// Configuration for retry behavior.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// Maximum number of retry attempts (not counting the initial request).
    pub max_retries: u32,
    /// Initial delay before the first retry.
    pub initial_delay: Duration,
    /// Maximum delay between retries.
    pub max_delay: Duration,
    /// Multiplier applied to the delay after each retry.
    pub backoff_factor: f64,
    /// Whether to add ±25% jitter to the delay.
    pub jitter: bool,
    /// HTTP status codes that trigger a retry.
    pub retryable_statuses: Vec<u16>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::idempotent()
    }
}

impl RetryConfig {
    /// The default config for idempotent GET requests.
    pub fn idempotent() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(200),
            max_delay: Duration::from_secs(10),
            backoff_factor: 2.0,
            jitter: true,
            retryable_statuses: vec![429, 502, 503, 504],
        }
    }

    /// Short budget for lookups issued while the user types.
    pub fn search() -> Self {
        Self {
            max_retries: 1,
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(1),
            backoff_factor: 2.0,
            jitter: true,
            retryable_statuses: vec![502, 503, 504],
        }
    }

    /// Whether `error` is worth another attempt under this config.
    pub fn should_retry(&self, error: &HttpError) -> bool {
        match error {
            HttpError::ServerError { status, .. } => self.retryable_statuses.contains(status),
            HttpError::RateLimited { .. } => self.retryable_statuses.contains(&429),
            HttpError::Timeout => true,
            HttpError::Reqwest(e) => e.is_connect() || e.is_timeout() || e.is_request(),
            _ => false,
        }
    }

    /// Delay before retry `attempt` (0-indexed). A server-provided
    /// `Retry-After` wins when it is longer than the backoff.
    pub fn delay_after(&self, error: &HttpError, attempt: u32) -> Duration {
        let backoff = self.delay_for_attempt(attempt);
        match error {
            HttpError::RateLimited {
                retry_after_ms: Some(ms),
            } => backoff.max(Duration::from_millis(*ms)),
            _ => backoff,
        }
    }

    /// Calculate delay for a given attempt (0-indexed).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let base = self.initial_delay.as_millis() as f64
            * self.backoff_factor.powi(attempt as i32);
        let capped = base.min(self.max_delay.as_millis() as f64);

        let final_ms = if self.jitter {
            let jitter_range = capped * 0.25;
            let jitter = (rand::random::<f64>() - 0.5) * 2.0 * jitter_range;
            (capped + jitter).max(0.0)
        } else {
            capped
        };

        Duration::from_millis(final_ms as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed(initial_ms: u64, max_ms: u64, factor: f64) -> RetryConfig {
        RetryConfig {
            max_retries: 3,
            initial_delay: Duration::from_millis(initial_ms),
            max_delay: Duration::from_millis(max_ms),
            backoff_factor: factor,
            jitter: false,
            retryable_statuses: vec![429, 502],
        }
    }

    #[test]
    fn test_policy_configs() {
        assert!(RetryPolicy::default().config().is_none());
        assert_eq!(RetryPolicy::Idempotent.config(), Some(RetryConfig::idempotent()));
        assert_eq!(RetryPolicy::Search.config().map(|c| c.max_retries), Some(1));
    }

    #[test]
    fn test_exponential_backoff() {
        let config = fixed(100, 10_000, 2.0);
        assert_eq!(config.delay_for_attempt(0).as_millis(), 100);
        assert_eq!(config.delay_for_attempt(1).as_millis(), 200);
        assert_eq!(config.delay_for_attempt(2).as_millis(), 400);
    }

    #[test]
    fn test_backoff_caps_at_max() {
        let config = fixed(1_000, 2_000, 10.0);
        assert_eq!(config.delay_for_attempt(3).as_millis(), 2_000);
    }

    #[test]
    fn test_jitter_stays_within_a_quarter() {
        let config = RetryConfig {
            jitter: true,
            ..fixed(400, 10_000, 1.0)
        };
        for _ in 0..50 {
            let ms = config.delay_for_attempt(0).as_millis();
            assert!((300..=500).contains(&ms), "{}", ms);
        }
    }

    #[test]
    fn test_retry_classification() {
        let config = fixed(100, 1_000, 2.0);
        assert!(config.should_retry(&HttpError::ServerError {
            status: 502,
            body: String::new()
        }));
        assert!(!config.should_retry(&HttpError::ServerError {
            status: 500,
            body: String::new()
        }));
        assert!(config.should_retry(&HttpError::Timeout));
        assert!(config.should_retry(&HttpError::RateLimited {
            retry_after_ms: None
        }));
        assert!(!config.should_retry(&HttpError::NotFound("token".into())));
        assert!(!config.should_retry(&HttpError::BadRequest("query".into())));

        assert!(!RetryConfig::search().should_retry(&HttpError::RateLimited {
            retry_after_ms: None
        }));
    }

    #[test]
    fn test_retry_after_extends_delay() {
        let config = fixed(100, 1_000, 2.0);
        let limited = HttpError::RateLimited {
            retry_after_ms: Some(3_000),
        };
        assert_eq!(config.delay_after(&limited, 0).as_millis(), 3_000);
        assert_eq!(config.delay_after(&HttpError::Timeout, 1).as_millis(), 200);
    }
}
