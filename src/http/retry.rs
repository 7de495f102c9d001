//! Retry pacing for HTTP requests

use std::time::Duration;

use backoff::backoff::Backoff;
use backoff::{ExponentialBackoff, ExponentialBackoffBuilder};

/// Backoff configuration for retried requests.
///
/// The retry *count* lives on the client (`max_retries`); this struct
/// only controls how long to wait between attempts.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Initial retry delay
    pub initial_interval: Duration,

    /// Maximum retry delay
    pub max_interval: Duration,

    /// Exponential backoff multiplier
    pub multiplier: f64,

    /// Randomization factor for jitter
    pub randomization_factor: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            initial_interval: Duration::from_secs(1),
            max_interval: Duration::from_secs(60),
            multiplier: 2.0,
            randomization_factor: 0.1,
        }
    }
}

impl RetryConfig {
    /// Create an exponential backoff instance from this config.
    pub fn to_backoff(&self) -> ExponentialBackoff {
        ExponentialBackoffBuilder::new()
            .with_initial_interval(self.initial_interval)
            .with_max_interval(self.max_interval)
            .with_multiplier(self.multiplier)
            .with_randomization_factor(self.randomization_factor)
            .with_max_elapsed_time(None)
            .build()
    }
}

/// Calculate the delay before the next attempt, or `None` if the error
/// should not be retried at all.
pub fn calculate_retry_delay(
    error: &crate::error::Error,
    attempt: u32,
    config: &RetryConfig,
) -> Option<Duration> {
    if !error.is_retryable() {
        return None;
    }

    let mut backoff = config.to_backoff();
    for _ in 0..attempt {
        backoff.next_backoff();
    }
    backoff.next_backoff()
}
