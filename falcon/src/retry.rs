//! Retry policies for transient request failures.
//!
//! A [`RetryPolicy`] is consulted after each failed attempt and decides
//! whether to try again and how long to wait first. The default is
//! [`NoRetry`]: one attempt, errors surface immediately.

use std::fmt::Debug;
use std::time::Duration;

use crate::error::Error;

/// Trait for defining retry policies when receiving errors.
pub trait RetryPolicy: Debug + Send + Sync {
    /// Submit a new retry delay based on the [`Error`] and the last retry
    /// number and delay, if any. Returning `None` stops retrying and surfaces
    /// the error.
    fn retry(&self, error: &Error, last_retry: Option<(usize, Duration)>) -> Option<Duration>;
}

/// Never retries.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRetry;

impl RetryPolicy for NoRetry {
    fn retry(&self, _error: &Error, _last_retry: Option<(usize, Duration)>) -> Option<Duration> {
        None
    }
}

/// Retries retryable errors with an exponentially growing delay.
#[derive(Debug, Clone, Copy)]
pub struct ExponentialBackoff {
    /// Maximum number of retries after the first attempt.
    pub max_retries: usize,
    /// Delay before the first retry.
    pub initial_delay: Duration,
    /// Upper bound on any single delay.
    pub max_delay: Duration,
    /// Factor applied to the previous delay.
    pub multiplier: f64,
}

impl ExponentialBackoff {
    /// Default delay before the first retry.
    pub const DEFAULT_INITIAL_DELAY: Duration = Duration::from_millis(500);
    /// Default cap on a single delay.
    pub const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(30);
    /// Default growth factor.
    pub const DEFAULT_MULTIPLIER: f64 = 2.0;

    /// Creates a policy allowing `max_retries` retries with default delays.
    #[must_use]
    pub const fn new(max_retries: usize) -> Self {
        Self {
            max_retries,
            initial_delay: Self::DEFAULT_INITIAL_DELAY,
            max_delay: Self::DEFAULT_MAX_DELAY,
            multiplier: Self::DEFAULT_MULTIPLIER,
        }
    }

    /// Sets the delay before the first retry.
    #[must_use]
    pub const fn initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Sets the cap on a single delay.
    #[must_use]
    pub const fn max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Sets the growth factor.
    ///
    /// A factor that yields a negative, non-finite or overflowing delay makes
    /// that retry wait [`max_delay`](Self::max_delay) instead.
    #[must_use]
    pub const fn multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }
}

impl Default for ExponentialBackoff {
    fn default() -> Self {
        Self::new(3)
    }
}

impl RetryPolicy for ExponentialBackoff {
    fn retry(&self, error: &Error, last_retry: Option<(usize, Duration)>) -> Option<Duration> {
        if !error.is_retryable() {
            return None;
        }

        let (retries, delay) = match last_retry {
            None => (0, self.initial_delay),
            Some((n, last)) => (
                n,
                Duration::try_from_secs_f64(last.as_secs_f64() * self.multiplier)
                    .unwrap_or(self.max_delay),
            ),
        };

        (retries < self.max_retries).then(|| delay.min(self.max_delay))
    }
}
