// ABOUTME: Retry policy for rate-limited call failures.
// ABOUTME: Defines the ThrottleError classification trait consumed by the governor.

use std::time::Duration;

/// Classification contract for errors returned by governed operations.
///
/// The governor retries an operation only when its error reports being
/// rate limited; every other failure propagates to the caller unchanged.
/// Boundary adapters implement this for their concrete error types so the
/// governor never has to inspect error internals.
pub trait ThrottleError {
    /// True if this failure is a rate-limit signal (an HTTP 429 equivalent).
    fn is_rate_limited(&self) -> bool;

    /// Server-suggested wait before the next attempt, if one was provided.
    fn retry_after(&self) -> Option<Duration> {
        None
    }
}

/// Retry policy for rate-limited failures.
///
/// The budget applies per submission: each governed call gets its own
/// `max_retries`, counted only against rate-limit errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries allowed after the initial attempt.
    pub max_retries: u32,
    /// Backoff applied when a rate-limit error carries no suggested wait.
    pub default_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            default_backoff: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Backoff to apply for a rate-limited failure.
    ///
    /// Prefers the server-suggested wait over the configured default.
    pub fn backoff_for<E: ThrottleError>(&self, err: &E) -> Duration {
        err.retry_after().unwrap_or(self.default_backoff)
    }
}
