// ABOUTME: Defines error types for the pacer library using thiserror.
// ABOUTME: ApiError carries the rate-limit classification the governor acts on.

use std::time::Duration;

use crate::governor::ThrottleError;

/// Errors from governed API call boundaries.
///
/// `RateLimited` is the only variant the governor retries; everything else
/// propagates to the caller unchanged.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Rate limited: {message}")]
    RateLimited {
        /// Server-suggested wait from the `Retry-After` header, if present.
        retry_after: Option<Duration>,
        message: String,
    },

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),
}

impl ThrottleError for ApiError {
    fn is_rate_limited(&self) -> bool {
        matches!(self, ApiError::RateLimited { .. })
    }

    fn retry_after(&self) -> Option<Duration> {
        match self {
            ApiError::RateLimited { retry_after, .. } => *retry_after,
            _ => None,
        }
    }
}
