// ABOUTME: HTTP boundary adapter producing the governor's typed error classification.
// ABOUTME: Maps 429 + Retry-After to ApiError::RateLimited, other failures to ApiError::Api.

use std::time::Duration;

use reqwest::header::{HeaderMap, RETRY_AFTER};
use serde::Deserialize;

use crate::error::ApiError;

/// HTTP status signaling a rate-limited request.
const TOO_MANY_REQUESTS: u16 = 429;

/// Conventional JSON error body: `{"error": {"message": "..."}}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Check a response, classifying failures for the governor.
///
/// Successful responses pass through untouched. A 429 becomes
/// [`ApiError::RateLimited`] carrying the parsed `Retry-After` header; any
/// other non-success status becomes [`ApiError::Api`].
pub async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let retry_after = parse_retry_after(response.headers());
    let body = response.text().await?;
    Err(classify(status.as_u16(), retry_after, error_message(&body)))
}

/// Build the typed error for a non-success status.
fn classify(status: u16, retry_after: Option<Duration>, message: String) -> ApiError {
    if status == TOO_MANY_REQUESTS {
        ApiError::RateLimited {
            retry_after,
            message,
        }
    } else {
        ApiError::Api { status, message }
    }
}

/// Parse an integer-seconds `Retry-After` header.
///
/// The HTTP-date form and malformed values are treated as absent, so the
/// governor falls back to its default backoff.
fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
    let value = headers.get(RETRY_AFTER)?.to_str().ok()?;
    value.trim().parse::<u64>().ok().map(Duration::from_secs)
}

/// Extract a human-readable message from an error body.
///
/// Prefers the conventional `{"error": {"message": ...}}` shape, falling
/// back to the raw body text.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.error.message,
        Err(_) => body.to_string(),
    }
}
