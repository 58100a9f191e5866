// ABOUTME: Governor module for serialized access to rate-limited APIs.
// ABOUTME: Contains the call queue, pacing, and retry coordination primitives.

mod governor;
mod pacing;
mod retry;

pub use governor::{Governor, GovernorConfig};
pub use pacing::Pacer;
pub use retry::{RetryPolicy, ThrottleError};

#[cfg(test)]
mod pacing_test;
