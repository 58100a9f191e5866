// ABOUTME: Prelude module - convenient imports for common use cases.
// ABOUTME: Use `use pacer::prelude::*;` to get started quickly.

pub use crate::api::check_response;
pub use crate::error::ApiError;
pub use crate::governor::{Governor, GovernorConfig, Pacer, RetryPolicy, ThrottleError};
