//! Error categorization.
//!
//! Maps transport-level `reqwest::Error`s onto the walk failure taxonomy.

use super::types::WalkError;

/// Categorizes a `reqwest::Error` raised while sending a hop request.
///
/// Timeouts are checked first because a connect timeout is also a connect
/// error. Builder errors (an unusable URL) are not network failures and fall
/// through to `Unexpected`.
///
/// # Arguments
///
/// * `error` - The error returned by `RequestBuilder::send`
/// * `timeout_secs` - Configured per-request timeout, echoed in the comment
pub fn categorize_reqwest_error(error: reqwest::Error, timeout_secs: u64) -> WalkError {
    if error.is_timeout() {
        WalkError::Timeout(timeout_secs)
    } else if error.is_builder() {
        WalkError::Unexpected(error.to_string())
    } else if error.is_connect() || error.is_request() || error.is_body() {
        WalkError::Network(error)
    } else {
        WalkError::Unexpected(error.to_string())
    }
}
