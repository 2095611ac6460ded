//! HTTP client initialization.

use std::sync::Arc;

use reqwest::ClientBuilder;

use crate::config::{Config, POOL_MAX_IDLE_PER_HOST};

/// Initializes the shared HTTP client used for every hop.
///
/// Creates a `reqwest::Client` configured with:
/// - Redirects disabled, so each hop can be recorded
/// - User-Agent and timeout from the configuration
/// - Certificate validation disabled (misconfigured hosts still get classified)
/// - HTTP/2 negotiated over ALPN
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_client(config: &Config) -> Result<Arc<reqwest::Client>, reqwest::Error> {
    let client = ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(config.request_timeout())
        .user_agent(config.user_agent.clone())
        .danger_accept_invalid_certs(true)
        .pool_max_idle_per_host(POOL_MAX_IDLE_PER_HOST)
        .build()?;
    Ok(Arc::new(client))
}
