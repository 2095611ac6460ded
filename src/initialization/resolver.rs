//! DNS resolver initialization.

use std::sync::Arc;
use std::time::Duration;

use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::TokioAsyncResolver;

use crate::config::DNS_TIMEOUT_SECS;
use crate::error_handling::InitializationError;

/// Initializes the hickory resolver backing the IP range oracle.
///
/// Uses the default upstream configuration with short timeouts so a slow DNS
/// server delays classification by seconds, not minutes.
///
/// # Errors
///
/// Returns `InitializationError::DnsResolverError` if the resolver cannot be
/// built.
pub fn init_resolver() -> Result<Arc<TokioAsyncResolver>, InitializationError> {
    let mut opts = ResolverOpts::default();
    opts.timeout = Duration::from_secs(DNS_TIMEOUT_SECS);
    opts.attempts = 2;
    // No search-domain appending
    opts.ndots = 0;

    Ok(Arc::new(TokioAsyncResolver::tokio(
        ResolverConfig::default(),
        opts,
    )))
}
