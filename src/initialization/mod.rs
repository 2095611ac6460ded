//! Application initialization and resource setup.
//!
//! This module provides functions to initialize all shared resources:
//! - HTTP client (redirects disabled, browser User-Agent)
//! - DNS resolver and the IP range oracle built on it
//! - Logger and TLS crypto provider
//! - Processing context handed to every walk
//!
//! All initialization functions return proper error types for error handling.

mod client;
mod logger;
mod resolver;

use std::sync::Arc;

use rustls::crypto::{ring::default_provider, CryptoProvider};

use crate::config::{Config, ResolverKind};
use crate::dns::{HickoryResolver, HostResolver, IpOracle, SystemResolver};
use crate::error_handling::InitializationError;
use crate::fetch::ProcessingContext;

// Re-export public API
pub use client::init_client;
pub use logger::init_logger_with;
pub use resolver::init_resolver;

/// Initializes the crypto provider for TLS operations.
///
/// Configures the global crypto provider for `rustls`. This must be called before
/// any TLS connections are established.
pub fn init_crypto_provider() {
    // The return value is ignored because reinstalling the provider is harmless
    let _ = CryptoProvider::install_default(default_provider());
}

/// Builds the process-wide IP range oracle with the configured resolver.
///
/// # Errors
///
/// Returns `InitializationError::DnsResolverError` if the hickory resolver
/// cannot be built.
pub fn init_oracle(config: &Config) -> Result<Arc<IpOracle>, InitializationError> {
    let resolver: Arc<dyn HostResolver> = match config.resolver {
        ResolverKind::Hickory => Arc::new(HickoryResolver::new(init_resolver()?)),
        ResolverKind::System => Arc::new(SystemResolver),
    };
    Ok(Arc::new(IpOracle::new(resolver)))
}

/// Initializes every shared resource and bundles them into a context.
///
/// # Errors
///
/// Returns an `InitializationError` if the HTTP client or resolver cannot be
/// built.
pub fn init_context(config: &Config) -> Result<ProcessingContext, InitializationError> {
    init_crypto_provider();
    let client = init_client(config)?;
    let oracle = init_oracle(config)?;
    Ok(ProcessingContext::new(client, oracle, config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_init_context_carries_config() {
        let config = Config {
            max_redirects: 3,
            timeout_seconds: 7,
            resolver: ResolverKind::System,
            ..Default::default()
        };
        let ctx = init_context(&config).expect("context initializes");
        assert_eq!(ctx.max_redirects, 3);
        assert_eq!(ctx.timeout_secs, 7);
        assert_eq!(ctx.oracle.cached_hosts(), 0);
    }

    #[tokio::test]
    async fn test_init_oracle_hickory() {
        let oracle = init_oracle(&Config::default()).expect("oracle initializes");
        assert!(oracle.contains("23.192.0.1".parse().expect("ip")));
    }
}
