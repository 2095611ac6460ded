// Shared test helpers for building processing contexts.
//
// Every context uses a static resolver so fingerprinting never touches real DNS.

use std::sync::Arc;

use redirect_audit::initialization::{init_client, init_crypto_provider};
use redirect_audit::{Config, IpOracle, LogLevel, ProcessingContext, StaticResolver};

/// Config with a short timeout suitable for mock servers.
#[allow(dead_code)]
pub fn test_config() -> Config {
    Config {
        log_level: LogLevel::Error,
        timeout_seconds: 5,
        user_agent: "redirect_audit_test/1.0".to_string(),
        ..Default::default()
    }
}

/// Builds a context around `config` with an empty static resolver.
#[allow(dead_code)]
pub fn test_context(config: &Config) -> ProcessingContext {
    init_crypto_provider();
    let client = init_client(config).expect("Failed to build HTTP client");
    let oracle = Arc::new(IpOracle::new(Arc::new(StaticResolver::new())));
    ProcessingContext::new(client, oracle, config)
}
