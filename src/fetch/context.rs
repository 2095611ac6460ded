//! Processing context for redirect walks.
//!
//! Groups the shared resources every walk needs so they can be handed to
//! spawned tasks as one cheaply clonable value.

use std::sync::Arc;

use crate::config::Config;
use crate::dns::IpOracle;
use crate::error_handling::ProcessingStats;

/// Context containing all shared resources needed for redirect walks.
#[derive(Clone)]
pub struct ProcessingContext {
    /// HTTP client with automatic redirects disabled
    pub client: Arc<reqwest::Client>,
    /// Process-wide IP range oracle (shares its DNS cache across batches)
    pub oracle: Arc<IpOracle>,
    /// Outcome counters for the current batch
    pub stats: Arc<ProcessingStats>,
    /// Maximum hops recorded per URL
    pub max_redirects: usize,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Settings the batch orchestrator reads (concurrency, throttle)
    pub config: Arc<Config>,
}

impl ProcessingContext {
    pub fn new(client: Arc<reqwest::Client>, oracle: Arc<IpOracle>, config: &Config) -> Self {
        Self {
            client,
            oracle,
            stats: Arc::new(ProcessingStats::new()),
            max_redirects: config.max_redirects,
            timeout_secs: config.timeout_seconds,
            config: Arc::new(config.clone()),
        }
    }

    /// Clone sharing the client and oracle but with fresh statistics.
    pub fn for_batch(&self) -> Self {
        Self {
            stats: Arc::new(ProcessingStats::new()),
            ..self.clone()
        }
    }
}
