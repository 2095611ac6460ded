//! Configuration constants.
//!
//! This module defines the operational limits used throughout the application
//! (hop limits, timeouts, admission control) and the static classification
//! tables consumed by the server fingerprint classifier.

use std::time::Duration;

// Redirect handling
/// Maximum number of hops recorded for one URL.
/// A walk that is still redirecting after this many responses fails with
/// `TooManyRedirects`.
pub const MAX_REDIRECTS: usize = 15;

// Network operation timeouts
/// Per-request timeout in seconds (applies to every hop individually)
pub const REQUEST_TIMEOUT_SECS: u64 = 60;
/// DNS query timeout in seconds
pub const DNS_TIMEOUT_SECS: u64 = 5;
/// Idle connections kept per host by the shared HTTP client
pub const POOL_MAX_IDLE_PER_HOST: usize = 100;

// Admission control
/// Maximum number of redirect walks in flight at once, per batch
pub const CONCURRENCY_LIMIT: usize = 25;
/// Batches with more distinct URLs than this are throttled
pub const THROTTLE_THRESHOLD: usize = 50;
/// Delay each walk waits before starting when the batch is throttled
pub const THROTTLE_DELAY: Duration = Duration::from_millis(100);

/// Maximum URL length (2048 characters), matching common browser and server limits.
pub const MAX_URL_LENGTH: usize = 2048;

/// Default User-Agent string for HTTP requests.
///
/// Mimics a desktop Chrome browser so that edge servers answer the walker the
/// same way they would answer a real visitor.
/// Users can override this via the `--user-agent` CLI flag.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/108.0.0.0 Safari/537.36";

// Server fingerprint tables
/// Address blocks announced by Akamai's edge network.
pub const AKAMAI_IP_RANGES: &[&str] = &["23.192.0.0/11", "104.64.0.0/10", "184.24.0.0/13"];

/// Hostname fragments of properties that run an AEM dispatcher behind a cache
/// without identifying themselves in the `Server` header.
pub const AEM_OVERRIDE_HOST_MARKERS: &[&str] = &["bmw", "mini"];

/// `Server-Timing` fragments emitted by Akamai's edge cache.
pub const AKAMAI_CACHE_MARKERS: &[&str] = &["cdn-cache; desc=HIT", "cdn-cache; desc=MISS"];

/// Path prefix of AEM client library bundles
pub const AEM_CLIENTLIBS_PATH: &str = "/etc.clientlibs";

// Classifier labels
pub const LABEL_AKAMAI: &str = "Akamai";
pub const LABEL_AEM: &str = "Apache (AEM)";
pub const LABEL_UNKNOWN: &str = "Unknown";
/// Placeholder server name when no hop completed
pub const LABEL_NA: &str = "N/A";
