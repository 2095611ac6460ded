//! HTTP header name constants.
//!
//! Header names read by the server fingerprint classifier. Values are
//! lowercase so they can be used directly as `HeaderMap` keys.

// Infrastructure/Server identification
/// Origin or edge server product header
pub const HEADER_SERVER: &str = "server";

// CDN/Proxy identification
/// Per-request identifier added by Akamai edge servers
pub const HEADER_X_AKAMAI_REQUEST_ID: &str = "x-akamai-request-id";
/// Set by the AEM dispatcher module
pub const HEADER_X_DISPATCHER: &str = "x-dispatcher";
/// Set by AEM publish instances
pub const HEADER_X_AEM_INSTANCE: &str = "x-aem-instance";

// Performance/Monitoring
pub const HEADER_SERVER_TIMING: &str = "server-timing";

// Caching
pub const HEADER_CACHE_CONTROL: &str = "cache-control";

// Resource hints (may reference AEM client libraries)
pub const HEADER_LINK: &str = "link";
pub const HEADER_BAQEND_TAGS: &str = "baqend-tags";

/// Headers whose values are searched for AEM client library paths.
pub const AEM_PATH_HEADERS: &[&str] = &[HEADER_LINK, HEADER_BAQEND_TAGS];

/// Headers whose mere presence indicates an AEM dispatcher.
pub const DISPATCHER_HEADERS: &[&str] = &[HEADER_X_DISPATCHER, HEADER_X_AEM_INSTANCE];
