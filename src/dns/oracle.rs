//! Memoized hostname resolution and CDN range membership.

use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::{Arc, RwLock};

use super::cidr::{CidrBlock, AKAMAI_BLOCKS};
use super::resolution::{preferred_address, HostResolver};

/// Resolves hostnames once per process and answers "is this host on the CDN?".
///
/// The cache maps lowercase hostnames to the resolved address, or to `None`
/// when resolution failed, so failing names are not retried. Entries never
/// expire. Concurrent walks share one oracle; two walks racing on the same
/// uncached name may both resolve it, and the second write wins with an
/// identical answer.
pub struct IpOracle {
    resolver: Arc<dyn HostResolver>,
    cache: RwLock<HashMap<String, Option<IpAddr>>>,
    ranges: Vec<CidrBlock>,
}

impl IpOracle {
    /// Oracle checking membership against the Akamai address blocks.
    pub fn new(resolver: Arc<dyn HostResolver>) -> Self {
        Self::with_ranges(resolver, AKAMAI_BLOCKS.clone())
    }

    pub fn with_ranges(resolver: Arc<dyn HostResolver>, ranges: Vec<CidrBlock>) -> Self {
        Self {
            resolver,
            cache: RwLock::new(HashMap::new()),
            ranges,
        }
    }

    /// Resolves `hostname`, consulting the cache first. Never fails: empty
    /// names and lookup failures yield `None`.
    ///
    /// IP literals (including bracketed IPv6) are returned as-is without a
    /// lookup.
    pub async fn resolve(&self, hostname: &str) -> Option<IpAddr> {
        let host = hostname.trim().trim_start_matches('[').trim_end_matches(']');
        if host.is_empty() {
            return None;
        }
        if let Ok(ip) = host.parse::<IpAddr>() {
            return Some(ip);
        }

        let key = host.to_ascii_lowercase();
        if let Some(cached) = self.cached(&key) {
            return cached;
        }

        let resolved = match self.resolver.lookup(&key).await {
            Ok(addrs) => preferred_address(&addrs),
            Err(e) => {
                log::debug!("DNS lookup failed for {key}: {e}");
                None
            }
        };

        self.cache
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(key, resolved);
        resolved
    }

    fn cached(&self, key: &str) -> Option<Option<IpAddr>> {
        self.cache
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(key)
            .copied()
    }

    /// Returns true if `ip` parses and falls inside one of the oracle's ranges.
    /// Malformed input returns false.
    pub fn is_in_range(&self, ip: &str) -> bool {
        ip.trim()
            .parse::<IpAddr>()
            .map(|addr| self.contains(addr))
            .unwrap_or(false)
    }

    pub fn contains(&self, ip: IpAddr) -> bool {
        self.ranges.iter().any(|block| block.contains_ip(ip))
    }

    /// Resolves `hostname` and checks the address against the ranges.
    pub async fn host_in_range(&self, hostname: &str) -> bool {
        self.resolve(hostname)
            .await
            .is_some_and(|ip| self.contains(ip))
    }

    /// Number of hostnames currently memoized (including failed lookups).
    pub fn cached_hosts(&self) -> usize {
        self.cache
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}
