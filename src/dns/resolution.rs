//! Hostname → IP address resolution backends.
//!
//! The IP range oracle talks to DNS through the `HostResolver` trait so that the
//! backend can be swapped: hickory-resolver in production, the system resolver
//! as an alternative, and a fixed table in tests.

use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Arc;

use anyhow::{Error, Result};
use futures::future::BoxFuture;
use hickory_resolver::TokioAsyncResolver;

/// Asynchronous hostname lookup.
///
/// Implementations must not block the calling task; blocking lookups belong on
/// a worker thread.
pub trait HostResolver: Send + Sync {
    /// Returns every address the hostname resolves to.
    fn lookup<'a>(&'a self, host: &'a str) -> BoxFuture<'a, Result<Vec<IpAddr>, Error>>;
}

/// Resolver backed by hickory-resolver.
#[derive(Clone)]
pub struct HickoryResolver {
    inner: Arc<TokioAsyncResolver>,
}

impl HickoryResolver {
    pub fn new(inner: Arc<TokioAsyncResolver>) -> Self {
        Self { inner }
    }
}

impl HostResolver for HickoryResolver {
    fn lookup<'a>(&'a self, host: &'a str) -> BoxFuture<'a, Result<Vec<IpAddr>, Error>> {
        Box::pin(async move {
            let response = self.inner.lookup_ip(host).await.map_err(Error::new)?;
            Ok(response.iter().collect())
        })
    }
}

/// Resolver backed by the operating system (`getaddrinfo`).
///
/// `tokio::net::lookup_host` runs the lookup on the blocking thread pool.
#[derive(Debug, Clone, Default)]
pub struct SystemResolver;

impl HostResolver for SystemResolver {
    fn lookup<'a>(&'a self, host: &'a str) -> BoxFuture<'a, Result<Vec<IpAddr>, Error>> {
        Box::pin(async move {
            let addrs = tokio::net::lookup_host((host, 0))
                .await
                .map_err(Error::new)?
                .map(|addr| addr.ip())
                .collect();
            Ok(addrs)
        })
    }
}

/// Resolver answering from a fixed table. Unknown names fail to resolve.
#[derive(Debug, Clone, Default)]
pub struct StaticResolver {
    entries: HashMap<String, Vec<IpAddr>>,
}

impl StaticResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) the answer for `host`.
    pub fn with_entry(mut self, host: &str, ip: IpAddr) -> Self {
        self.entries.insert(host.to_ascii_lowercase(), vec![ip]);
        self
    }
}

impl HostResolver for StaticResolver {
    fn lookup<'a>(&'a self, host: &'a str) -> BoxFuture<'a, Result<Vec<IpAddr>, Error>> {
        Box::pin(async move {
            self.entries
                .get(&host.to_ascii_lowercase())
                .cloned()
                .ok_or_else(|| Error::msg(format!("no static entry for {host}")))
        })
    }
}

/// Picks the address used for range checks: the first IPv4 answer if there is
/// one, otherwise the first answer.
pub fn preferred_address(addrs: &[IpAddr]) -> Option<IpAddr> {
    addrs
        .iter()
        .find(|addr| addr.is_ipv4())
        .or_else(|| addrs.first())
        .copied()
}
