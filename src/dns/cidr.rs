//! IPv4 CIDR blocks and range membership.

use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;
use std::sync::LazyLock;

use thiserror::Error;

use crate::config::AKAMAI_IP_RANGES;

/// Akamai address blocks, parsed once from `AKAMAI_IP_RANGES`.
pub(crate) static AKAMAI_BLOCKS: LazyLock<Vec<CidrBlock>> = LazyLock::new(|| {
    AKAMAI_IP_RANGES
        .iter()
        .filter_map(|cidr| match cidr.parse() {
            Ok(block) => Some(block),
            Err(e) => {
                log::error!("Ignoring malformed CDN range {cidr}: {e}");
                None
            }
        })
        .collect()
});

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CidrParseError {
    #[error("missing '/' prefix length in {0:?}")]
    MissingPrefix(String),
    #[error("invalid IPv4 network address in {0:?}")]
    InvalidAddress(String),
    #[error("prefix length must be 0-32 in {0:?}")]
    InvalidPrefix(String),
}

/// An IPv4 network in CIDR notation, e.g. `23.192.0.0/11`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CidrBlock {
    network: u32,
    prefix_len: u8,
}

impl CidrBlock {
    fn mask(prefix_len: u8) -> u32 {
        if prefix_len == 0 {
            0
        } else {
            u32::MAX << (32 - u32::from(prefix_len))
        }
    }

    pub fn network(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.network)
    }

    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    pub fn contains(&self, ip: Ipv4Addr) -> bool {
        u32::from(ip) & Self::mask(self.prefix_len) == self.network
    }

    /// IPv6 addresses never match an IPv4 block.
    pub fn contains_ip(&self, ip: IpAddr) -> bool {
        match ip {
            IpAddr::V4(v4) => self.contains(v4),
            IpAddr::V6(v6) => v6.to_ipv4_mapped().is_some_and(|v4| self.contains(v4)),
        }
    }
}

impl FromStr for CidrBlock {
    type Err = CidrParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (addr, prefix) = s
            .trim()
            .split_once('/')
            .ok_or_else(|| CidrParseError::MissingPrefix(s.to_string()))?;
        let addr: Ipv4Addr = addr
            .parse()
            .map_err(|_| CidrParseError::InvalidAddress(s.to_string()))?;
        let prefix_len: u8 = prefix
            .parse()
            .ok()
            .filter(|len| *len <= 32)
            .ok_or_else(|| CidrParseError::InvalidPrefix(s.to_string()))?;

        // Host bits are dropped so "23.200.1.1/11" means the same as "23.192.0.0/11"
        Ok(CidrBlock {
            network: u32::from(addr) & Self::mask(prefix_len),
            prefix_len,
        })
    }
}

impl std::fmt::Display for CidrBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.network(), self.prefix_len)
    }
}

/// Returns true if `ip` parses and falls inside any of the known Akamai blocks.
///
/// Malformed input returns false.
pub fn is_akamai_ip(ip: &str) -> bool {
    ip.trim()
        .parse::<IpAddr>()
        .map(|addr| AKAMAI_BLOCKS.iter().any(|block| block.contains_ip(addr)))
        .unwrap_or(false)
}
