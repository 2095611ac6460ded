//! DNS resolution and CDN IP range checks.
//!
//! This module provides the IP range oracle used by the server fingerprint
//! classifier:
//! - Pluggable hostname resolution (hickory-resolver, system resolver, static table)
//! - A process-wide memo of hostname → address
//! - IPv4 CIDR membership against the known CDN blocks

mod cidr;
mod oracle;
mod resolution;

// Re-export public API
pub use cidr::{is_akamai_ip, CidrBlock, CidrParseError};
pub use oracle::IpOracle;
pub use resolution::{
    preferred_address, HickoryResolver, HostResolver, StaticResolver, SystemResolver,
};
