//! Server fingerprint classification.
//!
//! Labels the infrastructure that answered a hop: "Akamai" for the CDN edge,
//! "Apache (AEM)" for Adobe Experience Manager dispatchers, the `Server`
//! header's product for anything self-identifying, and "Unknown" otherwise.
//!
//! The decision is a heuristic over the response headers with one network
//! input: the hostname's resolved address, checked against Akamai's address
//! blocks through the shared [`IpOracle`]. Given the same headers, URL and
//! oracle cache state the label is always the same.
//!
//! Decision order (first match wins):
//! 1. Hostname contains a known AEM property marker and `Cache-Control` is set
//! 2. The `Server` header
//! 3. Secondary header signals, then the resolved address

mod headers;

use reqwest::header::HeaderMap;
use url::Url;

use crate::config::{
    AEM_OVERRIDE_HOST_MARKERS, HEADER_CACHE_CONTROL, HEADER_SERVER, LABEL_AEM, LABEL_AKAMAI,
    LABEL_UNKNOWN,
};
use crate::dns::IpOracle;

pub use headers::HeaderSignals;
use headers::header_value;

/// Classifies the server behind a response.
///
/// # Arguments
///
/// * `headers` - Response headers of the hop
/// * `effective_url` - URL the response was fetched from
/// * `oracle` - Shared resolver used for the CDN address check
///
/// # Returns
///
/// A label; never fails. Unparseable URLs simply have no hostname.
pub async fn classify_server(
    headers: &HeaderMap,
    effective_url: &str,
    oracle: &IpOracle,
) -> String {
    let hostname = Url::parse(effective_url)
        .ok()
        .and_then(|url| url.host_str().map(str::to_ascii_lowercase))
        .unwrap_or_default();

    if let Some(label) = classify_by_host_override(headers, &hostname) {
        return label.to_string();
    }

    if let Some(label) = classify_by_server_header(headers) {
        return label;
    }

    let signals = HeaderSignals::from_headers(headers);
    let is_akamai_ip = oracle.host_in_range(&hostname).await;
    classify_by_signals(&signals, is_akamai_ip).to_string()
}

/// AEM properties that sit behind a cache without naming their server.
fn classify_by_host_override(headers: &HeaderMap, hostname: &str) -> Option<&'static str> {
    let is_marked_host = AEM_OVERRIDE_HOST_MARKERS
        .iter()
        .any(|marker| hostname.contains(marker));
    (is_marked_host && headers.contains_key(HEADER_CACHE_CONTROL)).then_some(LABEL_AEM)
}

/// Maps a non-empty `Server` header to a label.
fn classify_by_server_header(headers: &HeaderMap) -> Option<String> {
    let server = header_value(headers, HEADER_SERVER)?.to_lowercase();
    if server.is_empty() {
        return None;
    }

    let label = if server.contains("akamai") || server.contains("ghost") {
        LABEL_AKAMAI.to_string()
    } else if server.contains("apache") {
        LABEL_AEM.to_string()
    } else {
        capitalize(&server)
    };
    Some(label)
}

/// Decides from secondary signals once the `Server` header gave nothing.
pub fn classify_by_signals(signals: &HeaderSignals, is_akamai_ip: bool) -> &'static str {
    let akamai_edge =
        signals.has_akamai_headers() || (signals.has_server_timing && is_akamai_ip);

    if akamai_edge {
        if signals.has_aem_origin() {
            LABEL_AEM
        } else {
            LABEL_AKAMAI
        }
    } else if signals.has_aem_origin() {
        LABEL_AEM
    } else if is_akamai_ip {
        LABEL_AKAMAI
    } else {
        LABEL_UNKNOWN
    }
}

/// Uppercases the first character of an already-lowercased value.
fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
