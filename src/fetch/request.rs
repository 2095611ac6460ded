//! HTTP request building.
//!
//! Every hop is requested with the headers a desktop browser sends on a
//! top-level navigation, so edge servers route and cache the walk the same way
//! they would a real visit.

use reqwest::header::{
    HeaderName, ACCEPT, ACCEPT_ENCODING, ACCEPT_LANGUAGE, UPGRADE_INSECURE_REQUESTS,
};

const BROWSER_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.9";

/// Realistic browser request headers.
///
/// The User-Agent is configured on the client itself (see
/// `initialization::init_client`).
pub(crate) struct RequestHeaders;

impl RequestHeaders {
    /// Applies the standard request headers to a `reqwest::RequestBuilder`.
    pub(crate) fn apply_to_request_builder(
        builder: reqwest::RequestBuilder,
    ) -> reqwest::RequestBuilder {
        builder
            .header(ACCEPT, BROWSER_ACCEPT)
            .header(ACCEPT_ENCODING, "gzip, deflate, br")
            .header(ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .header(HeaderName::from_static("sec-fetch-dest"), "document")
            .header(HeaderName::from_static("sec-fetch-mode"), "navigate")
            .header(HeaderName::from_static("sec-fetch-site"), "none")
            .header(HeaderName::from_static("sec-fetch-user"), "?1")
            .header(UPGRADE_INSECURE_REQUESTS, "1")
    }
}
