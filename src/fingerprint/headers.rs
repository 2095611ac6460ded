//! Header signal extraction.
//!
//! Reads the response headers the classifier cares about. Header lookup is
//! case-insensitive (`HeaderMap`), repeated headers are joined with `", "` the
//! way an HTTP/1.1 proxy would fold them, and non-UTF-8 bytes are replaced.

use reqwest::header::HeaderMap;

use crate::config::{
    AEM_CLIENTLIBS_PATH, AEM_PATH_HEADERS, AKAMAI_CACHE_MARKERS, DISPATCHER_HEADERS,
    HEADER_SERVER_TIMING, HEADER_X_AKAMAI_REQUEST_ID,
};

/// Returns every value of `name`, joined with `", "`, or `None` if absent.
pub(crate) fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    let values: Vec<String> = headers
        .get_all(name)
        .iter()
        .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
        .collect();
    if values.is_empty() {
        None
    } else {
        Some(values.join(", "))
    }
}

/// Secondary signals consulted when the `Server` header is missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeaderSignals {
    /// A non-empty `Server-Timing` header was sent
    pub has_server_timing: bool,
    /// `Server-Timing` carries an Akamai edge cache HIT/MISS entry
    pub has_akamai_cache: bool,
    /// `X-Akamai-Request-Id` was sent
    pub has_akamai_request_id: bool,
    /// `X-Dispatcher` or `X-AEM-Instance` was sent
    pub has_dispatcher: bool,
    /// `Link` or `Baqend-Tags` references `/etc.clientlibs`
    pub has_aem_paths: bool,
}

impl HeaderSignals {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let server_timing = header_value(headers, HEADER_SERVER_TIMING).unwrap_or_default();

        let has_aem_paths = AEM_PATH_HEADERS.iter().any(|name| {
            headers.get_all(*name).iter().any(|value| {
                String::from_utf8_lossy(value.as_bytes()).contains(AEM_CLIENTLIBS_PATH)
            })
        });

        Self {
            has_server_timing: !server_timing.is_empty(),
            has_akamai_cache: AKAMAI_CACHE_MARKERS
                .iter()
                .any(|marker| server_timing.contains(marker)),
            has_akamai_request_id: headers.contains_key(HEADER_X_AKAMAI_REQUEST_ID),
            has_dispatcher: DISPATCHER_HEADERS
                .iter()
                .any(|name| headers.contains_key(*name)),
            has_aem_paths,
        }
    }

    /// Evidence that the response came through Akamai's edge, ignoring DNS.
    pub fn has_akamai_headers(&self) -> bool {
        self.has_akamai_cache || self.has_akamai_request_id
    }

    /// Evidence of an AEM origin behind whatever edge served the response.
    pub fn has_aem_origin(&self) -> bool {
        self.has_aem_paths || self.has_dispatcher
    }
}
