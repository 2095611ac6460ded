//! HTTP redirect chain resolution.
//!
//! Follows redirects manually, one GET per hop, so that every intermediate
//! response can be recorded and fingerprinted.

use std::time::Duration;

use reqwest::header::LOCATION;
use reqwest::StatusCode;
use url::Url;

use crate::config::MAX_URL_LENGTH;
use crate::error_handling::{categorize_reqwest_error, InfoType, WalkError};
use crate::fetch::context::ProcessingContext;
use crate::fetch::request::RequestHeaders;
use crate::fingerprint::classify_server;
use crate::models::HopRecord;

/// Statuses followed as redirects.
fn is_redirect(status: StatusCode) -> bool {
    matches!(status.as_u16(), 301 | 302 | 303 | 307 | 308)
}

/// Walks the redirect chain starting at `start_url`, appending one
/// `HopRecord` per completed response to `chain`.
///
/// The chain is passed in rather than returned so that the hops recorded
/// before a failure survive it.
///
/// # Errors
///
/// Returns the `WalkError` that ended the walk: a transport failure, a final
/// status of 400 or above, a malformed or self-referencing redirect, or more
/// than `ctx.max_redirects` hops.
pub async fn resolve_redirect_chain(
    start_url: &str,
    ctx: &ProcessingContext,
    chain: &mut Vec<HopRecord>,
) -> Result<(), WalkError> {
    if start_url.len() > MAX_URL_LENGTH {
        return Err(WalkError::Unexpected(format!(
            "URL exceeds {MAX_URL_LENGTH} characters ({})",
            start_url.len()
        )));
    }
    let mut current = Url::parse(start_url)
        .map_err(|e| WalkError::Unexpected(format!("invalid URL {start_url}: {e}")))?;
    let timeout = Duration::from_secs(ctx.timeout_secs);

    for _ in 0..ctx.max_redirects {
        let response = RequestHeaders::apply_to_request_builder(ctx.client.get(current.clone()))
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| categorize_reqwest_error(e, ctx.timeout_secs))?;

        let status = response.status();
        let effective_url = response.url().clone();
        let headers = response.headers().clone();
        drop(response);

        let server_name = classify_server(&headers, effective_url.as_str(), &ctx.oracle).await;
        chain.push(HopRecord {
            url: effective_url.to_string(),
            status: status.as_u16(),
            server_name,
        });

        if is_redirect(status) {
            let location = headers
                .get(LOCATION)
                .ok_or(WalkError::MissingLocationHeader)?;
            let location = String::from_utf8_lossy(location.as_bytes());
            let next = effective_url.join(&location).map_err(|e| {
                WalkError::Unexpected(format!("invalid Location {location:?}: {e}"))
            })?;

            if next == current {
                return Err(WalkError::SelfRedirectLoop);
            }
            if current.scheme() == "http" && next.scheme() == "https" {
                ctx.stats.increment_info(InfoType::HttpsRedirect);
            }

            log::debug!("{} -> {} ({})", current, next, status.as_u16());
            current = next;
            continue;
        }

        if status.as_u16() >= 400 {
            return Err(WalkError::HttpStatus {
                status: status.as_u16(),
                url: effective_url.to_string(),
            });
        }
        return Ok(());
    }

    Err(WalkError::TooManyRedirects)
}
