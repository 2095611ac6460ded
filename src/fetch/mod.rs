//! Redirect walking.
//!
//! Turns one normalized URL into one `UrlResult`. Every failure is folded into
//! the result's comment; a walk never returns an error to its caller.

mod context;
mod redirects;
mod request;

use log::{debug, warn};

use crate::error_handling::{InfoType, WalkError};
use crate::models::{HopRecord, UrlResult, COMMENT_OK, COMMENT_REDIRECT_CHAIN};

pub use context::ProcessingContext;
pub use redirects::resolve_redirect_chain;

/// Walks `url` and builds its result.
///
/// The result's status and server name come from the first recorded hop; the
/// chain holds every hop observed, including the one that failed.
pub async fn walk_url(url: &str, ctx: &ProcessingContext) -> UrlResult {
    let mut chain: Vec<HopRecord> = Vec::new();

    let comment = match resolve_redirect_chain(url, ctx, &mut chain).await {
        Ok(()) => {
            ctx.stats.increment_success();
            if chain.len() > 1 {
                ctx.stats.increment_info(InfoType::RedirectChain);
                COMMENT_REDIRECT_CHAIN.to_string()
            } else {
                COMMENT_OK.to_string()
            }
        }
        Err(e) => {
            warn!(url = url; "{e}");
            if let Some(source) = std::error::Error::source(&e) {
                debug!(url = url; "caused by {source}");
            }
            if let WalkError::Unexpected(detail) = &e {
                debug!(url = url; "{detail}");
            }
            ctx.stats.increment_error(e.error_type());
            e.comment()
        }
    };

    UrlResult::from_chain(url.to_string(), comment, chain)
}
