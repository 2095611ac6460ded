//! Batch orchestration.
//!
//! Fans a batch of URLs out to concurrent walks and forwards each result to a
//! channel as soon as its walk finishes, followed by a terminal done marker.

mod admission;
mod normalize;

use std::time::{Duration, Instant};

use futures::stream::FuturesUnordered;
use futures::StreamExt;
use log::{error, info, warn};
use tokio::sync::mpsc;

use crate::error_handling::WalkError;
use crate::fetch::{walk_url, ProcessingContext};
use crate::models::{BatchMessage, UrlResult};

pub use admission::AdmissionControl;
pub use normalize::{normalize_batch, normalize_url};

/// Summary of a finished batch.
#[derive(Debug, Clone)]
pub struct BatchReport {
    /// Distinct URLs walked
    pub total: usize,
    /// Walks that ended in a non-error response
    pub succeeded: usize,
    /// Walks reported with a failure comment
    pub failed: usize,
    pub elapsed: Duration,
    /// Whether every result and the done marker reached the receiver
    pub delivered: bool,
}

/// Forwards messages until the receiver goes away, then discards them.
struct Forwarder {
    sink: mpsc::Sender<BatchMessage>,
    open: bool,
}

impl Forwarder {
    async fn send(&mut self, message: BatchMessage) {
        if !self.open {
            return;
        }
        if self.sink.send(message).await.is_err() {
            self.open = false;
            info!("Result receiver closed; remaining walks will finish unreported");
        }
    }
}

/// Runs one batch.
///
/// `raw` is newline-separated URL text. Results go to `sink` in completion
/// order and `{"status": "done"}` follows the last one. A closed `sink` does
/// not stop the batch: walks already spawned run to completion and their
/// results are dropped.
pub async fn run_batch(
    raw: &str,
    ctx: &ProcessingContext,
    sink: mpsc::Sender<BatchMessage>,
) -> BatchReport {
    let start = Instant::now();
    let urls = normalize_batch(raw);
    let total = urls.len();
    let ctx = ctx.for_batch();
    let admission = AdmissionControl::for_batch(total, &ctx.config);

    info!(
        batch_size = total;
        "Starting batch (concurrency {}, throttle {})",
        ctx.config.max_concurrency,
        admission
            .throttle_delay()
            .map(|d| format!("{}ms", d.as_millis()))
            .unwrap_or_else(|| "off".to_string())
    );

    let mut tasks = FuturesUnordered::new();
    for url in urls {
        let ctx = ctx.clone();
        let admission = admission.clone();
        let task_url = url.clone();
        let handle = tokio::spawn(async move {
            let _permit = match admission.acquire().await {
                Ok(permit) => permit,
                Err(e) => {
                    warn!(url = task_url.as_str(); "Admission closed: {e}");
                    return None;
                }
            };
            Some(walk_url(&task_url, &ctx).await)
        });
        tasks.push(async move { (url, handle.await) });
    }

    let mut forwarder = Forwarder { sink, open: true };
    let mut failed = 0;
    while let Some((url, joined)) = tasks.next().await {
        let result = match joined {
            Ok(Some(result)) => result,
            Ok(None) => unexpected_result(url),
            Err(e) => {
                error!(url = url.as_str(); "Walk task did not complete: {e}");
                unexpected_result(url)
            }
        };
        if !result.is_success() {
            failed += 1;
        }
        forwarder.send(result.into()).await;
    }
    forwarder.send(BatchMessage::done()).await;

    let elapsed = start.elapsed();
    ctx.stats.log_summary();
    info!(
        batch_size = total,
        failed = failed,
        elapsed_ms = elapsed.as_millis() as u64;
        "Batch finished"
    );

    BatchReport {
        total,
        succeeded: total - failed,
        failed,
        elapsed,
        delivered: forwarder.open,
    }
}

fn unexpected_result(url: String) -> UrlResult {
    UrlResult::from_chain(
        url,
        WalkError::Unexpected(String::new()).comment(),
        Vec::new(),
    )
}
