//! Admission control for batch walks.
//!
//! A counting semaphore caps in-flight walks; large batches additionally wait
//! a fixed delay after admission before their first request.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{AcquireError, OwnedSemaphorePermit, Semaphore};

use crate::config::Config;

/// Concurrency cap plus optional throttle for one batch.
#[derive(Clone)]
pub struct AdmissionControl {
    semaphore: Arc<Semaphore>,
    throttle_delay: Option<Duration>,
}

impl AdmissionControl {
    /// `max_concurrency` is clamped to `1..=Semaphore::MAX_PERMITS`.
    pub fn new(max_concurrency: usize, throttle_delay: Option<Duration>) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(max_concurrency.clamp(1, Semaphore::MAX_PERMITS))),
            throttle_delay,
        }
    }

    /// Admission for a batch of `url_count` deduplicated URLs.
    ///
    /// The throttle is enabled only when the batch is larger than
    /// `config.throttle_threshold`.
    pub fn for_batch(url_count: usize, config: &Config) -> Self {
        let throttle_delay =
            (url_count > config.throttle_threshold).then_some(config.throttle_delay);
        Self::new(config.max_concurrency, throttle_delay)
    }

    pub fn throttle_delay(&self) -> Option<Duration> {
        self.throttle_delay
    }

    pub fn available_permits(&self) -> usize {
        self.semaphore.available_permits()
    }

    /// Waits for a slot, then for the throttle delay if one is set.
    ///
    /// The slot is released when the returned permit is dropped, whatever the
    /// outcome of the walk it guarded.
    pub async fn acquire(&self) -> Result<OwnedSemaphorePermit, AcquireError> {
        let permit = Arc::clone(&self.semaphore).acquire_owned().await?;
        if let Some(delay) = self.throttle_delay {
            tokio::time::sleep(delay).await;
        }
        Ok(permit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use futures::stream::FuturesUnordered;
    use futures::StreamExt;

    #[test]
    fn test_throttle_enabled_above_threshold() {
        let config = Config::default();
        assert_eq!(
            AdmissionControl::for_batch(60, &config).throttle_delay(),
            Some(Duration::from_millis(100))
        );
        assert_eq!(AdmissionControl::for_batch(10, &config).throttle_delay(), None);
    }

    #[test]
    fn test_throttle_threshold_is_exclusive() {
        let config = Config::default();
        assert_eq!(AdmissionControl::for_batch(50, &config).throttle_delay(), None);
        assert!(AdmissionControl::for_batch(51, &config).throttle_delay().is_some());
    }

    #[test]
    fn test_zero_concurrency_still_admits() {
        let admission = AdmissionControl::new(0, None);
        assert_eq!(admission.available_permits(), 1);
    }

    #[test]
    fn test_concurrency_above_semaphore_limit_is_clamped() {
        let admission = AdmissionControl::new(usize::MAX, None);
        assert_eq!(admission.available_permits(), Semaphore::MAX_PERMITS);
    }

    #[tokio::test(start_paused = true)]
    async fn test_large_batch_waits_throttle_delay_after_admission() {
        let admission = AdmissionControl::for_batch(60, &Config::default());
        let start = tokio::time::Instant::now();

        let _permit = admission.acquire().await.expect("semaphore open");

        assert!(start.elapsed() >= Duration::from_millis(100));
    }

    #[tokio::test(start_paused = true)]
    async fn test_small_batch_is_admitted_without_delay() {
        let admission = AdmissionControl::for_batch(10, &Config::default());
        let start = tokio::time::Instant::now();

        let _permit = admission.acquire().await.expect("semaphore open");

        assert!(start.elapsed() < Duration::from_millis(100));
    }

    #[tokio::test(start_paused = true)]
    async fn test_throttle_delay_applies_to_every_admission() {
        let admission = AdmissionControl::for_batch(51, &Config::default());
        let start = tokio::time::Instant::now();

        for _ in 0..3 {
            let _permit = admission.acquire().await.expect("semaphore open");
        }

        assert!(start.elapsed() >= Duration::from_millis(300));
    }

    async fn peak_in_flight(url_count: usize) -> usize {
        let admission = AdmissionControl::for_batch(url_count, &Config::default());
        let in_flight = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let mut tasks = FuturesUnordered::new();
        for _ in 0..url_count {
            let admission = admission.clone();
            let in_flight = Arc::clone(&in_flight);
            let peak = Arc::clone(&peak);
            tasks.push(tokio::spawn(async move {
                let _permit = admission.acquire().await.expect("semaphore open");
                let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(20)).await;
                in_flight.fetch_sub(1, Ordering::SeqCst);
            }));
        }
        while let Some(joined) = tasks.next().await {
            joined.expect("task panicked");
        }

        assert_eq!(admission.available_permits(), 25, "permits leaked");
        peak.load(Ordering::SeqCst)
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_at_most_25_in_flight_for_51_urls() {
        let peak = peak_in_flight(51).await;
        assert!(peak <= 25, "peak {peak} exceeded limit");
        assert!(peak > 1, "walks never overlapped");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_at_most_25_in_flight_for_100_urls() {
        let peak = peak_in_flight(100).await;
        assert!(peak <= 25, "peak {peak} exceeded limit");
    }

    #[tokio::test]
    async fn test_permit_released_on_drop() {
        let admission = AdmissionControl::new(2, None);
        let permit = admission.acquire().await.expect("semaphore open");
        assert_eq!(admission.available_permits(), 1);
        drop(permit);
        assert_eq!(admission.available_permits(), 2);
    }
}
