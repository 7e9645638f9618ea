use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Settle delay for slider-driven AI requests.
pub const SLIDER_SETTLE: Duration = Duration::from_millis(700);

/// Trailing-edge debouncer: of several calls made within the delay, only the
/// last one proceeds.
#[derive(Clone, Debug)]
pub struct Debouncer {
    delay: Duration,
    generation: Arc<AtomicU64>,
}

impl Debouncer {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Wait out the delay. Returns false if a newer call arrived meanwhile.
    pub async fn settle(&self) -> bool {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(self.delay).await;
        self.generation.load(Ordering::SeqCst) == ticket
    }

    /// Run `task` after the delay unless superseded.
    pub async fn run<F, Fut, T>(&self, task: F) -> Option<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        if self.settle().await {
            Some(task().await)
        } else {
            None
        }
    }

    /// Drop any pending call.
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn last_call_wins() {
        let debouncer = Debouncer::new(SLIDER_SETTLE);
        let first = tokio::spawn({
            let debouncer = debouncer.clone();
            async move { debouncer.run(|| async { 30 }).await }
        });
        tokio::time::sleep(Duration::from_millis(300)).await;
        let second = tokio::spawn({
            let debouncer = debouncer.clone();
            async move { debouncer.run(|| async { 60 }).await }
        });

        assert_eq!(first.await.unwrap(), None);
        assert_eq!(second.await.unwrap(), Some(60));
    }

    #[tokio::test(start_paused = true)]
    async fn spaced_calls_all_run() {
        let debouncer = Debouncer::new(Duration::from_millis(100));
        assert!(debouncer.settle().await);
        assert!(debouncer.settle().await);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_drops_pending_call() {
        let debouncer = Debouncer::new(Duration::from_millis(100));
        let pending = tokio::spawn({
            let debouncer = debouncer.clone();
            async move { debouncer.settle().await }
        });
        tokio::time::sleep(Duration::from_millis(10)).await;
        debouncer.cancel();
        assert!(!pending.await.unwrap());
    }
}
