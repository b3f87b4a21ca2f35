//! Periodic fetch task bound to its owner's lifetime.

use std::future::Future;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, warn};

use crate::error::ApiError;

/// A cancellable periodic fetch task.
///
/// Spawns a tokio task that runs the fetch closure on a fixed interval
/// (first run immediately) and publishes each successful snapshot through
/// a watch channel. A failed cycle is logged and the previous snapshot is
/// retained until the next poll. Dropping the poller aborts the task, so
/// no state is updated after teardown.
///
/// Overlapping responses are not sequenced: like the pages it serves, a
/// slow poll can be overtaken by a later one.
pub struct Poller<T> {
    rx: watch::Receiver<T>,
    handle: JoinHandle<()>,
}

impl<T: Clone + Send + Sync + 'static> Poller<T> {
    /// Spawn a poller that refreshes via `fetch` every `period`.
    pub fn spawn<F, Fut>(initial: T, period: Duration, fetch: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, ApiError>> + Send,
    {
        let (tx, rx) = watch::channel(initial);

        let handle = tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                match fetch().await {
                    Ok(snapshot) => {
                        if tx.send(snapshot).is_err() {
                            break;
                        }
                        debug!("Poll cycle completed");
                    }
                    Err(err) => {
                        warn!(error = %err, "Poll cycle failed, keeping previous snapshot");
                    }
                }
            }
        });

        Self { rx, handle }
    }

    /// The most recent snapshot.
    pub fn latest(&self) -> T {
        self.rx.borrow().clone()
    }

    /// Subscribe for change notifications.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.rx.clone()
    }
}

impl<T> Drop for Poller<T> {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::time::sleep;

    #[tokio::test(start_paused = true)]
    async fn test_first_fetch_is_immediate() {
        let poller = Poller::spawn(0usize, Duration::from_secs(60), || async { Ok(42) });
        sleep(Duration::from_millis(10)).await;
        assert_eq!(poller.latest(), 42);
    }

    #[tokio::test(start_paused = true)]
    async fn test_error_cycle_retains_previous_snapshot() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();

        let poller = Poller::spawn(0usize, Duration::from_secs(5), move || {
            let counter = counter.clone();
            async move {
                let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
                if n == 2 {
                    Err(ApiError::Config("upstream down".to_string()))
                } else {
                    Ok(n)
                }
            }
        });

        sleep(Duration::from_millis(10)).await;
        assert_eq!(poller.latest(), 1);

        // Second cycle fails; snapshot unchanged.
        sleep(Duration::from_secs(5)).await;
        assert_eq!(poller.latest(), 1);

        // Third cycle recovers.
        sleep(Duration::from_secs(5)).await;
        assert_eq!(poller.latest(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_the_task() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();

        let poller = Poller::spawn(0usize, Duration::from_secs(1), move || {
            let counter = counter.clone();
            async move { Ok(counter.fetch_add(1, Ordering::SeqCst)) }
        });

        sleep(Duration::from_millis(10)).await;
        drop(poller);

        let after_drop = calls.load(Ordering::SeqCst);
        sleep(Duration::from_secs(10)).await;
        assert_eq!(calls.load(Ordering::SeqCst), after_drop);
    }
}
