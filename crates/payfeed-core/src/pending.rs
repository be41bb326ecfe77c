//! Delayed completion signal for the "saving" state
//!
//! The store has already mutated and persisted by the time a signal is
//! scheduled; the delay only postpones when the caller is told. Scheduling
//! a new signal replaces (aborts) the one still pending.

use std::time::Duration;
use tokio::task::JoinHandle;

pub struct PendingSignal {
    delay: Duration,
    current: Option<JoinHandle<()>>,
}

impl PendingSignal {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            current: None,
        }
    }

    pub fn from_millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis))
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Whether a scheduled completion has not fired yet
    pub fn is_pending(&self) -> bool {
        self.current
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }

    /// Run `on_complete` after the delay, dropping any earlier pending signal.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule<F>(&mut self, on_complete: F)
    where
        F: FnOnce() + Send + 'static,
    {
        if let Some(previous) = self.current.take() {
            if !previous.is_finished() {
                log::debug!(target: "payfeed::pending", "Replacing pending completion signal");
            }
            previous.abort();
        }

        let delay = self.delay;
        self.current = Some(tokio::spawn(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            on_complete();
        }));
    }

    /// Wait for the current signal, if any, to fire
    pub async fn settle(&mut self) {
        if let Some(handle) = self.current.take() {
            // An aborted task is the only error and means nothing is left to wait for
            let _ = handle.await;
        }
    }

    /// Drop the pending signal without firing it
    pub fn cancel(&mut self) {
        if let Some(handle) = self.current.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counter() -> Arc<AtomicUsize> {
        Arc::new(AtomicUsize::new(0))
    }

    #[tokio::test]
    async fn test_signal_fires_after_settle() {
        let fired = counter();
        let mut signal = PendingSignal::from_millis(10);

        let f = fired.clone();
        signal.schedule(move || {
            f.fetch_add(1, Ordering::SeqCst);
        });
        assert!(signal.is_pending());

        signal.settle().await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert!(!signal.is_pending());
    }

    #[tokio::test]
    async fn test_new_signal_replaces_pending_one() {
        let first = counter();
        let second = counter();
        let mut signal = PendingSignal::from_millis(20);

        let f = first.clone();
        signal.schedule(move || {
            f.fetch_add(1, Ordering::SeqCst);
        });
        let s = second.clone();
        signal.schedule(move || {
            s.fetch_add(1, Ordering::SeqCst);
        });

        signal.settle().await;
        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_zero_delay_and_cancel() {
        let fired = counter();
        let mut signal = PendingSignal::new(Duration::ZERO);

        let f = fired.clone();
        signal.schedule(move || {
            f.fetch_add(1, Ordering::SeqCst);
        });
        signal.settle().await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);

        let mut slow = PendingSignal::from_millis(50);
        let f = fired.clone();
        slow.schedule(move || {
            f.fetch_add(1, Ordering::SeqCst);
        });
        slow.cancel();
        slow.settle().await;
        tokio::time::sleep(Duration::from_millis(80)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }
}
