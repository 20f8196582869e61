//! Single-slot debounce timer.
//!
//! A cancellable scheduled task with replace-on-reschedule semantics:
//! at most one timer is pending, and scheduling again aborts the
//! previous one. Cancellation only covers the quiet-period timer; once
//! the callback has fired, whatever work it started is on its own.

use std::time::Duration;

use tokio::task::JoinHandle;

/// Debounce timer with a single pending slot.
pub struct Debouncer {
    delay: Duration,
    slot: Option<JoinHandle<()>>,
}

impl Debouncer {
    /// Create a debouncer firing after `delay` of quiet.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self { delay, slot: None }
    }

    /// Schedule `callback` to run after the quiet period, replacing any
    /// pending timer.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule<F>(&mut self, callback: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.cancel();
        let delay = self.delay;
        self.slot = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            callback();
        }));
    }

    /// Abort the pending timer, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.slot.take() {
            handle.abort();
        }
    }

    /// Whether a timer is pending (scheduled and not yet fired).
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.slot.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test(start_paused = true)]
    async fn fires_after_quiet_period() {
        let fired = Arc::new(AtomicUsize::new(0));
        let mut debouncer = Debouncer::new(Duration::from_millis(800));

        let counter = Arc::clone(&fired);
        debouncer.schedule(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        tokio::time::sleep(Duration::from_millis(801)).await;
        tokio::task::yield_now().await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn reschedule_replaces_pending_timer() {
        let fired = Arc::new(AtomicUsize::new(0));
        let mut debouncer = Debouncer::new(Duration::from_millis(800));

        // Three keystrokes inside the quiet window: only the last timer
        // survives, timed from the last schedule call.
        for _ in 0..3 {
            let counter = Arc::clone(&fired);
            debouncer.schedule(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            });
            tokio::time::sleep(Duration::from_millis(400)).await;
        }

        // 400ms after the last schedule: nothing yet.
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(401)).await;
        tokio::task::yield_now().await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_aborts_pending_timer() {
        let fired = Arc::new(AtomicUsize::new(0));
        let mut debouncer = Debouncer::new(Duration::from_millis(800));

        let counter = Arc::clone(&fired);
        debouncer.schedule(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        assert!(debouncer.is_pending());

        debouncer.cancel();
        tokio::time::sleep(Duration::from_millis(900)).await;
        tokio::task::yield_now().await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
        assert!(!debouncer.is_pending());
    }
}
