//! Cooperative cancellation for simulation runs.
//!
//! A [`CancellationTokenSource`] owns the cancel switch; cheap
//! [`CancellationToken`] clones ride along with the spawned run task.
//! Cancellation is one-way and idempotent: once cancelled, a token stays
//! cancelled for the lifetime of its run.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

/// Thread-safe cancellation token shared with a run task.
#[derive(Clone, Debug)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl CancellationToken {
    fn new() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
            notify: Arc::new(Notify::new()),
        }
    }

    /// Returns true once the owning source has cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Completes when the token is cancelled. Safe to await from several
    /// tasks at once; returns immediately if already cancelled.
    pub async fn cancelled(&self) {
        loop {
            if self.is_cancelled() {
                return;
            }
            // Register interest before the re-check so a concurrent cancel
            // between check and await cannot be missed.
            let notified = self.notify.notified();
            if self.is_cancelled() {
                return;
            }
            notified.await;
        }
    }
}

/// Owner of a cancellation token with the authority to cancel it.
#[derive(Clone, Debug)]
pub struct CancellationTokenSource {
    token: CancellationToken,
}

impl CancellationTokenSource {
    pub fn new() -> Self {
        Self {
            token: CancellationToken::new(),
        }
    }

    /// A token clone to hand to the run task.
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Cancel the token, waking every waiter. Idempotent.
    pub fn cancel(&self) {
        self.token.cancelled.store(true, Ordering::SeqCst);
        self.token.notify.notify_waiters();
    }
}

impl Default for CancellationTokenSource {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_token_initially_not_cancelled() {
        let source = CancellationTokenSource::new();
        assert!(!source.token().is_cancelled());
    }

    #[test]
    fn test_cancel_sets_all_clones() {
        let source = CancellationTokenSource::new();
        let token1 = source.token();
        let token2 = token1.clone();

        source.cancel();
        assert!(token1.is_cancelled());
        assert!(token2.is_cancelled());
    }

    #[test]
    fn test_cancel_idempotent() {
        let source = CancellationTokenSource::new();
        source.cancel();
        source.cancel();
        assert!(source.token().is_cancelled());
    }

    #[tokio::test]
    async fn test_cancelled_returns_immediately_when_already_cancelled() {
        let source = CancellationTokenSource::new();
        source.cancel();
        // Must not hang
        source.token().cancelled().await;
    }

    #[tokio::test]
    async fn test_cancelled_wakes_waiter() {
        let source = CancellationTokenSource::new();
        let token = source.token();

        let waiter = tokio::spawn(async move { token.cancelled().await });

        tokio::time::sleep(Duration::from_millis(20)).await;
        source.cancel();

        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("waiter should wake after cancel")
            .unwrap();
    }

    #[tokio::test]
    async fn test_cancelled_wakes_multiple_waiters() {
        let source = CancellationTokenSource::new();
        let handles: Vec<_> = (0..3)
            .map(|_| {
                let token = source.token();
                tokio::spawn(async move { token.cancelled().await })
            })
            .collect();

        tokio::time::sleep(Duration::from_millis(20)).await;
        source.cancel();

        for handle in handles {
            tokio::time::timeout(Duration::from_secs(1), handle)
                .await
                .expect("every waiter should wake")
                .unwrap();
        }
    }
}
