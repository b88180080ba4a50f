//! Cancellation signalling between the interrupt handler and the session's
//! suspension points.
//!
//! The session blocks in two places: waiting out a poll period during a
//! running interval, and waiting for a user acknowledgment. Both must
//! unblock the moment the user interrupts, so the token pairs its flag with
//! a condvar instead of relying on the next poll to notice.

use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::time::Duration;

/// A clonable cancellation flag with condvar-backed waiting.
///
/// `cancel` may be called from any thread (typically the Ctrl-C handler);
/// once fired the token stays fired for the life of the session.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    cancelled: Mutex<bool>,
    condvar: Condvar,
}

impl CancelToken {
    /// Create an unfired token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire the token, waking every blocked `wait_timeout`.
    ///
    /// Firing an already-fired token is a no-op.
    pub fn cancel(&self) {
        let mut cancelled = self
            .inner
            .cancelled
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *cancelled = true;
        self.inner.condvar.notify_all();
    }

    /// Check whether the token has fired.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self
            .inner
            .cancelled
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Block for at most `timeout`, returning `true` if the token fired.
    ///
    /// Returns as soon as the token is cancelled, not at the end of the
    /// timeout.
    #[must_use]
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let cancelled = self
            .inner
            .cancelled
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let (cancelled, _timed_out) = self
            .inner
            .condvar
            .wait_timeout_while(cancelled, timeout, |cancelled| !*cancelled)
            .unwrap_or_else(PoisonError::into_inner);
        *cancelled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Instant;

    #[test]
    fn test_new_token_is_not_cancelled() {
        let token = CancelToken::new();
        assert!(!token.is_cancelled());
    }

    #[test]
    fn test_cancel_is_visible_through_clones() {
        let token = CancelToken::new();
        let clone = token.clone();

        clone.cancel();

        assert!(token.is_cancelled());
        assert!(clone.is_cancelled());
    }

    #[test]
    fn test_cancel_twice_is_harmless() {
        let token = CancelToken::new();
        token.cancel();
        token.cancel();
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_wait_timeout_expires_when_not_cancelled() {
        let token = CancelToken::new();
        let start = Instant::now();

        let fired = token.wait_timeout(Duration::from_millis(20));

        assert!(!fired);
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn test_wait_timeout_returns_immediately_when_already_cancelled() {
        let token = CancelToken::new();
        token.cancel();

        let start = Instant::now();
        let fired = token.wait_timeout(Duration::from_secs(10));

        assert!(fired);
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn test_wait_timeout_unblocks_on_cancel_from_another_thread() {
        let token = CancelToken::new();
        let remote = token.clone();

        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(30));
            remote.cancel();
        });

        let start = Instant::now();
        let fired = token.wait_timeout(Duration::from_secs(30));
        handle.join().unwrap();

        assert!(fired);
        assert!(start.elapsed() < Duration::from_secs(5));
    }
}
