// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! One-shot completion signal for an interception session
//!
//! A [`CompletionGuard`] is acquired when the host hands a request over and
//! signals the host exactly once: on [`CompletionGuard::release`], or on
//! drop if no path released it (early return, panic, cancelled task).

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;

/// Modification payload handed back to the host. Always empty: the
/// observed request proceeds unaltered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passthrough {}

/// Host side of the completion signal
pub trait SessionHost: Send + Sync {
    /// Release the interception session
    fn done(&self, payload: Passthrough);
}

type Signal = Box<dyn FnOnce(Passthrough) + Send>;

/// Pending-interception resource, released exactly once
pub struct CompletionGuard {
    signal: Option<Signal>,
}

impl CompletionGuard {
    /// Acquire for a host
    pub fn new(host: Arc<dyn SessionHost>) -> Self {
        Self::from_fn(move |payload| host.done(payload))
    }

    /// Acquire with an arbitrary signal
    pub fn from_fn(signal: impl FnOnce(Passthrough) + Send + 'static) -> Self {
        Self {
            signal: Some(Box::new(signal)),
        }
    }

    /// Acquire a guard whose release resolves the returned receiver
    pub fn channel() -> (Self, oneshot::Receiver<Passthrough>) {
        let (tx, rx) = oneshot::channel();
        let guard = Self::from_fn(move |payload| {
            // Receiver gone means nobody is waiting any more.
            let _ = tx.send(payload);
        });
        (guard, rx)
    }

    /// Whether the signal is still pending
    pub fn is_pending(&self) -> bool {
        self.signal.is_some()
    }

    /// Signal completion now
    pub fn release(mut self) {
        self.fire();
    }

    fn fire(&mut self) {
        if let Some(signal) = self.signal.take() {
            tracing::debug!("Releasing interception session");
            signal(Passthrough::default());
        }
    }
}

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        self.fire();
    }
}

impl fmt::Debug for CompletionGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionGuard")
            .field("pending", &self.is_pending())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingHost(AtomicUsize);

    impl SessionHost for CountingHost {
        fn done(&self, payload: Passthrough) {
            assert_eq!(payload, Passthrough::default());
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_release_signals_once() {
        let host = Arc::new(CountingHost::default());
        let guard = CompletionGuard::new(host.clone());
        assert!(guard.is_pending());
        guard.release();
        assert_eq!(host.0.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_drop_signals_once() {
        let host = Arc::new(CountingHost::default());
        {
            let _guard = CompletionGuard::new(host.clone());
        }
        assert_eq!(host.0.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_panic_path_still_signals() {
        let host = Arc::new(CountingHost::default());
        let guard = CompletionGuard::new(host.clone());
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(move || {
            let _held = guard;
            panic!("hook blew up");
        }));
        assert!(result.is_err());
        assert_eq!(host.0.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_channel_resolves() {
        let (guard, rx) = CompletionGuard::channel();
        guard.release();
        assert_eq!(tokio_test::block_on(rx).unwrap(), Passthrough::default());
    }
}
