//! # Shutdown Signal
//!
//! A process-wide stop flag with an explicit lifecycle:
//!
//! 1. Created unraised when the service is built.
//! 2. Raised exactly once, normally by the service's own `Shutdown` call.
//! 3. Observed by the server's accept loop and the TCP listener, which stop taking new work,
//!    drain what is in flight, and return.
//!
//! Raising the signal never interrupts a handler that is already running.

use std::sync::Arc;
use tokio::sync::watch;
use tracing::info;

/// Cloneable handle to a shared stop flag.
#[derive(Clone, Debug)]
pub struct ShutdownSignal {
    sender: Arc<watch::Sender<bool>>,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(false);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Raises the signal. Later calls are no-ops.
    pub fn raise(&self) {
        let raised_now = self.sender.send_if_modified(|raised| {
            if *raised {
                false
            } else {
                *raised = true;
                true
            }
        });
        if raised_now {
            info!("Shutdown signal raised");
        }
    }

    pub fn is_raised(&self) -> bool {
        *self.sender.borrow()
    }

    /// Resolves once the signal has been raised (immediately if it already was).
    pub async fn raised(&self) {
        let mut receiver = self.sender.subscribe();
        // The sender lives in `self`, so `wait_for` cannot observe a closed channel.
        let _ = receiver.wait_for(|raised| *raised).await;
    }
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_raise_wakes_waiters() {
        let signal = ShutdownSignal::new();
        assert!(!signal.is_raised());

        let waiter = {
            let signal = signal.clone();
            tokio::spawn(async move { signal.raised().await })
        };

        signal.raise();
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("waiter should wake")
            .unwrap();
        assert!(signal.is_raised());
    }

    #[tokio::test]
    async fn test_raised_resolves_when_already_set() {
        let signal = ShutdownSignal::new();
        signal.raise();
        signal.raise();
        tokio::time::timeout(Duration::from_secs(1), signal.raised())
            .await
            .expect("already raised");
    }
}
