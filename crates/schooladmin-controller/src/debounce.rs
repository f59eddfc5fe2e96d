//! Trailing-edge debounce on top of tokio timers.

use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::debug;

/// Runs only the last action scheduled within a quiet period.
///
/// Each [`schedule`](Debouncer::schedule) aborts the previous timer. An
/// action whose timer has already fired runs to completion; only the wait
/// is cancellable.
#[derive(Debug, Default)]
pub struct Debouncer {
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    /// Create an idle debouncer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `action` after `delay` unless another action is scheduled
    /// first. Must be called from within a tokio runtime.
    pub fn schedule<F>(&self, delay: Duration, action: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let timer = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tokio::spawn(action);
        });

        let previous = self
            .pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .replace(timer);
        if let Some(previous) = previous {
            if !previous.is_finished() {
                debug!("Superseding pending debounced action");
            }
            previous.abort();
        }
    }

    /// Drop any pending action.
    pub fn cancel(&self) {
        if let Some(pending) = self
            .pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take()
        {
            pending.abort();
        }
    }

    /// Whether a timer is still waiting.
    pub fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .as_ref()
            .is_some_and(|h| !h.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
