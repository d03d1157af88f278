//! Stop signalling for the poll loop

use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

/// One-shot stop flag shared between a poller and its background task
///
/// Waiting never misses a stop requested before the wait started.
#[derive(Clone)]
pub(crate) struct StopSignal {
    stopped: Arc<watch::Sender<bool>>,
}

impl std::fmt::Debug for StopSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StopSignal")
            .field("stopped", &self.is_stop_requested())
            .finish()
    }
}

impl StopSignal {
    pub(crate) fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self {
            stopped: Arc::new(tx),
        }
    }

    /// Request stop. Returns `true` the first time only.
    pub(crate) fn request_stop(&self) -> bool {
        let first = self.stopped.send_if_modified(|stopped| {
            if *stopped {
                false
            } else {
                *stopped = true;
                true
            }
        });
        if first {
            debug!("Stop requested for status poll loop");
        }
        first
    }

    /// Whether both handles refer to the same signal
    pub(crate) fn same_as(&self, other: &StopSignal) -> bool {
        Arc::ptr_eq(&self.stopped, &other.stopped)
    }

    pub(crate) fn is_stop_requested(&self) -> bool {
        *self.stopped.borrow()
    }

    /// Resolve once stop has been requested
    pub(crate) async fn wait_for_stop(&self) {
        let mut rx = self.stopped.subscribe();
        // The sender lives as long as `self`, so this cannot fail
        let _ = rx.wait_for(|stopped| *stopped).await;
    }
}
