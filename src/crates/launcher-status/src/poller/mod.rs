//! Periodic status polling
//!
//! [`StatusPoller`] owns the current [`StatusSnapshot`] and the background
//! task that refreshes it. The snapshot lives in a `tokio::sync::watch`
//! channel: the poller is the only writer, and readers always get an
//! immutable `Arc` copy.
//!
//! Policies:
//! - a failed fetch logs a warning and keeps the previous snapshot
//! - a fetch requested while another is in flight is skipped
//! - a fetch still in flight when [`StatusPoller::stop`] is called is not
//!   aborted, but its result is discarded, and it never blocks fetches made
//!   after the stop
//! - dropping a `start` future before it returns leaves the poller stopped
//!
//! # Example
//!
//! ```rust,ignore
//! use launcher_status::{StatusConfig, StatusPoller};
//!
//! let poller = StatusPoller::from_config(&StatusConfig::default())?;
//! poller.start().await?;
//! println!("overall: {}", poller.overall_color());
//! poller.stop();
//! ```

mod stop;

use crate::catalog;
use crate::client::{HttpStatusClient, StatusClient};
use crate::config::StatusConfig;
use crate::error::{Result, StatusError};
use crate::logging::{format_duration, timed};
use crate::model::{SharedSnapshot, StatusColor, StatusSnapshot};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use stop::StopSignal;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Result of a single fetch attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Snapshot replaced with this many services
    Updated { services: usize },
    /// Fetch failed; previous snapshot kept
    Failed,
    /// Another fetch was already in flight
    Skipped,
    /// Poller was stopped while this fetch was in flight; result dropped
    Discarded,
}

impl FetchOutcome {
    pub fn is_updated(&self) -> bool {
        matches!(self, Self::Updated { .. })
    }
}

/// State shared with the background task
struct PollerShared {
    client: Arc<dyn StatusClient>,
    snapshot: watch::Sender<SharedSnapshot>,
    fetch: Mutex<FetchState>,
}

/// Bookkeeping that decides whether a fetch may start and may write.
#[derive(Debug, Default)]
struct FetchState {
    /// Bumped on every stop; a fetch only writes under the generation it started in
    generation: u64,
    /// Generation of the fetch currently in flight, if any
    in_flight: Option<u64>,
}

/// Clears the in-flight marker unless a newer generation has taken it over.
struct InFlightGuard<'a> {
    fetch: &'a Mutex<FetchState>,
    generation: u64,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        let mut fetch = self.fetch.lock();
        if fetch.in_flight == Some(self.generation) {
            fetch.in_flight = None;
        }
    }
}

impl PollerShared {
    fn bump_generation(&self) {
        self.fetch.lock().generation += 1;
    }

    async fn fetch_once(&self) -> FetchOutcome {
        // A fetch left over from before the last stop does not block this one
        let started_in = {
            let mut fetch = self.fetch.lock();
            if fetch.in_flight == Some(fetch.generation) {
                debug!("Status fetch already in flight, skipping");
                return FetchOutcome::Skipped;
            }
            fetch.in_flight = Some(fetch.generation);
            fetch.generation
        };
        let _in_flight = InFlightGuard {
            fetch: &self.fetch,
            generation: started_in,
        };

        match timed("status fetch", self.client.fetch_statuses()).await {
            Ok(mut statuses) => {
                catalog::apply_upstream_overrides(&mut statuses);

                let fetch = self.fetch.lock();
                if fetch.generation != started_in {
                    debug!("Poller stopped during fetch, discarding result");
                    return FetchOutcome::Discarded;
                }

                let services = statuses.len();
                self.snapshot
                    .send_replace(Arc::new(StatusSnapshot::new(statuses)));
                debug!(services, "Service status snapshot replaced");
                FetchOutcome::Updated { services }
            }
            Err(e) => {
                warn!(error = %e, "Failed to retrieve service statuses");
                FetchOutcome::Failed
            }
        }
    }
}

struct RunningTask {
    stop: StopSignal,
    handle: Option<JoinHandle<()>>,
}

/// Releases the running slot if `start` is dropped before it spawns the loop.
struct PendingStart<'a> {
    running: &'a Mutex<Option<RunningTask>>,
    stop: StopSignal,
}

impl Drop for PendingStart<'_> {
    fn drop(&mut self) {
        let mut running = self.running.lock();
        let abandoned = running
            .as_ref()
            .is_some_and(|task| task.stop.same_as(&self.stop) && task.handle.is_none());
        if abandoned {
            *running = None;
            self.stop.request_stop();
            debug!("Poller start cancelled before scheduling, slot released");
        }
    }
}

/// Polls a [`StatusClient`] on a fixed interval and publishes snapshots.
///
/// `start` and `stop` take `&self`, so a poller can be shared behind an
/// `Arc`. Dropping a running poller stops it.
pub struct StatusPoller {
    shared: Arc<PollerShared>,
    interval: Duration,
    running: Mutex<Option<RunningTask>>,
}

impl std::fmt::Debug for StatusPoller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatusPoller")
            .field("interval", &self.interval)
            .field("running", &self.is_running())
            .field("services", &self.snapshot().len())
            .finish()
    }
}

impl StatusPoller {
    /// Create a stopped poller with an empty snapshot.
    pub fn new(client: Arc<dyn StatusClient>, interval: Duration) -> Self {
        let (snapshot, _rx) = watch::channel(Arc::new(StatusSnapshot::empty()));
        Self {
            shared: Arc::new(PollerShared {
                client,
                snapshot,
                fetch: Mutex::new(FetchState::default()),
            }),
            interval,
            running: Mutex::new(None),
        }
    }

    /// Create a poller backed by [`HttpStatusClient`].
    pub fn from_config(config: &StatusConfig) -> Result<Self> {
        let client = HttpStatusClient::new(config)?;
        Ok(Self::new(Arc::new(client), config.poll_interval()))
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.running.lock().is_some()
    }

    /// Fetch once immediately, then keep fetching every interval.
    ///
    /// Returns the outcome of the immediate fetch. The first scheduled fetch
    /// happens one full interval after this call. Fails with
    /// [`StatusError::PollerAlreadyRunning`] if the poller is running.
    pub async fn start(&self) -> Result<FetchOutcome> {
        if self.interval.is_zero() {
            return Err(StatusError::Config(
                "poll interval must be non-zero".to_string(),
            ));
        }

        let stop = {
            let mut running = self.running.lock();
            if running.is_some() {
                return Err(StatusError::PollerAlreadyRunning);
            }
            let stop = StopSignal::new();
            *running = Some(RunningTask {
                stop: stop.clone(),
                handle: None,
            });
            stop
        };

        let pending = PendingStart {
            running: &self.running,
            stop: stop.clone(),
        };

        info!("Loading service statuses..");
        let outcome = self.shared.fetch_once().await;

        {
            let mut running = self.running.lock();
            match running.as_mut() {
                Some(task) if task.stop.same_as(&stop) => {
                    task.handle = Some(tokio::spawn(poll_loop(
                        Arc::clone(&self.shared),
                        self.interval,
                        stop.clone(),
                    )));
                }
                _ => {
                    debug!("Poller stopped during initial fetch, not scheduling refreshes");
                    return Ok(outcome);
                }
            }
        }
        drop(pending);

        info!(
            interval = %format_duration(self.interval),
            "Service status refresh scheduled"
        );
        Ok(outcome)
    }

    /// Cancel scheduled refreshes. No-op if not running.
    ///
    /// A fetch already in flight runs to completion but its result is dropped.
    pub fn stop(&self) {
        let Some(task) = self.running.lock().take() else {
            debug!("Status poller not running, nothing to stop");
            return;
        };

        self.shared.bump_generation();
        task.stop.request_stop();
        info!("Service status refresh stopped");
    }

    /// Stop, then wait for the background task to exit.
    ///
    /// Waits for a fetch that is still in flight; its result is dropped.
    pub async fn shutdown(&self) {
        let Some(task) = self.running.lock().take() else {
            return;
        };

        self.shared.bump_generation();
        task.stop.request_stop();

        if let Some(handle) = task.handle {
            if let Err(e) = handle.await {
                warn!(error = %e, "Status poll task ended abnormally");
            }
        }
        info!("Service status refresh shut down");
    }

    /// Run one fetch now.
    ///
    /// Never fails: errors are logged and leave the snapshot untouched.
    pub async fn fetch_once(&self) -> FetchOutcome {
        self.shared.fetch_once().await
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> SharedSnapshot {
        self.shared.snapshot.borrow().clone()
    }

    /// Receiver notified whenever the snapshot is replaced.
    pub fn subscribe(&self) -> watch::Receiver<SharedSnapshot> {
        self.shared.snapshot.subscribe()
    }

    /// Overall indicator color for the current snapshot.
    pub fn overall_color(&self) -> StatusColor {
        self.snapshot().overall_color()
    }
}

impl Drop for StatusPoller {
    fn drop(&mut self) {
        if let Some(task) = self.running.get_mut().take() {
            self.shared.bump_generation();
            task.stop.request_stop();
        }
    }
}

async fn poll_loop(shared: Arc<PollerShared>, period: Duration, stop: StopSignal) {
    let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            biased;
            _ = stop.wait_for_stop() => break,
            _ = ticker.tick() => {}
        }

        info!("Refreshing service statuses..");
        shared.fetch_once().await;
    }

    debug!("Status poll loop exited");
}
