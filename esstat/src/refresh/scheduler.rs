//! # Refresh Scheduler
//!
//! Fetches a full snapshot from a [`DataSource`] on a fixed cadence.
//!
//! ## Cycle
//!
//! ```text
//! lock cycle guard → status ┐
//!                    settings ├─ join → validate → replace snapshot → stamp clock → event
//!                    recovery │          (any Err: keep old snapshot, stamp clock, event)
//!                    relocations ┘
//! ```
//!
//! ## Loop
//!
//! [`RefreshScheduler::run`] sleeps until the clock's next deadline rather than
//! for a fixed period, so cycles never overlap and slow fetches push the next
//! one back. While paused no cycle starts and the clock stays where it was, so
//! resuming fetches right away if the deadline already passed.
//!
//! Shutdown is only observed between cycles; a cycle in flight runs to the end.
//! A caller that drops a [`RefreshScheduler::refresh`] future mid-cycle
//! abandons that cycle: the snapshot and clock stay as they were and the
//! in-flight flag is cleared.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::{debug, info, warn};
use tokio::sync::{mpsc, watch};
use tokio::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

use super::clock::RefreshClock;
use crate::domain::FetchError;
use crate::snapshot::{Snapshot, SnapshotStore};
use crate::source::DataSource;

/// Outcome notifications for the owner of the UI state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshEvent {
    Completed { first_data: bool },
    Failed(String),
}

/// Pause switch shared between the dispatcher and the refresh loop.
#[derive(Debug)]
pub struct SchedulerControl {
    paused: watch::Sender<bool>,
}

impl Default for SchedulerControl {
    fn default() -> Self {
        Self::new()
    }
}

impl SchedulerControl {
    #[must_use]
    pub fn new() -> Self {
        let (paused, _) = watch::channel(false);
        Self { paused }
    }

    pub fn set_paused(&self, paused: bool) {
        self.paused.send_replace(paused);
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        *self.paused.borrow()
    }

    /// Receiver handed to [`RefreshScheduler::run`].
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.paused.subscribe()
    }
}

/// Holds the in-flight flag up for as long as a cycle is running, including
/// one whose future is dropped before it completes.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn set(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::Release);
        Self(flag)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct RefreshScheduler<S> {
    source: S,
    store: Arc<SnapshotStore>,
    clock: Mutex<RefreshClock>,
    cycle: tokio::sync::Mutex<()>,
    in_flight: AtomicBool,
    events: mpsc::UnboundedSender<RefreshEvent>,
}

impl<S: DataSource> RefreshScheduler<S> {
    #[must_use]
    pub fn new(
        source: S,
        store: Arc<SnapshotStore>,
        interval: Duration,
        events: mpsc::UnboundedSender<RefreshEvent>,
    ) -> Self {
        Self {
            source,
            store,
            clock: Mutex::new(RefreshClock::new(interval)),
            cycle: tokio::sync::Mutex::new(()),
            in_flight: AtomicBool::new(false),
            events,
        }
    }

    #[must_use]
    pub fn store(&self) -> &Arc<SnapshotStore> {
        &self.store
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.clock().interval()
    }

    #[must_use]
    pub fn is_refreshing(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    #[must_use]
    pub fn seconds_until_next(&self) -> u64 {
        self.clock().seconds_until_next(Instant::now())
    }

    #[must_use]
    pub fn next_refresh_deadline(&self) -> Instant {
        self.clock().next_deadline(Instant::now())
    }

    /// Run one full fetch cycle.
    ///
    /// Concurrent callers are serialized; at most one cycle is in flight.
    ///
    /// # Errors
    /// Returns the first failing query, or [`FetchError::MissingClusterName`]
    /// when the status payload has no cluster identifier. The stored snapshot
    /// is untouched in either case.
    pub async fn refresh(&self) -> Result<(), FetchError> {
        let _cycle = self.cycle.lock().await;
        let in_flight = InFlight::set(&self.in_flight);

        let started = Instant::now();
        let outcome = match self.fetch_snapshot().await {
            Ok(snapshot) => {
                let first_data = self.store.replace(snapshot);
                if first_data {
                    info!("first snapshot received");
                }
                Ok(first_data)
            }
            Err(err) => {
                warn!("refresh failed: {err}");
                Err(err)
            }
        };
        let completed = Instant::now();
        self.clock().stamp(completed);
        drop(in_flight);
        debug!("refresh cycle took {:?}", completed - started);

        match outcome {
            Ok(first_data) => {
                self.notify(RefreshEvent::Completed { first_data });
                Ok(())
            }
            Err(err) => {
                self.notify(RefreshEvent::Failed(err.to_string()));
                Err(err)
            }
        }
    }

    async fn fetch_snapshot(&self) -> Result<Snapshot, FetchError> {
        let (status, settings, recovery, relocations) = tokio::join!(
            self.source.status(),
            self.source.settings(),
            self.source.recovery(),
            self.source.relocations(),
        );
        let snapshot = Snapshot {
            status: status?,
            settings: settings?,
            recovery: recovery?,
            relocations: relocations?,
        };
        if snapshot.status.cluster_name().is_none() {
            return Err(FetchError::MissingClusterName);
        }
        Ok(snapshot)
    }

    /// Drive refresh cycles until `shutdown` is cancelled.
    pub async fn run(&self, mut paused: watch::Receiver<bool>, shutdown: CancellationToken) {
        debug!("refresh loop started, interval {:?}", self.interval());
        loop {
            if *paused.borrow_and_update() {
                tokio::select! {
                    biased;
                    () = shutdown.cancelled() => break,
                    changed = paused.changed() => {
                        if changed.is_err() {
                            break;
                        }
                    }
                }
                continue;
            }

            let deadline = self.next_refresh_deadline();
            tokio::select! {
                biased;
                () = shutdown.cancelled() => break,
                changed = paused.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    continue;
                }
                () = tokio::time::sleep_until(deadline) => {}
            }

            // Failures were already reported through the event channel.
            let _ = self.refresh().await;
        }
        debug!("refresh loop stopped");
    }

    fn clock(&self) -> MutexGuard<'_, RefreshClock> {
        self.clock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn notify(&self, event: RefreshEvent) {
        if self.events.send(event).is_err() {
            debug!("refresh event dropped, no listener");
        }
    }
}
