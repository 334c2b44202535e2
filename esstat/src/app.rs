//! # Dashboard tick loop
//!
//! Wires the pieces together:
//!
//! ```text
//! stdin ─▶ InputListener ─drain─▶ KeyDecoder ─▶ Dispatcher ─▶ UiState ◀─ RefreshEvent
//!                                                   │                        │
//!                                            SchedulerControl ──▶ RefreshScheduler ─▶ SnapshotStore
//!                                                                                        │
//!                       TerminalSession ◀── tui::render(FrameView) ◀─────────────────────┘
//! ```
//!
//! The [`Controller`] is the single owner of [`UiState`]. Refresh outcomes
//! reach it as [`RefreshEvent`]s over a channel and keystrokes arrive as
//! drained byte batches; both are applied on the tick, so nothing else ever
//! writes UI state.
//!
//! A frame is only drawn when something visible changed: a keystroke the
//! dispatcher reports as visible, or a difference in the snapshot generation,
//! UI state, countdown second or header clock since the last frame.

use std::sync::Arc;
use std::time::Duration;

use log::{info, warn};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

mod terminal;

pub use terminal::TerminalSession;

use crate::cli::Config;
use crate::domain::{FetchError, TerminalError};
use crate::input::{InputListener, KeyDecoder, StdinSource};
use crate::refresh::{RefreshEvent, RefreshScheduler, SchedulerControl};
use crate::snapshot::{Snapshot, SnapshotStore};
use crate::source::DataSource;
use crate::tui::{Countdown, FrameView};
use crate::ui::{Dispatcher, UiState};

const CLOCK_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// What one tick decided.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    pub quit: bool,
    pub redraw: bool,
}

/// Everything that shows on screen, for change detection.
#[derive(Debug, Clone, PartialEq)]
struct FrameKey {
    generation: u64,
    data_ready: bool,
    ui: UiState,
    countdown: Countdown,
    clock: String,
}

pub struct Controller<S> {
    scheduler: Arc<RefreshScheduler<S>>,
    events: mpsc::UnboundedReceiver<RefreshEvent>,
    dispatcher: Dispatcher,
    decoder: KeyDecoder,
    ui: UiState,
    last_frame: Option<FrameKey>,
}

impl<S: DataSource> Controller<S> {
    pub fn new(
        scheduler: Arc<RefreshScheduler<S>>,
        events: mpsc::UnboundedReceiver<RefreshEvent>,
        dispatcher: Dispatcher,
    ) -> Self {
        Self {
            scheduler,
            events,
            dispatcher,
            decoder: KeyDecoder::new(),
            ui: UiState::new(),
            last_frame: None,
        }
    }

    #[must_use]
    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    #[must_use]
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.scheduler.store().load()
    }

    /// Apply one tick: refresh outcomes first, then keystrokes.
    pub fn tick(&mut self, input: &[u8], clock: &str) -> TickOutcome {
        self.apply_refresh_events();

        let keys = self.decoder.decode(input);
        let mut outcome = TickOutcome::default();
        if !keys.is_empty() {
            let snapshot = self.snapshot();
            let dispatched = self.dispatcher.dispatch(&keys, &mut self.ui, &snapshot.settings);
            outcome.quit = dispatched.quit;
            outcome.redraw = dispatched.redraw;
        }

        let key = self.frame_key(clock);
        outcome.redraw |= self.last_frame.as_ref() != Some(&key);
        self.last_frame = Some(key);
        outcome
    }

    fn apply_refresh_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            match event {
                RefreshEvent::Completed { .. } => {
                    self.ui.clear_error();
                    let rows = self.scheduler.store().load().settings.len();
                    self.ui.clamp_selection(rows);
                }
                RefreshEvent::Failed(message) => {
                    self.ui.set_error(message);
                }
            }
        }
    }

    #[must_use]
    pub fn countdown(&self) -> Countdown {
        if self.ui.paused() {
            Countdown::Paused
        } else if self.scheduler.is_refreshing() {
            Countdown::Refreshing
        } else {
            Countdown::Seconds(self.scheduler.seconds_until_next())
        }
    }

    fn frame_key(&self, clock: &str) -> FrameKey {
        let store = self.scheduler.store();
        FrameKey {
            generation: store.generation(),
            data_ready: store.is_ready(),
            ui: self.ui.clone(),
            countdown: self.countdown(),
            clock: clock.to_string(),
        }
    }

    pub fn frame_view<'a>(&'a self, snapshot: &'a Snapshot, clock: &'a str) -> FrameView<'a> {
        FrameView {
            snapshot,
            ui: &self.ui,
            data_ready: self.scheduler.store().is_ready(),
            countdown: self.countdown(),
            clock,
        }
    }
}

/// Run the interactive dashboard until quit or interrupt.
///
/// # Errors
/// Returns [`TerminalError`] if the terminal cannot be acquired at startup or a
/// frame cannot be written.
pub async fn run_dashboard<S: DataSource>(config: &Config, source: S) -> Result<(), TerminalError> {
    let shutdown = CancellationToken::new();
    let (tx, rx) = mpsc::unbounded_channel();
    let scheduler = Arc::new(RefreshScheduler::new(
        source,
        Arc::new(SnapshotStore::new()),
        config.interval,
        tx,
    ));
    let control = SchedulerControl::new();
    let paused = control.subscribe();
    let mut controller = Controller::new(
        Arc::clone(&scheduler),
        rx,
        Dispatcher::new(control, shutdown.clone()),
    );

    let mut session = TerminalSession::enter()?;
    let mut listener = InputListener::new(StdinSource::new());
    if !listener.start() {
        warn!("stdin is not an interactive terminal, keyboard input disabled");
    }

    let refresh_task = tokio::spawn({
        let scheduler = Arc::clone(&scheduler);
        let shutdown = shutdown.clone();
        async move { scheduler.run(paused, shutdown).await }
    });

    let result = tick_loop(&mut controller, &mut session, &listener, config.tick, &shutdown).await;

    shutdown.cancel();
    listener.stop();
    drop(session);
    if scheduler.is_refreshing() {
        info!("waiting for the refresh in flight to finish");
    }
    if let Err(e) = refresh_task.await {
        warn!("refresh task ended abnormally: {e}");
    }
    info!("shutdown complete");
    result
}

async fn tick_loop<S: DataSource>(
    controller: &mut Controller<S>,
    session: &mut TerminalSession,
    listener: &InputListener,
    tick: Duration,
    shutdown: &CancellationToken,
) -> Result<(), TerminalError> {
    let mut ticker = tokio::time::interval(tick);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let interrupt = tokio::signal::ctrl_c();
    tokio::pin!(interrupt);
    let mut interrupt_armed = true;

    loop {
        tokio::select! {
            biased;
            () = shutdown.cancelled() => break,
            result = &mut interrupt, if interrupt_armed => {
                interrupt_armed = false;
                match result {
                    Ok(()) => {
                        info!("interrupted");
                        shutdown.cancel();
                        break;
                    }
                    Err(e) => warn!("cannot listen for Ctrl-C: {e}"),
                }
            }
            _ = ticker.tick() => {}
        }

        let clock = chrono::Local::now().format(CLOCK_FORMAT).to_string();
        let outcome = controller.tick(&listener.drain(), &clock);
        if outcome.quit {
            break;
        }
        if outcome.redraw {
            let snapshot = controller.snapshot();
            session.draw(&controller.frame_view(&snapshot, &clock))?;
        }
    }
    Ok(())
}

/// Fetch a single snapshot through the same refresh cycle the dashboard uses.
///
/// # Errors
/// Returns the cycle's [`FetchError`].
pub async fn run_once<S: DataSource>(config: &Config, source: S) -> Result<Arc<Snapshot>, FetchError> {
    let store = Arc::new(SnapshotStore::new());
    let (tx, _events) = mpsc::unbounded_channel();
    let scheduler = RefreshScheduler::new(source, Arc::clone(&store), config.interval, tx);
    scheduler.refresh().await?;
    Ok(store.load())
}
