//! # Command Dispatcher
//!
//! Maps decoded keys to [`UiState`] transitions, the scheduler's pause switch,
//! or shutdown. Events in a batch are applied in order and a quit ends the
//! batch on the spot.

use log::{debug, info};
use tokio_util::sync::CancellationToken;

use super::state::UiState;
use crate::domain::ClusterSettings;
use crate::input::KeyEvent;
use crate::refresh::SchedulerControl;

/// Ctrl-C as delivered by a terminal in raw mode.
const INTERRUPT: char = '\x03';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    ToggleHelp,
    TogglePause,
    ToggleEdit,
    MoveUp,
    MoveDown,
    Confirm,
}

impl Command {
    /// Letter keys are case-insensitive. Left/right and unbound keys map to nothing.
    #[must_use]
    pub fn from_key(key: KeyEvent) -> Option<Self> {
        match key {
            KeyEvent::Char(c) => match c.to_ascii_lowercase() {
                'q' | INTERRUPT => Some(Command::Quit),
                'h' => Some(Command::ToggleHelp),
                'p' => Some(Command::TogglePause),
                'e' => Some(Command::ToggleEdit),
                _ => None,
            },
            KeyEvent::Up => Some(Command::MoveUp),
            KeyEvent::Down => Some(Command::MoveDown),
            KeyEvent::Enter => Some(Command::Confirm),
            KeyEvent::Left | KeyEvent::Right => None,
        }
    }
}

/// What a batch did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// Some visible state changed.
    pub redraw: bool,
    /// Shutdown was signalled.
    pub quit: bool,
    /// Events consumed, including the quit that ended the batch.
    pub processed: usize,
    /// Pair returned by the last confirm in the batch.
    pub selected: Option<(String, String)>,
}

pub struct Dispatcher {
    control: SchedulerControl,
    shutdown: CancellationToken,
}

impl Dispatcher {
    #[must_use]
    pub fn new(control: SchedulerControl, shutdown: CancellationToken) -> Self {
        Self { control, shutdown }
    }

    #[must_use]
    pub fn control(&self) -> &SchedulerControl {
        &self.control
    }

    pub fn dispatch(
        &self,
        keys: &[KeyEvent],
        state: &mut UiState,
        settings: &ClusterSettings,
    ) -> DispatchOutcome {
        let mut outcome = DispatchOutcome::default();
        for &key in keys {
            outcome.processed += 1;
            let Some(command) = Command::from_key(key) else {
                continue;
            };
            debug!("{key:?} -> {command:?}");

            let changed = match command {
                Command::Quit => {
                    info!("quit requested");
                    self.shutdown.cancel();
                    outcome.quit = true;
                    break;
                }
                Command::ToggleHelp => {
                    state.toggle_help();
                    true
                }
                Command::TogglePause => {
                    let paused = state.toggle_pause();
                    self.control.set_paused(paused);
                    info!("refresh {}", if paused { "paused" } else { "resumed" });
                    true
                }
                Command::ToggleEdit => {
                    state.toggle_edit();
                    true
                }
                Command::MoveUp => state.move_up(settings.len()),
                Command::MoveDown => state.move_down(settings.len()),
                Command::Confirm => {
                    if state.edit_mode() {
                        outcome.selected = state.confirm(settings);
                        if let Some((key, value)) = &outcome.selected {
                            info!("selected setting {key} = {value}");
                        }
                        true
                    } else {
                        false
                    }
                }
            };
            outcome.redraw |= changed;
        }
        outcome
    }
}
