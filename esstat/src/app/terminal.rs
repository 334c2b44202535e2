//! RAII terminal lifecycle guard.
//!
//! [`TerminalSession`] enters raw mode and the alternate screen on creation and
//! restores both on [`Drop`], including on early error returns. A panic hook
//! restores the terminal before the panic message is printed so it stays
//! readable.

use std::io::{self, Stdout};
use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Once;

use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::domain::TerminalError;
use crate::tui::{self, FrameView};

/// Set while raw mode is on; the panic hook only restores when it is.
static RAW_MODE_ACTIVE: AtomicBool = AtomicBool::new(false);
static PANIC_HOOK: Once = Once::new();

pub struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSession {
    /// # Errors
    /// Returns [`TerminalError`] if raw mode, the alternate screen or the
    /// backend cannot be set up. Whatever was already enabled is undone.
    pub fn enter() -> Result<Self, TerminalError> {
        enable_raw_mode().map_err(|e| TerminalError::Setup(format!("raw mode: {e}")))?;
        RAW_MODE_ACTIVE.store(true, Ordering::SeqCst);

        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen, Hide) {
            restore_terminal();
            return Err(TerminalError::Setup(format!("alternate screen: {e}")));
        }
        install_panic_hook();

        match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(terminal) => Ok(Self { terminal }),
            Err(e) => {
                restore_terminal();
                Err(e.into())
            }
        }
    }

    /// # Errors
    /// Propagates write failures from the backend.
    pub fn draw(&mut self, view: &FrameView) -> Result<(), TerminalError> {
        self.terminal.draw(|f| tui::render(f, view))?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        restore_terminal();
    }
}

fn install_panic_hook() {
    PANIC_HOOK.call_once(|| {
        let prev = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            restore_terminal();
            prev(info);
        }));
    });
}

/// Leave raw mode and the alternate screen. Safe to call repeatedly.
fn restore_terminal() {
    if RAW_MODE_ACTIVE.swap(false, Ordering::SeqCst) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
    }
}
