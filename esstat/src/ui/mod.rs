//! UI state and the keyboard command dispatcher that drives it.

pub mod dispatch;
pub mod state;

pub use dispatch::{Command, DispatchOutcome, Dispatcher};
pub use state::UiState;
