//! # UI State Machine
//!
//! Help, pause and edit are independent flags. Their interactions:
//!
//! - help may be toggled during edit mode; it replaces the status panel but the
//!   settings cursor keeps working
//! - entering edit mode always puts the cursor on row 0
//! - cursor movement wraps over the current row count and does nothing outside
//!   edit mode or when there are no rows
//! - the error banner is independent of everything else
//!
//! Fields are private; the transition methods below are the only way in.

use crate::domain::ClusterSettings;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct UiState {
    help_visible: bool,
    paused: bool,
    edit_mode: bool,
    selected_row: usize,
    error: Option<String>,
}

impl UiState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn help_visible(&self) -> bool {
        self.help_visible
    }

    #[must_use]
    pub fn paused(&self) -> bool {
        self.paused
    }

    #[must_use]
    pub fn edit_mode(&self) -> bool {
        self.edit_mode
    }

    /// Cursor row; only meaningful in edit mode.
    #[must_use]
    pub fn selected_row(&self) -> usize {
        self.selected_row
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Returns the new visibility.
    pub fn toggle_help(&mut self) -> bool {
        self.help_visible = !self.help_visible;
        self.help_visible
    }

    /// Returns the new pause flag.
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    /// Returns whether edit mode is now on.
    pub fn toggle_edit(&mut self) -> bool {
        self.edit_mode = !self.edit_mode;
        if self.edit_mode {
            self.selected_row = 0;
        }
        self.edit_mode
    }

    /// Move the cursor up one row, wrapping to the last. Returns whether it moved.
    pub fn move_up(&mut self, rows: usize) -> bool {
        self.step(rows, |row| if row == 0 { rows - 1 } else { row - 1 })
    }

    /// Move the cursor down one row, wrapping to the first. Returns whether it moved.
    pub fn move_down(&mut self, rows: usize) -> bool {
        self.step(rows, |row| (row + 1) % rows)
    }

    fn step(&mut self, rows: usize, next: impl FnOnce(usize) -> usize) -> bool {
        if !self.edit_mode || rows == 0 {
            return false;
        }
        let from = self.selected_row.min(rows - 1);
        let to = next(from);
        let moved = to != self.selected_row;
        self.selected_row = to;
        moved
    }

    /// Confirm the row under the cursor and leave edit mode.
    ///
    /// Hands back the selected key/value pair; nothing else happens to it.
    /// Outside edit mode this is a no-op returning `None`.
    pub fn confirm(&mut self, settings: &ClusterSettings) -> Option<(String, String)> {
        if !self.edit_mode {
            return None;
        }
        let selected = settings
            .row(self.selected_row)
            .map(|(key, value)| (key.to_string(), value.to_string()));
        self.edit_mode = false;
        selected
    }

    /// Keep the cursor inside `rows` after the settings table changed size.
    pub fn clamp_selection(&mut self, rows: usize) {
        self.selected_row = self.selected_row.min(rows.saturating_sub(1));
    }

    /// Returns whether the banner changed.
    pub fn set_error(&mut self, message: impl Into<String>) -> bool {
        let message = message.into();
        if self.error.as_deref() == Some(message.as_str()) {
            return false;
        }
        self.error = Some(message);
        true
    }

    /// Returns whether a banner was showing.
    pub fn clear_error(&mut self) -> bool {
        self.error.take().is_some()
    }
}
