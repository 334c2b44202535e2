//! Responsive layout engine for the TUI.
//!
//! Adapts the layout to the terminal size so the dashboard stays readable from
//! a small split pane up to a full screen.

use ratatui::layout::Constraint;

// Width breakpoints
const WIDTH_SINGLE_COLUMN: u16 = 80; // Below this: stack side column above the tables
const WIDTH_NARROW: u16 = 140; // Below this: give the side column more room

// Height breakpoints
const HEIGHT_MINIMAL: u16 = 20; // Below this: drop the status panel
const HEIGHT_COMPACT: u16 = 36; // Below this: drop the shortcuts legend

/// Terminal size classification for layout decisions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TerminalSize {
    Minimal,
    Compact,
    Normal,
}

/// Computed layout configuration based on terminal dimensions.
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    pub size: TerminalSize,

    /// Status (or help) panel at the top of the side column
    pub show_status_panel: bool,

    /// Legend explaining the abbreviated setting keys
    pub show_shortcuts: bool,

    /// Stack the side column above the shard tables instead of beside them
    pub single_column: bool,

    /// Side column percentage (0-100)
    pub side_pct: u16,

    /// Table column percentage (0-100)
    pub body_pct: u16,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            size: TerminalSize::Normal,
            show_status_panel: true,
            show_shortcuts: true,
            single_column: false,
            side_pct: 25,
            body_pct: 75,
        }
    }
}

impl LayoutConfig {
    /// Constraints splitting the main area into side and body.
    pub fn main_constraints(&self) -> [Constraint; 2] {
        if self.single_column {
            [Constraint::Percentage(50), Constraint::Percentage(50)]
        } else {
            [Constraint::Percentage(self.side_pct), Constraint::Percentage(self.body_pct)]
        }
    }
}

/// Compute layout configuration based on terminal dimensions.
///
/// | Terminal Size | Behavior |
/// |---------------|----------|
/// | Width < 80    | Side column stacked above the tables |
/// | Width 80-140  | 35/65 split |
/// | Width > 140   | 25/75 split |
/// | Height < 20   | Minimal: settings and countdown only on the side |
/// | Height 20-36  | Compact: hide the shortcuts legend |
/// | Height > 36   | Full layout |
pub fn compute_layout(width: u16, height: u16) -> LayoutConfig {
    let mut config = LayoutConfig::default();

    if width < WIDTH_SINGLE_COLUMN {
        config.single_column = true;
        config.show_shortcuts = false;
    } else if width <= WIDTH_NARROW {
        config.side_pct = 35;
        config.body_pct = 65;
    }

    if height < HEIGHT_MINIMAL {
        config.size = TerminalSize::Minimal;
        config.show_status_panel = false;
        config.show_shortcuts = false;
    } else if height <= HEIGHT_COMPACT {
        config.size = TerminalSize::Compact;
        config.show_shortcuts = false;
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal_layout() {
        let config = compute_layout(200, 50);
        assert_eq!(config.size, TerminalSize::Normal);
        assert!(config.show_status_panel);
        assert!(config.show_shortcuts);
        assert!(!config.single_column);
        assert_eq!(config.side_pct, 25);
    }

    #[test]
    fn test_narrow_layout() {
        let config = compute_layout(120, 50);
        assert_eq!(config.side_pct, 35);
        assert_eq!(config.body_pct, 65);
        assert!(!config.single_column);
    }

    #[test]
    fn test_single_column_layout() {
        let config = compute_layout(70, 50);
        assert!(config.single_column);
        assert!(!config.show_shortcuts);
        assert_eq!(config.main_constraints()[0], Constraint::Percentage(50));
    }

    #[test]
    fn test_minimal_height() {
        let config = compute_layout(200, 15);
        assert_eq!(config.size, TerminalSize::Minimal);
        assert!(!config.show_status_panel);
        assert!(!config.show_shortcuts);
    }

    #[test]
    fn test_compact_height() {
        let config = compute_layout(200, 30);
        assert_eq!(config.size, TerminalSize::Compact);
        assert!(config.show_status_panel);
        assert!(!config.show_shortcuts);
    }
}
