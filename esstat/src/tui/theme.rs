//! TUI colour theme

use ratatui::style::{Color, Modifier, Style};

pub const GREEN: Color = Color::Rgb(0, 200, 80);
pub const YELLOW: Color = Color::Rgb(255, 215, 0);
pub const ORANGE: Color = Color::Rgb(255, 135, 0);
pub const RED: Color = Color::Rgb(220, 40, 40);
pub const CYAN: Color = Color::Rgb(0, 200, 220);
pub const DIM: Color = Color::Rgb(120, 120, 120);
pub const TEXT: Color = Color::White;

pub const STYLE_BOLD: Style = Style::new().fg(TEXT).add_modifier(Modifier::BOLD);
pub const STYLE_DIM: Style = Style::new().fg(DIM);
pub const STYLE_KEY: Style = Style::new().fg(YELLOW).add_modifier(Modifier::BOLD);
pub const STYLE_BORDER: Style = Style::new().fg(DIM);
pub const STYLE_EDIT_BORDER: Style = Style::new().fg(YELLOW);
pub const STYLE_SELECTED: Style = Style::new().fg(Color::Black).bg(YELLOW);

/// Countdown colour: green above 3s, yellow at 2-3s, orange below.
#[must_use]
pub fn countdown_color(seconds: u64) -> Color {
    match seconds {
        4.. => GREEN,
        2..=3 => YELLOW,
        _ => ORANGE,
    }
}

/// Recovery progress colour for a `_cat` percentage such as `"87.5%"`.
///
/// `None` when the value does not parse.
#[must_use]
pub fn percent_color(percent: &str) -> Option<Color> {
    let value: f64 = percent.trim().trim_end_matches('%').parse().ok()?;
    Some(if value >= 100.0 {
        GREEN
    } else if value >= 75.0 {
        YELLOW
    } else {
        ORANGE
    })
}

/// Background for the cluster health banner.
#[must_use]
pub fn health_color(status: &str) -> Color {
    match status {
        "green" => GREEN,
        "yellow" => YELLOW,
        "red" => RED,
        _ => DIM,
    }
}

/// Green for good, red for bad, yellow for "worth a look".
#[must_use]
pub fn state_color(state: Option<bool>) -> Color {
    match state {
        Some(true) => GREEN,
        Some(false) => RED,
        None => YELLOW,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown_thresholds() {
        assert_eq!(countdown_color(5), GREEN);
        assert_eq!(countdown_color(4), GREEN);
        assert_eq!(countdown_color(3), YELLOW);
        assert_eq!(countdown_color(2), YELLOW);
        assert_eq!(countdown_color(1), ORANGE);
        assert_eq!(countdown_color(0), ORANGE);
    }

    #[test]
    fn test_percent_thresholds() {
        assert_eq!(percent_color("100.0%"), Some(GREEN));
        assert_eq!(percent_color("75.0%"), Some(YELLOW));
        assert_eq!(percent_color("74.9%"), Some(ORANGE));
        assert_eq!(percent_color("n/a"), None);
    }
}
