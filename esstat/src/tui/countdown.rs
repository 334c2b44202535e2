use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::theme::{countdown_color, CYAN, STYLE_BORDER, YELLOW};

/// What the countdown panel shows this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Countdown {
    Paused,
    Refreshing,
    Seconds(u64),
}

pub fn countdown_line(countdown: Countdown) -> Line<'static> {
    match countdown {
        Countdown::Paused => Line::from(Span::styled(
            "⏸ PAUSED ⏸",
            Style::new().fg(YELLOW).add_modifier(Modifier::BOLD),
        )),
        Countdown::Refreshing => Line::from(Span::styled(
            "Refreshing data...",
            Style::new().fg(CYAN).add_modifier(Modifier::BOLD),
        )),
        Countdown::Seconds(n) => Line::from(vec![
            Span::raw("Next refresh in "),
            Span::styled(
                n.to_string(),
                Style::new().fg(countdown_color(n)).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" seconds..."),
        ]),
    }
}

pub fn render_countdown(f: &mut Frame, area: Rect, countdown: Countdown) {
    let panel = Paragraph::new(countdown_line(countdown))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(STYLE_BORDER));
    f.render_widget(panel, area);
}
