//! Cluster settings table and the legend for its abbreviated keys.
//!
//! Setting keys are long dotted paths, so well-known words are shortened
//! (`cluster.routing.allocation.enable` renders as `c.r.a.enable`) and the
//! shortcuts panel spells them out.

use ratatui::{
    layout::{Alignment, Constraint, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table, TableState},
    Frame,
};

use super::theme::{STYLE_BOLD, STYLE_BORDER, STYLE_DIM, STYLE_EDIT_BORDER, STYLE_SELECTED};
use crate::domain::{ClusterSettings, Panel};

const SHORTCUTS: &[(&str, &str)] = &[
    ("allocation", "a"),
    ("balance", "b"),
    ("cluster", "c"),
    ("disk", "d"),
    ("indices", "i"),
    ("incoming", "in"),
    ("node", "n"),
    ("outgoing", "o"),
    ("routing", "r"),
    ("watermark", "w"),
    ("recoveries", "rec"),
    ("relocations", "rel"),
    ("concurrent", "cc"),
    ("connections", "con"),
];

const VALUE_HEADER: &str = "Value";

fn shortcut(word: &str) -> Option<&'static str> {
    SHORTCUTS.iter().find(|(long, _)| *long == word).map(|(_, short)| *short)
}

/// Setting key with known words replaced by bold abbreviations.
pub fn short_key(key: &str) -> Line<'static> {
    let mut spans = Vec::new();
    let mut word = String::new();
    let flush = |word: &mut String, spans: &mut Vec<Span<'static>>| {
        if word.is_empty() {
            return;
        }
        match shortcut(word) {
            Some(short) => spans.push(Span::styled(short, STYLE_BOLD)),
            None => spans.push(Span::raw(word.clone())),
        }
        word.clear();
    };
    for c in key.chars() {
        if c == '.' || c == '_' {
            flush(&mut word, &mut spans);
            spans.push(Span::raw(c.to_string()));
        } else {
            word.push(c);
        }
    }
    flush(&mut word, &mut spans);
    Line::from(spans)
}

pub fn render_settings(
    f: &mut Frame,
    area: Rect,
    settings: &ClusterSettings,
    selected: Option<usize>,
) {
    let (title, border) = match selected {
        Some(_) => (format!("{} [EDIT MODE]", Panel::Settings.title()), STYLE_EDIT_BORDER),
        None => (Panel::Settings.title().to_string(), STYLE_BORDER),
    };
    let block = Block::default().borders(Borders::ALL).title(title).border_style(border);

    if settings.is_empty() {
        let empty = Paragraph::new("No settings retrieved").alignment(Alignment::Center).block(block);
        f.render_widget(empty, area);
        return;
    }

    let value_width = settings
        .iter()
        .map(|(_, value)| value.chars().count())
        .max()
        .unwrap_or(0)
        .max(VALUE_HEADER.len());
    let rows = settings
        .iter()
        .map(|(key, value)| Row::new(vec![short_key(key), Line::from(value.to_string())]));
    let widths = [Constraint::Fill(1), Constraint::Length(u16::try_from(value_width).unwrap_or(u16::MAX))];
    let table = Table::new(rows, widths)
        .header(Row::new(vec!["Setting", VALUE_HEADER]).style(STYLE_DIM))
        .row_highlight_style(STYLE_SELECTED)
        .block(block);

    // The table scrolls to keep the cursor row on screen.
    let mut state = TableState::default().with_selected(selected);
    f.render_stateful_widget(table, area, &mut state);
}

pub fn render_shortcuts(f: &mut Frame, area: Rect) {
    let rows = SHORTCUTS.chunks(2).map(|pair| {
        let mut cells = Vec::with_capacity(4);
        for (long, short) in pair {
            cells.push(Line::from(Span::styled(*short, STYLE_BOLD)));
            cells.push(Line::from(Span::styled(*long, Style::default())));
        }
        Row::new(cells)
    });
    let widths = [
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(4),
        Constraint::Fill(1),
    ];
    let table = Table::new(rows, widths)
        .block(Block::default().borders(Borders::ALL).title("Shortcuts").border_style(STYLE_BORDER));
    f.render_widget(table, area);
}

/// Rows the legend needs, borders included.
pub fn shortcuts_height() -> u16 {
    u16::try_from(SHORTCUTS.len().div_ceil(2)).unwrap_or(u16::MAX).saturating_add(2)
}
