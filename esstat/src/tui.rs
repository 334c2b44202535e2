//! # Terminal User Interface (TUI)
//!
//! Draws one frame from a [`FrameView`]. Rendering reads the snapshot and UI
//! state and writes nothing back.
//!
//! ```text
//! ┌ header: app │ cluster │ clock ───────────────────────────────┐
//! ├ status / help ┬ relocation table ────────────────────────────┤
//! │ settings      │                                              │
//! │ shortcuts     ├ recovery table ──────────────────────────────┤
//! │ countdown     │                                              │
//! ├ error banner (only while an error is set) ───────────────────┤
//! ```
//!
//! Until the first snapshot arrives the main area is a loading message.
//!
//! ## Sub-Modules
//!
//! - `status` - cluster health tree and the help panel
//! - `settings` - tracked settings table and abbreviation legend
//! - `countdown` - next-refresh indicator
//! - `shards` - relocation and recovery tables
//! - `layout` - breakpoints for small terminals
//! - `theme` - colours

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

mod countdown;
pub mod layout;
mod settings;
mod shards;
mod status;
mod theme;

pub use countdown::Countdown;
pub use settings::short_key;
pub use shards::shorten_target;

use theme::{RED, STYLE_BOLD, STYLE_BORDER, YELLOW};

use crate::snapshot::Snapshot;
use crate::ui::UiState;

pub const APP_NAME: &str = "esstat";

/// Everything one frame needs.
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub snapshot: &'a Snapshot,
    pub ui: &'a UiState,
    pub data_ready: bool,
    pub countdown: Countdown,
    /// Local wall-clock time for the header.
    pub clock: &'a str,
}

pub fn render(f: &mut Frame, view: &FrameView) {
    let mut constraints = vec![Constraint::Length(3), Constraint::Min(0)];
    if view.ui.error().is_some() {
        constraints.push(Constraint::Length(3));
    }
    let outer = Layout::default().direction(Direction::Vertical).constraints(constraints).split(f.area());

    render_header(f, outer[0], view);
    if view.data_ready {
        render_main(f, outer[1], view);
    } else {
        render_loading(f, outer[1]);
    }
    if let Some(message) = view.ui.error() {
        render_error(f, outer[2], message);
    }
}

fn render_header(f: &mut Frame, area: Rect, view: &FrameView) {
    let cluster = view.snapshot.status.cluster_name().unwrap_or("---");
    let block = Block::default().borders(Borders::ALL).border_style(STYLE_BORDER);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(inner);
    f.render_widget(Paragraph::new(Span::styled(APP_NAME, STYLE_BOLD)), cols[0]);
    f.render_widget(
        Paragraph::new(Span::styled(cluster.to_string(), STYLE_BOLD)).alignment(Alignment::Center),
        cols[1],
    );
    f.render_widget(Paragraph::new(view.clock.to_string()).alignment(Alignment::Right), cols[2]);
}

fn render_loading(f: &mut Frame, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Fill(1), Constraint::Length(1), Constraint::Fill(1)])
        .split(area);
    let text = Paragraph::new(Span::styled(
        "Waiting for data from Elasticsearch...",
        Style::new().fg(YELLOW).add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center);
    f.render_widget(text, rows[1]);
}

fn render_main(f: &mut Frame, area: Rect, view: &FrameView) {
    let config = layout::compute_layout(area.width, area.height);
    let direction = if config.single_column { Direction::Vertical } else { Direction::Horizontal };
    let main = Layout::default().direction(direction).constraints(config.main_constraints()).split(area);

    // Side column
    let settings_height = u16::try_from(view.snapshot.settings.len()).unwrap_or(u16::MAX).saturating_add(3);
    let mut side = Vec::new();
    if config.show_status_panel {
        side.push(Constraint::Min(8));
    }
    if config.show_status_panel {
        side.push(Constraint::Length(settings_height.max(5)));
    } else {
        side.push(Constraint::Fill(1));
    }
    if config.show_shortcuts {
        side.push(Constraint::Length(settings::shortcuts_height()));
    }
    side.push(Constraint::Length(3));
    let side = Layout::default().direction(Direction::Vertical).constraints(side).split(main[0]);

    let mut slot = side.iter().copied();
    if config.show_status_panel {
        if let Some(area) = slot.next() {
            if view.ui.help_visible() {
                status::render_help(f, area);
            } else {
                status::render_status(f, area, &view.snapshot.status);
            }
        }
    }
    if let Some(area) = slot.next() {
        let selected = view.ui.edit_mode().then(|| view.ui.selected_row());
        settings::render_settings(f, area, &view.snapshot.settings, selected);
    }
    if config.show_shortcuts {
        if let Some(area) = slot.next() {
            settings::render_shortcuts(f, area);
        }
    }
    if let Some(area) = slot.next() {
        countdown::render_countdown(f, area, view.countdown);
    }

    // Shard tables
    let body = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(main[1]);
    shards::render_relocations(f, body[0], &view.snapshot.relocations);
    shards::render_recovery(f, body[1], &view.snapshot.recovery);
}

fn render_error(f: &mut Frame, area: Rect, message: &str) {
    let banner = Paragraph::new(Line::from(Span::styled(
        format!(" ⚠ {message}"),
        Style::new().fg(Color::White).bg(RED).add_modifier(Modifier::BOLD),
    )))
    .block(Block::default().borders(Borders::ALL).border_style(Style::new().fg(RED)));
    f.render_widget(banner, area);
}
