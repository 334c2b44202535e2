use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::theme::{health_color, state_color, STYLE_BOLD, STYLE_BORDER, STYLE_DIM, STYLE_KEY};
use crate::domain::ClusterHealth;

/// One counter in the cluster state tree.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusRow {
    pub label: &'static str,
    pub value: String,
    /// `Some(true)` healthy, `Some(false)` bad, `None` worth watching.
    pub state: Option<bool>,
}

fn row(label: &'static str, value: impl ToString, state: Option<bool>) -> StatusRow {
    StatusRow { label, value: value.to_string(), state }
}

/// Zero is healthy, anything else is only a warning.
fn zero_or_warn(n: u64) -> Option<bool> {
    (n == 0).then_some(true)
}

/// Health counters grouped the way the panel shows them.
pub fn status_groups(health: &ClusterHealth) -> Vec<(&'static str, Vec<StatusRow>)> {
    let percent = (health.active_shards_percent_as_number * 100.0).round() / 100.0;
    vec![
        (
            "Shards",
            vec![
                row("Active primary", health.active_primary_shards, Some(health.active_primary_shards > 0)),
                row("Active", health.active_shards, Some(health.active_shards > 0)),
                row("Active as percent", percent, Some(percent >= 100.0)),
                row("Initializing", health.initializing_shards, zero_or_warn(health.initializing_shards)),
                row(
                    "Delayed unassigned",
                    health.delayed_unassigned_shards,
                    zero_or_warn(health.delayed_unassigned_shards),
                ),
                row("Unassigned", health.unassigned_shards, Some(health.unassigned_shards == 0)),
                row("Relocating", health.relocating_shards, Some(health.relocating_shards == 0)),
            ],
        ),
        (
            "Datanodes",
            vec![
                row("Nodes", health.number_of_nodes, Some(health.number_of_nodes > 0)),
                row("Data nodes", health.number_of_data_nodes, Some(health.number_of_data_nodes > 0)),
            ],
        ),
        (
            "Tasks",
            vec![
                row("Pending tasks", health.number_of_pending_tasks, zero_or_warn(health.number_of_pending_tasks)),
                row(
                    "Task max waiting in queue",
                    health.task_max_waiting_in_queue_millis,
                    zero_or_warn(health.task_max_waiting_in_queue_millis),
                ),
            ],
        ),
        (
            "General",
            vec![
                row(
                    "In flight fetch",
                    health.number_of_in_flight_fetch,
                    zero_or_warn(health.number_of_in_flight_fetch),
                ),
                row("Timed out", if health.timed_out { "✖" } else { "✓" }, Some(!health.timed_out)),
            ],
        ),
    ]
}

pub fn render_status(f: &mut Frame, area: Rect, health: &ClusterHealth) {
    let block = Block::default().borders(Borders::ALL).title("Cluster state").border_style(STYLE_BORDER);

    let Some(cluster) = health.cluster_name() else {
        let empty = Paragraph::new("No status retrieved").alignment(Alignment::Center).block(block);
        f.render_widget(empty, area);
        return;
    };

    let status = health.status.as_deref().unwrap_or("unknown");
    let banner = Style::new().fg(ratatui::style::Color::White).bg(health_color(status)).add_modifier(Modifier::BOLD);
    let mut lines = vec![
        Line::from(Span::styled(format!(" {} ", status.to_uppercase()), banner)).alignment(Alignment::Center),
        Line::from(""),
        Line::from(Span::styled(cluster.to_string(), STYLE_BOLD)),
    ];

    for (group, rows) in status_groups(health) {
        lines.push(Line::from(Span::styled(format!(" {group}"), STYLE_DIM)));
        for status_row in rows {
            lines.push(Line::from(vec![
                Span::styled(format!("   {:<6} ", status_row.value), STYLE_BOLD),
                Span::styled(status_row.label, Style::new().fg(state_color(status_row.state))),
            ]));
        }
    }

    f.render_widget(Paragraph::new(lines).block(block), area);
}

const HELP_KEYS: &[(&str, &str)] = &[
    ("h", "Show / hide this help"),
    ("p", "Pause / resume refresh"),
    ("e", "Enter / leave settings edit mode"),
    ("↑ ↓", "Move selection (edit mode)"),
    ("Enter", "Select setting (edit mode)"),
    ("q", "Quit"),
];

pub fn render_help(f: &mut Frame, area: Rect) {
    let mut lines = vec![Line::from("")];
    for (key, what) in HELP_KEYS {
        lines.push(Line::from(vec![
            Span::styled(format!("  {key:<6}"), STYLE_KEY),
            Span::raw(*what),
        ]));
    }
    let help = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Help ").border_style(STYLE_KEY));
    f.render_widget(help, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_row_states() {
        let health = ClusterHealth {
            cluster_name: Some("prod".to_string()),
            active_shards: 10,
            active_shards_percent_as_number: 99.987,
            initializing_shards: 2,
            unassigned_shards: 1,
            timed_out: true,
            ..Default::default()
        };
        let groups = status_groups(&health);
        let shards = &groups[0].1;

        assert_eq!(shards[1].state, Some(true));
        assert_eq!(shards[2].value, "99.99");
        assert_eq!(shards[2].state, Some(false));
        assert_eq!(shards[3].state, None);
        assert_eq!(shards[5].state, Some(false));

        let timed_out = &groups[3].1[1];
        assert_eq!(timed_out.value, "✖");
        assert_eq!(timed_out.state, Some(false));
    }
}
