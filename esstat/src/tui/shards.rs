//! Shard relocation and recovery tables.

use ratatui::{
    layout::{Alignment, Constraint, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table},
    Frame,
};

use super::theme::{percent_color, CYAN, GREEN, STYLE_BORDER, STYLE_DIM, YELLOW};
use crate::domain::{Panel, RecoveryRecord, ShardRecord};

const HIDDEN_STATES: &[&str] = &["UNASSIGNED"];

const RELOCATION_COLUMNS: [&str; 9] =
    ["Index", "Shard", "Prirep", "State", "Store", "Docs", "Ip", "Source", "Target"];

const RECOVERY_COLUMNS: [&str; 8] =
    ["Index", "Shard", "Stage", "Source node", "Target node", "Files %", "Bytes %", "Translog ops %"];

fn panel_block(panel: Panel) -> Block<'static> {
    Block::default().borders(Borders::ALL).title(panel.title()).border_style(STYLE_BORDER)
}

fn empty(f: &mut Frame, area: Rect, panel: Panel, message: &'static str) {
    let paragraph = Paragraph::new(vec![Line::from(""), Line::from(message)])
        .alignment(Alignment::Center)
        .block(panel_block(panel));
    f.render_widget(paragraph, area);
}

fn header(columns: &[&'static str]) -> Row<'static> {
    Row::new(columns.iter().copied()).style(STYLE_DIM)
}

/// Shards that are worth listing as relocating.
pub fn visible_relocations(shards: &[ShardRecord]) -> impl Iterator<Item = &ShardRecord> {
    shards.iter().filter(|s| !HIDDEN_STATES.contains(&s.state.as_str()))
}

pub fn render_relocations(f: &mut Frame, area: Rect, shards: &[ShardRecord]) {
    let mut visible = visible_relocations(shards).peekable();
    if visible.peek().is_none() {
        empty(f, area, Panel::Relocation, "No active shards relocation");
        return;
    }

    let rows = visible.map(|s| {
        Row::new(vec![
            index_line(&s.index),
            Line::from(s.shard.clone()),
            Line::from(s.prirep.clone()),
            Line::from(s.state.clone()),
            Line::from(s.store.clone().unwrap_or_default()),
            Line::from(s.docs.clone().unwrap_or_default()),
            Line::from(s.ip.clone().unwrap_or_default()),
            Line::from(s.source.clone()),
            Line::from(s.target.clone()),
        ])
    });
    let widths = [
        Constraint::Fill(3),
        Constraint::Length(5),
        Constraint::Length(6),
        Constraint::Length(12),
        Constraint::Length(8),
        Constraint::Length(10),
        Constraint::Length(15),
        Constraint::Fill(2),
        Constraint::Fill(3),
    ];
    let table = Table::new(rows, widths).header(header(&RELOCATION_COLUMNS)).block(panel_block(Panel::Relocation));
    f.render_widget(table, area);
}

/// Shortest numeric run drawn as a date (`2025.10.24`).
const DATE_MIN_LEN: usize = 8;

/// Index name split into styled parts: letters cyan, `_`/`-` dim, numbers
/// yellow, dotted dates green. Anything else is left unstyled.
fn index_line(index: &str) -> Line<'static> {
    let bytes = index.as_bytes();
    let mut spans = Vec::new();
    let mut at = 0;
    while at < bytes.len() {
        let b = bytes[at];
        let (end, style) = if b.is_ascii_alphabetic() {
            let end = run_end(bytes, at, u8::is_ascii_alphabetic);
            (end, Style::new().fg(CYAN))
        } else if b == b'_' || b == b'-' {
            (at + 1, STYLE_DIM)
        } else if b.is_ascii_digit() {
            let mut end = run_end(bytes, at, u8::is_ascii_digit);
            while end + 1 < bytes.len() && bytes[end] == b'.' && bytes[end + 1].is_ascii_digit() {
                end = run_end(bytes, end + 1, u8::is_ascii_digit);
            }
            let part = &index[at..end];
            let color = if part.contains('.') && part.len() >= DATE_MIN_LEN { GREEN } else { YELLOW };
            (end, Style::new().fg(color))
        } else {
            let end = index[at..].chars().next().map_or(at + 1, |c| at + c.len_utf8());
            (end, Style::default())
        };
        spans.push(Span::styled(index[at..end].to_string(), style));
        at = end;
    }
    Line::from(spans)
}

fn run_end(bytes: &[u8], from: usize, class: fn(&u8) -> bool) -> usize {
    bytes[from..].iter().position(|b| !class(b)).map_or(bytes.len(), |n| from + n)
}

fn percent_cell(value: &str) -> Line<'static> {
    match percent_color(value) {
        Some(color) => Line::from(Span::styled(value.to_string(), Style::new().fg(color))),
        None => Line::from(value.to_string()),
    }
}

pub fn render_recovery(f: &mut Frame, area: Rect, records: &[RecoveryRecord]) {
    if records.is_empty() {
        empty(f, area, Panel::Recovery, "No ongoing shards recovery");
        return;
    }

    let rows = records.iter().map(|r| {
        let target = if r.source_node.is_empty() || r.target_node.is_empty() {
            r.target_node.clone()
        } else {
            shorten_target(&r.source_node, &r.target_node)
        };
        Row::new(vec![
            index_line(&r.index),
            Line::from(r.shard.clone()),
            Line::from(r.stage.clone()),
            Line::from(r.source_node.clone()),
            Line::from(target),
            percent_cell(&r.files_percent),
            percent_cell(&r.bytes_percent),
            percent_cell(&r.translog_ops_percent),
        ])
    });
    let widths = [
        Constraint::Fill(3),
        Constraint::Length(5),
        Constraint::Length(10),
        Constraint::Fill(3),
        Constraint::Fill(2),
        Constraint::Length(8),
        Constraint::Length(8),
        Constraint::Length(14),
    ];
    let table = Table::new(rows, widths).header(header(&RECOVERY_COLUMNS)).block(panel_block(Panel::Recovery));
    f.render_widget(table, area);
}

/// Split `host-data3` into `("host", "-data3")`.
fn data_suffix(part: &str) -> Option<(&str, &str)> {
    let at = part.rfind("-data")?;
    let digits = &part[at + "-data".len()..];
    if at == 0 || digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(part.split_at(at))
}

/// Drop the target node's domain when it matches the source's.
///
/// Node names like `es-07.dc1.example.com-data2` carry a `-dataN` instance
/// suffix on the last label; it is ignored for the comparison and kept on the
/// result as `▪dataN`.
pub fn shorten_target(source: &str, target: &str) -> String {
    let source_parts: Vec<&str> = source.split('.').collect();
    let target_parts: Vec<&str> = target.split('.').collect();
    if source_parts.len() < 2 || target_parts.len() < 2 {
        return target.to_string();
    }
    let host = target_parts[0];

    let source_last = source_parts[source_parts.len() - 1];
    let target_last = target_parts[target_parts.len() - 1];
    match (data_suffix(source_last), data_suffix(target_last)) {
        (Some((source_base, _)), Some((target_base, suffix))) => {
            let source_domain = &source_parts[1..source_parts.len() - 1];
            let target_domain = &target_parts[1..target_parts.len() - 1];
            if source_domain == target_domain && source_base == target_base {
                let host = data_suffix(host).map_or(host, |(base, _)| base);
                return format!("{host}{}", suffix.replacen('-', "▪", 1));
            }
        }
        _ => {
            if source_parts[1..] == target_parts[1..] {
                return host.to_string();
            }
        }
    }
    target.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shorten_same_domain() {
        assert_eq!(shorten_target("es-01.prod.example.com", "es-02.prod.example.com"), "es-02");
    }

    #[test]
    fn test_shorten_keeps_data_instance() {
        assert_eq!(
            shorten_target("log-datanode12.dc1.example.com-data1", "log-datanode13.dc1.example.com-data2"),
            "log-datanode13▪data2"
        );
    }

    #[test]
    fn test_shorten_strips_host_data_suffix() {
        assert_eq!(shorten_target("a-data1.dc.net-data1", "b-data4.dc.net-data4"), "b▪data4");
    }

    #[test]
    fn test_different_domain_left_alone() {
        assert_eq!(shorten_target("es-01.prod.example.com", "es-02.qa.example.com"), "es-02.qa.example.com");
        assert_eq!(shorten_target("es-01", "es-02.qa.example.com"), "es-02.qa.example.com");
    }

    #[test]
    fn test_unassigned_shards_hidden() {
        let shards = vec![
            ShardRecord { index: "a".into(), state: "RELOCATING".into(), ..Default::default() },
            ShardRecord { index: "b".into(), state: "UNASSIGNED".into(), ..Default::default() },
            ShardRecord { index: "c".into(), state: "INITIALIZING".into(), ..Default::default() },
        ];
        let names: Vec<_> = visible_relocations(&shards).map(|s| s.index.as_str()).collect();
        assert_eq!(names, ["a", "c"]);
    }

    fn parts(line: &Line) -> Vec<(String, Style)> {
        line.spans.iter().map(|s| (s.content.to_string(), s.style)).collect()
    }

    #[test]
    fn test_index_parts_coloured_by_kind() {
        let cyan = Style::new().fg(CYAN);
        assert_eq!(
            parts(&index_line("logger_704-2025.10.24")),
            vec![
                ("logger".to_string(), cyan),
                ("_".to_string(), STYLE_DIM),
                ("704".to_string(), Style::new().fg(YELLOW)),
                ("-".to_string(), STYLE_DIM),
                ("2025.10.24".to_string(), Style::new().fg(GREEN)),
            ]
        );
    }

    #[test]
    fn test_index_short_dotted_number_is_not_a_date() {
        let line = index_line("v1.2");
        assert_eq!(line.spans[1].content, "1.2");
        assert_eq!(line.spans[1].style, Style::new().fg(YELLOW));
    }

    #[test]
    fn test_index_keeps_other_characters() {
        let line = index_line(".kibana_1");
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, ".kibana_1");
        assert_eq!(line.spans[0].style, Style::default());
        assert_eq!(line.spans[1].style, Style::new().fg(CYAN));
    }
}
