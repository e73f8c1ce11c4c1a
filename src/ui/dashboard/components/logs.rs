//! Dashboard logs panel component
//!
//! Renders activity logs with event formatting

use super::super::utils::{clean_http_error_message, format_compact_timestamp, get_worker_color};
use crate::events::{Event as WorkerEvent, EventType};
use crate::logging::LogLevel;
use ratatui::Frame;
use ratatui::prelude::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap};
use std::collections::VecDeque;

/// Render the newest displayable events, newest first.
pub fn render_logs_panel(
    f: &mut Frame,
    area: ratatui::layout::Rect,
    activity_logs: &VecDeque<WorkerEvent>,
) {
    // Borders plus vertical padding take three rows
    let log_count = (area.height.saturating_sub(3) as usize).max(1);

    let log_lines: Vec<Line> = activity_logs
        .iter()
        .filter(|event| event.should_display())
        .rev()
        .take(log_count)
        .map(|event| {
            let status_icon = match (event.event_type, event.log_level) {
                (EventType::Success, _) => "✅",
                (EventType::Error, LogLevel::Error) => "❌",
                (EventType::Error, _) => "⚠",
                (EventType::Refresh, _) => "•",
            };

            Line::from(vec![
                Span::raw(format!("{} ", status_icon)),
                Span::styled(
                    format!("{} ", format_compact_timestamp(&event.timestamp)),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    clean_http_error_message(&event.msg),
                    Style::default().fg(get_worker_color(&event.worker)),
                ),
            ])
        })
        .collect();

    let log_paragraph = if log_lines.is_empty() {
        Paragraph::new(vec![Line::from("Starting up...")])
    } else {
        Paragraph::new(log_lines)
    };

    let logs_block = Block::default()
        .title("ACTIVITY LOG")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::horizontal(1));

    f.render_widget(
        log_paragraph.block(logs_block).wrap(Wrap { trim: true }),
        area,
    );
}
