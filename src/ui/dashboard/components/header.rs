//! Dashboard header component
//!
//! Renders the title and the node status line

use crate::environment::Environment;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

/// Render the title and a status line with the endpoint and latest height.
pub fn render_header(
    f: &mut Frame,
    area: Rect,
    title: &str,
    environment: &Environment,
    height: Option<u64>,
    refreshing: bool,
) {
    let header_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(2)])
        .split(area);

    let version = env!("CARGO_PKG_VERSION");
    let title = Paragraph::new(format!("{} v{}", title, version))
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_type(BorderType::Thick),
        );
    f.render_widget(title, header_chunks[0]);

    let (height_text, height_color) = match height {
        Some(height) => (format!("Block #{}", height), Color::LightGreen),
        None => ("Waiting for first block".to_string(), Color::LightBlue),
    };
    let mut spans = vec![
        Span::styled(
            format!("{} ({})", environment, environment.rpc_url()),
            Style::default().fg(Color::Gray),
        ),
        Span::raw("  |  "),
        Span::styled(
            height_text,
            Style::default()
                .fg(height_color)
                .add_modifier(Modifier::BOLD),
        ),
    ];
    if refreshing {
        spans.push(Span::raw("  |  "));
        spans.push(Span::styled(
            "Refreshing...",
            Style::default().fg(Color::LightYellow),
        ));
    }

    let status = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    f.render_widget(status, header_chunks[1]);
}
