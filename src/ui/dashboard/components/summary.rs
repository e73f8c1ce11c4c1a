//! Dashboard summary component
//!
//! Renders the headline chain metrics of the current snapshot

use super::super::state::DashboardState;
use crate::chain::ChainSnapshot;
use crate::format::{format_hash_rate, format_timestamp, wei_to_gwei};
use ratatui::Frame;
use ratatui::prelude::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap};

pub fn render_summary(
    f: &mut Frame,
    area: ratatui::layout::Rect,
    state: &DashboardState,
    snapshot: &ChainSnapshot,
) {
    // The watcher may already be ahead of the snapshot.
    let height = state.height.unwrap_or(snapshot.height);

    let rows = [
        ("Block Height", height.to_string(), Color::LightGreen),
        ("Chain ID", snapshot.chain_id.to_string(), Color::LightBlue),
        ("Syncing", snapshot.sync_status.to_string(), Color::LightYellow),
        (
            "Gas Price",
            format!("{} Gwei", wei_to_gwei(snapshot.gas_price_wei)),
            Color::Cyan,
        ),
        (
            "Network Hash Rate",
            format!(
                "{} GH/s",
                format_hash_rate(&snapshot.current_block, state.block_time_secs)
            ),
            Color::LightMagenta,
        ),
        ("Peers", snapshot.peer_count.to_string(), Color::LightGreen),
        (
            "Mined",
            format_timestamp(snapshot.current_block.timestamp),
            Color::Gray,
        ),
    ];

    let lines: Vec<Line> = rows
        .into_iter()
        .map(|(label, value, color)| {
            Line::from(vec![
                Span::styled(format!("{}: ", label), Style::default().fg(Color::Gray)),
                Span::styled(value, Style::default().fg(color)),
            ])
        })
        .collect();

    let block = Block::default()
        .title(format!("SNAPSHOT @ {}", snapshot.height))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::uniform(1));

    f.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true }),
        area,
    );
}
