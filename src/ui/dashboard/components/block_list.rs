//! Block list component
//!
//! A table of blocks, newest first. Shared by the dashboard and the node view.

use crate::format::{format_age, short_hex};
use crate::rpc::Block as ChainBlock;
use crate::ui::dashboard::renderer::{Branch, render_notice, select_branch};
use crate::workers::RefreshOutput;
use chrono::Utc;
use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Row, Table};

const MISSING: &str = "-";

/// Render the block table, skipping the `offset` newest rows.
pub fn render_block_list(
    f: &mut Frame,
    area: Rect,
    title: &str,
    output: &RefreshOutput<Vec<ChainBlock>>,
    offset: usize,
) {
    // The list has its own loader; its height is the one it was asked for.
    match select_branch(output.requested_height, output) {
        Branch::AwaitingHeight | Branch::Loading => {
            render_notice(f, area, "Loading blocks...", Color::LightBlue)
        }
        Branch::Failed(error) => render_notice(
            f,
            area,
            &format!("Failed to load blocks: {}", error),
            Color::LightRed,
        ),
        Branch::Ready { value, .. } => {
            let now = Utc::now().timestamp().max(0) as u64;
            render_table(f, area, title, value, offset, now);
        }
    }
}

fn render_table(
    f: &mut Frame,
    area: Rect,
    title: &str,
    blocks: &[ChainBlock],
    offset: usize,
    now: u64,
) {
    let header = Row::new(vec![
        "Number", "Hash", "Miner", "Txs", "Gas Used", "Uncles", "Age",
    ])
    .style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );

    let rows = blocks.iter().rev().skip(offset).map(|block| {
        Row::new(vec![
            Cell::from(block.number.to_string()),
            Cell::from(block.hash.as_deref().map_or(MISSING.to_string(), short_hex)),
            Cell::from(block.miner.as_deref().map_or(MISSING.to_string(), short_hex)),
            Cell::from(block.transaction_count.to_string()),
            Cell::from(block.gas_used.to_string()),
            Cell::from(block.uncle_count.to_string()),
            Cell::from(format_age(block.timestamp, now)),
        ])
    });

    let widths = [
        Constraint::Length(10),
        Constraint::Length(14),
        Constraint::Length(14),
        Constraint::Length(6),
        Constraint::Length(12),
        Constraint::Length(7),
        Constraint::Fill(1),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .title(title.to_string())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(table, area);
}
