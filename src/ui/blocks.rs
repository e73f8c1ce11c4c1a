//! Node view: a scrollable list of the latest blocks.

use crate::config::Settings;
use crate::environment::Environment;
use crate::rpc::Block;
use crate::ui::activity::ActivityLog;
use crate::ui::dashboard::components::{block_list, footer, header, logs};
use crate::ui::dashboard::renderer::{Branch, render_stale_banner, select_branch};
use crate::workers::RefreshOutput;
use crossterm::event::KeyCode;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::{Color, Style};
use ratatui::widgets::Block as Background;

/// Rows moved by PageUp / PageDown.
const PAGE_SIZE: usize = 5;

#[derive(Debug)]
pub struct NodeViewState {
    pub environment: Environment,
    /// Number of blocks listed, ending at the current height.
    pub node_list_length: u64,
    pub height: Option<u64>,
    pub blocks: RefreshOutput<Vec<Block>>,
    /// Number of newest rows scrolled past.
    pub scroll: usize,
    pub activity: ActivityLog,
    pub with_background_color: bool,
}

impl NodeViewState {
    pub fn new(settings: &Settings) -> Self {
        Self {
            environment: settings.environment.clone(),
            node_list_length: settings.node_list_length,
            height: None,
            blocks: RefreshOutput::default(),
            scroll: 0,
            activity: ActivityLog::default(),
            with_background_color: settings.with_background_color,
        }
    }

    pub fn update(&mut self, height: Option<u64>, blocks: RefreshOutput<Vec<Block>>) {
        self.height = height;
        self.blocks = blocks;
        self.scroll = self.scroll.min(self.max_scroll());
        self.activity.drain_pending();
    }

    pub fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Down => self.scroll_by(1),
            KeyCode::Up => self.scroll_back(1),
            KeyCode::PageDown => self.scroll_by(PAGE_SIZE),
            KeyCode::PageUp => self.scroll_back(PAGE_SIZE),
            KeyCode::Home => self.scroll = 0,
            _ => {}
        }
    }

    fn scroll_by(&mut self, rows: usize) {
        self.scroll = (self.scroll + rows).min(self.max_scroll());
    }

    fn scroll_back(&mut self, rows: usize) {
        self.scroll = self.scroll.saturating_sub(rows);
    }

    /// The oldest block always stays on screen.
    fn max_scroll(&self) -> usize {
        self.blocks
            .result
            .as_ref()
            .map_or(0, |blocks| blocks.len().saturating_sub(1))
    }
}

pub fn render_node_view(f: &mut Frame, state: &NodeViewState) {
    if state.with_background_color {
        f.render_widget(
            Background::default().style(Style::default().bg(Color::Rgb(16, 20, 24))),
            f.area(),
        );
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(5),
            Constraint::Length(2),
        ])
        .margin(1)
        .split(f.area());

    header::render_header(
        f,
        chunks[0],
        "CHAINWATCH BLOCKS",
        &state.environment,
        state.height,
        state.blocks.pending,
    );

    if let Branch::Ready {
        value,
        stale_error: Some(error),
    } = select_branch(state.height, &state.blocks)
    {
        let shown = value.last().map_or(0, |block| block.number);
        render_stale_banner(f, chunks[1], shown, error);
    }

    block_list::render_block_list(
        f,
        chunks[2],
        &format!("LAST {} BLOCKS", state.node_list_length),
        &state.blocks,
        state.scroll,
    );
    logs::render_logs_panel(f, chunks[3], state.activity.entries());
    footer::render_footer(
        f,
        chunks[4],
        "[Q] Quit | [D] Dashboard | [↑/↓] Scroll | [PgUp/PgDn] Page",
    );
}
