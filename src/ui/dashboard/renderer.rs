//! Dashboard main renderer

use super::components::{block_list, charts, footer, header, logs, summary};
use super::state::DashboardState;
use crate::consts::cli_consts::CHART_HEIGHT;
use crate::rpc::RpcError;
use crate::workers::RefreshOutput;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};

/// What a screen shows for the current loader output.
#[derive(Debug)]
pub enum Branch<'a, T> {
    /// The watcher has not seen a height yet.
    AwaitingHeight,
    /// The first value is still being fetched.
    Loading,
    /// The first fetch failed; there is nothing to show.
    Failed(&'a RpcError),
    /// The latest committed value, plus the error of a newer refresh that failed.
    Ready {
        value: &'a T,
        stale_error: Option<&'a RpcError>,
    },
}

/// Picks what to render. An error without a value wins over pending.
pub fn select_branch<T>(height: Option<u64>, output: &RefreshOutput<T>) -> Branch<'_, T> {
    if height.is_none() {
        return Branch::AwaitingHeight;
    }
    match (output.result.as_deref(), output.error.as_deref()) {
        (None, Some(error)) => Branch::Failed(error),
        (None, None) => Branch::Loading,
        (Some(value), stale_error) => Branch::Ready { value, stale_error },
    }
}

pub fn render_dashboard(f: &mut Frame, state: &DashboardState) {
    if state.with_background_color {
        f.render_widget(
            Block::default().style(Style::default().bg(Color::Rgb(16, 20, 24))),
            f.area(),
        );
    }

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Fill(1),
            Constraint::Length(8),
            Constraint::Length(2),
        ])
        .margin(1)
        .split(f.area());

    header::render_header(
        f,
        main_chunks[0],
        "CHAINWATCH DASHBOARD",
        &state.environment,
        state.height,
        state.snapshot.pending,
    );

    match select_branch(state.height, &state.snapshot) {
        Branch::AwaitingHeight => render_notice(
            f,
            main_chunks[1],
            "Waiting for the node to report a block height...",
            Color::LightBlue,
        ),
        Branch::Loading => render_notice(
            f,
            main_chunks[1],
            "Loading dashboard...",
            Color::LightBlue,
        ),
        Branch::Failed(error) => render_notice(
            f,
            main_chunks[1],
            &format!("Failed to load dashboard: {}", error),
            Color::LightRed,
        ),
        Branch::Ready { value, stale_error } => {
            let body_chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(if stale_error.is_some() { 1 } else { 0 }),
                    Constraint::Length(CHART_HEIGHT * 2),
                    Constraint::Fill(1),
                ])
                .split(main_chunks[1]);

            if let Some(error) = stale_error {
                render_stale_banner(f, body_chunks[0], value.height, error);
            }

            let top_chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
                .split(body_chunks[1]);

            summary::render_summary(f, top_chunks[0], state, value);
            if let Some(dashboard_charts) = &state.charts {
                charts::render_charts(f, top_chunks[1], dashboard_charts);
            }
            block_list::render_block_list(
                f,
                body_chunks[2],
                "LAST 10 BLOCKS",
                &state.block_list,
                0,
            );
        }
    }

    logs::render_logs_panel(f, main_chunks[2], state.activity.entries());
    footer::render_footer(f, main_chunks[3], "[Q] Quit | [B] All blocks");
}

/// A bordered one-message body used for loading and error states.
pub fn render_notice(f: &mut Frame, area: Rect, message: &str, color: Color) {
    let notice = Paragraph::new(message.to_string())
        .alignment(Alignment::Center)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    f.render_widget(notice, area);
}

/// One-line banner shown above stale data.
pub fn render_stale_banner(f: &mut Frame, area: Rect, shown_height: u64, error: &RpcError) {
    let banner = Paragraph::new(format!(
        "Refresh failed, showing block {}: {}",
        shown_height, error
    ))
    .style(
        Style::default()
            .fg(Color::Black)
            .bg(Color::LightRed)
            .add_modifier(Modifier::BOLD),
    );
    f.render_widget(banner, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::snapshot::test_support::{block, snapshot};
    use crate::config::{Config, Overrides, Settings};
    use crate::rpc::Block as ChainBlock;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use std::sync::Arc;

    fn state() -> DashboardState {
        let settings =
            Settings::resolve(Overrides::default(), None, &Config::default()).unwrap();
        DashboardState::new(&settings)
    }

    fn block_list(height: u64) -> RefreshOutput<Vec<ChainBlock>> {
        RefreshOutput {
            result: Some(Arc::new((height - 11..=height).map(block).collect())),
            requested_height: Some(height),
            ..RefreshOutput::default()
        }
    }

    fn draw(state: &DashboardState) -> String {
        let backend = TestBackend::new(160, 60);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| render_dashboard(f, state)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn branch_selection() {
        let mut output = RefreshOutput::<u64>::default();
        assert!(matches!(select_branch(None, &output), Branch::AwaitingHeight));
        assert!(matches!(select_branch(Some(1), &output), Branch::Loading));

        output.pending = true;
        output.error = Some(Arc::new(RpcError::BlockNotFound(1)));
        assert!(matches!(select_branch(Some(1), &output), Branch::Failed(_)));

        output.result = Some(Arc::new(7));
        assert!(matches!(
            select_branch(Some(1), &output),
            Branch::Ready {
                value: &7,
                stale_error: Some(_)
            }
        ));
    }

    #[test]
    fn renders_waiting_message_before_first_height() {
        let screen = draw(&state());
        assert!(screen.contains("Waiting for the node"));
    }

    #[test]
    fn renders_error_when_first_snapshot_fails() {
        let mut state = state();
        state.update(
            Some(100),
            RefreshOutput {
                error: Some(Arc::new(RpcError::BlockNotFound(100))),
                requested_height: Some(100),
                ..RefreshOutput::default()
            },
            RefreshOutput::default(),
        );
        let screen = draw(&state);
        assert!(screen.contains("Failed to load dashboard: Block 100 not found"));
    }

    #[test]
    fn renders_snapshot_summary_and_charts() {
        let mut state = state();
        state.update(
            Some(100),
            RefreshOutput {
                result: Some(Arc::new(snapshot(100))),
                requested_height: Some(100),
                ..RefreshOutput::default()
            },
            block_list(100),
        );
        let screen = draw(&state);

        assert!(screen.contains("21 Gwei"));
        assert!(screen.contains("Peers: 10"));
        assert!(screen.contains("Chain ID: 61"));
        assert!(screen.contains("Network Hash Rate:"));
        assert!(screen.contains("Hash Rate Last 16 blocks"));
        assert!(screen.contains("Uncles Last 16 blocks"));
        assert!(screen.contains("LAST 10 BLOCKS"));
        assert!(!screen.contains("Refresh failed"));
    }

    #[test]
    fn keeps_previous_snapshot_when_refresh_fails() {
        let mut state = state();
        state.update(
            Some(100),
            RefreshOutput {
                result: Some(Arc::new(snapshot(99))),
                error: Some(Arc::new(RpcError::BlockNotFound(100))),
                pending: false,
                requested_height: Some(100),
            },
            block_list(99),
        );
        let screen = draw(&state);

        assert!(screen.contains("Refresh failed, showing block 99: Block 100 not found"));
        assert!(screen.contains("21 Gwei"));
    }
}
