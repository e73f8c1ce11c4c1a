//! Main application state and UI loop
//!
//! Owns the current screen and the loaders feeding it. Switching screens drops
//! the previous screen's loaders.

use crate::chain::ChainSnapshot;
use crate::config::Settings;
use crate::consts::cli_consts::UI_TICK_MS;
use crate::events::Event as WorkerEvent;
use crate::rpc::{Block, EthRpc};
use crate::ui::activity::ActivityLog;
use crate::ui::blocks::{NodeViewState, render_node_view};
use crate::ui::dashboard::{DashboardState, render_dashboard};
use crate::ui::feed::Feed;
use crate::workers::{EventSender, spawn_block_list_loader, spawn_dashboard_aggregator};
use crossterm::event::{self, Event, KeyCode};
use ratatui::{Frame, Terminal, backend::Backend};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;

/// Screen selectable at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum View {
    /// Summary, charts and the latest blocks.
    #[default]
    Dashboard,
    /// Scrollable list of the latest blocks.
    Blocks,
}

/// The different screens in the application.
enum Screen {
    Dashboard {
        state: Box<DashboardState>,
        snapshots: Feed<ChainSnapshot>,
        blocks: Feed<Vec<Block>>,
    },
    Blocks {
        state: Box<NodeViewState>,
        blocks: Feed<Vec<Block>>,
    },
}

impl Screen {
    fn view(&self) -> View {
        match self {
            Screen::Dashboard { .. } => View::Dashboard,
            Screen::Blocks { .. } => View::Blocks,
        }
    }

    fn activity(&mut self) -> &mut ActivityLog {
        match self {
            Screen::Dashboard { state, .. } => &mut state.activity,
            Screen::Blocks { state, .. } => &mut state.activity,
        }
    }
}

/// Application state
pub struct App {
    rpc: Arc<dyn EthRpc>,
    settings: Settings,
    /// Heights published by the session's watcher.
    heights: watch::Receiver<Option<u64>>,
    /// Handed to the loaders of each screen.
    events: EventSender,
    /// Receives events from worker tasks.
    event_receiver: mpsc::Receiver<WorkerEvent>,
    /// Parent of every loader; cancelled on quit.
    cancel: CancellationToken,
    current_screen: Screen,
}

impl App {
    pub fn new(
        rpc: Arc<dyn EthRpc>,
        settings: Settings,
        heights: watch::Receiver<Option<u64>>,
        events: EventSender,
        event_receiver: mpsc::Receiver<WorkerEvent>,
        cancel: CancellationToken,
        view: View,
    ) -> Self {
        let current_screen = open_screen(
            view,
            &rpc,
            &settings,
            &heights,
            &events,
            &cancel,
            ActivityLog::default(),
        );
        Self {
            rpc,
            settings,
            heights,
            events,
            event_receiver,
            cancel,
            current_screen,
        }
    }

    /// Replaces the current screen, stopping its loaders. The activity log carries over.
    pub fn show(&mut self, view: View) {
        if self.current_screen.view() == view {
            return;
        }
        let activity = self.current_screen.activity().take();
        self.current_screen = open_screen(
            view,
            &self.rpc,
            &self.settings,
            &self.heights,
            &self.events,
            &self.cancel,
            activity,
        );
    }

    /// Copies the latest worker output into the current screen's state.
    fn update(&mut self) {
        while let Ok(event) = self.event_receiver.try_recv() {
            self.current_screen.activity().push(event);
        }

        let height = *self.heights.borrow();
        match &mut self.current_screen {
            Screen::Dashboard {
                state,
                snapshots,
                blocks,
            } => state.update(height, snapshots.latest(), blocks.latest()),
            Screen::Blocks { state, blocks } => state.update(height, blocks.latest()),
        }
    }
}

fn open_screen(
    view: View,
    rpc: &Arc<dyn EthRpc>,
    settings: &Settings,
    heights: &watch::Receiver<Option<u64>>,
    events: &EventSender,
    cancel: &CancellationToken,
    activity: ActivityLog,
) -> Screen {
    match view {
        View::Dashboard => {
            let snapshots = Feed::new(spawn_dashboard_aggregator(
                Arc::clone(rpc),
                heights.clone(),
                settings.history_length,
                events.clone(),
                cancel,
            ));
            let blocks = Feed::new(spawn_block_list_loader(
                Arc::clone(rpc),
                heights.clone(),
                settings.block_list_length,
                events.clone(),
                cancel,
            ));
            let mut state = DashboardState::new(settings);
            state.activity = activity;
            Screen::Dashboard {
                state: Box::new(state),
                snapshots,
                blocks,
            }
        }
        View::Blocks => {
            let blocks = Feed::new(spawn_block_list_loader(
                Arc::clone(rpc),
                heights.clone(),
                settings.node_list_length,
                events.clone(),
                cancel,
            ));
            let mut state = NodeViewState::new(settings);
            state.activity = activity;
            Screen::Blocks {
                state: Box::new(state),
                blocks,
            }
        }
    }
}

/// Runs the application UI in a loop, handling events and rendering the current screen.
pub async fn run<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> std::io::Result<()> {
    loop {
        app.update();
        terminal.draw(|f| render(f, &app.current_screen))?;

        // Poll for key events
        if event::poll(Duration::from_millis(UI_TICK_MS))? {
            if let Event::Key(key) = event::read()? {
                // Skip events that are not KeyEventKind::Press
                if key.kind == event::KeyEventKind::Release {
                    continue;
                }

                if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
                    app.cancel.cancel();
                    return Ok(());
                }

                match key.code {
                    KeyCode::Char('b') => app.show(View::Blocks),
                    KeyCode::Char('d') => app.show(View::Dashboard),
                    code => {
                        if let Screen::Blocks { state, .. } = &mut app.current_screen {
                            state.handle_key(code);
                        }
                    }
                }
            }
        }
    }
}

/// Renders the current screen based on the application state.
fn render(f: &mut Frame, screen: &Screen) {
    match screen {
        Screen::Dashboard { state, .. } => render_dashboard(f, state),
        Screen::Blocks { state, .. } => render_node_view(f, state),
    }
}
