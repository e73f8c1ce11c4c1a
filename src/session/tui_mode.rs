//! TUI mode execution

use super::{
    SessionData,
    messages::{print_session_exit_success, print_session_shutdown, print_session_starting},
};
use crate::ui::{self, View};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{error::Error, io};

/// Runs the application in TUI mode
///
/// Sets up the terminal, runs the UI loop starting on `view` and restores the
/// terminal before stopping the session's workers.
pub async fn run_tui_mode(session: SessionData, view: View) -> Result<(), Box<dyn Error>> {
    print_session_starting("TUI", &session.settings.environment);

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let SessionData {
        rpc,
        settings,
        event_receiver,
        events,
        cancel,
        heights,
        watcher,
    } = session;
    let app = ui::App::new(rpc, settings, heights, events, event_receiver, cancel, view);

    let result = ui::run(&mut terminal, app).await;

    // Clean up the terminal after running the application
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result?;

    print_session_shutdown();
    watcher.shutdown().await;
    print_session_exit_success();

    Ok(())
}
