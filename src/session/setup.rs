//! Session setup and initialization

use crate::config::Settings;
use crate::consts::cli_consts::EVENT_QUEUE_SIZE;
use crate::events::Event;
use crate::rpc::{EthRpc, RpcClient};
use crate::workers::{BlockNumberWatcher, EventSender, ScopedTask};
use std::error::Error;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;

/// Session data for both TUI and headless modes
pub struct SessionData {
    /// Shared node client
    pub rpc: Arc<dyn EthRpc>,
    /// Resolved settings the session runs with
    pub settings: Settings,
    /// Event receiver for worker events
    pub event_receiver: mpsc::Receiver<Event>,
    /// Handed to every loader the session starts
    pub events: EventSender,
    /// Root token; cancelling it stops every task of the session
    pub cancel: CancellationToken,
    /// Latest block height published by the watcher
    pub heights: watch::Receiver<Option<u64>>,
    /// The block height watcher
    pub watcher: ScopedTask,
}

impl SessionData {
    /// Cancels every task and waits for the watcher to stop.
    pub async fn shutdown(self) {
        self.cancel.cancel();
        self.watcher.shutdown().await;
    }
}

/// Sets up a dashboard session
///
/// This function handles all the common setup required for both TUI and headless modes:
/// 1. Creates the JSON-RPC client for the configured node
/// 2. Sets up the event channel and the root cancellation token
/// 3. Starts the block height watcher, polling once per block time
///
/// # Returns
/// * `Ok(SessionData)` - Successfully set up session
/// * `Err` - The HTTP client could not be built
pub async fn setup_session(settings: Settings) -> Result<SessionData, Box<dyn Error>> {
    let rpc: Arc<dyn EthRpc> = Arc::new(RpcClient::new(settings.environment.clone())?);
    Ok(start_session(rpc, settings))
}

/// Starts the session's watcher against an already constructed client.
pub fn start_session(rpc: Arc<dyn EthRpc>, settings: Settings) -> SessionData {
    let (event_sender, event_receiver) = mpsc::channel(EVENT_QUEUE_SIZE);
    let events = EventSender::new(event_sender);
    let cancel = CancellationToken::new();

    let watcher = BlockNumberWatcher::new(
        Arc::clone(&rpc),
        Duration::from_secs(settings.block_time_secs),
        events.clone(),
    );
    let (heights, watcher) = watcher.spawn(&cancel);

    SessionData {
        rpc,
        settings,
        event_receiver,
        events,
        cancel,
        heights,
        watcher,
    }
}
