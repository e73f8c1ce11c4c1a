//! Dashboard state management

use crate::chain::{ChainSnapshot, DashboardCharts};
use crate::config::Settings;
use crate::environment::Environment;
use crate::rpc::Block;
use crate::ui::activity::ActivityLog;
use crate::workers::RefreshOutput;

/// Everything the dashboard renders, copied from the loaders once per UI tick.
#[derive(Debug)]
pub struct DashboardState {
    /// The node being watched.
    pub environment: Environment,
    /// Used to derive hash rates from difficulty.
    pub block_time_secs: u64,
    /// Number of blocks charted.
    pub history_length: u64,
    /// Latest height published by the watcher.
    pub height: Option<u64>,
    /// Output of the snapshot aggregator.
    pub snapshot: RefreshOutput<ChainSnapshot>,
    /// Output of the "Last 10 blocks" loader.
    pub block_list: RefreshOutput<Vec<Block>>,
    /// Chart series of the snapshot currently held in `snapshot.result`.
    pub charts: Option<DashboardCharts>,
    /// Activity logs for display
    pub activity: ActivityLog,
    /// Whether to enable background colors
    pub with_background_color: bool,
}

impl DashboardState {
    pub fn new(settings: &Settings) -> Self {
        Self {
            environment: settings.environment.clone(),
            block_time_secs: settings.block_time_secs,
            history_length: settings.history_length,
            height: None,
            snapshot: RefreshOutput::default(),
            block_list: RefreshOutput::default(),
            charts: None,
            activity: ActivityLog::default(),
            with_background_color: settings.with_background_color,
        }
    }
}
