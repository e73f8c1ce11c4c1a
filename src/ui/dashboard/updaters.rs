//! Dashboard state update logic

use super::state::DashboardState;
use crate::chain::{ChainSnapshot, DashboardCharts};
use crate::rpc::Block;
use crate::workers::RefreshOutput;
use std::sync::Arc;

impl DashboardState {
    /// Update the dashboard state with the loaders' latest output.
    pub fn update(
        &mut self,
        height: Option<u64>,
        snapshot: RefreshOutput<ChainSnapshot>,
        block_list: RefreshOutput<Vec<Block>>,
    ) {
        self.height = height;

        if !same_value(&self.snapshot.result, &snapshot.result) {
            self.charts = snapshot.result.as_ref().map(|snapshot| {
                DashboardCharts::from_blocks(&snapshot.recent_blocks, self.block_time_secs)
            });
        }
        self.snapshot = snapshot;
        self.block_list = block_list;

        self.activity.drain_pending();
    }
}

fn same_value<T>(a: &Option<Arc<T>>, b: &Option<Arc<T>>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => Arc::ptr_eq(a, b),
        (None, None) => true,
        _ => false,
    }
}
