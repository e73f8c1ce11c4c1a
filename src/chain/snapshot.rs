use crate::format::{format_hash_rate, wei_to_gwei};
use crate::rpc::{Block, SyncStatus};

/// Consolidated chain metrics for one height.
///
/// Built only when every fetch for the height succeeded and never mutated
/// afterwards; a newer height replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainSnapshot {
    /// Height this snapshot was requested for.
    pub height: u64,
    pub chain_id: u64,
    /// The block at `height`, fetched with full transactions.
    pub current_block: Block,
    /// Window of blocks ending at `height`, oldest first.
    pub recent_blocks: Vec<Block>,
    pub gas_price_wei: u128,
    pub peer_count: u64,
    pub sync_status: SyncStatus,
}

impl ChainSnapshot {
    /// One-line summary used by headless mode.
    pub fn summary_line(&self, block_time_secs: u64) -> String {
        format!(
            "block {} | chain {} | syncing {} | gas {} Gwei | hash rate {} GH/s | peers {}",
            self.height,
            self.chain_id,
            self.sync_status,
            wei_to_gwei(self.gas_price_wei),
            format_hash_rate(&self.current_block, block_time_secs),
            self.peer_count
        )
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::snapshot;

    #[test]
    fn summary_line_formats_units() {
        let line = snapshot(100).summary_line(15);
        assert_eq!(
            line,
            "block 100 | chain 61 | syncing No | gas 21 Gwei | hash rate 100.00 GH/s | peers 10"
        );
    }
}
