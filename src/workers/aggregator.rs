//! Dashboard snapshot aggregation and block-range loading.

use super::core::{EventSender, ScopedTask};
use super::refresh::{RefreshConfig, RefreshOutput, spawn_keyed_refresh};
use crate::chain::{ChainSnapshot, block_window};
use crate::events::Worker;
use crate::logging::LogLevel;
use crate::rpc::{Block, EthRpc, RpcError};
use futures::future::try_join_all;
use std::ops::RangeInclusive;
use std::sync::Arc;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

/// Fetches every block in `range` concurrently, keeping the range order.
pub async fn fetch_block_range(
    rpc: &dyn EthRpc,
    range: RangeInclusive<u64>,
) -> Result<Vec<Block>, RpcError> {
    try_join_all(range.map(|number| rpc.block_by_number(number, false))).await
}

/// Assembles the dashboard snapshot for `height`.
///
/// The block window and the five chain metrics are requested concurrently. The
/// snapshot is only built when all of them succeed; the first error fails it.
pub async fn fetch_snapshot(
    rpc: &dyn EthRpc,
    height: u64,
    history_length: u64,
) -> Result<ChainSnapshot, RpcError> {
    let (recent_blocks, gas_price_wei, chain_id, current_block, sync_status, peer_count) = tokio::try_join!(
        fetch_block_range(rpc, block_window(height, history_length)),
        rpc.gas_price(),
        rpc.chain_id(),
        rpc.block_by_number(height, true),
        rpc.syncing(),
        rpc.peer_count(),
    )?;

    Ok(ChainSnapshot {
        height,
        chain_id,
        current_block,
        recent_blocks,
        gas_price_wei,
        peer_count,
        sync_status,
    })
}

/// Starts the dashboard aggregator: one snapshot per new height.
pub fn spawn_dashboard_aggregator(
    rpc: Arc<dyn EthRpc>,
    heights: watch::Receiver<Option<u64>>,
    history_length: u64,
    events: EventSender,
    parent: &CancellationToken,
) -> (watch::Receiver<RefreshOutput<ChainSnapshot>>, ScopedTask) {
    let config = RefreshConfig {
        worker: Worker::Aggregator,
        subject: "snapshot",
        success_level: LogLevel::Info,
    };
    spawn_keyed_refresh(
        config,
        heights,
        move |height| {
            let rpc = Arc::clone(&rpc);
            async move { fetch_snapshot(rpc.as_ref(), height, history_length).await }
        },
        events,
        parent,
    )
}

/// Starts a loader for the `length` blocks ending at each new height.
pub fn spawn_block_list_loader(
    rpc: Arc<dyn EthRpc>,
    heights: watch::Receiver<Option<u64>>,
    length: u64,
    events: EventSender,
    parent: &CancellationToken,
) -> (watch::Receiver<RefreshOutput<Vec<Block>>>, ScopedTask) {
    let config = RefreshConfig {
        worker: Worker::BlockList,
        subject: "block list",
        success_level: LogLevel::Debug,
    };
    spawn_keyed_refresh(
        config,
        heights,
        move |height| {
            let rpc = Arc::clone(&rpc);
            async move { fetch_block_range(rpc.as_ref(), block_window(height, length)).await }
        },
        events,
        parent,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::snapshot::test_support::block;
    use crate::rpc::{MockEthRpc, SyncStatus};
    use std::time::Duration;
    use tokio::sync::mpsc;

    /// A node whose head is `head`; higher blocks are not found.
    fn mock_node(head: u64) -> MockEthRpc {
        let mut rpc = MockEthRpc::new();
        rpc.expect_block_by_number().returning(move |number, _| {
            if number > head {
                Err(RpcError::BlockNotFound(number))
            } else {
                Ok(block(number))
            }
        });
        rpc.expect_gas_price().returning(|| Ok(21_000_000_000));
        rpc.expect_chain_id().returning(|| Ok(61));
        rpc.expect_syncing().returning(|| Ok(SyncStatus::NotSyncing));
        rpc.expect_peer_count().returning(|| Ok(10));
        rpc
    }

    #[tokio::test]
    async fn snapshot_collects_window_and_metrics() {
        let rpc = mock_node(100);
        let snapshot = fetch_snapshot(&rpc, 100, 16).await.unwrap();

        let numbers: Vec<u64> = snapshot.recent_blocks.iter().map(|b| b.number).collect();
        assert_eq!(numbers, (85..=100).collect::<Vec<_>>());
        assert_eq!(snapshot.current_block.number, 100);
        assert_eq!(snapshot.chain_id, 61);
        assert_eq!(snapshot.gas_price_wei, 21_000_000_000);
        assert_eq!(snapshot.peer_count, 10);
        assert_eq!(snapshot.sync_status, SyncStatus::NotSyncing);
    }

    #[tokio::test]
    async fn snapshot_window_is_clamped_near_genesis() {
        let rpc = mock_node(3);
        let snapshot = fetch_snapshot(&rpc, 3, 16).await.unwrap();
        let numbers: Vec<u64> = snapshot.recent_blocks.iter().map(|b| b.number).collect();
        assert_eq!(numbers, vec![0, 1, 2, 3]);
    }

    #[tokio::test]
    async fn current_block_is_fetched_with_full_transactions() {
        let mut rpc = MockEthRpc::new();
        rpc.expect_block_by_number()
            .withf(|number, full| *number == 10 && *full)
            .times(1)
            .returning(|number, _| Ok(block(number)));
        rpc.expect_block_by_number()
            .withf(|_, full| !*full)
            .returning(|number, _| Ok(block(number)));
        rpc.expect_gas_price().returning(|| Ok(1));
        rpc.expect_chain_id().returning(|| Ok(1));
        rpc.expect_syncing().returning(|| Ok(SyncStatus::NotSyncing));
        rpc.expect_peer_count().returning(|| Ok(0));

        let snapshot = fetch_snapshot(&rpc, 10, 4).await.unwrap();
        assert_eq!(snapshot.recent_blocks.len(), 4);
    }

    #[tokio::test]
    async fn any_failed_fetch_fails_the_snapshot() {
        let mut rpc = MockEthRpc::new();
        rpc.expect_block_by_number()
            .returning(|number, _| Ok(block(number)));
        rpc.expect_gas_price().returning(|| Ok(1));
        rpc.expect_chain_id().returning(|| Ok(1));
        rpc.expect_syncing().returning(|| Ok(SyncStatus::NotSyncing));
        rpc.expect_peer_count().returning(|| {
            Err(RpcError::Http {
                status: 502,
                message: "bad gateway".to_string(),
            })
        });

        let err = fetch_snapshot(&rpc, 50, 16).await.unwrap_err();
        assert!(matches!(err, RpcError::Http { status: 502, .. }));
    }

    #[tokio::test]
    async fn block_range_keeps_order() {
        let rpc = mock_node(20);
        let blocks = fetch_block_range(&rpc, 5..=9).await.unwrap();
        let numbers: Vec<u64> = blocks.iter().map(|b| b.number).collect();
        assert_eq!(numbers, vec![5, 6, 7, 8, 9]);
    }

    #[tokio::test]
    async fn failed_refresh_keeps_previous_snapshot() {
        let rpc: Arc<dyn EthRpc> = Arc::new(mock_node(99));
        let (height_tx, height_rx) = watch::channel(Some(99));
        let (event_tx, _event_rx) = mpsc::channel(64);
        let parent = CancellationToken::new();

        let (mut output, _task) =
            spawn_dashboard_aggregator(rpc, height_rx, 16, EventSender::new(event_tx), &parent);
        let timeout = Duration::from_secs(5);

        tokio::time::timeout(timeout, output.wait_for(|o| o.result.is_some()))
            .await
            .unwrap()
            .unwrap();

        height_tx.send(Some(100)).unwrap();
        let failed = tokio::time::timeout(timeout, output.wait_for(|o| o.error.is_some()))
            .await
            .unwrap()
            .unwrap()
            .clone();

        assert_eq!(failed.result.as_ref().map(|s| s.height), Some(99));
        assert!(matches!(
            failed.error.as_deref(),
            Some(RpcError::BlockNotFound(100))
        ));
        assert!(!failed.pending);
        assert_eq!(failed.requested_height, Some(100));
    }

    #[tokio::test]
    async fn lower_height_keeps_newer_snapshot() {
        let rpc: Arc<dyn EthRpc> = Arc::new(mock_node(101));
        let (height_tx, height_rx) = watch::channel(Some(101));
        let (event_tx, _event_rx) = mpsc::channel(64);
        let parent = CancellationToken::new();

        let (mut output, _task) =
            spawn_dashboard_aggregator(rpc, height_rx, 16, EventSender::new(event_tx), &parent);
        let timeout = Duration::from_secs(5);

        tokio::time::timeout(timeout, output.wait_for(|o| o.result.is_some()))
            .await
            .unwrap()
            .unwrap();

        height_tx.send(Some(100)).unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;

        let settled = output.borrow().clone();
        assert_eq!(settled.result.as_ref().map(|s| s.height), Some(101));
        assert_eq!(settled.requested_height, Some(101));
        assert!(!settled.pending);
    }

    #[tokio::test]
    async fn block_list_loader_publishes_window() {
        let rpc: Arc<dyn EthRpc> = Arc::new(mock_node(100));
        let (_height_tx, height_rx) = watch::channel(Some(100));
        let (event_tx, _event_rx) = mpsc::channel(64);
        let parent = CancellationToken::new();

        let (mut output, _task) =
            spawn_block_list_loader(rpc, height_rx, 12, EventSender::new(event_tx), &parent);
        let loaded = tokio::time::timeout(
            Duration::from_secs(5),
            output.wait_for(|o| o.result.is_some()),
        )
        .await
        .unwrap()
        .unwrap()
        .clone();

        let blocks = loaded.result.unwrap();
        assert_eq!(blocks.len(), 12);
        assert_eq!(blocks.first().map(|b| b.number), Some(89));
        assert_eq!(blocks.last().map(|b| b.number), Some(100));
    }
}
