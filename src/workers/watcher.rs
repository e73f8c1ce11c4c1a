//! Block height polling.

use super::core::{EventSender, ScopedTask};
use crate::error_classifier::ErrorClassifier;
use crate::events::{EventType, Worker};
use crate::logging::LogLevel;
use crate::rpc::EthRpc;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{MissedTickBehavior, interval};
use tokio_util::sync::CancellationToken;

/// Polls `eth_blockNumber` and publishes the latest known height.
///
/// The published value is `None` until the first poll succeeds and only ever
/// increases. Failed polls are reported at debug level and retried on the next tick.
pub struct BlockNumberWatcher {
    rpc: Arc<dyn EthRpc>,
    poll_interval: Duration,
    events: EventSender,
}

impl BlockNumberWatcher {
    pub fn new(rpc: Arc<dyn EthRpc>, poll_interval: Duration, events: EventSender) -> Self {
        Self {
            rpc,
            poll_interval,
            events,
        }
    }

    pub fn spawn(self, parent: &CancellationToken) -> (watch::Receiver<Option<u64>>, ScopedTask) {
        let (height_tx, height_rx) = watch::channel(None);

        let task = ScopedTask::spawn(parent, move |cancel| async move {
            let classifier = ErrorClassifier::new();
            let mut ticker = interval(self.poll_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = ticker.tick() => {}
                }
                let polled = tokio::select! {
                    _ = cancel.cancelled() => break,
                    polled = self.rpc.block_number() => polled,
                };

                match polled {
                    Ok(height) => {
                        // A load-balanced endpoint may answer from a node that is behind.
                        let changed = height_tx.send_if_modified(|current| {
                            if current.is_some_and(|known| height <= known) {
                                return false;
                            }
                            *current = Some(height);
                            true
                        });
                        if changed {
                            self.events
                                .send_worker_event(
                                    Worker::BlockWatcher,
                                    format!("New block {}", height),
                                    EventType::Refresh,
                                    LogLevel::Debug,
                                )
                                .await;
                        }
                    }
                    Err(e) => {
                        self.events
                            .send_worker_event(
                                Worker::BlockWatcher,
                                format!("Failed to poll block number: {}", e),
                                EventType::Error,
                                classifier.classify_poll_error(&e),
                            )
                            .await;
                    }
                }
            }
        });

        (height_rx, task)
    }
}
