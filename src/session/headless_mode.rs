//! Headless mode execution

use super::{
    SessionData,
    messages::{print_session_exit_success, print_session_shutdown, print_session_starting},
};
use crate::chain::ChainSnapshot;
use crate::print_cmd_info;
use crate::workers::{RefreshOutput, spawn_dashboard_aggregator};
use std::error::Error;

/// Runs the application in headless mode
///
/// Prints displayable worker events and one summary line per newly committed
/// snapshot until Ctrl+C.
pub async fn run_headless_mode(mut session: SessionData) -> Result<(), Box<dyn Error>> {
    print_session_starting("headless", &session.settings.environment);

    let (mut snapshots, aggregator) = spawn_dashboard_aggregator(
        session.rpc.clone(),
        session.heights.clone(),
        session.settings.history_length,
        session.events.clone(),
        &session.cancel,
    );

    // Trigger shutdown on Ctrl+C
    let cancel = session.cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel.cancel();
        }
    });

    let block_time_secs = session.settings.block_time_secs;
    let mut last_printed: Option<u64> = None;

    loop {
        tokio::select! {
            _ = session.cancel.cancelled() => break,
            Some(event) = session.event_receiver.recv() => {
                if event.should_display() {
                    println!("{}", event);
                }
            }
            changed = snapshots.changed() => {
                if changed.is_err() {
                    break;
                }
                let output = snapshots.borrow_and_update().clone();
                if let Some(line) = next_summary(&output, &mut last_printed, block_time_secs) {
                    print_cmd_info!("Snapshot", "{}", line);
                }
            }
        }
    }

    print_session_shutdown();
    aggregator.shutdown().await;
    session.shutdown().await;
    print_session_exit_success();

    Ok(())
}

/// Summary line for a snapshot that has not been printed yet.
fn next_summary(
    output: &RefreshOutput<ChainSnapshot>,
    last_printed: &mut Option<u64>,
    block_time_secs: u64,
) -> Option<String> {
    let snapshot = output.result.as_ref()?;
    if *last_printed == Some(snapshot.height) {
        return None;
    }
    *last_printed = Some(snapshot.height);
    Some(snapshot.summary_line(block_time_secs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::snapshot::test_support::snapshot;
    use std::sync::Arc;

    #[test]
    fn each_snapshot_is_summarized_once() {
        let mut last_printed = None;
        let empty = RefreshOutput::<ChainSnapshot>::default();
        assert_eq!(next_summary(&empty, &mut last_printed, 15), None);

        let ready = RefreshOutput {
            result: Some(Arc::new(snapshot(100))),
            ..RefreshOutput::default()
        };
        let line = next_summary(&ready, &mut last_printed, 15).unwrap();
        assert!(line.starts_with("block 100 | chain 61"));
        assert_eq!(next_summary(&ready, &mut last_printed, 15), None);
    }
}
