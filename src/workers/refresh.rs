//! Height-keyed refresh with an out-of-order guard.
//!
//! A loader fetches something for every new height it sees. Fetches for different
//! heights may overlap and finish in any order, so each request carries a
//! monotonic [`RequestToken`] and only the most recently issued token may commit.
//! Anything else is discarded on arrival.

use super::core::{EventSender, ScopedTask};
use crate::error_classifier::ErrorClassifier;
use crate::events::{EventType, Worker};
use crate::logging::LogLevel;
use crate::rpc::RpcError;
use futures::FutureExt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

/// Identifies one request issued by a [`RefreshSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken {
    id: u64,
    height: u64,
}

impl RequestToken {
    pub fn height(&self) -> u64 {
        self.height
    }
}

/// State of the most recent request.
#[derive(Debug)]
pub enum RefreshState<T> {
    Idle,
    Loading { height: u64 },
    Ready(Arc<T>),
    Failed(Arc<RpcError>),
}

impl<T> Clone for RefreshState<T> {
    fn clone(&self) -> Self {
        match self {
            RefreshState::Idle => RefreshState::Idle,
            RefreshState::Loading { height } => RefreshState::Loading { height: *height },
            RefreshState::Ready(value) => RefreshState::Ready(Arc::clone(value)),
            RefreshState::Failed(error) => RefreshState::Failed(Arc::clone(error)),
        }
    }
}

/// What a loader publishes: the latest good value plus the state of the newest request.
#[derive(Debug)]
pub struct RefreshOutput<T> {
    /// Last successfully committed value. Survives later failures.
    pub result: Option<Arc<T>>,
    /// Error of the newest request, if it failed.
    pub error: Option<Arc<RpcError>>,
    /// Whether the newest request is still in flight.
    pub pending: bool,
    pub requested_height: Option<u64>,
}

impl<T> Default for RefreshOutput<T> {
    fn default() -> Self {
        Self {
            result: None,
            error: None,
            pending: false,
            requested_height: None,
        }
    }
}

impl<T> Clone for RefreshOutput<T> {
    fn clone(&self) -> Self {
        Self {
            result: self.result.clone(),
            error: self.error.clone(),
            pending: self.pending,
            requested_height: self.requested_height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commit {
    Applied,
    Stale,
}

/// Request/commit bookkeeping for one loader.
#[derive(Debug)]
pub struct RefreshSession<T> {
    next_id: u64,
    latest: Option<RequestToken>,
    state: RefreshState<T>,
    last_ready: Option<Arc<T>>,
}

impl<T> Default for RefreshSession<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RefreshSession<T> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            latest: None,
            state: RefreshState::Idle,
            last_ready: None,
        }
    }

    /// Starts a request for `height`, superseding any request in flight.
    ///
    /// Returns `None` unless `height` is above the newest requested height, so a
    /// committed value is only ever replaced by one for a higher block.
    pub fn begin(&mut self, height: u64) -> Option<RequestToken> {
        if self.latest.is_some_and(|token| height <= token.height) {
            return None;
        }
        self.next_id += 1;
        let token = RequestToken {
            id: self.next_id,
            height,
        };
        self.latest = Some(token);
        self.state = RefreshState::Loading { height };
        Some(token)
    }

    /// Commits the outcome of `token` if it is still the newest request.
    pub fn complete(&mut self, token: RequestToken, outcome: Result<T, RpcError>) -> Commit {
        if self.latest != Some(token) {
            return Commit::Stale;
        }
        self.state = match outcome {
            Ok(value) => {
                let value = Arc::new(value);
                self.last_ready = Some(Arc::clone(&value));
                RefreshState::Ready(value)
            }
            Err(error) => RefreshState::Failed(Arc::new(error)),
        };
        Commit::Applied
    }

    pub fn state(&self) -> &RefreshState<T> {
        &self.state
    }

    pub fn output(&self) -> RefreshOutput<T> {
        RefreshOutput {
            result: self.last_ready.clone(),
            error: match &self.state {
                RefreshState::Failed(error) => Some(Arc::clone(error)),
                _ => None,
            },
            pending: matches!(self.state, RefreshState::Loading { .. }),
            requested_height: self.latest.map(|token| token.height),
        }
    }
}

/// How a keyed loader reports itself in the activity log.
#[derive(Debug, Clone, Copy)]
pub struct RefreshConfig {
    pub worker: Worker,
    /// What is being loaded, e.g. "snapshot".
    pub subject: &'static str,
    /// Level of the "loaded" event; below `Info` it is only shown when debugging.
    pub success_level: LogLevel,
}

/// Spawns a loader that runs `fetch` for every new height published on `heights`.
///
/// In-flight fetches are owned by the loader and aborted when it stops.
pub fn spawn_keyed_refresh<T, F, Fut>(
    config: RefreshConfig,
    mut heights: watch::Receiver<Option<u64>>,
    fetch: F,
    events: EventSender,
    parent: &CancellationToken,
) -> (watch::Receiver<RefreshOutput<T>>, ScopedTask)
where
    T: Send + Sync + 'static,
    F: Fn(u64) -> Fut + Send + 'static,
    Fut: Future<Output = Result<T, RpcError>> + Send + 'static,
{
    let (output_tx, output_rx) = watch::channel(RefreshOutput::default());

    let task = ScopedTask::spawn(parent, move |cancel| async move {
        let classifier = ErrorClassifier::new();
        let mut session = RefreshSession::new();
        let mut in_flight: JoinSet<(RequestToken, Result<T, RpcError>)> = JoinSet::new();
        let mut next_height = *heights.borrow_and_update();

        loop {
            if let Some(token) = next_height.take().and_then(|h| session.begin(h)) {
                let request = fetch(token.height());
                in_flight.spawn(async move {
                    // A panicking fetch must still complete its token.
                    let outcome = AssertUnwindSafe(request)
                        .catch_unwind()
                        .await
                        .unwrap_or_else(|panic| Err(RpcError::Task(panic_message(&*panic))));
                    (token, outcome)
                });
                output_tx.send_replace(session.output());
                events
                    .send_worker_event(
                        config.worker,
                        format!("Loading {} for block {}", config.subject, token.height()),
                        EventType::Refresh,
                        LogLevel::Debug,
                    )
                    .await;
            }

            tokio::select! {
                _ = cancel.cancelled() => break,
                changed = heights.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    next_height = *heights.borrow_and_update();
                }
                Some(joined) = in_flight.join_next(), if !in_flight.is_empty() => {
                    let (token, outcome) = match joined {
                        Ok(joined) => joined,
                        Err(e) => {
                            log::debug!("{} fetch task ended abnormally: {}", config.subject, e);
                            continue;
                        }
                    };
                    let failure = outcome
                        .as_ref()
                        .err()
                        .map(|e| (e.to_string(), classifier.classify_refresh_error(e)));

                    match session.complete(token, outcome) {
                        Commit::Applied => {
                            output_tx.send_replace(session.output());
                            let (msg, event_type, level) = match failure {
                                Some((error, level)) => (
                                    format!(
                                        "Failed to load {} for block {}: {}",
                                        config.subject,
                                        token.height(),
                                        error
                                    ),
                                    EventType::Error,
                                    level,
                                ),
                                None if config.success_level >= LogLevel::Info => (
                                    format!("Loaded {} for block {}", config.subject, token.height()),
                                    EventType::Success,
                                    config.success_level,
                                ),
                                None => (
                                    format!("Loaded {} for block {}", config.subject, token.height()),
                                    EventType::Refresh,
                                    config.success_level,
                                ),
                            };
                            events
                                .send_worker_event(config.worker, msg, event_type, level)
                                .await;
                        }
                        Commit::Stale => {
                            events
                                .send_worker_event(
                                    config.worker,
                                    format!(
                                        "Discarded stale {} for block {}",
                                        config.subject,
                                        token.height()
                                    ),
                                    EventType::Refresh,
                                    LogLevel::Debug,
                                )
                                .await;
                        }
                    }
                }
            }
        }
    });

    (output_rx, task)
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "fetch panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;
    use tokio::sync::{mpsc, oneshot};

    fn not_found(height: u64) -> RpcError {
        RpcError::BlockNotFound(height)
    }

    #[test]
    fn newer_request_wins_regardless_of_completion_order() {
        let mut session = RefreshSession::new();
        let first = session.begin(1).unwrap();
        let second = session.begin(2).unwrap();

        assert_eq!(session.complete(second, Ok(2u64)), Commit::Applied);
        assert_eq!(session.complete(first, Ok(1u64)), Commit::Stale);

        let output = session.output();
        assert_eq!(output.result.as_deref(), Some(&2));
        assert!(!output.pending);
        assert_eq!(output.requested_height, Some(2));
    }

    #[test]
    fn stale_failure_is_ignored() {
        let mut session = RefreshSession::<u64>::new();
        let first = session.begin(1).unwrap();
        let second = session.begin(2).unwrap();

        assert_eq!(session.complete(first, Err(not_found(1))), Commit::Stale);
        assert!(session.output().pending);
        assert_eq!(session.complete(second, Ok(2)), Commit::Applied);
        assert!(session.output().error.is_none());
    }

    #[test]
    fn repeated_height_is_not_refetched() {
        let mut session = RefreshSession::<u64>::new();
        assert!(session.begin(5).is_some());
        assert!(session.begin(5).is_none());
        assert!(session.begin(6).is_some());
    }

    #[test]
    fn lower_height_never_replaces_committed_value() {
        let mut session = RefreshSession::new();
        let newer = session.begin(101).unwrap();
        session.complete(newer, Ok(101u64));

        assert!(session.begin(100).is_none());
        let output = session.output();
        assert_eq!(output.result.as_deref(), Some(&101));
        assert_eq!(output.requested_height, Some(101));
        assert!(!output.pending);
    }

    #[test]
    fn failure_keeps_previous_result() {
        let mut session = RefreshSession::new();
        let ok = session.begin(99).unwrap();
        session.complete(ok, Ok(99u64));
        let failing = session.begin(100).unwrap();
        session.complete(failing, Err(not_found(100)));

        let output = session.output();
        assert_eq!(output.result.as_deref(), Some(&99));
        assert!(matches!(
            output.error.as_deref(),
            Some(RpcError::BlockNotFound(100))
        ));
        assert!(matches!(session.state(), RefreshState::Failed(_)));
    }

    #[test]
    fn new_request_clears_previous_error() {
        let mut session = RefreshSession::<u64>::new();
        let failing = session.begin(1).unwrap();
        session.complete(failing, Err(not_found(1)));
        session.begin(2);

        let output = session.output();
        assert!(output.error.is_none());
        assert!(output.pending);
        assert!(matches!(
            session.state(),
            RefreshState::Loading { height: 2 }
        ));
    }

    #[test]
    fn idle_session_publishes_nothing() {
        let session = RefreshSession::<u64>::new();
        let output = session.output();
        assert!(output.result.is_none());
        assert!(output.error.is_none());
        assert!(!output.pending);
        assert!(matches!(session.state(), RefreshState::Idle));
    }

    fn test_config() -> RefreshConfig {
        RefreshConfig {
            worker: Worker::Aggregator,
            subject: "value",
            success_level: LogLevel::Info,
        }
    }

    #[tokio::test]
    async fn slow_fetch_for_old_height_does_not_overwrite_newer_height() {
        let (release_1, gate_1) = oneshot::channel::<()>();
        let (release_2, gate_2) = oneshot::channel::<()>();
        let gates = Arc::new(Mutex::new(HashMap::from([(1u64, gate_1), (2u64, gate_2)])));

        let (height_tx, height_rx) = watch::channel(None);
        let (event_tx, _event_rx) = mpsc::channel(64);
        let parent = CancellationToken::new();

        let fetch_gates = Arc::clone(&gates);
        let (mut output, _task) = spawn_keyed_refresh(
            test_config(),
            height_rx,
            move |height| {
                let gate = fetch_gates.lock().unwrap().remove(&height);
                async move {
                    if let Some(gate) = gate {
                        let _ = gate.await;
                    }
                    Ok::<u64, RpcError>(height)
                }
            },
            EventSender::new(event_tx),
            &parent,
        );

        let timeout = Duration::from_secs(5);
        height_tx.send(Some(1)).unwrap();
        tokio::time::timeout(timeout, output.wait_for(|o| o.requested_height == Some(1)))
            .await
            .unwrap()
            .unwrap();
        height_tx.send(Some(2)).unwrap();
        tokio::time::timeout(timeout, output.wait_for(|o| o.requested_height == Some(2)))
            .await
            .unwrap()
            .unwrap();

        release_2.send(()).unwrap();
        let published = tokio::time::timeout(timeout, output.wait_for(|o| o.result.is_some()))
            .await
            .unwrap()
            .unwrap()
            .clone();
        assert_eq!(published.result.as_deref(), Some(&2));

        release_1.send(()).unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;

        let settled = output.borrow().clone();
        assert_eq!(settled.result.as_deref(), Some(&2));
        assert!(!settled.pending);
        assert!(settled.error.is_none());
    }

    #[tokio::test]
    async fn panicking_fetch_fails_the_request() {
        let (height_tx, height_rx) = watch::channel(Some(5));
        let (event_tx, _event_rx) = mpsc::channel(64);
        let parent = CancellationToken::new();

        let (mut output, _task) = spawn_keyed_refresh(
            test_config(),
            height_rx,
            |height| async move {
                if height == 5 {
                    panic!("fetch blew up");
                }
                Ok::<u64, RpcError>(height)
            },
            EventSender::new(event_tx),
            &parent,
        );

        let failed = tokio::time::timeout(
            Duration::from_secs(5),
            output.wait_for(|o| o.error.is_some()),
        )
        .await
        .unwrap()
        .unwrap()
        .clone();
        assert!(!failed.pending);
        assert!(failed.result.is_none());
        assert!(matches!(
            failed.error.as_deref(),
            Some(RpcError::Task(message)) if message == "fetch blew up"
        ));

        height_tx.send(Some(6)).unwrap();
        let recovered = tokio::time::timeout(
            Duration::from_secs(5),
            output.wait_for(|o| o.result.is_some()),
        )
        .await
        .unwrap()
        .unwrap()
        .clone();
        assert_eq!(recovered.result.as_deref(), Some(&6));
    }

    #[tokio::test]
    async fn no_height_means_no_request() {
        let (height_tx, height_rx) = watch::channel(None);
        let (event_tx, _event_rx) = mpsc::channel(64);
        let parent = CancellationToken::new();

        let (output, task) = spawn_keyed_refresh(
            test_config(),
            height_rx,
            |height| async move { Ok::<u64, RpcError>(height) },
            EventSender::new(event_tx),
            &parent,
        );

        tokio::time::sleep(Duration::from_millis(50)).await;
        let current = output.borrow().clone();
        assert!(current.result.is_none());
        assert!(!current.pending);
        assert_eq!(current.requested_height, None);

        task.shutdown().await;
        drop(height_tx);
    }

    #[tokio::test]
    async fn loader_stops_when_heights_close() {
        let (height_tx, height_rx) = watch::channel(Some(3));
        let (event_tx, _event_rx) = mpsc::channel(64);
        let parent = CancellationToken::new();

        let (mut output, _task) = spawn_keyed_refresh(
            test_config(),
            height_rx,
            |height| async move { Ok::<u64, RpcError>(height * 10) },
            EventSender::new(event_tx),
            &parent,
        );

        let published = tokio::time::timeout(
            Duration::from_secs(5),
            output.wait_for(|o| o.result.is_some()),
        )
        .await
        .unwrap()
        .unwrap()
        .clone();
        assert_eq!(published.result.as_deref(), Some(&30));

        drop(height_tx);
        let closed = tokio::time::timeout(Duration::from_secs(5), async {
            while output.changed().await.is_ok() {}
        })
        .await;
        assert!(closed.is_ok());
    }
}
