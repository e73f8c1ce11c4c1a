//! Core worker utilities

use crate::events::{Event, EventType, Worker};
use crate::logging::LogLevel;
use std::future::Future;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::{CancellationToken, DropGuard};

/// Common event sending utilities for workers
#[derive(Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Send a generic event
    pub async fn send_event(&self, event: Event) {
        let _ = self.sender.send(event).await;
    }

    pub async fn send_worker_event(
        &self,
        worker: Worker,
        message: String,
        event_type: EventType,
        log_level: LogLevel,
    ) {
        self.send_event(Event::new(worker, message, event_type, log_level))
            .await;
    }
}

/// A spawned background task bound to the lifetime of its owner.
///
/// The task receives a child of the owner's cancellation token. Dropping the
/// `ScopedTask` cancels that child token, so the task stops when the screen or
/// session that created it goes away.
#[derive(Debug)]
pub struct ScopedTask {
    handle: JoinHandle<()>,
    guard: DropGuard,
}

impl ScopedTask {
    pub fn spawn<F, Fut>(parent: &CancellationToken, task: F) -> Self
    where
        F: FnOnce(CancellationToken) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let token = parent.child_token();
        let handle = tokio::spawn(task(token.clone()));
        Self {
            handle,
            guard: token.drop_guard(),
        }
    }

    /// Cancels the task and waits for it to finish.
    pub async fn shutdown(self) {
        let ScopedTask { handle, guard } = self;
        drop(guard);
        let _ = handle.await;
    }
}
