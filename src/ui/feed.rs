//! A loader's output channel paired with the task that feeds it.

use crate::workers::{RefreshOutput, ScopedTask};
use tokio::sync::watch;

/// Owned by a screen; dropping it cancels the loader.
#[derive(Debug)]
pub struct Feed<T> {
    receiver: watch::Receiver<RefreshOutput<T>>,
    _task: ScopedTask,
}

impl<T> Feed<T> {
    pub fn new((receiver, task): (watch::Receiver<RefreshOutput<T>>, ScopedTask)) -> Self {
        Self {
            receiver,
            _task: task,
        }
    }

    /// The loader's current output. Cheap: values are behind `Arc`s.
    pub fn latest(&mut self) -> RefreshOutput<T> {
        self.receiver.borrow_and_update().clone()
    }
}
