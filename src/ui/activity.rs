//! Activity log shared by every screen.

use crate::consts::cli_consts::MAX_ACTIVITY_LOGS;
use crate::events::Event as WorkerEvent;
use std::collections::VecDeque;

/// Worker events queued since the last tick plus the bounded history shown in the logs panel.
#[derive(Debug, Default)]
pub struct ActivityLog {
    pending: VecDeque<WorkerEvent>,
    entries: VecDeque<WorkerEvent>,
}

impl ActivityLog {
    /// Add an event to the processing queue
    pub fn push(&mut self, event: WorkerEvent) {
        self.pending.push_back(event);
    }

    /// Moves queued events into the history, dropping the oldest past the limit.
    pub fn drain_pending(&mut self) {
        while let Some(event) = self.pending.pop_front() {
            if self.entries.len() >= MAX_ACTIVITY_LOGS {
                self.entries.pop_front();
            }
            self.entries.push_back(event);
        }
    }

    /// Hands the log, including queued events, to the next screen.
    pub fn take(&mut self) -> ActivityLog {
        self.drain_pending();
        std::mem::take(self)
    }

    pub fn entries(&self) -> &VecDeque<WorkerEvent> {
        &self.entries
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}
