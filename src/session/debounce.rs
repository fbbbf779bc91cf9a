//! Cancel-and-reschedule timer for coalescing writes.

use std::time::Duration;
use tokio::task::{self, JoinHandle};
use tokio::time;
use tracing::error;

/// Runs at most one delayed task at a time.
///
/// Scheduling a task aborts the one still waiting, so in a burst of calls
/// only the last task runs, `delay` after the burst ends. Must be used from
/// within a tokio runtime.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    /// Creates a debouncer that waits `delay` of quiescence before running a task.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// The quiescence period.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Replaces any waiting task with `task`, to run after `delay`.
    ///
    /// `task` runs on the blocking pool, so it may do synchronous I/O.
    pub fn schedule<F>(&mut self, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.cancel();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            time::sleep(delay).await;
            if let Err(e) = task::spawn_blocking(task).await {
                error!("Debounced task failed: {}", e);
            }
        }));
    }

    /// Aborts the waiting task, if any.
    ///
    /// Returns `true` if a task was still waiting and will now never run.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) if !handle.is_finished() => {
                handle.abort();
                true
            }
            _ => false,
        }
    }

    /// Whether a task is scheduled and has not finished yet.
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
