//! Cancellable one-shot timers.

use std::future::Future;
use std::time::Duration;

use tokio::task::AbortHandle;

/// Handle to a scheduled timer task.
///
/// Cloning the handle does not duplicate the timer; every clone cancels the
/// same task.
#[derive(Debug, Clone)]
pub struct TimerHandle {
    abort: AbortHandle,
}

impl TimerHandle {
    /// Cancel the timer. Idempotent; a no-op once the task has completed.
    pub fn cancel(&self) {
        self.abort.abort();
    }

    /// Whether the task has run to completion (or was cancelled).
    pub fn is_finished(&self) -> bool {
        self.abort.is_finished()
    }
}

/// Runs at most one delayed task at a time.
///
/// Every [`schedule`](Debouncer::schedule) cancels the previously scheduled
/// task before arming a new one, so a burst of calls results in a single run
/// of the last task once the burst has been quiet for `delay`.
///
/// A cancelled task is dropped even if its delay already elapsed, as long as
/// it has not completed. Tasks that must outlive cancellation should spawn
/// their work instead of awaiting it.
///
/// Dropping the debouncer cancels the pending task. Scheduling requires a
/// running tokio runtime.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<TimerHandle>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Cancel any pending task and run `task` after the delay.
    pub fn schedule<F>(&mut self, task: F) -> TimerHandle
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();

        let delay = self.delay;
        let join = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task.await;
        });

        let handle = TimerHandle {
            abort: join.abort_handle(),
        };
        self.pending = Some(handle.clone());
        handle
    }

    /// Cancel the pending task, if any.
    ///
    /// Returns true if a task was still pending.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) => {
                let was_pending = !handle.is_finished();
                handle.cancel();
                was_pending
            }
            None => false,
        }
    }

    /// Whether a scheduled task has not completed yet.
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
