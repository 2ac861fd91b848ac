//! Task handle for inspecting and rescheduling a registered task.
//!
//! Registration returns a [`TaskHandle`] pointing at the scheduler's own
//! entry, so a bare-registered task can be scheduled later and any task's
//! progress can be observed while the run loop owns the entry.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::core::entry::TaskEntry;
use crate::core::schedule::{Schedule, ScheduleError};

/// Handle to a task registered with a [`Scheduler`](super::Scheduler).
///
/// Cloning is cheap; all clones point at the same entry. Rescheduling after
/// `run()` has started is unsupported (the run loop assumes the task set is
/// settled) and will derail that task's driver.
#[derive(Clone)]
pub struct TaskHandle {
    pub(crate) entry: Arc<Mutex<TaskEntry>>,
}

impl TaskHandle {
    pub(crate) fn new(entry: Arc<Mutex<TaskEntry>>) -> Self {
        Self { entry }
    }

    /// Replace the task's timing state, resetting its completed-run count.
    ///
    /// This is how a task registered without a schedule gets one before the
    /// run loop starts.
    pub async fn reschedule(&self, schedule: Schedule) -> Result<(), ScheduleError> {
        self.entry.lock().await.reschedule(schedule)
    }

    /// Name of the underlying task.
    pub async fn name(&self) -> String {
        self.entry.lock().await.name().to_string()
    }

    /// True iff an interval has been attached.
    pub async fn is_scheduled(&self) -> bool {
        self.entry.lock().await.is_scheduled()
    }

    /// The interval between executions, if scheduled.
    pub async fn interval(&self) -> Option<Duration> {
        self.entry.lock().await.interval()
    }

    /// Number of executions completed so far.
    pub async fn completed_runs(&self) -> u32 {
        self.entry.lock().await.completed_runs()
    }

    /// The next due time, if the entry has been armed.
    pub async fn due_at(&self) -> Option<DateTime<Utc>> {
        self.entry.lock().await.due_at()
    }
}
