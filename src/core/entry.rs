//! Task entries: a unit of work paired with its timing state.
//!
//! A [`TaskEntry`] is what the scheduler actually owns and drives: the task
//! itself plus interval, repeat/immediate flags, the optional iteration cap,
//! the count of completed runs, and the next due time.

use std::fmt;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};

use super::schedule::{Schedule, ScheduleError};
use super::task::Task;

/// A registered task and its timing state.
///
/// Entries exist in two shapes: *scheduled* (interval known up front) and
/// *bare* (no interval yet; [`reschedule`](Self::reschedule) must be called
/// before the run loop will accept it). Due times are wall-clock
/// (`chrono::Utc`); a `None` due time means the entry has not been armed.
pub struct TaskEntry {
    task: Arc<dyn Task>,
    interval: Option<Duration>,
    repeat: bool,
    immediate: bool,
    iteration_cap: Option<NonZeroU32>,
    completed_runs: u32,
    due_at: Option<DateTime<Utc>>,
}

impl TaskEntry {
    /// Create an entry with timing attached.
    ///
    /// Fails if the schedule is invalid. If the schedule is immediate, the
    /// entry is armed for "now"; otherwise arming is deferred to run-loop
    /// initialization.
    pub fn scheduled(task: Arc<dyn Task>, schedule: Schedule) -> Result<Self, ScheduleError> {
        schedule.validate()?;
        Ok(Self {
            task,
            interval: Some(schedule.interval()),
            repeat: schedule.repeat(),
            immediate: schedule.immediate(),
            iteration_cap: schedule.iteration_cap(),
            completed_runs: 0,
            due_at: schedule.immediate().then(Utc::now),
        })
    }

    /// Create an entry with no timing attached.
    pub fn bare(task: Arc<dyn Task>) -> Self {
        Self {
            task,
            interval: None,
            repeat: true,
            immediate: false,
            iteration_cap: None,
            completed_runs: 0,
            due_at: None,
        }
    }

    /// Replace all timing state, keeping the unit of work.
    ///
    /// Resets the completed-run count and re-derives the due time the same
    /// way construction does.
    pub fn reschedule(&mut self, schedule: Schedule) -> Result<(), ScheduleError> {
        schedule.validate()?;
        self.interval = Some(schedule.interval());
        self.repeat = schedule.repeat();
        self.immediate = schedule.immediate();
        self.iteration_cap = schedule.iteration_cap();
        self.completed_runs = 0;
        self.due_at = schedule.immediate().then(Utc::now);
        Ok(())
    }

    /// Compute and store the next due time as now + interval.
    ///
    /// Fails if the entry has never been scheduled.
    pub fn arm(&mut self) -> Result<DateTime<Utc>, ScheduleError> {
        let interval = self
            .interval
            .ok_or_else(|| ScheduleError::NotScheduled(self.name().to_string()))?;
        let due = Utc::now() + interval;
        self.due_at = Some(due);
        Ok(due)
    }

    /// True iff the entry is armed and its due time has been reached.
    pub fn is_due(&self) -> bool {
        matches!(self.due_at, Some(due) if Utc::now() >= due)
    }

    /// Time remaining until the due time, clamped at zero.
    ///
    /// Fails if the entry is not armed.
    pub fn time_until_due(&self) -> Result<Duration, ScheduleError> {
        let due = self
            .due_at
            .ok_or_else(|| ScheduleError::NotArmed(self.name().to_string()))?;
        Ok((due - Utc::now()).to_std().unwrap_or(Duration::ZERO))
    }

    /// Suspend until the due time is reached.
    ///
    /// Returns immediately if the due time is already past.
    pub async fn wait_until_due(&self) -> Result<(), ScheduleError> {
        let remaining = self.time_until_due()?;
        if !remaining.is_zero() {
            tokio::time::sleep(remaining).await;
        }
        Ok(())
    }

    /// Record a completed execution and arm the next cycle if one remains.
    ///
    /// Returns `false` once the entry is finished: either it does not
    /// repeat, or the completed-run count has reached the iteration cap
    /// (the cap'th execution does happen).
    pub fn advance(&mut self) -> Result<bool, ScheduleError> {
        self.completed_runs += 1;
        let capped = self
            .iteration_cap
            .is_some_and(|cap| self.completed_runs >= cap.get());
        if !self.repeat || capped {
            return Ok(false);
        }
        self.arm()?;
        Ok(true)
    }

    /// Name of the underlying task.
    pub fn name(&self) -> &str {
        self.task.name()
    }

    /// Shared reference to the underlying task.
    pub fn task(&self) -> Arc<dyn Task> {
        Arc::clone(&self.task)
    }

    /// True iff an interval has been attached.
    pub fn is_scheduled(&self) -> bool {
        self.interval.is_some()
    }

    /// The interval between executions, if scheduled.
    pub fn interval(&self) -> Option<Duration> {
        self.interval
    }

    /// Whether the entry repeats after its first execution.
    pub fn repeat(&self) -> bool {
        self.repeat
    }

    /// Whether the first execution fires immediately.
    pub fn immediate(&self) -> bool {
        self.immediate
    }

    /// The maximum number of executions, if capped.
    pub fn iteration_cap(&self) -> Option<NonZeroU32> {
        self.iteration_cap
    }

    /// Number of executions completed so far.
    pub fn completed_runs(&self) -> u32 {
        self.completed_runs
    }

    /// The next due time, if armed.
    pub fn due_at(&self) -> Option<DateTime<Utc>> {
        self.due_at
    }
}

impl fmt::Debug for TaskEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskEntry")
            .field("task", &self.name())
            .field("interval", &self.interval)
            .field("repeat", &self.repeat)
            .field("immediate", &self.immediate)
            .field("iteration_cap", &self.iteration_cap)
            .field("completed_runs", &self.completed_runs)
            .field("due_at", &self.due_at)
            .finish()
    }
}
