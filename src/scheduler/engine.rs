//! Scheduler engine implementation.
//!
//! The scheduler owns a collection of task entries, registered before the
//! run loop starts. [`Scheduler::run`] arms every entry, spawns one driver
//! per entry, and joins them all: each driver waits for its entry's due
//! time, executes the task, and either finishes or arms the next cycle.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::{JoinHandle, JoinSet};

use super::error::SchedulerError;
use super::handle::TaskHandle;
use crate::core::entry::TaskEntry;
use crate::core::schedule::Schedule;
use crate::core::task::{FnTask, Task, TaskError};

/// In-process interval scheduler for asynchronous tasks.
///
/// Registration must complete before [`run`](Self::run) is called; there is
/// no dynamic add or remove once the run loop has started. The run loop
/// drives all entries concurrently and returns when every task has
/// finished, or with the first error a task body produces.
#[derive(Default)]
pub struct Scheduler {
    /// Registered entries, in registration order.
    tasks: Vec<Arc<Mutex<TaskEntry>>>,
}

impl Scheduler {
    /// Create an empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// True iff no tasks have been registered.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Register a task with timing attached.
    ///
    /// Configuration errors (an iteration cap on a non-repeating schedule)
    /// surface here, before the task is added.
    pub fn schedule(
        &mut self,
        schedule: Schedule,
        task: impl Task + 'static,
    ) -> Result<TaskHandle, SchedulerError> {
        let entry = TaskEntry::scheduled(Arc::new(task), schedule)?;
        Ok(self.push(entry))
    }

    /// Register an async closure with timing attached.
    ///
    /// Convenience wrapper around [`schedule`](Self::schedule) and
    /// [`FnTask`]. The bounds require an async closure; a synchronous one
    /// is a compile error.
    pub fn schedule_fn<F, Fut>(
        &mut self,
        schedule: Schedule,
        name: impl Into<String>,
        f: F,
    ) -> Result<TaskHandle, SchedulerError>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), TaskError>> + Send + 'static,
    {
        self.schedule(schedule, FnTask::new(name, f))
    }

    /// Register a task without timing.
    ///
    /// The returned handle must be [`reschedule`](TaskHandle::reschedule)d
    /// before [`run`](Self::run), otherwise the run loop fails fast with a
    /// not-scheduled error. Bind any arguments the task needs by capturing
    /// them in the task itself.
    pub fn register(&mut self, task: impl Task + 'static) -> TaskHandle {
        self.push(TaskEntry::bare(Arc::new(task)))
    }

    /// Register an async closure without timing.
    pub fn register_fn<F, Fut>(&mut self, name: impl Into<String>, f: F) -> TaskHandle
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), TaskError>> + Send + 'static,
    {
        self.register(FnTask::new(name, f))
    }

    fn push(&mut self, entry: TaskEntry) -> TaskHandle {
        let entry = Arc::new(Mutex::new(entry));
        self.tasks.push(Arc::clone(&entry));
        TaskHandle::new(entry)
    }

    /// Drive all registered tasks to completion.
    ///
    /// Initialization arms every entry that is not already armed and fails
    /// fast, before anything executes, if any entry was never scheduled.
    /// Then one driver is spawned per entry and all of them are joined.
    /// Returns `Ok(())` once every task has finished (immediately for an
    /// empty scheduler). The first task failure aborts the remaining
    /// drivers and is returned as the run's error.
    pub async fn run(&self) -> Result<(), SchedulerError> {
        for entry in &self.tasks {
            let mut entry = entry.lock().await;
            if entry.due_at().is_none() {
                entry.arm()?;
            }
        }

        tracing::info!(tasks = self.tasks.len(), "scheduler started");

        let mut drivers = JoinSet::new();
        for entry in &self.tasks {
            drivers.spawn(drive(Arc::clone(entry)));
        }

        while let Some(joined) = drivers.join_next().await {
            // A task failure aborts the whole run; dropping the set on
            // early return aborts the surviving drivers.
            joined??;
        }

        tracing::info!("all tasks finished");
        Ok(())
    }

    /// Run the scheduler on a background tokio task.
    ///
    /// For callers that want the run loop to proceed alongside other work
    /// instead of awaiting it in place.
    pub fn spawn(self) -> JoinHandle<Result<(), SchedulerError>> {
        tokio::spawn(async move { self.run().await })
    }
}

/// Per-task driver: wait until due, execute, advance, repeat.
async fn drive(entry: Arc<Mutex<TaskEntry>>) -> Result<(), SchedulerError> {
    let task = entry.lock().await.task();

    loop {
        // The entry lock is never held across an await: the remaining wait
        // is read out, then the sleep and the task body run unlocked.
        let remaining = entry.lock().await.time_until_due()?;
        if !remaining.is_zero() {
            tokio::time::sleep(remaining).await;
        }

        tracing::debug!(task = task.name(), "executing task");
        task.run().await.map_err(|source| {
            tracing::error!(task = task.name(), error = %source, "task failed, aborting run");
            SchedulerError::Task {
                name: task.name().to_string(),
                source,
            }
        })?;

        let mut entry = entry.lock().await;
        if !entry.advance()? {
            tracing::debug!(
                task = task.name(),
                runs = entry.completed_runs(),
                "task finished"
            );
            return Ok(());
        }
    }
}
