//! Scheduler error types.

use thiserror::Error;

use crate::core::schedule::ScheduleError;
use crate::core::task::TaskError;

/// Errors that can occur in the scheduler.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// Timing configuration or timing state error.
    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    /// A task body failed; the whole run is aborted.
    #[error("task '{name}' failed: {source}")]
    Task {
        name: String,
        #[source]
        source: TaskError,
    },

    /// A task driver panicked or was aborted.
    #[error("task driver failed: {0}")]
    Driver(#[from] tokio::task::JoinError),
}
