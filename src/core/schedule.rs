//! Timing parameters for scheduled tasks.
//!
//! A [`Schedule`] bundles everything the engine needs to decide when a task
//! fires: the interval between executions, whether it repeats, whether the
//! first execution happens immediately, and an optional cap on the total
//! number of executions.

use std::num::NonZeroU32;
use std::time::Duration;
use thiserror::Error;

/// Errors in timing configuration or timing state.
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// An iteration cap was combined with a one-shot schedule.
    #[error("iteration cap requires a repeating schedule")]
    CapWithoutRepeat,

    /// A task with no interval was asked to compute a due time.
    #[error("task '{0}' must be scheduled before running")]
    NotScheduled(String),

    /// A task with no due time was asked to wait for it.
    #[error("task '{0}' has no due time; arm it first")]
    NotArmed(String),
}

/// Timing parameters for a task.
///
/// Construct with [`Schedule::every`] and refine with the builder methods:
///
/// ```
/// use pacer::Schedule;
/// use std::time::Duration;
///
/// // Every 5 minutes, first run right away, 10 runs total.
/// let schedule = Schedule::every(Duration::from_secs(300))
///     .immediately()
///     .times(10.try_into().unwrap());
/// assert!(schedule.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    interval: Duration,
    repeat: bool,
    immediate: bool,
    iteration_cap: Option<NonZeroU32>,
}

impl Schedule {
    /// A repeating schedule with the given interval between executions.
    pub fn every(interval: Duration) -> Self {
        Self {
            interval,
            repeat: true,
            immediate: false,
            iteration_cap: None,
        }
    }

    /// Execute at most once instead of repeating.
    pub fn once(mut self) -> Self {
        self.repeat = false;
        self
    }

    /// Fire the first execution immediately instead of waiting one interval.
    pub fn immediately(mut self) -> Self {
        self.immediate = true;
        self
    }

    /// Cap the total number of executions.
    ///
    /// Only meaningful on a repeating schedule; combining a cap with
    /// [`once`](Self::once) fails validation.
    pub fn times(mut self, cap: NonZeroU32) -> Self {
        self.iteration_cap = Some(cap);
        self
    }

    /// Check the configuration invariants.
    ///
    /// Called eagerly at registration and reschedule time, so an invalid
    /// combination never reaches the run loop.
    pub fn validate(&self) -> Result<(), ScheduleError> {
        if self.iteration_cap.is_some() && !self.repeat {
            return Err(ScheduleError::CapWithoutRepeat);
        }
        Ok(())
    }

    /// The interval between executions.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether the task repeats after its first execution.
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
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cap(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    #[test]
    fn test_every_defaults_to_repeating() {
        let schedule = Schedule::every(Duration::from_secs(5));

        assert_eq!(schedule.interval(), Duration::from_secs(5));
        assert!(schedule.repeat());
        assert!(!schedule.immediate());
        assert!(schedule.iteration_cap().is_none());
        assert!(schedule.validate().is_ok());
    }

    #[test]
    fn test_once_disables_repeat() {
        let schedule = Schedule::every(Duration::from_secs(5)).once();

        assert!(!schedule.repeat());
        assert!(schedule.validate().is_ok());
    }

    #[test]
    fn test_immediately_sets_flag() {
        let schedule = Schedule::every(Duration::from_secs(5)).immediately();

        assert!(schedule.immediate());
    }

    #[test]
    fn test_times_sets_cap() {
        let schedule = Schedule::every(Duration::from_secs(1)).times(cap(3));

        assert_eq!(schedule.iteration_cap(), Some(cap(3)));
        assert!(schedule.validate().is_ok());
    }

    #[test]
    fn test_cap_with_once_fails_validation() {
        let schedule = Schedule::every(Duration::from_secs(1)).once().times(cap(3));

        let err = schedule.validate().unwrap_err();
        assert!(matches!(err, ScheduleError::CapWithoutRepeat));
    }

    #[test]
    fn test_cap_with_once_fails_in_either_order() {
        let schedule = Schedule::every(Duration::from_secs(1)).times(cap(3)).once();

        assert!(schedule.validate().is_err());
    }

    #[test]
    fn test_error_display() {
        let err = ScheduleError::CapWithoutRepeat;
        assert_eq!(err.to_string(), "iteration cap requires a repeating schedule");

        let err = ScheduleError::NotScheduled("sync_feeds".to_string());
        assert_eq!(
            err.to_string(),
            "task 'sync_feeds' must be scheduled before running"
        );
    }
}
