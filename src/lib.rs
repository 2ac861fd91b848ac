//! pacer - a lightweight async interval task scheduler.
//!
//! Register asynchronous tasks with an interval (optionally one-shot,
//! optionally firing immediately on first run, optionally capped at N
//! repetitions), then await [`Scheduler::run`] to drive every task
//! concurrently until all of them finish.
//!
//! ```no_run
//! use pacer::{Schedule, Scheduler};
//! use std::time::Duration;
//!
//! # async fn demo() -> Result<(), pacer::SchedulerError> {
//! let mut scheduler = Scheduler::new();
//!
//! scheduler.schedule_fn(
//!     Schedule::every(Duration::from_secs(60)).times(5.try_into().unwrap()),
//!     "heartbeat",
//!     || async {
//!         // do periodic work
//!         Ok(())
//!     },
//! )?;
//!
//! scheduler.run().await?;
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod scheduler;

pub use crate::core::entry::TaskEntry;
pub use crate::core::schedule::{Schedule, ScheduleError};
pub use crate::core::task::{FnTask, Task, TaskError};
pub use crate::scheduler::{Scheduler, SchedulerError, TaskHandle};
