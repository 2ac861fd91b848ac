//! Scheduler engine for driving registered tasks.
//!
//! This module provides the engine that owns registered task entries and
//! the run loop that drives each of them through repeated
//! wait/execute/advance cycles until every task finishes.

mod engine;
mod error;
mod handle;

pub use engine::Scheduler;
pub use error::SchedulerError;
pub use handle::TaskHandle;
