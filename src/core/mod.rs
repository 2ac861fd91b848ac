//! Core domain model: timing parameters, the task trait, and task entries.

pub mod entry;
pub mod schedule;
pub mod task;
