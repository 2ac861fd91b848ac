//! Task trait and error types.
//!
//! The [`Task`] trait is the unit of work the scheduler drives. Implement it
//! for structured tasks, or wrap a plain async closure with [`FnTask`].

use std::future::Future;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during task execution.
#[derive(Debug, Error)]
pub enum TaskError {
    /// Task execution failed with a message.
    #[error("execution failed: {0}")]
    ExecutionFailed(String),

    /// Generic error wrapper.
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// An asynchronous unit of work.
///
/// The scheduler passes no arguments in: bind whatever state the body
/// needs when constructing the task (for closures, capture it).
///
/// # Example
///
/// ```
/// use pacer::{Task, TaskError};
/// use async_trait::async_trait;
///
/// struct Heartbeat {
///     endpoint: String,
/// }
///
/// #[async_trait]
/// impl Task for Heartbeat {
///     fn name(&self) -> &str {
///         "heartbeat"
///     }
///
///     async fn run(&self) -> Result<(), TaskError> {
///         // ping self.endpoint
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Task: Send + Sync {
    /// Name used in errors and log output.
    fn name(&self) -> &str;

    /// Execute the task once.
    async fn run(&self) -> Result<(), TaskError>;
}

/// Adapter that turns an async closure into a [`Task`].
///
/// The closure must be callable repeatedly, one invocation per scheduled
/// execution. Synchronous closures are rejected at compile time: the bounds
/// require the closure to return a future.
pub struct FnTask<F> {
    name: String,
    f: F,
}

impl<F, Fut> FnTask<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<(), TaskError>> + Send,
{
    /// Wrap a closure under the given name.
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }
}

#[async_trait]
impl<F, Fut> Task for FnTask<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<(), TaskError>> + Send,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn run(&self) -> Result<(), TaskError> {
        (self.f)().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct FailingTask;

    #[async_trait]
    impl Task for FailingTask {
        fn name(&self) -> &str {
            "failer"
        }

        async fn run(&self) -> Result<(), TaskError> {
            Err(TaskError::ExecutionFailed("something went wrong".into()))
        }
    }

    #[tokio::test]
    async fn test_fn_task_runs_closure() {
        let counter = Arc::new(AtomicU32::new(0));
        let counted = Arc::clone(&counter);

        let task = FnTask::new("counter", move || {
            let counted = Arc::clone(&counted);
            async move {
                counted.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        });

        assert_eq!(task.name(), "counter");
        task.run().await.unwrap();
        task.run().await.unwrap();
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_fn_task_captures_arguments() {
        // Argument binding is closure capture; the task itself stays zero-arg.
        let greeting = String::from("hello");
        let task = FnTask::new("greeter", move || {
            let greeting = greeting.clone();
            async move {
                if greeting == "hello" {
                    Ok(())
                } else {
                    Err(TaskError::ExecutionFailed("wrong capture".into()))
                }
            }
        });

        assert!(task.run().await.is_ok());
    }

    #[tokio::test]
    async fn test_task_returns_error() {
        let result = FailingTask.run().await;

        let err = result.unwrap_err();
        assert!(matches!(err, TaskError::ExecutionFailed(_)));
        assert!(err.to_string().contains("something went wrong"));
    }

    #[test]
    fn test_task_error_display() {
        let err = TaskError::ExecutionFailed("test error".to_string());
        assert_eq!(err.to_string(), "execution failed: test error");
    }

    #[test]
    fn test_task_error_from_boxed() {
        let io_err = std::io::Error::new(std::io::ErrorKind::Other, "disk on fire");
        let err: TaskError = Box::<dyn std::error::Error + Send + Sync>::from(io_err).into();
        assert!(err.to_string().contains("disk on fire"));
    }
}
