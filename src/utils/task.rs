//! Defines the Pinloop task runner.
use std::future::Future;

use tokio::task::JoinHandle;

use crate::errors::Error;

/// Represents a handler for a running task.
pub type TaskHandler = JoinHandle<Result<(), Error>>;

/// Runs a given future as a Tokio task.
///
/// The returned [`TaskHandler`] can be awaited for the task outcome, or aborted to cancel the
/// task abruptly (loop policies prefer [`LoopControl`](crate::loops::LoopControl), which lets
/// the current iteration finish).
pub fn run<F>(future: F) -> TaskHandler
where
    F: Future<Output = Result<(), Error>> + Send + 'static,
{
    tokio::task::spawn(future)
}

#[macro_export]
macro_rules! pause {
    ($ms:expr) => {
        $crate::utils::tokio::time::sleep($crate::utils::tokio::time::Duration::from_millis(
            $ms as u64,
        ))
        .await
    };
}
