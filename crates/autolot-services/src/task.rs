//! Cancellable handles for dispatched store operations.
//!
//! Every operation spawned off the interaction context is wrapped in a
//! [`TaskHandle`], pairing the join handle with a cancellation token.
//! Operations observe the token at stage boundaries only; work already
//! dispatched to a store is never recalled. The default policy cancels
//! nothing, so navigating away leaves outstanding uploads and deletes
//! running to completion.

use autolot_core::AppError;
use std::future::Future;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Handle to a dispatched operation.
pub struct TaskHandle<T> {
    handle: JoinHandle<T>,
    cancel: CancellationToken,
}

impl<T> TaskHandle<T> {
    /// Request cooperative cancellation. The operation stops at its next
    /// checkpoint; anything already sent to a store completes remotely.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the operation to finish and return its result.
    pub async fn join(self) -> Result<T, AppError> {
        self.handle
            .await
            .map_err(|e| AppError::Internal(format!("Dispatched task failed: {}", e)))
    }
}

/// Spawn `op` under a fresh cancellation token.
pub(crate) fn dispatch<F, Fut, T>(op: F) -> TaskHandle<T>
where
    F: FnOnce(CancellationToken) -> Fut,
    Fut: Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    let cancel = CancellationToken::new();
    let handle = tokio::spawn(op(cancel.clone()));
    TaskHandle { handle, cancel }
}
