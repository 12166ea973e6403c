//! Sequential task queue.
//!
//! Every interaction with the page goes through a [`TaskQueue`] so that no two
//! interactions overlap: widgets share overlay regions, and two dropdowns
//! being driven at once would race over which option list is open.
//!
//! The queue is a shared handle. A running task may clone it and push more
//! work; that work is appended to the back and drained before
//! [`TaskQueue::run`] returns, because emptiness is only checked after each
//! task settles.

use crate::result::FormResult;
use futures::future::BoxFuture;
use std::collections::VecDeque;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};

/// A zero-argument asynchronous action owned by the queue until it completes
pub type QueuedTask<'a> = Box<dyn FnOnce() -> BoxFuture<'a, FormResult<()>> + Send + 'a>;

/// FIFO of asynchronous actions drained one at a time.
#[derive(Clone, Default)]
pub struct TaskQueue<'a> {
    tasks: Arc<Mutex<VecDeque<QueuedTask<'a>>>>,
}

impl std::fmt::Debug for TaskQueue<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskQueue")
            .field("pending", &self.len())
            .finish()
    }
}

impl<'a> TaskQueue<'a> {
    /// Create an empty queue
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a task to the back of the queue
    pub fn push<F, Fut>(&self, task: F)
    where
        F: FnOnce() -> Fut + Send + 'a,
        Fut: Future<Output = FormResult<()>> + Send + 'a,
    {
        self.lock().push_back(Box::new(move || Box::pin(task())));
    }

    /// Number of tasks waiting to run
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether no task is waiting
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drain the queue front to back, awaiting each task before the next.
    ///
    /// With `stop_on_error` the first failure is returned immediately and the
    /// tasks behind it stay queued. Without it failures are logged and
    /// swallowed, so `Ok(())` only means the queue drained, not that every
    /// task succeeded.
    pub async fn run(&self, stop_on_error: bool) -> FormResult<()> {
        let mut index = 0usize;
        loop {
            let next = self.lock().pop_front();
            let Some(task) = next else {
                return Ok(());
            };
            debug!(task = index, "running queued task");
            if let Err(err) = task().await {
                if stop_on_error {
                    debug!(task = index, error = %err, "stopping queue on error");
                    return Err(err);
                }
                warn!(task = index, error = %err, "queued task failed, continuing");
            }
            index += 1;
        }
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<QueuedTask<'a>>> {
        self.tasks.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
