//! Bounded-concurrency task runner.
//!
//! A [`Semaphore`] with `limit` permits is the admission gate and a
//! [`JoinSet`] is the completion barrier. The dispatch loop acquires an owned
//! permit *before* spawning, so it suspends while `limit` tasks are running;
//! the permit moves into the task and is released by `Drop` on every exit,
//! including a panic.

use std::future::Future;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, warn};

/// A task that did not produce an output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("task {index} did not complete: {detail}")]
pub struct TaskAborted {
    /// Dispatch position of the task.
    pub index: usize,
    pub detail: String,
}

/// Run `task` once per item with at most `limit` running at any instant.
///
/// Returns after every spawned task has finished, with results in input
/// order. A `limit` of zero is treated as one.
pub async fn run_bounded<I, O, F, Fut>(
    items: Vec<I>,
    limit: usize,
    task: F,
) -> Vec<Result<O, TaskAborted>>
where
    I: Send + 'static,
    O: Send + 'static,
    F: Fn(I) -> Fut,
    Fut: Future<Output = O> + Send + 'static,
{
    let total = items.len();
    let gate = Arc::new(Semaphore::new(limit.max(1)));
    let mut set = JoinSet::new();

    for (index, item) in items.into_iter().enumerate() {
        // The gate lives until this function returns and is never closed, so
        // acquisition cannot fail; stop dispatching if it ever does.
        let Ok(permit) = Arc::clone(&gate).acquire_owned().await else {
            warn!("admission gate closed after {index} of {total} tasks");
            break;
        };
        let fut = task(item);
        set.spawn(async move {
            let _permit = permit;
            (index, fut.await)
        });
        debug!("admitted task {}/{}", index + 1, total);
    }

    let mut slots: Vec<Option<O>> = std::iter::repeat_with(|| None).take(total).collect();
    while let Some(joined) = set.join_next().await {
        match joined {
            Ok((index, output)) => slots[index] = Some(output),
            Err(e) => warn!("conversion task failed to join: {e}"),
        }
    }

    slots
        .into_iter()
        .enumerate()
        .map(|(index, slot)| {
            slot.ok_or_else(|| TaskAborted {
                index,
                detail: "task panicked or was never dispatched".to_string(),
            })
        })
        .collect()
}
