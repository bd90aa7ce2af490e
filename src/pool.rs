//! Bounded worker pool for CPU-bound and blocking work
//!
//! Extraction and classification both run here. The pool is a single shared
//! resource: it is sized once at construction and every clone shares the same
//! capacity, so concurrent runs compete for the same workers instead of each
//! spawning their own.
//!
//! Units execute on tokio's blocking threads, gated by a semaphore holding one
//! permit per worker. `submit` never blocks the caller: when every permit is
//! taken the unit waits in the semaphore queue until a worker frees up.

use std::any::Any;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;

/// Failure of a single unit of work
#[derive(Debug, Error)]
pub enum PoolError<E> {
    /// The unit ran and returned its own error
    #[error("{0}")]
    Unit(E),

    /// The unit panicked while running
    #[error("work unit panicked: {0}")]
    Panicked(String),

    /// The pool was closed (or the runtime shut down) before the unit ran
    #[error("worker pool is closed")]
    Closed,
}

/// Fixed-size pool of workers shared across pipeline stages
#[derive(Debug, Clone)]
pub struct WorkerPool {
    permits: Arc<Semaphore>,
    capacity: usize,
}

impl WorkerPool {
    /// Creates a pool running at most `capacity` units at once
    ///
    /// A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        tracing::debug!("Worker pool created with {} workers", capacity);
        Self {
            permits: Arc::new(Semaphore::new(capacity)),
            capacity,
        }
    }

    /// Maximum number of units running at once
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of idle workers right now
    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }

    /// Stops accepting work
    ///
    /// Units already running finish normally. Units still waiting for a worker,
    /// and any unit submitted afterwards, resolve to [`PoolError::Closed`].
    pub fn close(&self) {
        self.permits.close();
    }

    pub fn is_closed(&self) -> bool {
        self.permits.is_closed()
    }

    /// Submits a unit of work and returns a handle to its result
    ///
    /// Must be called from within a tokio runtime. Returns immediately; the
    /// unit starts as soon as a worker is free. Dropping the handle does not
    /// cancel the unit.
    pub fn submit<F, T, E>(&self, unit: F) -> WorkHandle<T, E>
    where
        F: FnOnce() -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: Send + 'static,
    {
        if self.permits.available_permits() == 0 {
            tracing::trace!("Worker pool saturated, unit queued");
        }

        let permits = Arc::clone(&self.permits);
        let task = tokio::spawn(async move {
            let _permit = permits
                .acquire_owned()
                .await
                .map_err(|_| PoolError::Closed)?;

            match tokio::task::spawn_blocking(unit).await {
                Ok(Ok(value)) => Ok(value),
                Ok(Err(e)) => Err(PoolError::Unit(e)),
                Err(join_error) if join_error.is_panic() => Err(PoolError::Panicked(
                    panic_message(join_error.into_panic()),
                )),
                Err(_) => Err(PoolError::Closed),
            }
        });

        WorkHandle { task }
    }

    /// Awaits every handle and returns their results in handle order
    ///
    /// Failures are reported per unit; one failing unit never affects the
    /// others.
    pub async fn await_all<T, E>(handles: Vec<WorkHandle<T, E>>) -> Vec<Result<T, PoolError<E>>> {
        futures::future::join_all(handles).await
    }
}

/// Future-like handle to a submitted unit of work
#[derive(Debug)]
pub struct WorkHandle<T, E> {
    task: JoinHandle<Result<T, PoolError<E>>>,
}

impl<T, E> Future for WorkHandle<T, E> {
    type Output = Result<T, PoolError<E>>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.get_mut().task).poll(cx) {
            Poll::Ready(Ok(result)) => Poll::Ready(result),
            Poll::Ready(Err(join_error)) if join_error.is_panic() => Poll::Ready(Err(
                PoolError::Panicked(panic_message(join_error.into_panic())),
            )),
            Poll::Ready(Err(_)) => Poll::Ready(Err(PoolError::Closed)),
            Poll::Pending => Poll::Pending,
        }
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
