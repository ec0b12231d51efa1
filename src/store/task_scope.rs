//! Background tasks tied to the lifetime of their owner.

use std::{
    future::Future,
    sync::{Mutex, MutexGuard, PoisonError},
};

use tokio::task::JoinSet;

/// Owns a set of spawned tasks. Dropping or shutting down the scope aborts them.
#[derive(Debug, Default)]
pub struct TaskScope {
    tasks: Mutex<JoinSet<()>>,
}

impl TaskScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn `task` on the current tokio runtime.
    ///
    /// Tasks that have already finished are reaped first.
    pub fn spawn<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let mut tasks = self.lock();

        while let Some(result) = tasks.try_join_next() {
            if let Err(error) = result
                && error.is_panic()
            {
                tracing::error!("A background task panicked: {error}");
            }
        }

        tasks.spawn(task);
    }

    /// Abort every task in the scope.
    pub fn shutdown(&self) {
        self.lock().abort_all();
    }

    /// The number of tasks that have not been reaped.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> MutexGuard<'_, JoinSet<()>> {
        self.tasks.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
