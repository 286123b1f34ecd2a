//! Serial and worker-pool execution of independent tasks.
//!
//! Both phases of a generation that fan out (fitness evaluation, per-cell
//! evolution) are embarrassingly parallel: every task reads an immutable
//! snapshot and produces one output slot. The executor maps a task over an
//! index range and gathers the results *by index*, never by completion
//! order, so the node-id to population-index mapping is preserved.

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::cellular::errors::EngineError;

/// Execution strategy for the engine's parallel phases.
///
/// # Variants
/// * `Serial` - runs tasks inline on the calling thread; the reproducibility
/// baseline
/// * `WorkerPool(ThreadPool)` - bounded pool owned by the engine, shared
/// across all generations
pub enum Executor {
    Serial,
    WorkerPool(ThreadPool),
}

impl Executor {
    /// Creates a serial executor.
    pub fn serial() -> Self { return Executor::Serial; }

    /// Creates a worker pool with the given number of threads; `0` sizes the
    /// pool by hardware parallelism.
    ///
    /// # Returns
    /// * `Result<Self, EngineError>` - executor or configuration error when
    /// the pool cannot be spawned
    pub fn worker_pool(num_threads: usize) -> Result<Self, EngineError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build()
            .map_err(|e| EngineError::Configuration(format!("failed to build worker pool: {}", e)))?;
        return Ok(Executor::WorkerPool(pool));
    }

    /// Maps a fallible task over `[0, len)` and gathers outputs by index.
    ///
    /// The first task error aborts the whole map; no partial result is
    /// returned. A panicking task propagates the panic to the caller.
    pub fn map_indexed<R, F>(&self, len: usize, task: F) -> Result<Vec<R>, EngineError>
    where
        F: Fn(usize) -> Result<R, EngineError> + Send + Sync,
        R: Send,
    {
        match self {
            Executor::Serial => {
                return (0..len).map(task).collect();
            },
            Executor::WorkerPool(pool) => {
                return pool.install(|| {
                    (0..len).into_par_iter().map(task).collect()
                });
            },
        }
    }
}
