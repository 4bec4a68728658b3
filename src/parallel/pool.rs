//! Rayon thread pool configuration for batch evaluation.
//!
//! Use [WorkerPool::install] to evaluate rows with a fixed number of threads,
//! or rely on Rayon's default (all CPU cores).

use rayon::ThreadPoolBuilder;
use tracing::warn;

/// Configures how many worker threads are used for parallel batch evaluation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerPool {
    /// Number of worker threads. 0 uses the Rayon default; 1 evaluates rows
    /// sequentially on the calling thread.
    pub workers: usize,
}

impl WorkerPool {
    /// Use all available CPU cores (Rayon default).
    pub fn default_workers() -> Self {
        Self::default()
    }

    /// Use exactly `n` worker threads.
    pub fn with_workers(n: usize) -> Self {
        Self { workers: n }
    }

    pub fn sequential() -> Self {
        Self { workers: 1 }
    }

    pub fn is_sequential(&self) -> bool {
        self.workers == 1
    }

    /// Run a closure on a thread pool with this worker count. With 0 workers the
    /// global Rayon pool is used; otherwise a temporary pool is built. If that
    /// pool cannot be built the closure runs on the global pool.
    pub fn install<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R + Send,
        R: Send,
    {
        if self.workers == 0 {
            return f();
        }
        match ThreadPoolBuilder::new().num_threads(self.workers).build() {
            Ok(pool) => pool.install(f),
            Err(err) => {
                warn!(workers = self.workers, error = %err, "worker pool unavailable; using the global pool");
                f()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn install_runs_on_a_sized_pool() {
        let pool = WorkerPool::with_workers(2);
        let threads = pool.install(rayon::current_num_threads);
        assert_eq!(threads, 2);
    }

    #[test]
    fn zero_workers_means_the_global_pool() {
        let pool = WorkerPool::default_workers();
        assert!(!pool.is_sequential());
        assert_eq!(pool.install(|| 7), 7);
        assert!(WorkerPool::sequential().is_sequential());
    }
}
