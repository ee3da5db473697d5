//! Executor trait for running independent render jobs.
//!
//! One render pass is strictly sequential, but separate renders share no
//! mutable state. An executor decides how a batch of them is scheduled
//! without tying callers to a specific threading implementation.

use std::fmt::Debug;

/// Runs a batch of work items, potentially in parallel.
///
/// # Implementations
///
/// - `SyncExecutor`: Sequential execution on the calling thread
/// - `RayonExecutor` (folio-executor): Work-stealing thread pool
pub trait Executor: Send + Sync + Debug {
    /// Applies `f` to every item. Results come back in input order whatever
    /// order the items actually ran in.
    fn execute_all<T, R, F>(&self, items: Vec<T>, f: F) -> Vec<R>
    where
        T: Send + 'static,
        R: Send + 'static,
        F: Fn(T) -> R + Send + Sync + Clone + 'static;

    /// 1 for sequential executors, the worker count otherwise.
    fn parallelism(&self) -> usize;

    /// A human-readable name for logging.
    fn name(&self) -> &'static str;
}

/// Processes items one after another on the calling thread.
#[derive(Debug, Clone, Default)]
pub struct SyncExecutor;

impl SyncExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl Executor for SyncExecutor {
    fn execute_all<T, R, F>(&self, items: Vec<T>, f: F) -> Vec<R>
    where
        T: Send + 'static,
        R: Send + 'static,
        F: Fn(T) -> R + Send + Sync + Clone + 'static,
    {
        items.into_iter().map(f).collect()
    }

    fn parallelism(&self) -> usize {
        1
    }

    fn name(&self) -> &'static str {
        "SyncExecutor"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sync_executor_keeps_input_order() {
        let executor = SyncExecutor::new();
        let results = executor.execute_all(vec!["a", "bb", "ccc"], |s| s.len());
        assert_eq!(results, vec![1, 2, 3]);
        assert_eq!(executor.parallelism(), 1);
        assert_eq!(executor.name(), "SyncExecutor");
    }

    #[test]
    fn test_sync_executor_carries_failures_through() {
        let executor = SyncExecutor::new();
        let results: Vec<Result<u32, String>> = executor.execute_all(vec![2, 0, 5], |x| {
            if x == 0 {
                Err("empty batch".to_string())
            } else {
                Ok(x * 10)
            }
        });
        assert_eq!(results, vec![Ok(20), Err("empty batch".to_string()), Ok(50)]);
    }

    #[test]
    fn test_sync_executor_empty_input() {
        let results = SyncExecutor::new().execute_all(Vec::<u8>::new(), |x| x);
        assert!(results.is_empty());
    }
}
