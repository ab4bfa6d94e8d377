//! Rayon-based parallelisation utilities.
//!
//! This module provides the worker-pool configuration and the chunked map
//! helpers used by the batch pipeline. Rows are independent, so work is
//! split into fixed-size chunks and results are collected in input order.

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};

/// Batch size for parallel processing.
///
/// One EEP row costs two grid solves, so small chunks already amortise the
/// scheduling overhead.
pub const DEFAULT_BATCH_SIZE: usize = 64;

/// Minimum number of items before the pool is used.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 100;

/// Processes items in parallel batches.
///
/// # Arguments
///
/// * `items` - Slice of items to process
/// * `batch_size` - Number of items per batch
/// * `processor` - Function to apply to each batch
///
/// # Returns
///
/// Vector of results from each batch, in batch order.
pub fn process_in_batches<T, R, F>(items: &[T], batch_size: usize, processor: F) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(&[T]) -> R + Sync + Send,
{
    items.par_chunks(batch_size.max(1)).map(processor).collect()
}

/// Maps every item in parallel chunks of `batch_size`, keeping input order.
pub fn map_in_batches<T, R, F>(items: &[T], batch_size: usize, mapper: F) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Sync + Send,
{
    process_in_batches(items, batch_size, |chunk| {
        chunk.iter().map(&mapper).collect::<Vec<R>>()
    })
    .into_iter()
    .flatten()
    .collect()
}

/// Configuration for parallel execution.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ParallelConfig {
    /// Worker threads; `None` (or 0) uses one per logical CPU
    pub num_threads: Option<usize>,
    /// Batch size for chunked processing
    pub batch_size: usize,
    /// Minimum items before using parallelism
    pub parallel_threshold: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            num_threads: None,
            batch_size: DEFAULT_BATCH_SIZE,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl ParallelConfig {
    /// Creates a new parallel configuration.
    pub fn new(batch_size: usize, parallel_threshold: usize) -> Self {
        Self {
            num_threads: None,
            batch_size: batch_size.max(1),
            parallel_threshold,
        }
    }

    /// Sets an explicit worker count.
    pub fn with_num_threads(mut self, num_threads: usize) -> Self {
        self.num_threads = Some(num_threads);
        self
    }

    /// Sets the chunk size.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Sets the item count from which the pool is used.
    pub fn with_parallel_threshold(mut self, parallel_threshold: usize) -> Self {
        self.parallel_threshold = parallel_threshold;
        self
    }

    /// Resolved worker count.
    pub fn worker_count(&self) -> usize {
        match self.num_threads {
            Some(n) if n > 0 => n,
            _ => num_cpus::get(),
        }
    }

    /// Returns whether to use parallel processing for the given item count.
    #[inline]
    pub fn should_parallelize(&self, n_items: usize) -> bool {
        n_items >= self.parallel_threshold
    }

    /// Builds a dedicated pool with [`worker_count`](Self::worker_count)
    /// threads.
    pub fn build_pool(&self) -> Result<ThreadPool, ThreadPoolBuildError> {
        ThreadPoolBuilder::new()
            .num_threads(self.worker_count())
            .thread_name(|i| format!("eep-worker-{}", i))
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_in_batches() {
        let items: Vec<i32> = (0..100).collect();
        let sums: Vec<i32> = process_in_batches(&items, 10, |batch| batch.iter().sum());

        assert_eq!(sums.len(), 10);
        assert_eq!(sums.iter().sum::<i32>(), (0..100).sum());
    }

    #[test]
    fn test_map_in_batches_keeps_order() {
        let items: Vec<usize> = (0..1000).collect();
        let doubled = map_in_batches(&items, 7, |&x| x * 2);

        assert_eq!(doubled.len(), 1000);
        assert!(doubled.iter().enumerate().all(|(i, &v)| v == 2 * i));
    }

    #[test]
    fn test_map_in_batches_zero_batch_size() {
        let items = [1, 2, 3];
        assert_eq!(map_in_batches(&items, 0, |&x| x + 1), vec![2, 3, 4]);
    }

    #[test]
    fn test_parallel_config_default() {
        let config = ParallelConfig::default();
        assert_eq!(config.batch_size, DEFAULT_BATCH_SIZE);
        assert_eq!(config.parallel_threshold, 100);
        assert_eq!(config.worker_count(), num_cpus::get());
    }

    #[test]
    fn test_worker_count() {
        assert_eq!(ParallelConfig::default().with_num_threads(3).worker_count(), 3);
        assert_eq!(
            ParallelConfig::default().with_num_threads(0).worker_count(),
            num_cpus::get()
        );
    }

    #[test]
    fn test_should_parallelize() {
        let config = ParallelConfig::default();
        assert!(!config.should_parallelize(50));
        assert!(config.should_parallelize(100));
        assert!(config.should_parallelize(1000));
    }

    #[test]
    fn test_build_pool() {
        let pool = ParallelConfig::default().with_num_threads(2).build_pool().unwrap();
        assert_eq!(pool.current_num_threads(), 2);
        let total: i32 = pool.install(|| map_in_batches(&[1, 2, 3, 4], 2, |&x| x).iter().sum());
        assert_eq!(total, 10);
    }
}
