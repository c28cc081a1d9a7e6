/// Minimum number of elements before `Auto` switches to the parallel path.
const PARALLEL_THRESHOLD: usize = 100_000;

/// Controls how the filtering phases are executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionStrategy {
    /// Pick serial or parallel based on the number of elements.
    ///
    /// Images with at least 100K elements run on the global Rayon thread
    /// pool; smaller ones run serially to avoid fork-join overhead.
    #[default]
    Auto,

    /// Always run on the global Rayon thread pool, one row per work item.
    Parallel,

    /// Run sequentially on the current thread.
    ///
    /// Useful for small images, debugging, or when the overhead of
    /// parallelization outweighs the benefits.
    Serial,
}

impl ExecutionStrategy {
    /// Whether the strategy resolves to the parallel path for `numel` elements.
    pub fn is_parallel(&self, numel: usize) -> bool {
        match self {
            ExecutionStrategy::Auto => numel >= PARALLEL_THRESHOLD,
            ExecutionStrategy::Parallel => true,
            ExecutionStrategy::Serial => false,
        }
    }
}
