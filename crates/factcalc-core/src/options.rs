//! Computation options and configuration.

use crate::constants::DEFAULT_LEAF_THRESHOLD;

/// Options for a range-product computation.
///
/// Out-of-range budgets are not errors: `normalize` coerces them to safe
/// defaults, and an unset thread count falls back to every available
/// processor.
#[derive(Debug, Clone)]
pub struct ComputeOptions {
    /// Worker threads per node (0 = all available cores).
    pub thread_budget: usize,
    /// Cooperating nodes (0 or 1 = purely local).
    pub node_budget: usize,
    /// Range length below which a task computes sequentially.
    pub leaf_threshold: i64,
    /// Minimum range length worth distributing across nodes
    /// (0 = the node budget).
    pub distribute_threshold: i64,
}

impl Default for ComputeOptions {
    fn default() -> Self {
        Self {
            thread_budget: 0,
            node_budget: 1,
            leaf_threshold: DEFAULT_LEAF_THRESHOLD,
            distribute_threshold: 0,
        }
    }
}

impl ComputeOptions {
    /// Normalize options, coercing out-of-range values to safe defaults.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn normalize(mut self) -> Self {
        if self.node_budget == 0 {
            self.node_budget = 1;
        }
        if self.leaf_threshold < 2 {
            self.leaf_threshold = DEFAULT_LEAF_THRESHOLD;
        }
        if self.distribute_threshold < 1 {
            self.distribute_threshold = self.node_budget as i64;
        }
        self
    }

    /// Worker threads for a range of `len` factors: the configured budget,
    /// or every available core when unset, collapsed to one thread when the
    /// range has fewer factors than the budget.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn effective_threads(&self, len: i64) -> usize {
        let budget = if self.thread_budget == 0 {
            available_parallelism()
        } else {
            self.thread_budget
        };
        if len < budget as i64 {
            1
        } else {
            budget
        }
    }
}

/// Number of available processors (1 when it cannot be determined).
#[must_use]
pub fn available_parallelism() -> usize {
    std::thread::available_parallelism()
        .map(std::num::NonZero::get)
        .unwrap_or(1)
}
