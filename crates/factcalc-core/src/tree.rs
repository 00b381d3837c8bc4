//! The concurrent execution tree.
//!
//! Executes a fan-out plan as a tree of rayon tasks: a task whose depth is
//! within the plan splits its range into contiguous sub-ranges and folds the
//! child products; everything else multiplies sequentially. The structured
//! join guarantees a child's writes are visible to its parent before the
//! merge, and each child is merged exactly once.

use num_bigint::BigInt;
use num_traits::One;
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use rayon::ThreadPoolBuilder;
use tracing::debug;

use crate::multiplier::{RangeMultiplier, SequentialMultiplier};
use crate::options::ComputeOptions;
use crate::plan::FanoutPlan;
use crate::range::Range;

/// Error type for tree execution.
///
/// Local computation itself cannot fail; the only fallible step is standing
/// up the worker pool.
#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    /// Thread pool construction failed.
    #[error("failed to create thread pool: {0}")]
    Pool(String),
}

/// Execute the tree over `range`, returning the product of all its factors.
///
/// Plans the fan-out for the range length, builds a pool sized to the thread
/// budget, and runs the root task inside it. Options are expected to be
/// normalized.
pub fn execute(range: Range, opts: &ComputeOptions) -> Result<BigInt, TreeError> {
    let plan = FanoutPlan::for_length(range.len(), opts.leaf_threshold);
    execute_with_plan(range, &plan, opts)
}

/// Execute the tree with a precomputed plan.
pub fn execute_with_plan(
    range: Range,
    plan: &FanoutPlan,
    opts: &ComputeOptions,
) -> Result<BigInt, TreeError> {
    let threads = opts.effective_threads(range.len());
    let pool = ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map_err(|e| TreeError::Pool(e.to_string()))?;

    debug!(
        start = range.start(),
        end = range.end(),
        depth = plan.depth(),
        threads,
        "executing tree"
    );

    let multiplier = SequentialMultiplier::new();
    Ok(pool.install(|| run_task(range, 0, plan, opts.leaf_threshold, &multiplier)))
}

/// Execute one task: split per the plan, or compute the leaf product.
///
/// A range shorter than the leaf threshold never splits, whatever its depth;
/// this keeps deep plan levels from re-splitting sub-ranges that are already
/// leaves.
fn run_task(
    range: Range,
    depth: usize,
    plan: &FanoutPlan,
    leaf_threshold: i64,
    multiplier: &dyn RangeMultiplier,
) -> BigInt {
    if depth < plan.depth() && range.len() >= leaf_threshold {
        let branches = plan.branch_at(depth);
        (0..branches)
            .into_par_iter()
            .map(|i| {
                run_task(
                    range.subrange(i, branches),
                    depth + 1,
                    plan,
                    leaf_threshold,
                    multiplier,
                )
            })
            .reduce(BigInt::one, |a, b| a * b)
    } else {
        multiplier.product(range)
    }
}
