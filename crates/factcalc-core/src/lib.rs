//! # factcalc-core
//!
//! Core library for the FactCalc-rs parallel factorial calculator.
//! Implements factor ranges, fan-out planning, and the concurrent execution
//! tree that partitions a range product across rayon tasks.

pub mod constants;
pub mod multiplier;
pub mod options;
pub mod plan;
pub mod range;
pub mod tree;

// Re-exports
pub use constants::{exit_codes, DEFAULT_LEAF_THRESHOLD, FACT_TABLE, MAX_FACT_U64};
pub use multiplier::{RangeMultiplier, SequentialMultiplier};
pub use options::ComputeOptions;
pub use plan::FanoutPlan;
pub use range::Range;
pub use tree::TreeError;

use num_bigint::BigInt;

/// Compute n! using the concurrent execution tree with default options.
///
/// This is a convenience function for simple use cases. For thread budgets,
/// thresholds, or node distribution, use `factcalc-orchestration`.
///
/// # Example
/// ```
/// assert_eq!(factcalc_core::factorial(5).to_string(), "120");
/// assert_eq!(factcalc_core::factorial(0).to_string(), "1");
/// ```
#[must_use]
pub fn factorial(n: i64) -> BigInt {
    let opts = ComputeOptions::default().normalize();
    tree::execute(Range::section(0, n), &opts)
        .expect("thread pool construction should not fail with default options")
}
