//! Sequential range products.
//!
//! `RangeMultiplier` is the narrow interface for leaf products; the tree
//! calls it for every range that is too short to split further.

use num_bigint::BigInt;
use num_traits::One;

use crate::range::Range;

/// Narrow interface for computing the product over one factor range.
pub trait RangeMultiplier: Send + Sync {
    /// Product of all factors in `range`, seeded at 1.
    fn product(&self, range: Range) -> BigInt;

    /// Get the name of this multiplier.
    fn name(&self) -> &str;
}

/// Straight sequential multiplication, one factor at a time.
pub struct SequentialMultiplier;

impl SequentialMultiplier {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for SequentialMultiplier {
    fn default() -> Self {
        Self::new()
    }
}

impl RangeMultiplier for SequentialMultiplier {
    fn product(&self, range: Range) -> BigInt {
        let mut acc = BigInt::one();
        if range.is_empty() {
            return acc;
        }
        for factor in range.start()..=range.end() {
            acc *= factor;
        }
        acc
    }

    fn name(&self) -> &'static str {
        "Sequential"
    }
}
