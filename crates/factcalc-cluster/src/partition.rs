//! Node-range partitioning.

use factcalc_core::Range;

use crate::transport::NodeId;

/// Factor section assigned to `rank` of `world` nodes for the request
/// `(start, end]`.
///
/// Node k spans `(start + k·total/world, start + (k+1)·total/world]` with
/// total = end − start: sections are contiguous, disjoint, and their union
/// reconstructs the request exactly. An empty or inverted request yields
/// empty sections for every rank.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn node_section(start: i64, end: i64, world: usize, rank: NodeId) -> Range {
    debug_assert!(world > 0);
    debug_assert!(rank < world);
    let total = (i128::from(end) - i128::from(start)).max(0);
    let w = world as i128;
    let lo = i128::from(start) + (rank as i128) * total / w;
    let hi = i128::from(start) + (rank as i128 + 1) * total / w;
    Range::section(lo as i64, hi as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn matches_reference_bounds() {
        // Node k covers (k*number/world, (k+1)*number/world].
        let number = 100i64;
        let world = 3;
        for rank in 0..world {
            let section = node_section(0, number, world, rank);
            let k = rank as i64;
            assert_eq!(section.start(), k * number / 3 + 1);
            assert_eq!(section.end(), (k + 1) * number / 3);
        }
    }

    #[test]
    fn single_node_owns_everything() {
        let section = node_section(0, 500, 1, 0);
        assert_eq!(section.start(), 1);
        assert_eq!(section.end(), 500);
    }

    #[test]
    fn empty_request_yields_empty_sections() {
        for rank in 0..4 {
            assert!(node_section(10, 10, 4, rank).is_empty());
            assert!(node_section(10, 3, 4, rank).is_empty());
        }
    }

    #[test]
    fn more_nodes_than_factors() {
        let world = 8;
        let lens: i64 = (0..world).map(|r| node_section(0, 3, world, r).len()).sum();
        assert_eq!(lens, 3);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        /// Sections are pairwise disjoint and their union is exactly the
        /// request, for random (N, W).
        #[test]
        fn sections_cover_exactly(n in 0i64..1_000_000, world in 1usize..33) {
            let mut next_start = 1i64;
            let mut total = 0i64;
            for rank in 0..world {
                let section = node_section(0, n, world, rank);
                if !section.is_empty() {
                    prop_assert_eq!(section.start(), next_start);
                    next_start = section.end() + 1;
                    total += section.len();
                }
            }
            prop_assert_eq!(total, n);
            prop_assert_eq!(next_start, n + 1);
        }

        /// The same holds for requests that do not start at zero.
        #[test]
        fn offset_sections_cover_exactly(start in -1000i64..1000, len in 0i64..100_000, world in 1usize..17) {
            let end = start + len;
            let mut next_start = start + 1;
            let mut total = 0i64;
            for rank in 0..world {
                let section = node_section(start, end, world, rank);
                if !section.is_empty() {
                    prop_assert_eq!(section.start(), next_start);
                    next_start = section.end() + 1;
                    total += section.len();
                }
            }
            prop_assert_eq!(total, len);
        }
    }
}
