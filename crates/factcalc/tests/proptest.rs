//! Property-based tests driving the orchestrator the way the binary does.

use num_bigint::BigInt;
use num_traits::One;
use proptest::prelude::*;

use factcalc_core::ComputeOptions;
use factcalc_orchestration::orchestrator::{compute, run_local_cluster};

fn opts(threads: usize, nodes: usize) -> ComputeOptions {
    ComputeOptions {
        thread_budget: threads,
        node_budget: nodes,
        ..Default::default()
    }
}

fn reference(n: i64) -> BigInt {
    let mut acc = BigInt::one();
    for factor in 1..=n {
        acc *= factor;
    }
    acc
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// compute(0, n) equals the sequential product of 1..n whatever the
    /// budgets.
    #[test]
    fn compute_matches_reference(n in 0i64..800, threads in 0usize..9, nodes in 1usize..5) {
        let result = compute(0, n, &opts(threads, nodes)).unwrap();
        prop_assert_eq!(result, reference(n), "n={} t={} w={}", n, threads, nodes);
    }

    /// The factorial recurrence n! = n * (n-1)! holds across the fast-path
    /// boundary and beyond.
    #[test]
    fn factorial_recurrence(n in 1i64..400) {
        let options = opts(2, 1);
        let smaller = compute(0, n - 1, &options).unwrap();
        let larger = compute(0, n, &options).unwrap();
        prop_assert_eq!(larger, smaller * n);
    }

    /// Splitting a request at any interior point multiplies back to the
    /// whole.
    #[test]
    fn sections_compose(n in 1i64..500, cut in 0i64..500) {
        let cut = cut.min(n);
        let options = opts(2, 1);
        let left = compute(0, cut, &options).unwrap();
        let right = compute(cut, n, &options).unwrap();
        let whole = compute(0, n, &options).unwrap();
        prop_assert_eq!(left * right, whole, "n={} cut={}", n, cut);
    }

    /// The coordinator's rank never changes the answer.
    #[test]
    fn coordinator_rank_is_irrelevant(n in 21i64..300, coordinator in 0usize..3) {
        let options = opts(2, 3).normalize();
        let result = run_local_cluster(0, n, &options, coordinator).unwrap();
        prop_assert_eq!(result, reference(n), "n={} coordinator={}", n, coordinator);
    }
}

/// Empty requests return 1 for any budget.
#[test]
fn empty_request_is_identity() {
    for (start, end) in [(0i64, -1i64), (7, 6), (7, 0)] {
        for nodes in [1usize, 2, 8] {
            let result = compute(start, end, &opts(3, nodes)).unwrap();
            assert_eq!(result, BigInt::one(), "start={start} end={end}");
        }
    }
}
