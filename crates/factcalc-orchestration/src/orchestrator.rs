//! Core orchestration: local versus distributed execution.

use num_bigint::BigInt;
use num_traits::One;
use tracing::debug;

use factcalc_cluster::{local_mesh, run_node, ClusterError, NodeId};
use factcalc_core::{tree, ComputeOptions, Range, TreeError, FACT_TABLE, MAX_FACT_U64};

/// Error from a computation.
#[derive(Debug, thiserror::Error)]
pub enum ComputeError {
    /// The distributed protocol failed.
    #[error(transparent)]
    Cluster(#[from] ClusterError),

    /// Local tree execution could not start.
    #[error(transparent)]
    Tree(#[from] TreeError),
}

/// Compute the product of the factors in `(start, end]`: factorial(N) when
/// start = 0 and end = N.
///
/// An empty or inverted request (end ≤ start) is not rejected; it yields 1.
/// Purely local execution runs the plan/tree directly; a node budget above
/// one spreads the request over an in-process mesh and runs the distributed
/// reduction protocol with node 0 coordinating.
pub fn compute(start: i64, end: i64, opts: &ComputeOptions) -> Result<BigInt, ComputeError> {
    let opts = opts.clone().normalize();
    let range = Range::section(start, end);

    // Empty request: multiplicative identity, no tasks at all.
    if range.is_empty() {
        return Ok(BigInt::one());
    }

    // Factorial fast path: 20! is the last factorial that fits in a u64.
    if start == 0 && end <= MAX_FACT_U64 {
        #[allow(clippy::cast_sign_loss)]
        return Ok(BigInt::from(FACT_TABLE[end as usize]));
    }

    if opts.node_budget <= 1 || range.len() < opts.distribute_threshold {
        debug!(start, end, threads = opts.thread_budget, "local execution");
        return Ok(tree::execute(range, &opts)?);
    }

    debug!(
        start,
        end,
        nodes = opts.node_budget,
        threads = opts.thread_budget,
        "distributed execution"
    );
    run_local_cluster(start, end, &opts, 0)
}

/// Compute n! with the given options.
pub fn factorial(n: i64, opts: &ComputeOptions) -> Result<BigInt, ComputeError> {
    compute(0, n, opts)
}

/// Run the request across an in-process mesh of `opts.node_budget` nodes,
/// returning the coordinator's result.
///
/// The coordinator rank is a parameter so callers can verify that the result
/// does not depend on which node coordinates; `compute` always uses rank 0.
pub fn run_local_cluster(
    start: i64,
    end: i64,
    opts: &ComputeOptions,
    coordinator: NodeId,
) -> Result<BigInt, ComputeError> {
    let normalized = opts.clone().normalize();
    let opts = &normalized;
    let transports = local_mesh(opts.node_budget);

    let outcome = crossbeam::thread::scope(|scope| {
        let handles: Vec<_> = transports
            .iter()
            .map(|transport| {
                scope.spawn(move |_| run_node(transport, start, end, coordinator, opts))
            })
            .collect();

        let mut result = None;
        let mut first_error = None;
        for handle in handles {
            match handle.join().expect("node thread panicked") {
                Ok(Some(product)) => result = Some(product),
                Ok(None) => {}
                Err(error) => {
                    if first_error.is_none() {
                        first_error = Some(error);
                    }
                }
            }
        }

        match first_error {
            Some(error) => Err(error),
            None => Ok(result.expect("coordinator produced a result")),
        }
    })
    .expect("cluster scope panicked")?;

    Ok(outcome)
}
