//! Per-node protocol driver.
//!
//! The coordinator partitions the request, scatters bounds, computes its own
//! section concurrently with receiving the others', and folds everything
//! through the reduce board. Workers compute their section and send it back.

use num_bigint::BigInt;
use tracing::debug;

use factcalc_core::{tree, ComputeOptions, Range};

use crate::error::ClusterError;
use crate::partition::node_section;
use crate::reducer::ReduceBoard;
use crate::transport::{NodeId, Transport, TransportError, TAG_BOUNDS, TAG_SECTION};
use crate::wire::{self, TransferBuffer};

/// Run the distributed protocol on this node for the request `(start, end]`.
///
/// Returns `Some(product)` on the coordinator and `None` on workers. Options
/// are expected to be normalized. A request shorter than the distribution
/// threshold is computed by the coordinator alone, the other nodes staying
/// idle.
pub fn run_node(
    transport: &dyn Transport,
    start: i64,
    end: i64,
    coordinator: NodeId,
    opts: &ComputeOptions,
) -> Result<Option<BigInt>, ClusterError> {
    let total = end.saturating_sub(start).max(0);
    if total < opts.distribute_threshold {
        if transport.rank() == coordinator {
            debug!(total, "request below distribution threshold, computing locally");
            let product = tree::execute(Range::section(start, end), opts)?;
            return Ok(Some(product));
        }
        return Ok(None);
    }

    if transport.rank() == coordinator {
        run_coordinator(transport, start, end, coordinator, opts).map(Some)
    } else {
        run_worker(transport, coordinator, opts).map(|()| None)
    }
}

#[allow(clippy::cast_sign_loss)]
fn run_coordinator(
    transport: &dyn Transport,
    start: i64,
    end: i64,
    coordinator: NodeId,
    opts: &ComputeOptions,
) -> Result<BigInt, ClusterError> {
    let world = transport.world_size();

    // Scatter section bounds. Bounds travel in the half-open convention:
    // (base, end].
    for rank in 0..world {
        if rank == coordinator {
            continue;
        }
        let section = node_section(start, end, world, rank);
        let bounds = [(section.start() - 1) as u64, section.end() as u64];
        transport.send(rank, TAG_BOUNDS, &bounds)?;
    }

    let own_section = node_section(start, end, world, coordinator);
    let board = ReduceBoard::new(world);

    let reduced = crossbeam::thread::scope(|scope| {
        let board = &board;

        // The coordinator's own section runs concurrently with receipt of
        // the others'.
        scope.spawn(move |_| match tree::execute(own_section, opts) {
            Ok(product) => board.deposit(coordinator, product),
            Err(error) => board.poison(error.into()),
        });

        // Receive loop: probe each inbound section to learn its source and
        // word count, take delivery, and hand decoding to a dedicated task.
        scope.spawn(move |inner| {
            for _ in 0..world - 1 {
                let envelope = match transport.probe(TAG_SECTION) {
                    Ok(envelope) => envelope,
                    Err(error) => {
                        board.poison(error.into());
                        return;
                    }
                };
                debug!(
                    source = envelope.source,
                    words = envelope.len,
                    "section product inbound"
                );
                let words = match transport.recv(envelope.source, TAG_SECTION) {
                    Ok(words) => words,
                    Err(error) => {
                        board.poison(error.into());
                        return;
                    }
                };
                let buffer = TransferBuffer::from_words(words);
                inner.spawn(move |_| {
                    board.deposit(envelope.source, wire::decode(&buffer));
                });
            }
        });

        // This thread is the dedicated reducer, the accumulator's only
        // writer.
        board.reduce()
    })
    .expect("node task panicked")?;

    Ok(reduced)
}

fn run_worker(
    transport: &dyn Transport,
    coordinator: NodeId,
    opts: &ComputeOptions,
) -> Result<(), ClusterError> {
    let bounds = transport.recv(coordinator, TAG_BOUNDS)?;
    if bounds.len() != 2 {
        return Err(TransportError::Malformed {
            origin: coordinator,
            expected: 2,
            got: bounds.len(),
        }
        .into());
    }

    #[allow(clippy::cast_possible_wrap)]
    let section = Range::section(bounds[0] as i64, bounds[1] as i64);
    debug!(
        rank = transport.rank(),
        base = section.start() - 1,
        end = section.end(),
        "worker section received"
    );

    let product = tree::execute(section, opts)?;
    let buffer = wire::encode(&product);
    transport.send(coordinator, TAG_SECTION, buffer.words())?;
    Ok(())
}
