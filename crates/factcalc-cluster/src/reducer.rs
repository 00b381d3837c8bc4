//! Incremental reduction of per-node partial products.
//!
//! Decode tasks deposit products onto a board of per-node slots; one
//! dedicated reducer task folds them into its accumulator as they arrive.
//! The accumulator therefore has exactly one writer, and slot handoff is
//! guarded by a mutex and condvar.

use num_bigint::BigInt;
use num_traits::One;
use parking_lot::{Condvar, Mutex, MutexGuard};
use tracing::debug;

use crate::error::ClusterError;
use crate::transport::NodeId;

/// Lifecycle of one node's inbound product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotStatus {
    /// Nothing has arrived from this node yet.
    Pending,
    /// The product is decoded and waiting to be folded.
    Received,
    /// The product has been folded into the accumulator.
    Merged,
}

/// One node's slot on the board: its status and, between Received and
/// Merged, the decoded product it owns.
#[derive(Debug)]
struct ReceiveSlot {
    status: SlotStatus,
    product: Option<BigInt>,
}

struct BoardState {
    slots: Vec<ReceiveSlot>,
    poisoned: Option<ClusterError>,
}

/// Shared board of per-node slots plus the reducer's rendezvous.
pub struct ReduceBoard {
    state: Mutex<BoardState>,
    ready: Condvar,
}

impl ReduceBoard {
    /// Board with one pending slot per node.
    #[must_use]
    pub fn new(world: usize) -> Self {
        let slots = (0..world)
            .map(|_| ReceiveSlot {
                status: SlotStatus::Pending,
                product: None,
            })
            .collect();
        Self {
            state: Mutex::new(BoardState {
                slots,
                poisoned: None,
            }),
            ready: Condvar::new(),
        }
    }

    /// Deposit node `rank`'s product, marking its slot Received.
    ///
    /// # Panics
    /// Panics on a second deposit for the same rank; each node sends
    /// exactly one result message.
    pub fn deposit(&self, rank: NodeId, product: BigInt) {
        let mut state = self.state.lock();
        let slot = &mut state.slots[rank];
        assert_eq!(
            slot.status,
            SlotStatus::Pending,
            "node {rank} deposited twice"
        );
        slot.product = Some(product);
        slot.status = SlotStatus::Received;
        drop(state);
        self.ready.notify_one();
    }

    /// Abort the reduction after a failed transport or tree step.
    pub fn poison(&self, error: ClusterError) {
        let mut state = self.state.lock();
        if state.poisoned.is_none() {
            state.poisoned = Some(error);
        }
        drop(state);
        self.ready.notify_one();
    }

    /// Status of node `rank`'s slot.
    #[must_use]
    pub fn status(&self, rank: NodeId) -> SlotStatus {
        self.state.lock().slots[rank].status
    }

    /// Fold every slot's product into one accumulator.
    ///
    /// Repeatedly scans all slots, folds each Received product exactly once,
    /// and returns once every slot is Merged. Runs on one dedicated task;
    /// this is the accumulator's only writer. Arrival order is arbitrary
    /// since the product is commutative.
    pub fn reduce(&self) -> Result<BigInt, ClusterError> {
        let mut acc = BigInt::one();
        let mut state = self.state.lock();
        loop {
            if let Some(error) = state.poisoned.take() {
                return Err(error);
            }

            let mut batch = Vec::new();
            for (rank, slot) in state.slots.iter_mut().enumerate() {
                if slot.status == SlotStatus::Received {
                    batch.push(slot.product.take().expect("received slot holds a product"));
                    slot.status = SlotStatus::Merged;
                    debug!(rank, "merging section product");
                }
            }

            if batch.is_empty() {
                if state
                    .slots
                    .iter()
                    .all(|slot| slot.status == SlotStatus::Merged)
                {
                    return Ok(acc);
                }
                self.ready.wait(&mut state);
                continue;
            }

            // Multiply with the board unlocked so depositors never wait on
            // big-integer arithmetic.
            MutexGuard::unlocked(&mut state, || {
                for product in batch {
                    acc *= product;
                }
            });
        }
    }
}
