//! # factcalc-cluster
//!
//! Cross-node plumbing for FactCalc-rs: the wire codec for partial products,
//! the probe/receive transport abstraction, node-range partitioning, and the
//! distributed reduction protocol.

pub mod error;
pub mod mesh;
pub mod node;
pub mod partition;
pub mod reducer;
pub mod transport;
pub mod wire;

// Re-exports
pub use error::ClusterError;
pub use mesh::local_mesh;
pub use node::run_node;
pub use partition::node_section;
pub use reducer::{ReduceBoard, SlotStatus};
pub use transport::{
    ChannelTransport, Envelope, NodeId, Tag, Transport, TransportError, TAG_BOUNDS, TAG_SECTION,
};
pub use wire::{decode, encode, TransferBuffer};
