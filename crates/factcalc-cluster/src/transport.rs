//! Message transport between cooperating nodes.
//!
//! Receivers follow a probe-then-receive discipline: a probe learns a
//! pending message's source and word count, then `recv` takes delivery.
//! `ChannelTransport` links in-process nodes over crossbeam channels.

use std::collections::VecDeque;

use crossbeam_channel::{Receiver, Sender};
use parking_lot::Mutex;

/// Node identifier within a cluster (0-based rank).
pub type NodeId = usize;

/// Message tag distinguishing protocol phases.
pub type Tag = u8;

/// Tag for section bounds sent by the coordinator.
pub const TAG_BOUNDS: Tag = 0;
/// Tag for a serialized section product sent back to the coordinator.
pub const TAG_SECTION: Tag = 1;

/// Transport failure at a node boundary. Fatal: the computation aborts with
/// no retry and no partial-result salvage.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The destination's inbox is gone.
    #[error("send to node {dest} failed: peer disconnected")]
    SendDisconnected {
        /// Destination rank.
        dest: NodeId,
    },

    /// Every peer holding a sender for this node's inbox is gone.
    #[error("receive on node {rank} failed: all peers disconnected")]
    RecvDisconnected {
        /// This node's rank.
        rank: NodeId,
    },

    /// No link exists to the destination.
    #[error("no route from node {rank} to node {dest}")]
    NoRoute {
        /// This node's rank.
        rank: NodeId,
        /// Destination rank.
        dest: NodeId,
    },

    /// A protocol message did not have the expected shape.
    #[error("malformed message from node {origin}: expected {expected} words, got {got}")]
    Malformed {
        /// Sending rank.
        origin: NodeId,
        /// Expected word count.
        expected: usize,
        /// Received word count.
        got: usize,
    },
}

/// Size and origin of a pending message, learned by probing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Envelope {
    /// Rank of the sending node.
    pub source: NodeId,
    /// Message tag.
    pub tag: Tag,
    /// Number of payload words.
    pub len: usize,
}

/// A message-passing link between cooperating nodes.
pub trait Transport: Send + Sync {
    /// This node's rank.
    fn rank(&self) -> NodeId;

    /// Number of participating nodes.
    fn world_size(&self) -> usize;

    /// Send a word payload to `dest`.
    fn send(&self, dest: NodeId, tag: Tag, words: &[u64]) -> Result<(), TransportError>;

    /// Block until a message with `tag` is pending, reporting its source and
    /// word count without consuming it.
    fn probe(&self, tag: Tag) -> Result<Envelope, TransportError>;

    /// Take delivery of the pending message from `source` with `tag`,
    /// blocking until it arrives.
    fn recv(&self, source: NodeId, tag: Tag) -> Result<Vec<u64>, TransportError>;
}

/// One message on a channel link.
#[derive(Debug)]
pub(crate) struct Frame {
    pub(crate) source: NodeId,
    pub(crate) tag: Tag,
    pub(crate) words: Vec<u64>,
}

/// Channel-backed transport connecting in-process nodes.
///
/// Messages pulled off the inbox while looking for a different tag or source
/// are parked in a pending queue and delivered to the matching `recv`. A
/// node holds no sender for its own inbox, so when every peer's transport is
/// dropped the inbox disconnects and blocked operations fail.
pub struct ChannelTransport {
    rank: NodeId,
    peers: Vec<Option<Sender<Frame>>>,
    inbox: Receiver<Frame>,
    pending: Mutex<VecDeque<Frame>>,
}

impl ChannelTransport {
    pub(crate) fn new(
        rank: NodeId,
        peers: Vec<Option<Sender<Frame>>>,
        inbox: Receiver<Frame>,
    ) -> Self {
        Self {
            rank,
            peers,
            inbox,
            pending: Mutex::new(VecDeque::new()),
        }
    }

    fn pull(&self) -> Result<Frame, TransportError> {
        self.inbox
            .recv()
            .map_err(|_| TransportError::RecvDisconnected { rank: self.rank })
    }
}

impl Transport for ChannelTransport {
    fn rank(&self) -> NodeId {
        self.rank
    }

    fn world_size(&self) -> usize {
        self.peers.len()
    }

    fn send(&self, dest: NodeId, tag: Tag, words: &[u64]) -> Result<(), TransportError> {
        let link = self
            .peers
            .get(dest)
            .and_then(Option::as_ref)
            .ok_or(TransportError::NoRoute {
                rank: self.rank,
                dest,
            })?;
        link.send(Frame {
            source: self.rank,
            tag,
            words: words.to_vec(),
        })
        .map_err(|_| TransportError::SendDisconnected { dest })
    }

    fn probe(&self, tag: Tag) -> Result<Envelope, TransportError> {
        let mut pending = self.pending.lock();
        if let Some(frame) = pending.iter().find(|f| f.tag == tag) {
            return Ok(Envelope {
                source: frame.source,
                tag: frame.tag,
                len: frame.words.len(),
            });
        }
        loop {
            let frame = self.pull()?;
            let envelope = Envelope {
                source: frame.source,
                tag: frame.tag,
                len: frame.words.len(),
            };
            pending.push_back(frame);
            if envelope.tag == tag {
                return Ok(envelope);
            }
        }
    }

    fn recv(&self, source: NodeId, tag: Tag) -> Result<Vec<u64>, TransportError> {
        let mut pending = self.pending.lock();
        if let Some(pos) = pending
            .iter()
            .position(|f| f.source == source && f.tag == tag)
        {
            let frame = pending.remove(pos).expect("position is in bounds");
            return Ok(frame.words);
        }
        loop {
            let frame = self.pull()?;
            if frame.source == source && frame.tag == tag {
                return Ok(frame.words);
            }
            pending.push_back(frame);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::local_mesh;

    #[test]
    fn send_and_recv() {
        let nodes = local_mesh(2);
        nodes[0].send(1, TAG_SECTION, &[1, 2, 3]).unwrap();
        assert_eq!(nodes[1].recv(0, TAG_SECTION).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn probe_reports_size_without_consuming() {
        let nodes = local_mesh(2);
        nodes[0].send(1, TAG_SECTION, &[9, 9, 9, 9]).unwrap();
        let env = nodes[1].probe(TAG_SECTION).unwrap();
        assert_eq!(env.source, 0);
        assert_eq!(env.tag, TAG_SECTION);
        assert_eq!(env.len, 4);
        // Still deliverable after the probe.
        assert_eq!(nodes[1].recv(0, TAG_SECTION).unwrap(), vec![9, 9, 9, 9]);
    }

    #[test]
    fn recv_skips_other_tags() {
        let nodes = local_mesh(2);
        nodes[0].send(1, TAG_BOUNDS, &[7, 8]).unwrap();
        nodes[0].send(1, TAG_SECTION, &[42]).unwrap();
        // Deliver out of arrival order: section first, bounds after.
        assert_eq!(nodes[1].recv(0, TAG_SECTION).unwrap(), vec![42]);
        assert_eq!(nodes[1].recv(0, TAG_BOUNDS).unwrap(), vec![7, 8]);
    }

    #[test]
    fn probe_skips_other_tags() {
        let nodes = local_mesh(3);
        nodes[1].send(0, TAG_BOUNDS, &[1]).unwrap();
        nodes[2].send(0, TAG_SECTION, &[5, 6]).unwrap();
        let env = nodes[0].probe(TAG_SECTION).unwrap();
        assert_eq!(env.source, 2);
        assert_eq!(env.len, 2);
    }

    #[test]
    fn no_route_to_unknown_rank() {
        let nodes = local_mesh(2);
        let err = nodes[0].send(5, TAG_SECTION, &[1]).unwrap_err();
        assert!(matches!(err, TransportError::NoRoute { rank: 0, dest: 5 }));
    }

    #[test]
    fn no_route_to_self() {
        let nodes = local_mesh(2);
        let err = nodes[1].send(1, TAG_SECTION, &[1]).unwrap_err();
        assert!(matches!(err, TransportError::NoRoute { rank: 1, dest: 1 }));
    }

    #[test]
    fn recv_fails_when_peers_gone() {
        let mut nodes = local_mesh(2);
        let receiver = nodes.pop().expect("two nodes");
        drop(nodes);
        let err = receiver.recv(0, TAG_SECTION).unwrap_err();
        assert!(matches!(err, TransportError::RecvDisconnected { rank: 1 }));
    }

    #[test]
    fn send_fails_when_peer_gone() {
        let mut nodes = local_mesh(2);
        let sender = nodes.pop().expect("two nodes");
        drop(nodes);
        let err = sender.send(0, TAG_SECTION, &[1]).unwrap_err();
        assert!(matches!(err, TransportError::SendDisconnected { dest: 0 }));
    }
}
