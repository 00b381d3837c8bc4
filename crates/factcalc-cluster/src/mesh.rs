//! In-process cluster bootstrap.
//!
//! Stands in for the runtime that establishes participant count and identity
//! in a real deployment: every node gets a transport wired to every other
//! node's inbox.

use crossbeam_channel::unbounded;

use crate::transport::{ChannelTransport, Frame};

/// Build a fully-connected mesh of `world` channel transports.
///
/// Transport k belongs to node k. Nodes hold no link to themselves, so a
/// mesh of one has no links at all.
#[must_use]
pub fn local_mesh(world: usize) -> Vec<ChannelTransport> {
    let (senders, inboxes): (Vec<_>, Vec<_>) = (0..world).map(|_| unbounded::<Frame>()).unzip();

    inboxes
        .into_iter()
        .enumerate()
        .map(|(rank, inbox)| {
            let peers = senders
                .iter()
                .enumerate()
                .map(|(peer, sender)| (peer != rank).then(|| sender.clone()))
                .collect();
            ChannelTransport::new(rank, peers, inbox)
        })
        .collect()
}
