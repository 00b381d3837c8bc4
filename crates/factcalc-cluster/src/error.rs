//! Cluster error type.

use factcalc_core::TreeError;

use crate::transport::TransportError;

/// Error from a distributed computation.
#[derive(Debug, thiserror::Error)]
pub enum ClusterError {
    /// A transport step failed; the whole computation aborts.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Local tree execution could not start.
    #[error(transparent)]
    Tree(#[from] TreeError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_error_display() {
        let err = ClusterError::from(TransportError::SendDisconnected { dest: 3 });
        assert_eq!(err.to_string(), "send to node 3 failed: peer disconnected");
    }

    #[test]
    fn tree_error_display() {
        let err = ClusterError::from(TreeError::Pool("no threads".into()));
        assert_eq!(err.to_string(), "failed to create thread pool: no threads");
    }
}
