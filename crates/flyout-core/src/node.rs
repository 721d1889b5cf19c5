//! Node identity for elements owned by widgets or the host document.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for allocating widget-owned node IDs. Zero is the document.
static NODE_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Identity of a node in the host tree.
///
/// Events are matched against nodes by identity, never by geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u64);

impl NodeId {
    /// The document itself; target of global listeners.
    pub const DOCUMENT: Self = Self(0);

    /// Create a node ID from a raw value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Allocate a fresh, process-unique node ID.
    #[must_use]
    pub fn next() -> Self {
        Self(NODE_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_next_is_unique() {
        let a = NodeId::next();
        let b = NodeId::next();
        assert_ne!(a, b);
        assert_ne!(a, NodeId::DOCUMENT);
    }

    #[test]
    fn test_node_id_new() {
        assert_eq!(NodeId::new(7).0, 7);
    }
}
