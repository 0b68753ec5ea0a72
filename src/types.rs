//! Type-safe node identifiers.
//!
//! Nodes of a network are addressed by caller-assigned ids. Ids are opaque keys:
//! they need not be contiguous or zero-based and are never used as positions.
use std::fmt;

/// A node identifier.
///
/// # Invariants
///
/// - Ids are stable: derived graphs (ancestral subgraph, moral graph) keep the ids of
///   the network they were built from.
/// - Ids carry no positional meaning.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct NodeId(u32);

impl NodeId {
    /// Creates a node id from a raw value.
    pub const fn new(id: u32) -> Self {
        NodeId(id)
    }

    /// Returns the raw id as a `u32`.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u32> for NodeId {
    fn from(id: u32) -> Self {
        NodeId(id)
    }
}

impl From<NodeId> for u32 {
    fn from(id: NodeId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_creation() {
        let a = NodeId::new(7);
        let b = NodeId::from(42);
        assert_eq!(a.get(), 7);
        assert_eq!(u32::from(b), 42);
        assert!(a < b);
    }

    #[test]
    fn test_node_id_display() {
        assert_eq!(NodeId::new(3).to_string(), "#3");
    }
}
