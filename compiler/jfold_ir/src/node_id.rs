//! Node handles for the AST arena.

use std::fmt;
use std::hash::{Hash, Hasher};

/// Index into the node arena.
///
/// Handles are plain `u32` indices, so a child-to-parent link is a
/// `NodeId` rather than a second owner of the parent node.
#[derive(Copy, Clone, Eq, PartialEq, PartialOrd, Ord)]
#[repr(transparent)]
pub struct NodeId(u32);

impl NodeId {
    /// Invalid node ID (sentinel value). Stands in for an absent child
    /// in optional single slots and for "no parent".
    pub const INVALID: NodeId = NodeId(u32::MAX);

    #[inline]
    pub const fn new(index: u32) -> Self {
        NodeId(index)
    }

    /// Get the index into the arena.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Check if this ID represents a present (non-sentinel) node.
    #[inline]
    pub const fn is_present(self) -> bool {
        self.0 != u32::MAX
    }

    /// Convert the sentinel into `None`.
    #[inline]
    pub const fn present(self) -> Option<NodeId> {
        if self.is_present() {
            Some(self)
        } else {
            None
        }
    }
}

impl Hash for NodeId {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_present() {
            write!(f, "NodeId({})", self.0)
        } else {
            write!(f, "NodeId::INVALID")
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_present() {
            write!(f, "#{}", self.0)
        } else {
            write!(f, "#<none>")
        }
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::INVALID
    }
}

impl From<Option<NodeId>> for NodeId {
    fn from(value: Option<NodeId>) -> Self {
        value.unwrap_or(NodeId::INVALID)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_sentinel() {
        assert!(!NodeId::INVALID.is_present());
        assert!(!NodeId::default().is_present());
        assert_eq!(NodeId::INVALID.present(), None);
        assert_eq!(NodeId::new(3).present(), Some(NodeId::new(3)));
    }

    #[test]
    fn test_node_id_from_option() {
        assert_eq!(NodeId::from(None), NodeId::INVALID);
        assert_eq!(NodeId::from(Some(NodeId::new(7))).index(), 7);
    }

    #[test]
    fn test_node_id_formatting() {
        assert_eq!(format!("{:?}", NodeId::new(4)), "NodeId(4)");
        assert_eq!(format!("{}", NodeId::new(4)), "#4");
        assert_eq!(format!("{}", NodeId::INVALID), "#<none>");
    }

    #[test]
    fn test_memory_size() {
        assert_eq!(std::mem::size_of::<NodeId>(), 4);
    }
}
