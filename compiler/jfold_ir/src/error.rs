//! Structural contract violations.

use crate::kind::NodeTag;
use crate::location::Location;
use crate::node_id::NodeId;

/// A tree operation was asked to do something the tree's invariants do
/// not allow.
///
/// These are caller-contract errors: a rule handed in a node it had no
/// business touching, or the tree was already malformed. They are never
/// retried or downgraded.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvariantViolation {
    /// The handle is the sentinel or points outside the arena.
    #[error("node {node} is absent from the tree")]
    AbsentNode { node: NodeId },

    /// The node has no parent and is not the designated root.
    #[error("node {node} ({tag}) is detached: it has no parent and is not the tree root")]
    Detached { node: NodeId, tag: NodeTag },

    /// The node has a parent but no recorded location in it.
    #[error("node {node} ({tag}) has parent {parent} but no location in it")]
    MissingLocation {
        node: NodeId,
        tag: NodeTag,
        parent: NodeId,
    },

    /// The designated root has no parent slot to operate on.
    #[error("node {node} ({tag}) is the tree root and has no slot in a parent")]
    RootHasNoSlot { node: NodeId, tag: NodeTag },

    /// The location does not name a slot of the parent's kind.
    #[error("location `{location}` is not supported on {parent_tag} node {parent}")]
    UnsupportedLocation {
        parent: NodeId,
        parent_tag: NodeTag,
        location: Location,
    },

    /// The parent's slot does not hold the node that claims to live there.
    #[error("slot `{location}` of node {parent} does not hold node {node}")]
    SlotMismatch {
        parent: NodeId,
        location: Location,
        node: NodeId,
    },

    /// The designated root was offered as the child of a new node.
    #[error("node {node} ({tag}) is the tree root and cannot become a child")]
    RootAsChild { node: NodeId, tag: NodeTag },

    /// A replacement node is already attached somewhere else.
    #[error("replacement node {node} ({tag}) is already attached to {parent}")]
    AlreadyAttached {
        node: NodeId,
        tag: NodeTag,
        parent: NodeId,
    },

    /// Removing the node would leave a required slot empty.
    #[error("slot `{location}` of {parent_tag} node {parent} is required and cannot be emptied")]
    RequiredSlot {
        parent: NodeId,
        parent_tag: NodeTag,
        location: Location,
    },

    /// The replacement is the node itself or one of its ancestors.
    #[error("node {node} cannot replace {target}: it would create a cycle")]
    WouldCycle { node: NodeId, target: NodeId },
}
