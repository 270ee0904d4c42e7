//! Parent-linked node arena.
//!
//! [`Ast`] stores nodes struct-of-arrays style: parallel `kinds`,
//! `spans`, `parents` and `locations` vectors indexed by [`NodeId`].
//! Children are owned through the handles inside each [`NodeKind`];
//! the `parents` vector is the non-owning back-reference.
//!
//! # Invariants
//!
//! - Each node has at most one parent, and the parent graph is acyclic.
//! - For every attached node, the parent's slot named by its location
//!   holds that node.
//! - `alloc` attaches the children of the new node, computing their
//!   locations once. It refuses children that are attached elsewhere.
//! - [`Ast::replace_child`] and [`Ast::remove_child`] validate everything
//!   before writing, then update both directions of the link (and the
//!   indices of shifted list siblings) before returning.
//!
//! Replaced and removed nodes stay allocated until the `Ast` is dropped;
//! they are unreachable from the root.

use smallvec::SmallVec;

use crate::error::InvariantViolation;
use crate::interner::{Name, StringInterner};
use crate::kind::{NodeKind, NodeTag};
use crate::location::Location;
use crate::node_id::NodeId;
use crate::span::Span;
use crate::stack::ensure_sufficient_stack;

/// Children of one node paired with their locations, in source order.
pub type ChildSlots = SmallVec<[(Location, NodeId); 8]>;

/// Convert a length to `u32`, panicking with context on overflow.
#[inline]
fn to_u32(value: usize, what: &str) -> u32 {
    u32::try_from(value).unwrap_or_else(|_| panic!("{what} exceeded u32::MAX ({value})"))
}

/// List the present children of `kind` with their locations.
fn child_slots(kind: &NodeKind) -> ChildSlots {
    let mut out = ChildSlots::new();
    for &property in kind.properties() {
        if property.is_list() {
            if let Some(list) = kind.list(property) {
                for (index, &child) in list.iter().enumerate() {
                    out.push((
                        Location::List(property, to_u32(index, "list slot")),
                        child,
                    ));
                }
            }
        } else if let Some(child) = kind.slot(property) {
            if child.is_present() {
                out.push((Location::Single(property), child));
            }
        }
    }
    out
}

/// Arena-allocated program tree.
#[derive(Clone, Debug, Default)]
pub struct Ast {
    /// Node kinds, children included (parallel with the other arrays).
    kinds: Vec<NodeKind>,
    /// Source spans.
    spans: Vec<Span>,
    /// Back-reference to the enclosing node, `INVALID` when detached.
    parents: Vec<NodeId>,
    /// Slot each node occupies in its parent.
    locations: Vec<Option<Location>>,
    /// Designated tree root.
    root: NodeId,
    /// Identifier and literal-token storage.
    interner: StringInterner,
}

impl Ast {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an arena pre-allocated for roughly one node per 8 bytes of
    /// source.
    pub fn with_capacity(source_len: usize) -> Self {
        let estimated = source_len / 8;
        Ast {
            kinds: Vec::with_capacity(estimated),
            spans: Vec::with_capacity(estimated),
            parents: Vec::with_capacity(estimated),
            locations: Vec::with_capacity(estimated),
            root: NodeId::INVALID,
            interner: StringInterner::new(),
        }
    }

    /// Allocate a node and attach the children named in `kind`.
    ///
    /// Every child must be present and detached, must not be the
    /// designated root, and may appear only once. Nothing is written
    /// when a child is refused.
    pub fn alloc(&mut self, kind: NodeKind, span: Span) -> Result<NodeId, InvariantViolation> {
        let id = NodeId::new(to_u32(self.kinds.len(), "nodes"));
        let children = child_slots(&kind);
        for (position, &(_, child)) in children.iter().enumerate() {
            self.check_attachable(child)?;
            if children[..position].iter().any(|&(_, earlier)| earlier == child) {
                return Err(InvariantViolation::AlreadyAttached {
                    node: child,
                    tag: self.tag(child),
                    parent: id,
                });
            }
        }

        self.kinds.push(kind);
        self.spans.push(span);
        self.parents.push(NodeId::INVALID);
        self.locations.push(None);
        for (location, child) in children {
            self.parents[child.index()] = id;
            self.locations[child.index()] = Some(location);
        }
        Ok(id)
    }

    // Names

    pub fn intern(&mut self, s: &str) -> Name {
        self.interner.intern(s)
    }

    pub fn name(&self, name: Name) -> &str {
        self.interner.lookup(name)
    }

    // Root

    /// The designated root, `NodeId::INVALID` before one is set.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Designate `id` as the tree root. The node must be present and have
    /// no parent.
    pub fn set_root(&mut self, id: NodeId) -> Result<(), InvariantViolation> {
        self.check_present(id)?;
        let parent = self.parents[id.index()];
        if parent.is_present() {
            return Err(InvariantViolation::AlreadyAttached {
                node: id,
                tag: self.tag(id),
                parent,
            });
        }
        self.root = id;
        Ok(())
    }

    // Accessors

    /// Number of allocated nodes, reachable or not.
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Whether `id` names a node of this arena.
    #[inline]
    pub fn contains(&self, id: NodeId) -> bool {
        id.is_present() && id.index() < self.kinds.len()
    }

    /// # Panics
    /// Panics if `id` is not a node of this arena.
    #[inline]
    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.kinds[id.index()]
    }

    /// Fallible form of [`Ast::kind`].
    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&NodeKind> {
        if id.is_present() {
            self.kinds.get(id.index())
        } else {
            None
        }
    }

    #[inline]
    pub fn tag(&self, id: NodeId) -> NodeTag {
        self.kinds[id.index()].tag()
    }

    #[inline]
    pub fn span(&self, id: NodeId) -> Span {
        self.spans[id.index()]
    }

    /// Raw parent link, `None` for the root and detached nodes.
    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parents[id.index()].present()
    }

    /// Raw location record, without the checks of [`Ast::location_of`].
    #[inline]
    pub fn location(&self, id: NodeId) -> Option<Location> {
        self.locations[id.index()]
    }

    /// Present children of `id` with their locations, in source order.
    pub fn children(&self, id: NodeId) -> ChildSlots {
        child_slots(&self.kinds[id.index()])
    }

    /// Whether `id` is neither the root nor attached to a parent.
    pub fn is_detached(&self, id: NodeId) -> bool {
        id != self.root && !self.parents[id.index()].is_present()
    }

    /// Whether `ancestor` is `id` or lies on its parent chain.
    pub fn is_ancestor_or_self(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = id;
        loop {
            if current == ancestor {
                return true;
            }
            match self.parent(current) {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    // Location primitives

    /// Resolve how `id` is attached.
    ///
    /// Returns `Ok(None)` for the designated root and `Ok(Some(location))`
    /// for an attached node. Fails if the node is absent, detached, or has
    /// a parent without a recorded location.
    pub fn location_of(&self, id: NodeId) -> Result<Option<Location>, InvariantViolation> {
        self.check_present(id)?;
        if id == self.root {
            return Ok(None);
        }
        let parent = self.parents[id.index()];
        if !parent.is_present() {
            return Err(InvariantViolation::Detached {
                node: id,
                tag: self.tag(id),
            });
        }
        match self.locations[id.index()] {
            Some(location) => Ok(Some(location)),
            None => Err(InvariantViolation::MissingLocation {
                node: id,
                tag: self.tag(id),
                parent,
            }),
        }
    }

    /// Read the slot `location` of `parent`.
    ///
    /// An empty optional single slot resolves to `NodeId::INVALID`.
    pub fn resolve(&self, parent: NodeId, location: Location) -> Result<NodeId, InvariantViolation> {
        self.check_present(parent)?;
        let kind = &self.kinds[parent.index()];
        let resolved = match location {
            Location::Single(property) if !property.is_list() => kind.slot(property),
            Location::List(property, index) if property.is_list() => kind
                .list(property)
                .and_then(|list| list.get(index as usize).copied()),
            _ => None,
        };
        resolved.ok_or(InvariantViolation::UnsupportedLocation {
            parent,
            parent_tag: kind.tag(),
            location,
        })
    }

    /// Splice `new` into the slot `old` occupies.
    ///
    /// `old` must be attached (not the root); `new` must be present,
    /// detached, and not an ancestor of `old`. On success `old` is
    /// detached and `new` holds its parent and location.
    pub fn replace_child(&mut self, old: NodeId, new: NodeId) -> Result<(), InvariantViolation> {
        self.check_present(new)?;
        let (parent, location) = self.attached_slot(old)?;
        if self.is_ancestor_or_self(new, old) {
            return Err(InvariantViolation::WouldCycle {
                node: new,
                target: old,
            });
        }
        if !self.is_detached(new) {
            return Err(InvariantViolation::AlreadyAttached {
                node: new,
                tag: self.tag(new),
                parent: self.parents[new.index()],
            });
        }

        let kind = &mut self.kinds[parent.index()];
        match location {
            Location::Single(property) => {
                if let Some(slot) = kind.slot_mut(property) {
                    *slot = new;
                }
            }
            Location::List(property, index) => {
                if let Some(slot) = kind
                    .list_mut(property)
                    .and_then(|list| list.get_mut(index as usize))
                {
                    *slot = new;
                }
            }
        }

        self.detach(old);
        self.parents[new.index()] = parent;
        self.locations[new.index()] = Some(location);
        Ok(())
    }

    /// Detach `id` from its parent without a substitute.
    ///
    /// An optional single slot becomes empty; a list slot shrinks and the
    /// siblings after it are renumbered. Emptying a required single slot
    /// fails.
    pub fn remove_child(&mut self, id: NodeId) -> Result<(), InvariantViolation> {
        let (parent, location) = self.attached_slot(id)?;
        let kind = &mut self.kinds[parent.index()];
        match location {
            Location::Single(property) => {
                if !kind.is_optional(property) {
                    return Err(InvariantViolation::RequiredSlot {
                        parent,
                        parent_tag: kind.tag(),
                        location,
                    });
                }
                if let Some(slot) = kind.slot_mut(property) {
                    *slot = NodeId::INVALID;
                }
            }
            Location::List(property, index) => {
                let mut shifted = SmallVec::<[NodeId; 8]>::new();
                if let Some(list) = kind.list_mut(property) {
                    list.remove(index as usize);
                    shifted.extend(list.iter().skip(index as usize).copied());
                }
                for (offset, sibling) in shifted.into_iter().enumerate() {
                    let new_index = to_u32(index as usize + offset, "list slot");
                    self.locations[sibling.index()] = Some(Location::List(property, new_index));
                }
            }
        }
        self.detach(id);
        Ok(())
    }

    /// Make `new` the designated root in place of the current one.
    ///
    /// The old root becomes detached. `new` must be present and have no
    /// parent.
    pub fn replace_root(&mut self, new: NodeId) -> Result<(), InvariantViolation> {
        self.check_present(new)?;
        if let Some(parent) = self.parent(new) {
            return Err(InvariantViolation::AlreadyAttached {
                node: new,
                tag: self.tag(new),
                parent,
            });
        }
        self.root = new;
        Ok(())
    }

    /// Deep-copy the subtree at `id` into fresh nodes of this arena.
    ///
    /// The copy is detached and its internal parent links point at the
    /// copied nodes, never at the originals.
    pub fn copy_subtree(&mut self, id: NodeId) -> Result<NodeId, InvariantViolation> {
        self.check_present(id)?;
        self.copy_node(id)
    }

    fn copy_node(&mut self, id: NodeId) -> Result<NodeId, InvariantViolation> {
        ensure_sufficient_stack(|| {
            let mut kind = self.kinds[id.index()].clone();
            let span = self.spans[id.index()];
            for &property in kind.properties() {
                if property.is_list() {
                    if let Some(list) = kind.list_mut(property) {
                        for child in list.iter_mut() {
                            *child = self.copy_node(*child)?;
                        }
                    }
                } else if let Some(slot) = kind.slot_mut(property) {
                    if slot.is_present() {
                        *slot = self.copy_node(*slot)?;
                    }
                }
            }
            self.alloc(kind, span)
        })
    }

    // Helpers

    fn check_present(&self, id: NodeId) -> Result<(), InvariantViolation> {
        if self.contains(id) {
            Ok(())
        } else {
            Err(InvariantViolation::AbsentNode { node: id })
        }
    }

    /// `id` can be placed in a fresh slot: present, parentless, not the
    /// root.
    fn check_attachable(&self, id: NodeId) -> Result<(), InvariantViolation> {
        self.check_present(id)?;
        if id == self.root {
            return Err(InvariantViolation::RootAsChild {
                node: id,
                tag: self.tag(id),
            });
        }
        if let Some(parent) = self.parent(id) {
            return Err(InvariantViolation::AlreadyAttached {
                node: id,
                tag: self.tag(id),
                parent,
            });
        }
        Ok(())
    }

    /// Parent and location of an attached non-root node, with the
    /// parent's slot verified to hold it.
    fn attached_slot(&self, id: NodeId) -> Result<(NodeId, Location), InvariantViolation> {
        let Some(location) = self.location_of(id)? else {
            return Err(InvariantViolation::RootHasNoSlot {
                node: id,
                tag: self.tag(id),
            });
        };
        let parent = self.parents[id.index()];
        let held = self.resolve(parent, location)?;
        if held != id {
            return Err(InvariantViolation::SlotMismatch {
                parent,
                location,
                node: id,
            });
        }
        Ok((parent, location))
    }

    fn detach(&mut self, id: NodeId) {
        self.parents[id.index()] = NodeId::INVALID;
        self.locations[id.index()] = None;
    }
}
