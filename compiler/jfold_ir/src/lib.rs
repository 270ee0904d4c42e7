//! jfold IR - program trees for the constant folder
//!
//! This crate holds the data model every other jfold crate works on:
//! - Spans for source locations
//! - Names for interned identifiers and literal tokens
//! - `NodeKind` for the Java subset, with its slot tables
//! - `Ast`, the parent-linked arena with the mutation primitives
//! - Traversal (`visit`) and structural matching (`matcher`)
//!
//! # Design Philosophy
//!
//! - **Flatten Everything**: no `Box<Node>`, children are `NodeId(u32)`
//!   indices into one arena
//! - **Intern Everything**: identifiers and literal tokens are `Name(u32)`
//! - **Check Before Write**: a mutation either fails without touching
//!   the tree or leaves every parent link and location consistent

mod arena;
mod error;
mod interner;
mod kind;
mod location;
pub mod matcher;
mod node_id;
mod operators;
mod span;
mod stack;
pub mod visit;

pub use arena::{Ast, ChildSlots};
pub use error::InvariantViolation;
pub use interner::{Name, StringInterner};
pub use kind::{NodeKind, NodeList, NodeTag};
pub use location::{Location, Property};
pub use matcher::{find_mismatch, subtree_match, Mismatch};
pub use node_id::NodeId;
pub use operators::{
    AssignmentOperator, InfixOperator, Modifiers, PostfixOperator, PrefixOperator, PrimitiveKind,
};
pub use span::Span;
pub use stack::ensure_sufficient_stack;
pub use visit::{walk, walk_post_order_mut, MutVisitor, Visitor};
