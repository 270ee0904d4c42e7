//! Tree traversal.
//!
//! [`Visitor`] is the read-only walk: `enter` runs before a node's
//! children, `leave` after them. [`MutVisitor`] is the rewriting walk
//! used by folding rules. It is post-order, and the child list of each
//! node is snapshotted before descending, so a `leave` hook may replace
//! the node it is given (or any node under it) without disturbing the
//! traversal. When `leave` runs on a parent, its slots already hold the
//! results of the rewrites done below it.

use smallvec::SmallVec;

use crate::arena::Ast;
use crate::node_id::NodeId;
use crate::stack::ensure_sufficient_stack;

/// Read-only traversal hooks.
pub trait Visitor {
    /// Called before the children of `id`. Returning `false` skips them
    /// (and the matching `leave`).
    fn enter(&mut self, ast: &Ast, id: NodeId) -> bool {
        let _ = (ast, id);
        true
    }

    fn leave(&mut self, ast: &Ast, id: NodeId) {
        let _ = (ast, id);
    }
}

/// Walk the subtree at `id` in source order.
pub fn walk<V: Visitor + ?Sized>(ast: &Ast, id: NodeId, visitor: &mut V) {
    ensure_sufficient_stack(|| {
        if !visitor.enter(ast, id) {
            return;
        }
        for (_, child) in ast.children(id) {
            walk(ast, child, visitor);
        }
        visitor.leave(ast, id);
    });
}

/// Rewriting traversal hook.
pub trait MutVisitor {
    type Error;

    /// Called once per node, after all of its original children.
    fn leave(&mut self, ast: &mut Ast, id: NodeId) -> Result<(), Self::Error>;
}

/// Post-order walk of the subtree at `id`, allowing rewrites.
///
/// Nodes spliced in by a `leave` hook are not visited themselves; the
/// walk only covers the children each node had when it was reached.
pub fn walk_post_order_mut<V: MutVisitor + ?Sized>(
    ast: &mut Ast,
    id: NodeId,
    visitor: &mut V,
) -> Result<(), V::Error> {
    ensure_sufficient_stack(|| {
        let children: SmallVec<[NodeId; 8]> =
            ast.children(id).into_iter().map(|(_, child)| child).collect();
        for child in children {
            walk_post_order_mut(ast, child, visitor)?;
        }
        visitor.leave(ast, id)
    })
}

/// Nodes of the subtree at `id` in pre-order.
pub fn descendants(ast: &Ast, id: NodeId) -> Vec<NodeId> {
    struct Collect(Vec<NodeId>);

    impl Visitor for Collect {
        fn enter(&mut self, _: &Ast, id: NodeId) -> bool {
            self.0.push(id);
            true
        }
    }

    let mut collect = Collect(Vec::new());
    walk(ast, id, &mut collect);
    collect.0
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use pretty_assertions::assert_eq;
    use smallvec::smallvec;

    use super::*;
    use crate::kind::{NodeKind, NodeTag};
    use crate::span::Span;

    /// `{ ((1)); }`
    fn nested_parens() -> (Ast, NodeId) {
        let mut ast = Ast::new();
        let token = ast.intern("1");
        let one = ast.alloc(NodeKind::NumberLiteral { token }, Span::DUMMY).unwrap();
        let inner = ast
            .alloc(
                NodeKind::ParenthesizedExpression { expression: one },
                Span::DUMMY,
            )
            .unwrap();
        let outer = ast
            .alloc(
                NodeKind::ParenthesizedExpression { expression: inner },
                Span::DUMMY,
            )
            .unwrap();
        let statement = ast
            .alloc(NodeKind::ExpressionStatement { expression: outer }, Span::DUMMY)
            .unwrap();
        let block = ast
            .alloc(
                NodeKind::Block {
                    statements: smallvec![statement],
                },
                Span::DUMMY,
            )
            .unwrap();
        ast.set_root(block).unwrap();
        (ast, block)
    }

    struct Tags(Vec<NodeTag>);

    impl Visitor for Tags {
        fn leave(&mut self, ast: &Ast, id: NodeId) {
            self.0.push(ast.tag(id));
        }
    }

    #[test]
    fn test_walk_is_post_order_on_leave() {
        let (ast, block) = nested_parens();
        let mut tags = Tags(Vec::new());
        walk(&ast, block, &mut tags);
        assert_eq!(
            tags.0,
            vec![
                NodeTag::NumberLiteral,
                NodeTag::ParenthesizedExpression,
                NodeTag::ParenthesizedExpression,
                NodeTag::ExpressionStatement,
                NodeTag::Block,
            ]
        );
    }

    #[test]
    fn test_descendants_pre_order() {
        let (ast, block) = nested_parens();
        let tags: Vec<_> = descendants(&ast, block)
            .into_iter()
            .map(|id| ast.tag(id))
            .collect();
        assert_eq!(tags.first(), Some(&NodeTag::Block));
        assert_eq!(tags.last(), Some(&NodeTag::NumberLiteral));
        assert_eq!(tags.len(), 5);
    }

    /// Replaces every parenthesized expression with a copy of its child.
    struct Unwrap;

    impl MutVisitor for Unwrap {
        type Error = crate::error::InvariantViolation;

        fn leave(&mut self, ast: &mut Ast, id: NodeId) -> Result<(), Self::Error> {
            if let NodeKind::ParenthesizedExpression { expression } = *ast.kind(id) {
                let copy = ast.copy_subtree(expression)?;
                ast.replace_child(id, copy)?;
            }
            Ok(())
        }
    }

    #[test]
    fn test_mut_walk_sees_rewritten_children() {
        let (mut ast, block) = nested_parens();
        walk_post_order_mut(&mut ast, block, &mut Unwrap).unwrap();

        let tags: Vec<_> = descendants(&ast, block)
            .into_iter()
            .map(|id| ast.tag(id))
            .collect();
        assert_eq!(
            tags,
            vec![
                NodeTag::Block,
                NodeTag::ExpressionStatement,
                NodeTag::NumberLiteral,
            ]
        );
    }
}
