//! Parenthesized literal collapsing.
//!
//! `(7)` becomes `7`, and so does `((7))`: the walk is post-order, so by
//! the time an outer `ParenthesizedExpression` is examined its inner
//! parentheses have already collapsed and it wraps a bare literal too.
//! One call therefore reduces any nesting depth.

use jfold_ir::{walk_post_order_mut, Ast, InvariantViolation, MutVisitor, NodeId, NodeKind};
use tracing::debug;

use crate::error::FoldError;
use crate::rule::{check_fold_root, FoldingRule};

/// Replaces a `ParenthesizedExpression` that wraps one of the six literal
/// kinds with a copy of the literal. Anything else in parentheses is kept.
#[derive(Copy, Clone, Debug, Default)]
pub struct ParenthesizedLiteralRule;

impl ParenthesizedLiteralRule {
    pub const NAME: &'static str = "parenthesized-literal";
}

impl FoldingRule for ParenthesizedLiteralRule {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn rewrite(&self, ast: &mut Ast, root: NodeId) -> Result<usize, FoldError> {
        check_fold_root(ast, root)?;
        let mut collapse = Collapse { rewrites: 0 };
        walk_post_order_mut(ast, root, &mut collapse)?;
        Ok(collapse.rewrites)
    }
}

struct Collapse {
    rewrites: usize,
}

impl MutVisitor for Collapse {
    type Error = InvariantViolation;

    fn leave(&mut self, ast: &mut Ast, id: NodeId) -> Result<(), InvariantViolation> {
        let NodeKind::ParenthesizedExpression { expression } = *ast.kind(id) else {
            return Ok(());
        };
        let Some(inner) = ast.get(expression) else {
            return Err(InvariantViolation::AbsentNode { node: expression });
        };
        if !inner.tag().is_literal() {
            return Ok(());
        }

        let literal = ast.copy_subtree(expression)?;
        if ast.location_of(id)?.is_some() {
            ast.replace_child(id, literal)?;
        } else {
            // The designated root has no slot to splice into.
            ast.replace_root(literal)?;
        }
        debug!(
            node = %id,
            literal = %ast.tag(literal),
            "collapsed parenthesized literal"
        );
        self.rewrites += 1;
        Ok(())
    }
}
