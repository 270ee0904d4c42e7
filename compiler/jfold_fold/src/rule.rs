//! The folding rule contract.

use jfold_ir::{Ast, InvariantViolation, NodeId};

use crate::error::FoldError;

/// A local rewrite applied to every node under a root.
///
/// Implementations must reach their own fixed point: a second call right
/// after one that stabilized the tree reports no change. Every rewrite
/// must shrink the tree by some well-founded measure, otherwise the
/// driver can only stop at its round cap.
pub trait FoldingRule {
    /// Stable identifier, used in logs and to disable the rule by name.
    fn name(&self) -> &'static str;

    /// Perform every applicable rewrite in the subtree at `root` and
    /// return how many were made.
    ///
    /// `root` must be present and be either the designated root of `ast`
    /// or attached at a resolvable location (see [`check_fold_root`]).
    fn rewrite(&self, ast: &mut Ast, root: NodeId) -> Result<usize, FoldError>;

    /// Like [`FoldingRule::rewrite`], reporting only whether anything
    /// changed.
    fn fold(&self, ast: &mut Ast, root: NodeId) -> Result<bool, FoldError> {
        Ok(self.rewrite(ast, root)? > 0)
    }
}

impl<T: FoldingRule + ?Sized> FoldingRule for Box<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn rewrite(&self, ast: &mut Ast, root: NodeId) -> Result<usize, FoldError> {
        (**self).rewrite(ast, root)
    }
}

/// Precondition shared by rules and the driver: a rewrite of `root`
/// itself needs somewhere to put the replacement, so `root` must be the
/// designated root or sit in a parent slot.
pub fn check_fold_root(ast: &Ast, root: NodeId) -> Result<(), InvariantViolation> {
    ast.location_of(root).map(|_| ())
}
