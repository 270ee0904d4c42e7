//! Folding errors.

use jfold_ir::InvariantViolation;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FoldError {
    /// A tree primitive refused the operation. Never recovered from: the
    /// tree may already be inconsistent.
    #[error(transparent)]
    Invariant(#[from] InvariantViolation),

    /// The round cap was reached while rules were still rewriting.
    #[error("no fixed point after {rounds} rounds")]
    NoFixedPoint { rounds: usize },

    /// A rule name that the registry does not know.
    #[error("unknown folding rule `{name}`")]
    UnknownRule { name: String },
}
