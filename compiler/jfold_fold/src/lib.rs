//! jfold folding - rewrite rules and the fixed-point driver
//!
//! A [`FoldingRule`] walks a subtree and performs every rewrite it knows
//! in place. The [`FoldDriver`] owns an ordered rule list and applies it
//! in full rounds until a round changes nothing.
//!
//! # Module structure
//! - `rule`: the `FoldingRule` contract and its root precondition
//! - `paren_literal`: `((14))` to `14`
//! - `driver`: `FoldDriver`, `DriverConfig`, `FoldReport`
//! - `registry`: rules by name, for the CLI and configuration

mod driver;
mod error;
mod paren_literal;
pub mod registry;
mod rule;

pub use driver::{DriverConfig, FoldDriver, FoldReport};
pub use error::FoldError;
pub use paren_literal::ParenthesizedLiteralRule;
pub use rule::{check_fold_root, FoldingRule};
