//! Fixed-point driver.
//!
//! A round applies every rule once, in list order, each rule seeing the
//! tree as the previous one left it. Rounds repeat until one of them
//! changes nothing. A rewrite made by a later rule can expose a redex
//! for an earlier one, which is why a single round is not enough in
//! general.

use jfold_ir::{Ast, Location, NodeId};
use tracing::{debug, warn};

use crate::error::FoldError;
use crate::rule::{check_fold_root, FoldingRule};

/// Driver tuning.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DriverConfig {
    /// Upper bound on rounds, the final round that confirms the fixed
    /// point included. Reaching it while rules still rewrite is an error.
    pub max_rounds: usize,
}

impl DriverConfig {
    pub const DEFAULT_MAX_ROUNDS: usize = 64;
}

impl Default for DriverConfig {
    fn default() -> Self {
        DriverConfig {
            max_rounds: Self::DEFAULT_MAX_ROUNDS,
        }
    }
}

/// Outcome of a successful run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FoldReport {
    /// The fold root after folding. Differs from the root passed in when
    /// the root itself was rewritten.
    pub root: NodeId,
    /// Rounds performed, the last (unchanged) one included.
    pub rounds: usize,
    /// Rewrites per rule, in rule order.
    pub rewrites: Vec<(&'static str, usize)>,
}

impl FoldReport {
    pub fn total_rewrites(&self) -> usize {
        self.rewrites.iter().map(|&(_, count)| count).sum()
    }

    pub fn rewrites_for(&self, rule: &str) -> Option<usize> {
        self.rewrites
            .iter()
            .find(|(name, _)| *name == rule)
            .map(|&(_, count)| count)
    }
}

/// Where the fold root lives, so it can be found again after a rule
/// replaced the node.
#[derive(Copy, Clone, Debug)]
enum Anchor {
    Root,
    Slot { parent: NodeId, location: Location },
}

impl Anchor {
    fn of(ast: &Ast, root: NodeId) -> Result<Self, FoldError> {
        Ok(match (ast.location_of(root)?, ast.parent(root)) {
            (Some(location), Some(parent)) => Anchor::Slot { parent, location },
            _ => Anchor::Root,
        })
    }

    fn resolve(self, ast: &Ast) -> Result<NodeId, FoldError> {
        Ok(match self {
            Anchor::Root => ast.root(),
            Anchor::Slot { parent, location } => ast.resolve(parent, location)?,
        })
    }
}

/// Owns an ordered rule list and drives trees to a fixed point of it.
pub struct FoldDriver {
    rules: Vec<Box<dyn FoldingRule>>,
    config: DriverConfig,
}

impl FoldDriver {
    pub fn new(rules: Vec<Box<dyn FoldingRule>>) -> Self {
        Self::with_config(rules, DriverConfig::default())
    }

    pub fn with_config(rules: Vec<Box<dyn FoldingRule>>, config: DriverConfig) -> Self {
        FoldDriver { rules, config }
    }

    pub fn config(&self) -> DriverConfig {
        self.config
    }

    /// Rule names in application order.
    pub fn rule_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|rule| rule.name())
    }

    /// Fold the subtree at `root` until no rule changes it and return the
    /// fold root, which is a different node if the root itself was
    /// rewritten.
    pub fn run_to_fixed_point(&self, ast: &mut Ast, root: NodeId) -> Result<NodeId, FoldError> {
        self.run_with_report(ast, root).map(|report| report.root)
    }

    /// [`FoldDriver::run_to_fixed_point`] with round and rewrite counts.
    pub fn run_with_report(&self, ast: &mut Ast, root: NodeId) -> Result<FoldReport, FoldError> {
        check_fold_root(ast, root)?;
        let mut report = FoldReport {
            root,
            rounds: 0,
            rewrites: self.rules.iter().map(|rule| (rule.name(), 0)).collect(),
        };

        loop {
            if report.rounds >= self.config.max_rounds {
                warn!(
                    rounds = report.rounds,
                    rewrites = report.total_rewrites(),
                    "folding stopped at the round cap without reaching a fixed point"
                );
                return Err(FoldError::NoFixedPoint {
                    rounds: report.rounds,
                });
            }
            report.rounds += 1;

            let mut changed = false;
            for (rule, (_, total)) in self.rules.iter().zip(report.rewrites.iter_mut()) {
                let anchor = Anchor::of(ast, report.root)?;
                let rewrites = rule.rewrite(ast, report.root)?;
                if rewrites > 0 {
                    changed = true;
                    *total += rewrites;
                    report.root = anchor.resolve(ast)?;
                    debug!(
                        rule = rule.name(),
                        round = report.rounds,
                        rewrites,
                        "rule rewrote the tree"
                    );
                }
            }

            debug!(round = report.rounds, changed, "fold round finished");
            if !changed {
                return Ok(report);
            }
        }
    }
}
