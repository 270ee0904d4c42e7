//! Rule registry.
//!
//! The known rules, by name, in default application order. The CLI uses
//! it for `--list-rules` and `--disable`.

use crate::error::FoldError;
use crate::paren_literal::ParenthesizedLiteralRule;
use crate::rule::FoldingRule;

/// Registry entry for one rule.
#[derive(Copy, Clone, Debug)]
pub struct RuleInfo {
    pub name: &'static str,
    pub description: &'static str,
    factory: fn() -> Box<dyn FoldingRule>,
}

impl RuleInfo {
    /// A fresh instance of the rule.
    pub fn build(&self) -> Box<dyn FoldingRule> {
        (self.factory)()
    }
}

fn parenthesized_literal() -> Box<dyn FoldingRule> {
    Box::new(ParenthesizedLiteralRule)
}

static RULES: &[RuleInfo] = &[RuleInfo {
    name: ParenthesizedLiteralRule::NAME,
    description: "replace a parenthesized literal with the bare literal",
    factory: parenthesized_literal,
}];

/// All rules in default order.
pub fn rules() -> &'static [RuleInfo] {
    RULES
}

pub fn names() -> impl Iterator<Item = &'static str> {
    RULES.iter().map(|info| info.name)
}

pub fn get(name: &str) -> Option<&'static RuleInfo> {
    RULES.iter().find(|info| info.name == name)
}

/// The default rule list with the named rules left out.
///
/// Every name in `disabled` must be a registered rule.
pub fn default_rules<S: AsRef<str>>(disabled: &[S]) -> Result<Vec<Box<dyn FoldingRule>>, FoldError> {
    if let Some(unknown) = disabled.iter().map(AsRef::as_ref).find(|name| get(name).is_none()) {
        return Err(FoldError::UnknownRule {
            name: unknown.to_owned(),
        });
    }
    Ok(RULES
        .iter()
        .filter(|info| !disabled.iter().any(|name| name.as_ref() == info.name))
        .map(RuleInfo::build)
        .collect())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_name() {
        let info = get("parenthesized-literal").unwrap();
        assert_eq!(info.build().name(), info.name);
        assert!(get("constant-arithmetic").is_none());
        assert_eq!(names().collect::<Vec<_>>(), vec!["parenthesized-literal"]);
        assert_eq!(rules().len(), 1);
    }

    #[test]
    fn test_default_rules() {
        let rules = default_rules::<&str>(&[]).unwrap();
        let names: Vec<_> = rules.iter().map(|rule| rule.name()).collect();
        assert_eq!(names, vec!["parenthesized-literal"]);
    }

    #[test]
    fn test_disable_rule() {
        let rules = default_rules(&["parenthesized-literal"]).unwrap();
        assert!(rules.is_empty());
    }

    #[test]
    fn test_disable_unknown_rule() {
        let err = default_rules(&[String::from("nope")]).err().unwrap();
        assert_eq!(
            err,
            FoldError::UnknownRule {
                name: "nope".to_owned()
            }
        );
        assert_eq!(err.to_string(), "unknown folding rule `nope`");
    }
}
