//! Structural comparison of subtrees.
//!
//! Two subtrees match when they have the same kinds, the same attributes
//! (operators, modifiers, flags, identifier and literal text) and
//! matching children in the same slots. Spans, handles and the arenas the
//! nodes live in are ignored, so a folded tree can be compared against an
//! independently parsed expectation.

use std::fmt;

use crate::arena::Ast;
use crate::kind::NodeKind;
use crate::node_id::NodeId;
use crate::stack::ensure_sufficient_stack;

/// First difference found between two subtrees.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mismatch {
    /// Node on the left side.
    pub left: NodeId,
    /// Node on the right side.
    pub right: NodeId,
    /// What differs.
    pub reason: String,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} vs {}: {}", self.left, self.right, self.reason)
    }
}

/// Whether the subtree at `left` in `a` matches the one at `right` in `b`.
pub fn subtree_match(a: &Ast, left: NodeId, b: &Ast, right: NodeId) -> bool {
    find_mismatch(a, left, b, right).is_none()
}

/// Compare two subtrees, reporting the first difference in pre-order.
pub fn find_mismatch(a: &Ast, left: NodeId, b: &Ast, right: NodeId) -> Option<Mismatch> {
    ensure_sufficient_stack(|| {
        let mismatch = |reason: String| {
            Some(Mismatch {
                left,
                right,
                reason,
            })
        };

        match (a.get(left), b.get(right)) {
            (None, None) => return None,
            (Some(_), None) | (None, Some(_)) => {
                return mismatch("one side is absent".to_owned());
            }
            (Some(_), Some(_)) => {}
        }

        let (left_tag, right_tag) = (a.tag(left), b.tag(right));
        if left_tag != right_tag {
            return mismatch(format!("{left_tag} vs {right_tag}"));
        }
        if let Some(reason) = attribute_difference(a, a.kind(left), b, b.kind(right)) {
            return mismatch(reason);
        }

        let left_children = a.children(left);
        let right_children = b.children(right);
        if left_children.len() != right_children.len() {
            return mismatch(format!(
                "{} children vs {}",
                left_children.len(),
                right_children.len()
            ));
        }
        for (&(left_loc, l), &(right_loc, r)) in left_children.iter().zip(right_children.iter()) {
            if left_loc != right_loc {
                return mismatch(format!("child at `{left_loc}` vs `{right_loc}`"));
            }
            if let Some(inner) = find_mismatch(a, l, b, r) {
                return Some(inner);
            }
        }
        None
    })
}

/// Compare the non-structural parts of two kinds with the same tag.
fn attribute_difference(a: &Ast, left: &NodeKind, b: &Ast, right: &NodeKind) -> Option<String> {
    use NodeKind as K;

    let differs = |what: &str, l: &dyn fmt::Debug, r: &dyn fmt::Debug| {
        Some(format!("{what} {l:?} vs {r:?}"))
    };

    match (left, right) {
        (
            K::ImportDeclaration {
                is_static: s1,
                on_demand: d1,
                ..
            },
            K::ImportDeclaration {
                is_static: s2,
                on_demand: d2,
                ..
            },
        ) => {
            if s1 != s2 {
                return differs("static", s1, s2);
            }
            if d1 != d2 {
                return differs("on-demand", d1, d2);
            }
            None
        }
        (
            K::TypeDeclaration {
                modifiers: m1,
                interface: i1,
                ..
            },
            K::TypeDeclaration {
                modifiers: m2,
                interface: i2,
                ..
            },
        ) => {
            if m1 != m2 {
                return differs("modifiers", m1, m2);
            }
            (i1 != i2).then(|| format!("interface {i1} vs {i2}"))
        }
        (
            K::MethodDeclaration {
                modifiers: m1,
                constructor: c1,
                ..
            },
            K::MethodDeclaration {
                modifiers: m2,
                constructor: c2,
                ..
            },
        ) => {
            if m1 != m2 {
                return differs("modifiers", m1, m2);
            }
            (c1 != c2).then(|| format!("constructor {c1} vs {c2}"))
        }
        (
            K::SingleVariableDeclaration {
                modifiers: m1,
                varargs: v1,
                ..
            },
            K::SingleVariableDeclaration {
                modifiers: m2,
                varargs: v2,
                ..
            },
        ) => {
            if m1 != m2 {
                return differs("modifiers", m1, m2);
            }
            (v1 != v2).then(|| format!("varargs {v1} vs {v2}"))
        }
        (K::FieldDeclaration { modifiers: m1, .. }, K::FieldDeclaration { modifiers: m2, .. })
        | (
            K::VariableDeclarationStatement { modifiers: m1, .. },
            K::VariableDeclarationStatement { modifiers: m2, .. },
        ) => (m1 != m2).then(|| format!("modifiers {m1:?} vs {m2:?}")),
        (K::InfixExpression { operator: o1, .. }, K::InfixExpression { operator: o2, .. }) => {
            (o1 != o2).then(|| format!("operator {o1:?} vs {o2:?}"))
        }
        (K::PrefixExpression { operator: o1, .. }, K::PrefixExpression { operator: o2, .. }) => {
            (o1 != o2).then(|| format!("operator {o1:?} vs {o2:?}"))
        }
        (K::PostfixExpression { operator: o1, .. }, K::PostfixExpression { operator: o2, .. }) => {
            (o1 != o2).then(|| format!("operator {o1:?} vs {o2:?}"))
        }
        (K::Assignment { operator: o1, .. }, K::Assignment { operator: o2, .. }) => {
            (o1 != o2).then(|| format!("operator {o1:?} vs {o2:?}"))
        }
        (K::BooleanLiteral { value: v1 }, K::BooleanLiteral { value: v2 }) => {
            (v1 != v2).then(|| format!("value {v1} vs {v2}"))
        }
        (K::PrimitiveType { primitive: p1 }, K::PrimitiveType { primitive: p2 }) => {
            (p1 != p2).then(|| format!("primitive {p1:?} vs {p2:?}"))
        }
        (K::SimpleName { identifier: n1 }, K::SimpleName { identifier: n2 })
        | (K::CharacterLiteral { escaped: n1 }, K::CharacterLiteral { escaped: n2 })
        | (K::StringLiteral { escaped: n1 }, K::StringLiteral { escaped: n2 })
        | (K::NumberLiteral { token: n1 }, K::NumberLiteral { token: n2 }) => {
            let (t1, t2) = (a.name(*n1), b.name(*n2));
            (t1 != t2).then(|| format!("text {t1:?} vs {t2:?}"))
        }
        _ => None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::operators::InfixOperator;
    use crate::span::Span;

    fn number(ast: &mut Ast, token: &str) -> NodeId {
        let token = ast.intern(token);
        ast.alloc(NodeKind::NumberLiteral { token }, Span::DUMMY).unwrap()
    }

    fn sum(ast: &mut Ast, left: &str, right: &str, operator: InfixOperator) -> NodeId {
        let left_operand = number(ast, left);
        let right_operand = number(ast, right);
        ast
            .alloc(
                NodeKind::InfixExpression {
                    operator,
                    left_operand,
                    right_operand,
                },
                Span::DUMMY,
            )
            .unwrap()
    }

    #[test]
    fn test_match_across_arenas() {
        let mut a = Ast::new();
        let mut b = Ast::new();
        // Shift b's handles so equal trees have different ids.
        number(&mut b, "unused");
        let left = sum(&mut a, "1", "2", InfixOperator::Plus);
        let right = sum(&mut b, "1", "2", InfixOperator::Plus);
        assert_ne!(left, right);
        assert!(subtree_match(&a, left, &b, right));
    }

    #[test]
    fn test_literal_text_difference() {
        let mut a = Ast::new();
        let mut b = Ast::new();
        let left = sum(&mut a, "1", "2", InfixOperator::Plus);
        let right = sum(&mut b, "1", "3", InfixOperator::Plus);
        let mismatch = find_mismatch(&a, left, &b, right).unwrap();
        assert_eq!(mismatch.reason, "text \"2\" vs \"3\"");
    }

    #[test]
    fn test_operator_difference() {
        let mut a = Ast::new();
        let mut b = Ast::new();
        let left = sum(&mut a, "1", "2", InfixOperator::Plus);
        let right = sum(&mut b, "1", "2", InfixOperator::Minus);
        assert!(!subtree_match(&a, left, &b, right));
    }

    #[test]
    fn test_kind_difference() {
        let mut a = Ast::new();
        let mut b = Ast::new();
        let one = number(&mut a, "1");
        let left = a
            .alloc(
                NodeKind::ParenthesizedExpression { expression: one },
                Span::DUMMY,
            )
            .unwrap();
        let right = number(&mut b, "1");
        let mismatch = find_mismatch(&a, left, &b, right).unwrap();
        assert_eq!(mismatch.reason, "ParenthesizedExpression vs NumberLiteral");
    }

    #[test]
    fn test_copy_matches_original() {
        let mut a = Ast::new();
        let original = sum(&mut a, "4", "5", InfixOperator::Times);
        let copy = a.copy_subtree(original).unwrap();
        assert!(subtree_match(&a, original, &a, copy));
    }

    #[test]
    fn test_absent_sides() {
        let a = Ast::new();
        assert!(subtree_match(&a, NodeId::INVALID, &a, NodeId::INVALID));
    }
}
