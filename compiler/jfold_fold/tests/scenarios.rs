//! End-to-end folding scenarios.
//!
//! Each case parses Java source, folds it, and compares the result with
//! the parse of the expected source using the structural matcher.

#![allow(clippy::unwrap_used, reason = "Tests can panic")]

use pretty_assertions::assert_eq;

use jfold_fmt::render;
use jfold_fold::{registry, FoldDriver, FoldError, FoldingRule, ParenthesizedLiteralRule};
use jfold_ir::{find_mismatch, Ast, InvariantViolation, NodeId, NodeKind, NodeTag, Span};
use jfold_parse::{parse, parse_expression};

/// Wrap statements in a method so they parse as a compilation unit.
fn in_method(statements: &str) -> String {
    format!("class T {{ void m() {{ {statements} }} }}")
}

fn assert_same_tree(actual: &Ast, expected_source: &str) {
    let expected = parse(expected_source).unwrap();
    if let Some(mismatch) = find_mismatch(actual, actual.root(), &expected, expected.root()) {
        panic!(
            "folded tree differs from `{expected_source}`: {mismatch}\nfolded:\n{}",
            render(actual)
        );
    }
}

/// Run the rule once on the whole tree.
fn fold_once(source: &str) -> (Ast, bool) {
    let mut ast = parse(source).unwrap();
    let root = ast.root();
    let changed = ParenthesizedLiteralRule.fold(&mut ast, root).unwrap();
    (ast, changed)
}

#[test]
fn single_parenthesized_literal_statement() {
    let (ast, changed) = fold_once(&in_method("(7);"));
    assert!(changed);
    assert_same_tree(&ast, &in_method("7;"));
}

#[test]
fn doubly_parenthesized_literal_folds_in_one_call() {
    let (ast, changed) = fold_once(&in_method("((14));"));
    assert!(changed);
    assert_same_tree(&ast, &in_method("14;"));
}

#[test]
fn parenthesized_non_literal_is_unchanged() {
    let source = in_method("int y = (x + 1);");
    let (ast, changed) = fold_once(&source);
    assert!(!changed);
    assert_same_tree(&ast, &source);
}

#[test]
fn mixed_redexes_fold_selectively() {
    let (ast, changed) = fold_once(&in_method("char c = ('a'); boolean b = (true); int r = (f());"));
    assert!(changed);
    assert_same_tree(
        &ast,
        &in_method("char c = 'a'; boolean b = true; int r = (f());"),
    );
}

#[test]
fn bare_literal_root_is_accepted() {
    let mut ast = parse_expression("\"plain\"").unwrap();
    let root = ast.root();
    assert_eq!(ast.parent(root), None);
    assert!(!ParenthesizedLiteralRule.fold(&mut ast, root).unwrap());
    assert_eq!(ast.root(), root);
}

#[test]
fn detached_node_is_rejected_by_every_primitive() {
    let mut ast = parse(&in_method("(1);")).unwrap();
    let token = ast.intern("2");
    let detached = ast.alloc(NodeKind::NumberLiteral { token }, Span::DUMMY).unwrap();
    let replacement = ast.alloc(NodeKind::NullLiteral, Span::DUMMY).unwrap();
    let expected = InvariantViolation::Detached {
        node: detached,
        tag: NodeTag::NumberLiteral,
    };

    assert_eq!(ast.location_of(detached), Err(expected.clone()));
    assert_eq!(ast.replace_child(detached, replacement), Err(expected.clone()));
    assert_eq!(ast.remove_child(detached), Err(expected.clone()));
    assert_eq!(
        ParenthesizedLiteralRule.fold(&mut ast, detached),
        Err(FoldError::Invariant(expected.clone()))
    );
    assert_eq!(
        FoldDriver::new(registry::default_rules::<&str>(&[]).unwrap())
            .run_to_fixed_point(&mut ast, detached),
        Err(FoldError::Invariant(expected))
    );
}

#[test]
fn driver_folds_a_whole_compilation_unit() {
    let source = "\
package p;

public class Shapes {
    static final String NAME = (\"shapes\");

    double scale(double d) {
        if ((d > (0))) return (d) * ((2.5));
        for (int i = (0); i < ((10)); i++) d += (1.0f);
        return d instanceof Object ? (null) : (Shapes.class);
    }
}
";
    let expected = "\
package p;

public class Shapes {
    static final String NAME = \"shapes\";

    double scale(double d) {
        if ((d > 0)) return (d) * 2.5;
        for (int i = 0; i < 10; i++) d += 1.0f;
        return d instanceof Object ? null : Shapes.class;
    }
}
";
    let mut ast = parse(source).unwrap();
    let root = ast.root();
    let driver = FoldDriver::new(registry::default_rules::<&str>(&[]).unwrap());
    let report = driver.run_with_report(&mut ast, root).unwrap();

    assert_eq!(report.root, root);
    assert_eq!(report.rounds, 2);
    assert_eq!(report.rewrites_for(ParenthesizedLiteralRule::NAME), Some(10));
    assert_same_tree(&ast, expected);
    assert_eq!(render(&ast), expected);
}

#[test]
fn deep_cascade_folds_in_one_call() {
    const DEPTH: usize = 10_000;
    let source = format!("{}0x7F{}", "(".repeat(DEPTH), ")".repeat(DEPTH));
    let mut ast = parse_expression(&source).unwrap();
    let root = ast.root();

    let rewrites = ParenthesizedLiteralRule.rewrite(&mut ast, root).unwrap();

    assert_eq!(rewrites, DEPTH);
    let folded: NodeId = ast.root();
    assert_eq!(ast.tag(folded), NodeTag::NumberLiteral);
    assert_eq!(render(&ast), "0x7F");
}

#[test]
fn disabled_rule_leaves_tree_alone() {
    let source = in_method("(7);");
    let mut ast = parse(&source).unwrap();
    let root = ast.root();
    let rules = registry::default_rules(&[ParenthesizedLiteralRule::NAME]).unwrap();
    let report = FoldDriver::new(rules).run_with_report(&mut ast, root).unwrap();
    assert_eq!(report.rounds, 1);
    assert_same_tree(&ast, &source);
}
