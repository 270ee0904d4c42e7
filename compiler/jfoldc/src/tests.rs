#![allow(
    clippy::unwrap_used,
    reason = "test code uses unwrap for concise assertions"
)]

use std::path::PathBuf;

use pretty_assertions::assert_eq;

use jfold_fold::{DriverConfig, FoldError};
use jfold_parse::ParseError;

use super::*;

fn options(disabled: &[&str]) -> FoldOptions {
    FoldOptions {
        input: PathBuf::from("In.java"),
        output: PathBuf::from("Out.java"),
        config: DriverConfig::default(),
        disabled: disabled.iter().map(|s| (*s).to_owned()).collect(),
        verbose: false,
    }
}

#[test]
fn test_fold_source_renders_folded_tree() {
    let source = "class A { int x = ((1)); String s = (t); }";
    let (text, report) = fold_source(source, Path::new("A.java"), &options(&[])).unwrap();
    assert_eq!(text, "class A {\n    int x = 1;\n\n    String s = (t);\n}\n");
    assert_eq!(report.rounds, 2);
    assert_eq!(report.total_rewrites(), 2);
}

#[test]
fn test_fold_source_with_rule_disabled() {
    let source = "class A { int x = ((1)); }";
    let (text, report) =
        fold_source(source, Path::new("A.java"), &options(&["parenthesized-literal"])).unwrap();
    assert_eq!(text, "class A {\n    int x = ((1));\n}\n");
    assert_eq!(report.total_rewrites(), 0);
}

#[test]
fn test_fold_source_unknown_rule() {
    let err = fold_source("class A { }", Path::new("A.java"), &options(&["nope"])).unwrap_err();
    assert!(matches!(err, CliError::Fold(FoldError::UnknownRule { .. })));
}

#[test]
fn test_parse_error_carries_position() {
    let err = fold_source("class A {\n  int x = ;\n}", Path::new("A.java"), &options(&[]))
        .unwrap_err();
    let CliError::Parse {
        line,
        column,
        ref source,
        ..
    } = err
    else {
        panic!("expected a parse error, got {err}");
    };
    assert_eq!((line, column), (2, 11));
    assert!(matches!(source, ParseError::UnexpectedToken { .. }));
    assert!(err.to_string().starts_with("A.java:2:11: expected"));
}

#[test]
fn test_rule_listing() {
    assert_eq!(
        rule_listing(),
        "parenthesized-literal  replace a parenthesized literal with the bare literal\n"
    );
}
