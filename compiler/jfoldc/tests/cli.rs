//! Tests for the `jfold` binary and the file pipeline.

#![allow(clippy::unwrap_used, reason = "Tests can panic")]

use std::fs;
use std::process::{Command, Output};

use pretty_assertions::assert_eq;
use tempfile::tempdir;

use jfoldc::{fold_file, parse_args, CliError};

fn jfold(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_jfold"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

const INPUT: &str = "\
class Main {
    void run() {
        (7);
        ((14));
        int y = (x + 1);
        f(('a'), (true), (f()));
    }
}
";

const EXPECTED: &str = "\
class Main {
    void run() {
        7;
        14;
        int y = (x + 1);
        f('a', true, (f()));
    }
}
";

#[test]
fn folds_file_to_output_path() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("Main.java");
    let output = dir.path().join("Main.folded.java");
    fs::write(&input, INPUT).unwrap();

    let result = jfold(&[input.to_str().unwrap(), output.to_str().unwrap()]);

    assert!(result.status.success(), "{}", String::from_utf8_lossy(&result.stderr));
    assert_eq!(fs::read_to_string(&output).unwrap(), EXPECTED);
}

#[test]
fn fold_file_reports_rewrites() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("Main.java");
    let output = dir.path().join("out").join("Main.java");
    fs::write(&input, INPUT).unwrap();
    fs::create_dir(dir.path().join("out")).unwrap();

    let args = [input.to_str().unwrap(), output.to_str().unwrap()];
    let jfoldc::Command::Fold(options) = parse_args(&args).unwrap() else {
        panic!("expected a fold command");
    };
    let report = fold_file(&options).unwrap();

    assert_eq!(report.total_rewrites(), 5);
    assert_eq!(fs::read_to_string(&output).unwrap(), EXPECTED);
}

#[test]
fn missing_input_is_an_io_error() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("Missing.java");
    let output = dir.path().join("Out.java");
    let args = [input.to_str().unwrap(), output.to_str().unwrap()];
    let jfoldc::Command::Fold(options) = parse_args(&args).unwrap() else {
        panic!("expected a fold command");
    };

    let err = fold_file(&options).unwrap_err();
    assert!(matches!(err, CliError::Io { action: "read", .. }));
    assert!(!output.exists());

    let result = jfold(&args);
    assert_eq!(result.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&result.stderr).contains("cannot read"));
}

#[test]
fn parse_failure_exits_with_error() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("Bad.java");
    let output = dir.path().join("Out.java");
    fs::write(&input, "class Bad { int x = ; }").unwrap();

    let result = jfold(&[input.to_str().unwrap(), output.to_str().unwrap()]);

    assert_eq!(result.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&result.stderr).contains("expected expression"));
    assert!(!output.exists());
}

#[test]
fn wrong_argument_count_prints_usage() {
    let result = jfold(&["only-one.java"]);
    assert_eq!(result.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("expected 2 file arguments, got 1"));
    assert!(stderr.contains("Usage: jfold"));
}

#[test]
fn round_cap_too_small_fails() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("Main.java");
    let output = dir.path().join("Out.java");
    fs::write(&input, INPUT).unwrap();

    // One round folds everything but cannot confirm the fixed point.
    let result = jfold(&[
        input.to_str().unwrap(),
        output.to_str().unwrap(),
        "--max-rounds=1",
    ]);

    assert_eq!(result.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&result.stderr).contains("no fixed point after 1 rounds"));
}

#[test]
fn list_rules_prints_registry() {
    let result = jfold(&["--list-rules"]);
    assert!(result.status.success());
    assert!(String::from_utf8_lossy(&result.stdout).starts_with("parenthesized-literal"));
}
