//! Command line parsing.
//!
//! `jfold <input> <output> [--max-rounds=N] [--disable=RULE] [--verbose]`
//! or `jfold --list-rules`. Flags may appear anywhere; `--disable` may be
//! repeated.

use std::path::PathBuf;

use jfold_fold::DriverConfig;

use crate::error::CliError;

pub const USAGE: &str = "\
Usage: jfold <input.java> <output.java> [options]
       jfold --list-rules

Options:
  --max-rounds=<n>   Round cap for the fixed-point driver (default: 64)
  --disable=<rule>   Leave a folding rule out (repeatable)
  -v, --verbose      Log folding progress to stderr
  --list-rules       Print the available folding rules";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    ListRules,
    Fold(FoldOptions),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FoldOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub config: DriverConfig,
    pub disabled: Vec<String>,
    pub verbose: bool,
}

/// Parse the arguments after the program name.
pub fn parse_args<S: AsRef<str>>(args: &[S]) -> Result<Command, CliError> {
    let mut paths = Vec::with_capacity(2);
    let mut config = DriverConfig::default();
    let mut disabled = Vec::new();
    let mut verbose = false;
    let mut list_rules = false;

    for arg in args.iter().map(AsRef::as_ref) {
        if arg == "--list-rules" {
            list_rules = true;
        } else if arg == "--verbose" || arg == "-v" {
            verbose = true;
        } else if let Some(rounds) = arg.strip_prefix("--max-rounds=") {
            config.max_rounds = match rounds.parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(CliError::Usage(format!(
                        "--max-rounds expects a positive integer, got '{rounds}'"
                    )));
                }
            };
        } else if let Some(rule) = arg.strip_prefix("--disable=") {
            disabled.push(rule.to_owned());
        } else if arg.starts_with('-') && arg.len() > 1 {
            return Err(CliError::Usage(format!("unknown option '{arg}'")));
        } else {
            paths.push(PathBuf::from(arg));
        }
    }

    if list_rules {
        return if paths.is_empty() {
            Ok(Command::ListRules)
        } else {
            Err(CliError::Usage(
                "--list-rules does not take file arguments".to_owned(),
            ))
        };
    }

    let [input, output]: [PathBuf; 2] = paths.try_into().map_err(|paths: Vec<PathBuf>| {
        CliError::Usage(format!("expected 2 file arguments, got {}", paths.len()))
    })?;
    Ok(Command::Fold(FoldOptions {
        input,
        output,
        config,
        disabled,
        verbose,
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_paths_and_defaults() {
        let Command::Fold(options) = parse_args(&["in.java", "out.java"]).unwrap() else {
            panic!("expected a fold command");
        };
        assert_eq!(options.input, PathBuf::from("in.java"));
        assert_eq!(options.output, PathBuf::from("out.java"));
        assert_eq!(options.config, DriverConfig::default());
        assert!(options.disabled.is_empty());
        assert!(!options.verbose);
    }

    #[test]
    fn test_flags_anywhere() {
        let args = [
            "--verbose",
            "a.java",
            "--max-rounds=3",
            "b.java",
            "--disable=parenthesized-literal",
        ];
        let Command::Fold(options) = parse_args(&args).unwrap() else {
            panic!("expected a fold command");
        };
        assert_eq!(options.config.max_rounds, 3);
        assert_eq!(options.disabled, vec!["parenthesized-literal".to_owned()]);
        assert!(options.verbose);
    }

    #[test]
    fn test_list_rules() {
        assert_eq!(parse_args(&["--list-rules"]).unwrap(), Command::ListRules);
        assert!(parse_args(&["--list-rules", "x.java"]).unwrap_err().is_usage());
    }

    #[test]
    fn test_wrong_argument_count() {
        let err = parse_args::<&str>(&[]).unwrap_err();
        assert_eq!(err.to_string(), "expected 2 file arguments, got 0");
        assert!(parse_args(&["a", "b", "c"]).unwrap_err().is_usage());
    }

    #[test]
    fn test_bad_options() {
        assert_eq!(
            parse_args(&["a", "b", "--fast"]).unwrap_err().to_string(),
            "unknown option '--fast'"
        );
        assert!(parse_args(&["a", "b", "--max-rounds=0"]).unwrap_err().is_usage());
        assert!(parse_args(&["a", "b", "--max-rounds=x"]).unwrap_err().is_usage());
    }
}
