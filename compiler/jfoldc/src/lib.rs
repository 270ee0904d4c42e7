//! jfold CLI library
//!
//! The pipeline behind the `jfold` binary: read, parse, fold to a fixed
//! point, render, write. Split from `main.rs` so the pipeline is testable
//! without spawning a process.

mod args;
mod error;

use std::fs;
use std::path::Path;
use std::sync::Once;

use jfold_fmt::render;
use jfold_fold::{registry, FoldDriver, FoldReport};
use tracing::{debug, info};

pub use args::{parse_args, Command, FoldOptions, USAGE};
pub use error::CliError;

static TRACING_INIT: Once = Once::new();

/// Install the global subscriber.
///
/// `RUST_LOG` wins when set. Otherwise `--verbose` logs at `debug` and
/// the default is to install nothing.
pub fn init_tracing(verbose: bool) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else if verbose {
            EnvFilter::new("debug")
        } else {
            return;
        };
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true),
            )
            .with(filter)
            .init();
    });
}

/// Fold Java source text and render the result.
///
/// `path` only labels parse errors.
pub fn fold_source(
    source: &str,
    path: &Path,
    options: &FoldOptions,
) -> Result<(String, FoldReport), CliError> {
    let mut ast = jfold_parse::parse(source).map_err(|source_error| {
        let (line, column) = source_error.line_col(source);
        CliError::Parse {
            path: path.to_path_buf(),
            line,
            column,
            source: source_error,
        }
    })?;

    let rules = registry::default_rules(&options.disabled)?;
    let driver = FoldDriver::with_config(rules, options.config);
    let root = ast.root();
    let report = driver.run_with_report(&mut ast, root)?;
    Ok((render(&ast), report))
}

/// Fold `options.input` into `options.output`.
pub fn fold_file(options: &FoldOptions) -> Result<FoldReport, CliError> {
    let source = fs::read_to_string(&options.input).map_err(|source| CliError::Io {
        action: "read",
        path: options.input.clone(),
        source,
    })?;
    debug!(path = %options.input.display(), bytes = source.len(), "read input");

    let (folded, report) = fold_source(&source, &options.input, options)?;

    fs::write(&options.output, &folded).map_err(|source| CliError::Io {
        action: "write",
        path: options.output.clone(),
        source,
    })?;
    info!(
        input = %options.input.display(),
        output = %options.output.display(),
        rounds = report.rounds,
        rewrites = report.total_rewrites(),
        "folded"
    );
    Ok(report)
}

/// One line per registered rule: name, then description.
pub fn rule_listing() -> String {
    let width = registry::names().map(str::len).max().unwrap_or(0);
    registry::rules()
        .iter()
        .map(|info| format!("{:width$}  {}\n", info.name, info.description))
        .collect()
}

#[cfg(test)]
mod tests;
