//! CLI errors. Every variant ends the run with exit status 1.

use std::io;
use std::path::PathBuf;

use jfold_fold::FoldError;
use jfold_parse::ParseError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Bad command line. The message is followed by the usage text.
    #[error("{0}")]
    Usage(String),

    #[error("cannot {action} '{}': {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}:{line}:{column}: {source}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        column: usize,
        #[source]
        source: ParseError,
    },

    #[error(transparent)]
    Fold(#[from] FoldError),
}

impl CliError {
    pub fn is_usage(&self) -> bool {
        matches!(self, CliError::Usage(_))
    }
}
