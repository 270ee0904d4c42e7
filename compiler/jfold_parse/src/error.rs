//! Parse error types.

use jfold_ir::{InvariantViolation, Span};

/// Why the source could not be turned into a tree.
///
/// Every variant carries the span it points at; [`ParseError::span`]
/// returns it and [`ParseError::line_col`] turns it into a human position.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// A byte that starts no token.
    #[error("unexpected character {ch:?}")]
    UnexpectedCharacter { ch: char, span: Span },

    /// A `/* ...` comment with no closing `*/`.
    #[error("unterminated block comment")]
    UnterminatedComment { span: Span },

    /// A character or string literal without its closing quote.
    #[error("unterminated {what} literal")]
    UnterminatedLiteral { what: &'static str, span: Span },

    /// The parser needed one thing and found another.
    #[error("expected {expected}, found {found}")]
    UnexpectedToken {
        expected: String,
        found: String,
        span: Span,
    },

    /// Valid Java the folder's grammar does not cover.
    #[error("unsupported construct: {what}")]
    Unsupported { what: &'static str, span: Span },

    /// The source is larger than spans can address.
    #[error("source too large ({len} bytes)")]
    SourceTooLarge { len: usize },

    /// The tree could not be assembled.
    #[error(transparent)]
    Tree(#[from] InvariantViolation),
}

impl ParseError {
    pub fn span(&self) -> Span {
        match self {
            ParseError::UnexpectedCharacter { span, .. }
            | ParseError::UnterminatedComment { span }
            | ParseError::UnterminatedLiteral { span, .. }
            | ParseError::UnexpectedToken { span, .. }
            | ParseError::Unsupported { span, .. } => *span,
            ParseError::SourceTooLarge { .. } | ParseError::Tree(_) => Span::DUMMY,
        }
    }

    /// 1-based line and column of the error in `source`.
    pub fn line_col(&self, source: &str) -> (usize, usize) {
        self.span().line_col(source)
    }
}
