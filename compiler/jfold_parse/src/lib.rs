//! Parser for the Java subset jfold folds.
//!
//! Source text goes through [`lexer::tokenize`] and then a recursive
//! descent over the token cursor. Nodes are allocated bottom-up into
//! a fresh [`Ast`]; the outermost node becomes the designated root.
//!
//! Entry points:
//! - [`parse`] for a whole compilation unit
//! - [`parse_expression`] for a single expression (tests and tools)

mod cursor;
mod error;
mod grammar;
pub mod lexer;
mod token;

use jfold_ir::{Ast, NodeId, NodeKind, Span};
use tracing::debug;

use cursor::Cursor;
pub use error::ParseError;
pub use token::{Keyword, Punct, Token, TokenKind};

/// Parser state: the token cursor and the arena being filled.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    ast: Ast,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> Result<Self, ParseError> {
        let tokens = lexer::tokenize(source)?;
        Ok(Parser {
            cursor: Cursor::new(source, tokens),
            ast: Ast::with_capacity(source.len()),
        })
    }

    #[inline]
    fn alloc(&mut self, kind: NodeKind, span: Span) -> Result<NodeId, ParseError> {
        Ok(self.ast.alloc(kind, span)?)
    }

    /// Span from `start` to the end of the last consumed token.
    #[inline]
    fn span_from(&self, start: Span) -> Span {
        start.merge(self.cursor.previous_span())
    }

    /// Require end of input, then hand out the arena rooted at `root`.
    fn finish(mut self, root: NodeId) -> Result<Ast, ParseError> {
        if !self.cursor.is_at_end() {
            return Err(self.cursor.unexpected("end of file"));
        }
        self.ast.set_root(root)?;
        Ok(self.ast)
    }
}

/// Parse a compilation unit. The returned tree is rooted at its
/// `CompilationUnit` node.
pub fn parse(source: &str) -> Result<Ast, ParseError> {
    let mut parser = Parser::new(source)?;
    let root = parser.parse_compilation_unit()?;
    let ast = parser.finish(root)?;
    debug!(bytes = source.len(), nodes = ast.len(), "parsed compilation unit");
    Ok(ast)
}

/// Parse a single expression. The returned tree is rooted at the
/// expression node itself.
pub fn parse_expression(source: &str) -> Result<Ast, ParseError> {
    let mut parser = Parser::new(source)?;
    let root = parser.parse_expression()?;
    parser.finish(root)
}

#[cfg(test)]
mod tests;
