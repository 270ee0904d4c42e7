//! Grammar productions, split by syntactic category.
//!
//! - `item.rs`: compilation unit, imports, type and member declarations
//! - `stmt.rs`: blocks and statements
//! - `expr.rs`: expressions by precedence level
//! - `ty.rs`: types, plus the allocation-free type scan used for
//!   lookahead

mod expr;
mod item;
mod stmt;
mod ty;

use jfold_ir::{Modifiers, NodeId, NodeKind};

use crate::error::ParseError;
use crate::token::{Punct, Token, TokenKind};
use crate::Parser;

impl Parser<'_> {
    /// Allocate a `SimpleName` for an identifier token.
    fn simple_name(&mut self, token: Token) -> Result<NodeId, ParseError> {
        let identifier = self.ast.intern(self.cursor.text(token));
        self.alloc(NodeKind::SimpleName { identifier }, token.span)
    }

    /// Parse an identifier into a `SimpleName`.
    fn parse_simple_name(&mut self) -> Result<NodeId, ParseError> {
        let token = self.cursor.expect_ident()?;
        self.simple_name(token)
    }

    /// Parse `a.b.c` into nested `QualifiedName`s.
    fn parse_name(&mut self) -> Result<NodeId, ParseError> {
        let start = self.cursor.current_span();
        let mut name = self.parse_simple_name()?;
        while self.cursor.check_punct(Punct::Dot) && self.cursor.peek_nth(1).kind == TokenKind::Ident
        {
            self.cursor.advance();
            let last = self.parse_simple_name()?;
            let span = self.span_from(start);
            name = self.alloc(
                NodeKind::QualifiedName {
                    qualifier: name,
                    name: last,
                },
                span,
            )?;
        }
        Ok(name)
    }

    /// Consume any run of modifier keywords.
    fn parse_modifiers(&mut self) -> Modifiers {
        let mut modifiers = Modifiers::empty();
        while let TokenKind::Keyword(keyword) = self.cursor.current_kind() {
            if !keyword.is_modifier() {
                break;
            }
            if let Some(flag) = Modifiers::from_keyword(keyword.as_str()) {
                modifiers |= flag;
            }
            self.cursor.advance();
        }
        modifiers
    }

    /// Parse a comma-separated, parenthesized argument list.
    fn parse_arguments(&mut self) -> Result<jfold_ir::NodeList, ParseError> {
        self.cursor.expect_punct(Punct::LParen)?;
        let mut arguments = jfold_ir::NodeList::new();
        if !self.cursor.check_punct(Punct::RParen) {
            loop {
                arguments.push(self.parse_expression()?);
                if !self.cursor.eat_punct(Punct::Comma) {
                    break;
                }
            }
        }
        self.cursor.expect_punct(Punct::RParen)?;
        Ok(arguments)
    }
}
