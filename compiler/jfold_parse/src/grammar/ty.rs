//! Type parsing.

use jfold_ir::{NodeId, NodeKind, PrimitiveKind, Span};

use crate::error::ParseError;
use crate::token::{Keyword, Punct, TokenKind};
use crate::Parser;

impl Parser<'_> {
    /// Parse a type: a primitive or a (qualified) name, followed by any
    /// number of `[]`. `void` is accepted only when `allow_void` is set.
    pub(crate) fn parse_type(&mut self, allow_void: bool) -> Result<NodeId, ParseError> {
        let start = self.cursor.current_span();
        let base = match self.cursor.current_kind() {
            TokenKind::Keyword(keyword) if keyword.is_primitive() => {
                if keyword == Keyword::Void && !allow_void {
                    return Err(self.cursor.unexpected("type"));
                }
                self.parse_primitive_type()?
            }
            TokenKind::Ident => {
                let name = self.parse_name()?;
                let span = self.span_from(start);
                self.alloc(NodeKind::SimpleType { name }, span)?
            }
            _ => return Err(self.cursor.unexpected("type")),
        };
        self.parse_dimensions(base, start)
    }

    pub(crate) fn parse_primitive_type(&mut self) -> Result<NodeId, ParseError> {
        let token = self.cursor.advance();
        let primitive = PrimitiveKind::from_keyword(self.cursor.text(token))
            .ok_or_else(|| ParseError::UnexpectedToken {
                expected: "primitive type".to_owned(),
                found: token.kind.to_string(),
                span: token.span,
            })?;
        self.alloc(NodeKind::PrimitiveType { primitive }, token.span)
    }

    /// Wrap `component` in one `ArrayType` per trailing `[]`.
    pub(crate) fn parse_dimensions(
        &mut self,
        component: NodeId,
        start: Span,
    ) -> Result<NodeId, ParseError> {
        let mut ty = component;
        while self.cursor.check_punct(Punct::LBracket)
            && self.cursor.peek_nth(1).kind == TokenKind::Punct(Punct::RBracket)
        {
            self.cursor.advance();
            self.cursor.advance();
            let span = self.span_from(start);
            ty = self.alloc(NodeKind::ArrayType { component_type: ty }, span)?;
        }
        Ok(ty)
    }

    /// Advance over a type without allocating anything. Returns whether
    /// a type was there; the caller restores the cursor either way.
    pub(crate) fn scan_type(&mut self) -> bool {
        match self.cursor.current_kind() {
            TokenKind::Keyword(keyword) if keyword.is_primitive() && keyword != Keyword::Void => {
                self.cursor.advance();
            }
            TokenKind::Ident => {
                self.cursor.advance();
                while self.cursor.check_punct(Punct::Dot)
                    && self.cursor.peek_nth(1).kind == TokenKind::Ident
                {
                    self.cursor.advance();
                    self.cursor.advance();
                }
            }
            _ => return false,
        }
        while self.cursor.check_punct(Punct::LBracket)
            && self.cursor.peek_nth(1).kind == TokenKind::Punct(Punct::RBracket)
        {
            self.cursor.advance();
            self.cursor.advance();
        }
        true
    }
}
