//! Statement parsing.

use jfold_ir::{ensure_sufficient_stack, NodeId, NodeKind, NodeList};

use crate::error::ParseError;
use crate::token::{Keyword, Punct, TokenKind};
use crate::Parser;

impl Parser<'_> {
    /// `{ Statement* }`
    pub(crate) fn parse_block(&mut self) -> Result<NodeId, ParseError> {
        let start = self.cursor.expect_punct(Punct::LBrace)?.span;
        let mut statements = NodeList::new();
        while !self.cursor.check_punct(Punct::RBrace) {
            if self.cursor.is_at_end() {
                return Err(self.cursor.unexpected("`}`"));
            }
            statements.push(self.parse_statement()?);
        }
        self.cursor.expect_punct(Punct::RBrace)?;
        let span = self.span_from(start);
        self.alloc(NodeKind::Block { statements }, span)
    }

    pub(crate) fn parse_statement(&mut self) -> Result<NodeId, ParseError> {
        ensure_sufficient_stack(|| self.parse_statement_inner())
    }

    fn parse_statement_inner(&mut self) -> Result<NodeId, ParseError> {
        let start = self.cursor.current_span();
        match self.cursor.current_kind() {
            TokenKind::Punct(Punct::LBrace) => self.parse_block(),
            TokenKind::Punct(Punct::Semi) => {
                self.cursor.advance();
                self.alloc(NodeKind::EmptyStatement, start)
            }
            TokenKind::Keyword(Keyword::If) => {
                self.cursor.advance();
                let expression = self.parse_condition()?;
                let then_statement = self.parse_statement()?;
                let else_statement = if self.cursor.eat_keyword(Keyword::Else) {
                    self.parse_statement()?
                } else {
                    NodeId::INVALID
                };
                let span = self.span_from(start);
                self.alloc(
                    NodeKind::IfStatement {
                        expression,
                        then_statement,
                        else_statement,
                    },
                    span,
                )
            }
            TokenKind::Keyword(Keyword::While) => {
                self.cursor.advance();
                let expression = self.parse_condition()?;
                let body = self.parse_statement()?;
                let span = self.span_from(start);
                self.alloc(NodeKind::WhileStatement { expression, body }, span)
            }
            TokenKind::Keyword(Keyword::Do) => {
                self.cursor.advance();
                let body = self.parse_statement()?;
                self.cursor.expect_keyword(Keyword::While)?;
                let expression = self.parse_condition()?;
                self.cursor.expect_punct(Punct::Semi)?;
                let span = self.span_from(start);
                self.alloc(NodeKind::DoStatement { body, expression }, span)
            }
            TokenKind::Keyword(Keyword::For) => self.parse_for(),
            TokenKind::Keyword(Keyword::Return) => {
                self.cursor.advance();
                let expression = if self.cursor.check_punct(Punct::Semi) {
                    NodeId::INVALID
                } else {
                    self.parse_expression()?
                };
                self.cursor.expect_punct(Punct::Semi)?;
                let span = self.span_from(start);
                self.alloc(NodeKind::ReturnStatement { expression }, span)
            }
            TokenKind::Keyword(Keyword::Break) => {
                self.cursor.advance();
                self.cursor.expect_punct(Punct::Semi)?;
                let span = self.span_from(start);
                self.alloc(NodeKind::BreakStatement, span)
            }
            TokenKind::Keyword(Keyword::Continue) => {
                self.cursor.advance();
                self.cursor.expect_punct(Punct::Semi)?;
                let span = self.span_from(start);
                self.alloc(NodeKind::ContinueStatement, span)
            }
            TokenKind::Keyword(Keyword::Throw) => {
                self.cursor.advance();
                let expression = self.parse_expression()?;
                self.cursor.expect_punct(Punct::Semi)?;
                let span = self.span_from(start);
                self.alloc(NodeKind::ThrowStatement { expression }, span)
            }
            TokenKind::Keyword(Keyword::Class | Keyword::Interface) => Err(ParseError::Unsupported {
                what: "local type declaration",
                span: start,
            }),
            _ => {
                if self.at_local_variable_declaration() {
                    let statement = self.parse_local_variable_declaration()?;
                    self.cursor.expect_punct(Punct::Semi)?;
                    return Ok(statement);
                }
                let expression = self.parse_expression()?;
                self.cursor.expect_punct(Punct::Semi)?;
                let span = self.span_from(start);
                self.alloc(NodeKind::ExpressionStatement { expression }, span)
            }
        }
    }

    /// `( Expression )` of `if`, `while` and `do`.
    fn parse_condition(&mut self) -> Result<NodeId, ParseError> {
        self.cursor.expect_punct(Punct::LParen)?;
        let expression = self.parse_expression()?;
        self.cursor.expect_punct(Punct::RParen)?;
        Ok(expression)
    }

    /// `for ( [Init] ; [Expression] ; [Updaters] ) Statement`
    fn parse_for(&mut self) -> Result<NodeId, ParseError> {
        let start = self.cursor.expect_keyword(Keyword::For)?.span;
        self.cursor.expect_punct(Punct::LParen)?;

        let mut initializers = NodeList::new();
        if self.at_local_variable_declaration() {
            initializers.push(self.parse_local_variable_declaration()?);
            if self.cursor.check_punct(Punct::Colon) {
                return Err(ParseError::Unsupported {
                    what: "enhanced for loop",
                    span: self.cursor.current_span(),
                });
            }
        } else if !self.cursor.check_punct(Punct::Semi) {
            initializers = self.parse_expression_list()?;
        }
        self.cursor.expect_punct(Punct::Semi)?;

        let expression = if self.cursor.check_punct(Punct::Semi) {
            NodeId::INVALID
        } else {
            self.parse_expression()?
        };
        self.cursor.expect_punct(Punct::Semi)?;

        let updaters = if self.cursor.check_punct(Punct::RParen) {
            NodeList::new()
        } else {
            self.parse_expression_list()?
        };
        self.cursor.expect_punct(Punct::RParen)?;

        let body = self.parse_statement()?;
        let span = self.span_from(start);
        self.alloc(
            NodeKind::ForStatement {
                initializers,
                expression,
                updaters,
                body,
            },
            span,
        )
    }

    fn parse_expression_list(&mut self) -> Result<NodeList, ParseError> {
        let mut list = NodeList::new();
        loop {
            list.push(self.parse_expression()?);
            if !self.cursor.eat_punct(Punct::Comma) {
                return Ok(list);
            }
        }
    }

    /// Whether the tokens ahead read `[modifiers] Type Identifier`.
    ///
    /// Scans without allocating and always restores the cursor, so an
    /// expression statement such as `a.b = c;` is left for the
    /// expression parser.
    fn at_local_variable_declaration(&mut self) -> bool {
        let snapshot = self.cursor.snapshot();
        let _ = self.parse_modifiers();
        let found = self.scan_type() && self.cursor.check(TokenKind::Ident);
        self.cursor.restore(snapshot);
        found
    }

    /// `[modifiers] Type fragments`, without the terminating `;`.
    fn parse_local_variable_declaration(&mut self) -> Result<NodeId, ParseError> {
        let start = self.cursor.current_span();
        let modifiers = self.parse_modifiers();
        let ty = self.parse_type(false)?;
        let fragments = self.parse_fragments()?;
        let span = self.span_from(start);
        self.alloc(
            NodeKind::VariableDeclarationStatement {
                modifiers,
                ty,
                fragments,
            },
            span,
        )
    }
}
