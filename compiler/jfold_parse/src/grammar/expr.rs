//! Expression parsing.
//!
//! Precedence climbing over the binary operators, with assignment and
//! the conditional operator on top and unary, cast, postfix and primary
//! expressions underneath. Binary chains are left-nested:
//! `a + b + c` is `(a + b) + c`.

use jfold_ir::{
    ensure_sufficient_stack, AssignmentOperator, InfixOperator, NodeId, NodeKind, PostfixOperator,
    PrefixOperator, Span,
};

use crate::error::ParseError;
use crate::token::{Keyword, Punct, TokenKind};
use crate::Parser;

/// `instanceof` binds like the relational operators.
const INSTANCEOF_PRECEDENCE: u8 = InfixOperator::Less.precedence();

fn infix_operator(kind: TokenKind) -> Option<InfixOperator> {
    let TokenKind::Punct(punct) = kind else {
        return None;
    };
    Some(match punct {
        Punct::Star => InfixOperator::Times,
        Punct::Slash => InfixOperator::Divide,
        Punct::Percent => InfixOperator::Remainder,
        Punct::Plus => InfixOperator::Plus,
        Punct::Minus => InfixOperator::Minus,
        Punct::Shl => InfixOperator::LeftShift,
        Punct::Shr => InfixOperator::RightShiftSigned,
        Punct::Ushr => InfixOperator::RightShiftUnsigned,
        Punct::Lt => InfixOperator::Less,
        Punct::Gt => InfixOperator::Greater,
        Punct::LtEq => InfixOperator::LessEquals,
        Punct::GtEq => InfixOperator::GreaterEquals,
        Punct::EqEq => InfixOperator::Equals,
        Punct::NotEq => InfixOperator::NotEquals,
        Punct::Amp => InfixOperator::And,
        Punct::Caret => InfixOperator::Xor,
        Punct::Pipe => InfixOperator::Or,
        Punct::AmpAmp => InfixOperator::ConditionalAnd,
        Punct::PipePipe => InfixOperator::ConditionalOr,
        _ => return None,
    })
}

fn assignment_operator(kind: TokenKind) -> Option<AssignmentOperator> {
    let TokenKind::Punct(punct) = kind else {
        return None;
    };
    Some(match punct {
        Punct::Eq => AssignmentOperator::Assign,
        Punct::PlusEq => AssignmentOperator::PlusAssign,
        Punct::MinusEq => AssignmentOperator::MinusAssign,
        Punct::StarEq => AssignmentOperator::TimesAssign,
        Punct::SlashEq => AssignmentOperator::DivideAssign,
        Punct::PercentEq => AssignmentOperator::RemainderAssign,
        Punct::AmpEq => AssignmentOperator::BitAndAssign,
        Punct::PipeEq => AssignmentOperator::BitOrAssign,
        Punct::CaretEq => AssignmentOperator::BitXorAssign,
        Punct::ShlEq => AssignmentOperator::LeftShiftAssign,
        Punct::ShrEq => AssignmentOperator::RightShiftSignedAssign,
        Punct::UshrEq => AssignmentOperator::RightShiftUnsignedAssign,
        _ => return None,
    })
}

fn prefix_operator(kind: TokenKind) -> Option<PrefixOperator> {
    match kind {
        TokenKind::Punct(Punct::PlusPlus) => Some(PrefixOperator::Increment),
        TokenKind::Punct(Punct::MinusMinus) => Some(PrefixOperator::Decrement),
        TokenKind::Punct(Punct::Plus) => Some(PrefixOperator::Plus),
        TokenKind::Punct(Punct::Minus) => Some(PrefixOperator::Minus),
        TokenKind::Punct(Punct::Tilde) => Some(PrefixOperator::Complement),
        TokenKind::Punct(Punct::Bang) => Some(PrefixOperator::Not),
        _ => None,
    }
}

/// Tokens that may follow `(Name)` for it to read as a cast. `+` and `-`
/// are excluded: `(a) - b` is a subtraction.
fn starts_cast_operand(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Ident
            | TokenKind::Number
            | TokenKind::Char
            | TokenKind::String
            | TokenKind::Keyword(
                Keyword::This | Keyword::New | Keyword::True | Keyword::False | Keyword::Null
            )
            | TokenKind::Punct(Punct::LParen | Punct::Bang | Punct::Tilde)
    )
}

impl Parser<'_> {
    /// Parse an expression, assignment included.
    pub(crate) fn parse_expression(&mut self) -> Result<NodeId, ParseError> {
        ensure_sufficient_stack(|| self.parse_assignment())
    }

    fn parse_assignment(&mut self) -> Result<NodeId, ParseError> {
        let start = self.cursor.current_span();
        let left_hand_side = self.parse_conditional()?;
        let Some(operator) = assignment_operator(self.cursor.current_kind()) else {
            return Ok(left_hand_side);
        };
        self.cursor.advance();
        let right_hand_side = self.parse_expression()?;
        let span = self.span_from(start);
        self.alloc(
            NodeKind::Assignment {
                operator,
                left_hand_side,
                right_hand_side,
            },
            span,
        )
    }

    /// `a ? b : c`
    fn parse_conditional(&mut self) -> Result<NodeId, ParseError> {
        let start = self.cursor.current_span();
        let expression = self.parse_binary(1)?;
        if !self.cursor.eat_punct(Punct::Question) {
            return Ok(expression);
        }
        let then_expression = self.parse_expression()?;
        self.cursor.expect_punct(Punct::Colon)?;
        let else_expression = ensure_sufficient_stack(|| self.parse_conditional())?;
        let span = self.span_from(start);
        self.alloc(
            NodeKind::ConditionalExpression {
                expression,
                then_expression,
                else_expression,
            },
            span,
        )
    }

    /// Binary operators binding at least as tight as `min_precedence`.
    fn parse_binary(&mut self, min_precedence: u8) -> Result<NodeId, ParseError> {
        let start = self.cursor.current_span();
        let mut left = self.parse_unary()?;
        loop {
            if self.cursor.check_keyword(Keyword::Instanceof)
                && INSTANCEOF_PRECEDENCE >= min_precedence
            {
                self.cursor.advance();
                let right_operand = self.parse_type(false)?;
                let span = self.span_from(start);
                left = self.alloc(
                    NodeKind::InstanceofExpression {
                        left_operand: left,
                        right_operand,
                    },
                    span,
                )?;
                continue;
            }

            let Some(operator) = infix_operator(self.cursor.current_kind()) else {
                break;
            };
            let precedence = operator.precedence();
            if precedence < min_precedence {
                break;
            }
            self.cursor.advance();
            let right_operand = self.parse_binary(precedence + 1)?;
            let span = self.span_from(start);
            left = self.alloc(
                NodeKind::InfixExpression {
                    operator,
                    left_operand: left,
                    right_operand,
                },
                span,
            )?;
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<NodeId, ParseError> {
        ensure_sufficient_stack(|| self.parse_unary_inner())
    }

    fn parse_unary_inner(&mut self) -> Result<NodeId, ParseError> {
        let start = self.cursor.current_span();
        if let Some(operator) = prefix_operator(self.cursor.current_kind()) {
            self.cursor.advance();
            let operand = self.parse_unary()?;
            let span = self.span_from(start);
            return self.alloc(NodeKind::PrefixExpression { operator, operand }, span);
        }

        if self.cursor.check_punct(Punct::LParen) && self.at_cast() {
            self.cursor.advance();
            let ty = self.parse_type(false)?;
            self.cursor.expect_punct(Punct::RParen)?;
            let expression = self.parse_unary()?;
            let span = self.span_from(start);
            return self.alloc(NodeKind::CastExpression { ty, expression }, span);
        }

        self.parse_postfix()
    }

    /// Whether the `(` at the cursor opens a cast. Restores the cursor.
    fn at_cast(&mut self) -> bool {
        let snapshot = self.cursor.snapshot();
        self.cursor.advance();
        let primitive = matches!(
            self.cursor.current_kind(),
            TokenKind::Keyword(keyword) if keyword.is_primitive() && keyword != Keyword::Void
        );
        let cast = self.scan_type()
            && self.cursor.eat_punct(Punct::RParen)
            && (primitive || starts_cast_operand(self.cursor.current_kind()));
        self.cursor.restore(snapshot);
        cast
    }

    fn parse_postfix(&mut self) -> Result<NodeId, ParseError> {
        let start = self.cursor.current_span();
        let primary = self.parse_primary()?;
        let mut expr = self.parse_selectors(primary, start)?;
        loop {
            let operator = if self.cursor.eat_punct(Punct::PlusPlus) {
                PostfixOperator::Increment
            } else if self.cursor.eat_punct(Punct::MinusMinus) {
                PostfixOperator::Decrement
            } else {
                return Ok(expr);
            };
            let span = self.span_from(start);
            expr = self.alloc(
                NodeKind::PostfixExpression {
                    operator,
                    operand: expr,
                },
                span,
            )?;
        }
    }

    /// `.name`, `.name(args)` and `[index]` after a primary.
    fn parse_selectors(&mut self, primary: NodeId, start: Span) -> Result<NodeId, ParseError> {
        let mut expr = primary;
        loop {
            if self.cursor.eat_punct(Punct::Dot) {
                let name = self.parse_simple_name()?;
                if self.cursor.check_punct(Punct::LParen) {
                    let arguments = self.parse_arguments()?;
                    let span = self.span_from(start);
                    expr = self.alloc(
                        NodeKind::MethodInvocation {
                            expression: expr,
                            name,
                            arguments,
                        },
                        span,
                    )?;
                } else {
                    let span = self.span_from(start);
                    expr = self.alloc(
                        NodeKind::FieldAccess {
                            expression: expr,
                            name,
                        },
                        span,
                    )?;
                }
            } else if self.cursor.eat_punct(Punct::LBracket) {
                let index = self.parse_expression()?;
                self.cursor.expect_punct(Punct::RBracket)?;
                let span = self.span_from(start);
                expr = self.alloc(NodeKind::ArrayAccess { array: expr, index }, span)?;
            } else {
                return Ok(expr);
            }
        }
    }

    fn parse_primary(&mut self) -> Result<NodeId, ParseError> {
        let token = self.cursor.current();
        let start = token.span;
        match token.kind {
            TokenKind::Number => {
                self.cursor.advance();
                let token = self.ast.intern(self.cursor.text(token));
                self.alloc(NodeKind::NumberLiteral { token }, start)
            }
            TokenKind::Char => {
                self.cursor.advance();
                let escaped = self.ast.intern(self.cursor.text(token));
                self.alloc(NodeKind::CharacterLiteral { escaped }, start)
            }
            TokenKind::String => {
                self.cursor.advance();
                let escaped = self.ast.intern(self.cursor.text(token));
                self.alloc(NodeKind::StringLiteral { escaped }, start)
            }
            TokenKind::Keyword(Keyword::True | Keyword::False) => {
                self.cursor.advance();
                let value = token.kind == TokenKind::Keyword(Keyword::True);
                self.alloc(NodeKind::BooleanLiteral { value }, start)
            }
            TokenKind::Keyword(Keyword::Null) => {
                self.cursor.advance();
                self.alloc(NodeKind::NullLiteral, start)
            }
            TokenKind::Keyword(Keyword::This) => {
                self.cursor.advance();
                self.alloc(NodeKind::ThisExpression, start)
            }
            TokenKind::Keyword(Keyword::New) => self.parse_class_instance_creation(),
            TokenKind::Keyword(keyword) if keyword.is_primitive() => {
                let primitive = self.parse_primitive_type()?;
                let ty = self.parse_dimensions(primitive, start)?;
                self.finish_type_literal(ty, start)
            }
            TokenKind::Punct(Punct::LParen) => {
                self.cursor.advance();
                let expression = self.parse_expression()?;
                self.cursor.expect_punct(Punct::RParen)?;
                let span = self.span_from(start);
                self.alloc(NodeKind::ParenthesizedExpression { expression }, span)
            }
            TokenKind::Ident => self.parse_name_expression(),
            _ => Err(self.cursor.unexpected("expression")),
        }
    }

    /// An identifier-led primary: a name, a qualified name, an unqualified
    /// method call or a `Name.class` literal. Member access and calls on a
    /// qualified name are left to the selectors.
    fn parse_name_expression(&mut self) -> Result<NodeId, ParseError> {
        let start = self.cursor.current_span();
        let mut name = self.parse_simple_name()?;

        if self.cursor.check_punct(Punct::LParen) {
            let arguments = self.parse_arguments()?;
            let span = self.span_from(start);
            return self.alloc(
                NodeKind::MethodInvocation {
                    expression: NodeId::INVALID,
                    name,
                    arguments,
                },
                span,
            );
        }

        loop {
            let next = self.cursor.peek_nth(1).kind;
            if self.cursor.check_punct(Punct::Dot) {
                match next {
                    TokenKind::Ident
                        if self.cursor.peek_nth(2).kind != TokenKind::Punct(Punct::LParen) =>
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
                    TokenKind::Keyword(Keyword::Class) => {
                        let span = self.span_from(start);
                        let ty = self.alloc(NodeKind::SimpleType { name }, span)?;
                        return self.finish_type_literal(ty, start);
                    }
                    _ => return Ok(name),
                }
            } else if self.cursor.check_punct(Punct::LBracket)
                && next == TokenKind::Punct(Punct::RBracket)
            {
                let span = self.span_from(start);
                let simple = self.alloc(NodeKind::SimpleType { name }, span)?;
                let ty = self.parse_dimensions(simple, start)?;
                return self.finish_type_literal(ty, start);
            } else {
                return Ok(name);
            }
        }
    }

    /// `. class` after a type.
    fn finish_type_literal(&mut self, ty: NodeId, start: Span) -> Result<NodeId, ParseError> {
        self.cursor.expect_punct(Punct::Dot)?;
        self.cursor.expect_keyword(Keyword::Class)?;
        let span = self.span_from(start);
        self.alloc(NodeKind::TypeLiteral { ty }, span)
    }

    /// `new Name(args)`
    fn parse_class_instance_creation(&mut self) -> Result<NodeId, ParseError> {
        let start = self.cursor.expect_keyword(Keyword::New)?.span;
        if !self.cursor.check(TokenKind::Ident) {
            return Err(ParseError::Unsupported {
                what: "array creation",
                span: self.cursor.current_span(),
            });
        }
        let type_start = self.cursor.current_span();
        let name = self.parse_name()?;
        let type_span = self.span_from(type_start);
        let ty = self.alloc(NodeKind::SimpleType { name }, type_span)?;
        if self.cursor.check_punct(Punct::LBracket) {
            return Err(ParseError::Unsupported {
                what: "array creation",
                span: self.cursor.current_span(),
            });
        }
        let arguments = self.parse_arguments()?;
        if self.cursor.check_punct(Punct::LBrace) {
            return Err(ParseError::Unsupported {
                what: "anonymous class",
                span: self.cursor.current_span(),
            });
        }
        let span = self.span_from(start);
        self.alloc(NodeKind::ClassInstanceCreation { ty, arguments }, span)
    }
}
