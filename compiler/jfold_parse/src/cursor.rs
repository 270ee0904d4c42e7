//! Token cursor for navigating the token stream.
//!
//! Provides lookahead, consumption, and position snapshots for
//! speculative parsing.

use jfold_ir::Span;

use crate::error::ParseError;
use crate::token::{Keyword, Punct, Token, TokenKind};

/// Saved cursor position, see [`Cursor::snapshot`].
#[derive(Copy, Clone, Debug)]
pub struct Snapshot(usize);

pub struct Cursor<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Create a cursor at the start of `tokens`, which must end with `Eof`.
    pub fn new(source: &'a str, tokens: Vec<Token>) -> Self {
        debug_assert!(
            tokens.last().is_some_and(|t| t.kind == TokenKind::Eof),
            "token stream must end with Eof"
        );
        Cursor {
            source,
            tokens,
            pos: 0,
        }
    }

    /// Current token. Past the end this stays on the final `Eof`.
    #[inline]
    pub fn current(&self) -> Token {
        self.peek_nth(0)
    }

    #[inline]
    pub fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    #[inline]
    pub fn current_span(&self) -> Span {
        self.current().span
    }

    /// Span of the most recently consumed token.
    pub fn previous_span(&self) -> Span {
        if self.pos > 0 {
            self.tokens[self.pos - 1].span
        } else {
            Span::DUMMY
        }
    }

    /// Token `n` positions ahead of the current one.
    pub fn peek_nth(&self, n: usize) -> Token {
        let last = self.tokens.len().saturating_sub(1);
        self.tokens
            .get((self.pos + n).min(last))
            .copied()
            .unwrap_or(Token::new(TokenKind::Eof, Span::DUMMY))
    }

    /// Source text of a token.
    pub fn text(&self, token: Token) -> &'a str {
        self.source.get(token.span.to_range()).unwrap_or("")
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.current_kind() == TokenKind::Eof
    }

    #[inline]
    pub fn check(&self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    #[inline]
    pub fn check_punct(&self, punct: Punct) -> bool {
        self.check(TokenKind::Punct(punct))
    }

    #[inline]
    pub fn check_keyword(&self, keyword: Keyword) -> bool {
        self.check(TokenKind::Keyword(keyword))
    }

    /// Consume and return the current token.
    pub fn advance(&mut self) -> Token {
        let token = self.current();
        if self.pos < self.tokens.len().saturating_sub(1) {
            self.pos += 1;
        }
        token
    }

    /// Consume the current token if it is `punct`.
    pub fn eat_punct(&mut self, punct: Punct) -> bool {
        if self.check_punct(punct) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub fn eat_keyword(&mut self, keyword: Keyword) -> bool {
        if self.check_keyword(keyword) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume `punct` or fail with an "expected" error.
    pub fn expect_punct(&mut self, punct: Punct) -> Result<Token, ParseError> {
        if self.check_punct(punct) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(&format!("`{}`", punct.as_str())))
        }
    }

    pub fn expect_keyword(&mut self, keyword: Keyword) -> Result<Token, ParseError> {
        if self.check_keyword(keyword) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(&format!("`{}`", keyword.as_str())))
        }
    }

    pub fn expect_ident(&mut self) -> Result<Token, ParseError> {
        if self.check(TokenKind::Ident) {
            Ok(self.advance())
        } else {
            Err(self.unexpected("identifier"))
        }
    }

    /// "expected X, found <current token>" at the current position.
    pub fn unexpected(&self, expected: &str) -> ParseError {
        let token = self.current();
        let found = match token.kind {
            TokenKind::Ident | TokenKind::Number | TokenKind::Char | TokenKind::String => {
                format!("{} `{}`", token.kind, self.text(token))
            }
            _ => token.kind.to_string(),
        };
        ParseError::UnexpectedToken {
            expected: expected.to_owned(),
            found,
            span: token.span,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot(self.pos)
    }

    /// Roll back to a snapshot taken on this cursor.
    pub fn restore(&mut self, snapshot: Snapshot) {
        debug_assert!(snapshot.0 < self.tokens.len(), "snapshot out of bounds");
        self.pos = snapshot.0;
    }
}
