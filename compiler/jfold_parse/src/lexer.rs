//! Byte-oriented lexer.
//!
//! Whitespace and comments are skipped. Literal tokens keep their source
//! text untouched (escapes, prefixes and suffixes included); the parser
//! interns the slice so rendering reproduces the literal exactly.

use jfold_ir::Span;

use crate::error::ParseError;
use crate::token::{Keyword, Punct, Token, TokenKind};

/// Tokenize `source`. The returned list always ends with an `Eof` token.
pub fn tokenize(source: &str) -> Result<Vec<Token>, ParseError> {
    if u32::try_from(source.len()).is_err() {
        return Err(ParseError::SourceTooLarge { len: source.len() });
    }
    let mut lexer = Lexer {
        source,
        bytes: source.as_bytes(),
        pos: 0,
    };
    let mut tokens = Vec::with_capacity(source.len() / 4 + 1);
    loop {
        let token = lexer.next_token()?;
        let done = token.kind == TokenKind::Eof;
        tokens.push(token);
        if done {
            return Ok(tokens);
        }
    }
}

struct Lexer<'a> {
    source: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

/// Span from byte offsets already known to fit in `u32`.
fn span(start: usize, end: usize) -> Span {
    let clamp = |offset: usize| u32::try_from(offset).unwrap_or(u32::MAX);
    Span::new(clamp(start), clamp(end))
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b == b'$'
}

fn is_ident_continue(b: u8) -> bool {
    is_ident_start(b) || b.is_ascii_digit()
}

impl Lexer<'_> {
    #[inline]
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    #[inline]
    fn peek_at(&self, ahead: usize) -> Option<u8> {
        self.bytes.get(self.pos + ahead).copied()
    }

    fn next_token(&mut self) -> Result<Token, ParseError> {
        self.skip_trivia()?;
        let start = self.pos;
        let Some(b) = self.peek() else {
            return Ok(Token::new(TokenKind::Eof, span(start, start)));
        };

        let kind = if is_ident_start(b) || b >= 0x80 {
            self.ident_or_keyword(start)?
        } else if b.is_ascii_digit() || (b == b'.' && self.peek_at(1).is_some_and(|n| n.is_ascii_digit())) {
            self.number();
            TokenKind::Number
        } else if b == b'\'' {
            self.quoted(b'\'', "character")?;
            TokenKind::Char
        } else if b == b'"' {
            self.quoted(b'"', "string")?;
            TokenKind::String
        } else {
            self.punct(start)?
        };
        Ok(Token::new(kind, span(start, self.pos)))
    }

    fn skip_trivia(&mut self) -> Result<(), ParseError> {
        loop {
            match (self.peek(), self.peek_at(1)) {
                (Some(b' ' | b'\t' | b'\n' | b'\r' | b'\x0c'), _) => self.pos += 1,
                (Some(b'/'), Some(b'/')) => {
                    while self.peek().is_some_and(|b| b != b'\n') {
                        self.pos += 1;
                    }
                }
                (Some(b'/'), Some(b'*')) => {
                    let start = self.pos;
                    self.pos += 2;
                    loop {
                        match (self.peek(), self.peek_at(1)) {
                            (Some(b'*'), Some(b'/')) => {
                                self.pos += 2;
                                break;
                            }
                            (Some(_), _) => self.pos += 1,
                            (None, _) => {
                                return Err(ParseError::UnterminatedComment {
                                    span: span(start, self.pos),
                                });
                            }
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn ident_or_keyword(&mut self, start: usize) -> Result<TokenKind, ParseError> {
        while let Some(b) = self.peek() {
            if is_ident_continue(b) {
                self.pos += 1;
            } else if b >= 0x80 {
                let ch = self.source[self.pos..].chars().next().unwrap_or('\u{fffd}');
                if !ch.is_alphanumeric() {
                    break;
                }
                self.pos += ch.len_utf8();
            } else {
                break;
            }
        }
        if self.pos == start {
            // A non-ASCII byte that is not a letter.
            let ch = self.source[start..].chars().next().unwrap_or('\u{fffd}');
            return Err(ParseError::UnexpectedCharacter {
                ch,
                span: span(start, start + ch.len_utf8()),
            });
        }
        let text = &self.source[start..self.pos];
        Ok(Keyword::from_ident(text).map_or(TokenKind::Ident, TokenKind::Keyword))
    }

    fn eat_digits(&mut self, accept: fn(u8) -> bool) {
        while self.peek().is_some_and(|b| accept(b) || b == b'_') {
            self.pos += 1;
        }
    }

    fn number(&mut self) {
        let radix_prefix = self.peek() == Some(b'0')
            && matches!(self.peek_at(1), Some(b'x' | b'X' | b'b' | b'B'));
        if radix_prefix {
            let binary = matches!(self.peek_at(1), Some(b'b' | b'B'));
            self.pos += 2;
            if binary {
                self.eat_digits(|b| b == b'0' || b == b'1');
            } else {
                self.eat_digits(|b| b.is_ascii_hexdigit());
            }
            if matches!(self.peek(), Some(b'l' | b'L')) {
                self.pos += 1;
            }
            return;
        }

        self.eat_digits(|b| b.is_ascii_digit());
        if self.peek() == Some(b'.') {
            let after = self.peek_at(1);
            let fraction = after.is_some_and(|b| b.is_ascii_digit())
                || !after.is_some_and(|b| is_ident_start(b) || b == b'.')
                || matches!(after, Some(b'e' | b'E' | b'f' | b'F' | b'd' | b'D'));
            if fraction {
                self.pos += 1;
                self.eat_digits(|b| b.is_ascii_digit());
            }
        }
        if matches!(self.peek(), Some(b'e' | b'E')) {
            let sign = usize::from(matches!(self.peek_at(1), Some(b'+' | b'-')));
            if self.peek_at(1 + sign).is_some_and(|b| b.is_ascii_digit()) {
                self.pos += 1 + sign;
                self.eat_digits(|b| b.is_ascii_digit());
            }
        }
        if matches!(self.peek(), Some(b'l' | b'L' | b'f' | b'F' | b'd' | b'D')) {
            self.pos += 1;
        }
    }

    /// Consume a quoted literal, escapes included, up to the closing quote.
    fn quoted(&mut self, quote: u8, what: &'static str) -> Result<(), ParseError> {
        let start = self.pos;
        self.pos += 1;
        loop {
            match self.peek() {
                Some(b'\\') => {
                    self.pos += 1;
                    if self.peek().is_some_and(|b| b != b'\n') {
                        self.pos += 1;
                    }
                }
                Some(b) if b == quote => {
                    self.pos += 1;
                    return Ok(());
                }
                Some(b'\n') | None => {
                    return Err(ParseError::UnterminatedLiteral {
                        what,
                        span: span(start, self.pos),
                    });
                }
                Some(_) => self.pos += 1,
            }
        }
    }

    fn punct(&mut self, start: usize) -> Result<TokenKind, ParseError> {
        let rest = &self.bytes[self.pos..];
        for punct in Punct::BY_LENGTH {
            let spelling = punct.as_str().as_bytes();
            if rest.starts_with(spelling) {
                self.pos += spelling.len();
                return Ok(TokenKind::Punct(punct));
            }
        }
        let ch = self.source[start..].chars().next().unwrap_or('\u{fffd}');
        Err(ParseError::UnexpectedCharacter {
            ch,
            span: span(start, start + ch.len_utf8()),
        })
    }
}
