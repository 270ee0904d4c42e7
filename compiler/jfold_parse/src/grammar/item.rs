//! Compilation units and declarations.

use jfold_ir::{Modifiers, NodeId, NodeKind, NodeList, Span};

use crate::error::ParseError;
use crate::token::{Keyword, Punct, TokenKind};
use crate::Parser;

impl Parser<'_> {
    /// `[package Name ;] {import ...;} {TypeDeclaration}`
    pub(crate) fn parse_compilation_unit(&mut self) -> Result<NodeId, ParseError> {
        let start = self.cursor.current_span();

        let package = if self.cursor.check_keyword(Keyword::Package) {
            let package_start = self.cursor.advance().span;
            let name = self.parse_name()?;
            self.cursor.expect_punct(Punct::Semi)?;
            let span = self.span_from(package_start);
            self.alloc(NodeKind::PackageDeclaration { name }, span)?
        } else {
            NodeId::INVALID
        };

        let mut imports = NodeList::new();
        while self.cursor.check_keyword(Keyword::Import) {
            imports.push(self.parse_import()?);
        }

        let mut types = NodeList::new();
        while !self.cursor.is_at_end() {
            if self.cursor.eat_punct(Punct::Semi) {
                continue;
            }
            let type_start = self.cursor.current_span();
            let modifiers = self.parse_modifiers();
            types.push(self.parse_type_declaration(modifiers, type_start)?);
        }

        let span = self.span_from(start);
        self.alloc(
            NodeKind::CompilationUnit {
                package,
                imports,
                types,
            },
            span,
        )
    }

    /// `import [static] a.b.c [.*] ;`
    fn parse_import(&mut self) -> Result<NodeId, ParseError> {
        let start = self.cursor.expect_keyword(Keyword::Import)?.span;
        let is_static = self.cursor.eat_keyword(Keyword::Static);
        let name = self.parse_name()?;
        let on_demand = if self.cursor.check_punct(Punct::Dot)
            && self.cursor.peek_nth(1).kind == TokenKind::Punct(Punct::Star)
        {
            self.cursor.advance();
            self.cursor.advance();
            true
        } else {
            false
        };
        self.cursor.expect_punct(Punct::Semi)?;
        let span = self.span_from(start);
        self.alloc(
            NodeKind::ImportDeclaration {
                name,
                is_static,
                on_demand,
            },
            span,
        )
    }

    /// `(class | interface) Name [extends Type] { BodyDeclaration* }`,
    /// modifiers already consumed.
    fn parse_type_declaration(
        &mut self,
        modifiers: Modifiers,
        start: Span,
    ) -> Result<NodeId, ParseError> {
        let interface = if self.cursor.eat_keyword(Keyword::Interface) {
            true
        } else {
            self.cursor.expect_keyword(Keyword::Class)?;
            false
        };
        let name = self.parse_simple_name()?;
        let superclass = if self.cursor.eat_keyword(Keyword::Extends) {
            self.parse_type(false)?
        } else {
            NodeId::INVALID
        };
        if self.cursor.check(TokenKind::Ident) && self.cursor.text(self.cursor.current()) == "implements" {
            return Err(ParseError::Unsupported {
                what: "implements clause",
                span: self.cursor.current_span(),
            });
        }

        self.cursor.expect_punct(Punct::LBrace)?;
        let mut body_declarations = NodeList::new();
        while !self.cursor.check_punct(Punct::RBrace) {
            if self.cursor.is_at_end() {
                return Err(self.cursor.unexpected("`}`"));
            }
            if self.cursor.eat_punct(Punct::Semi) {
                continue;
            }
            body_declarations.push(self.parse_body_declaration()?);
        }
        self.cursor.expect_punct(Punct::RBrace)?;

        let span = self.span_from(start);
        self.alloc(
            NodeKind::TypeDeclaration {
                modifiers,
                interface,
                name,
                superclass,
                body_declarations,
            },
            span,
        )
    }

    /// A member: nested type, constructor, method or field.
    fn parse_body_declaration(&mut self) -> Result<NodeId, ParseError> {
        let start = self.cursor.current_span();
        let modifiers = self.parse_modifiers();

        if self.cursor.check_keyword(Keyword::Class) || self.cursor.check_keyword(Keyword::Interface)
        {
            return self.parse_type_declaration(modifiers, start);
        }
        if self.cursor.check_punct(Punct::LBrace) {
            return Err(ParseError::Unsupported {
                what: "initializer block",
                span: self.cursor.current_span(),
            });
        }

        // Constructor: `Name (`
        if self.cursor.check(TokenKind::Ident)
            && self.cursor.peek_nth(1).kind == TokenKind::Punct(Punct::LParen)
        {
            let name = self.parse_simple_name()?;
            return self.parse_method_rest(modifiers, true, NodeId::INVALID, name, start);
        }

        let ty = self.parse_type(true)?;
        if self.cursor.peek_nth(1).kind == TokenKind::Punct(Punct::LParen) {
            let name = self.parse_simple_name()?;
            return self.parse_method_rest(modifiers, false, ty, name, start);
        }

        let fragments = self.parse_fragments()?;
        self.cursor.expect_punct(Punct::Semi)?;
        let span = self.span_from(start);
        self.alloc(
            NodeKind::FieldDeclaration {
                modifiers,
                ty,
                fragments,
            },
            span,
        )
    }

    /// Parameters and body of a method or constructor whose name has
    /// been parsed.
    fn parse_method_rest(
        &mut self,
        modifiers: Modifiers,
        constructor: bool,
        return_type: NodeId,
        name: NodeId,
        start: Span,
    ) -> Result<NodeId, ParseError> {
        self.cursor.expect_punct(Punct::LParen)?;
        let mut parameters = NodeList::new();
        if !self.cursor.check_punct(Punct::RParen) {
            loop {
                parameters.push(self.parse_parameter()?);
                if !self.cursor.eat_punct(Punct::Comma) {
                    break;
                }
            }
        }
        self.cursor.expect_punct(Punct::RParen)?;
        if self.cursor.check(TokenKind::Ident) && self.cursor.text(self.cursor.current()) == "throws" {
            return Err(ParseError::Unsupported {
                what: "throws clause",
                span: self.cursor.current_span(),
            });
        }

        let body = if self.cursor.eat_punct(Punct::Semi) {
            NodeId::INVALID
        } else {
            self.parse_block()?
        };

        let span = self.span_from(start);
        self.alloc(
            NodeKind::MethodDeclaration {
                modifiers,
                constructor,
                return_type,
                name,
                parameters,
                body,
            },
            span,
        )
    }

    /// `[final] Type [...] name`
    fn parse_parameter(&mut self) -> Result<NodeId, ParseError> {
        let start = self.cursor.current_span();
        let modifiers = self.parse_modifiers();
        let ty = self.parse_type(false)?;
        let varargs = self.cursor.eat_punct(Punct::Ellipsis);
        let name = self.parse_simple_name()?;
        let span = self.span_from(start);
        self.alloc(
            NodeKind::SingleVariableDeclaration {
                modifiers,
                ty,
                varargs,
                name,
            },
            span,
        )
    }

    /// `name [= initializer] {, name [= initializer]}`
    pub(crate) fn parse_fragments(&mut self) -> Result<NodeList, ParseError> {
        let mut fragments = NodeList::new();
        loop {
            let start = self.cursor.current_span();
            let name = self.parse_simple_name()?;
            let initializer = if self.cursor.eat_punct(Punct::Eq) {
                if self.cursor.check_punct(Punct::LBrace) {
                    return Err(ParseError::Unsupported {
                        what: "array initializer",
                        span: self.cursor.current_span(),
                    });
                }
                self.parse_expression()?
            } else {
                NodeId::INVALID
            };
            let span = self.span_from(start);
            fragments.push(self.alloc(
                NodeKind::VariableDeclarationFragment { name, initializer },
                span,
            )?);
            if !self.cursor.eat_punct(Punct::Comma) {
                return Ok(fragments);
            }
        }
    }
}
