//! Tokens produced by the lexer.

use std::fmt;

use jfold_ir::Span;

/// Reserved words of the Java subset.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Keyword {
    // Declarations
    Package,
    Import,
    Class,
    Interface,
    Extends,

    // Modifiers
    Public,
    Protected,
    Private,
    Abstract,
    Static,
    Final,
    Transient,
    Volatile,
    Synchronized,
    Native,
    Strictfp,

    // Primitive types
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
    Void,

    // Statements
    If,
    Else,
    While,
    Do,
    For,
    Return,
    Break,
    Continue,
    Throw,

    // Expressions
    New,
    This,
    Instanceof,
    True,
    False,
    Null,
}

impl Keyword {
    pub fn from_ident(text: &str) -> Option<Self> {
        Some(match text {
            "package" => Self::Package,
            "import" => Self::Import,
            "class" => Self::Class,
            "interface" => Self::Interface,
            "extends" => Self::Extends,
            "public" => Self::Public,
            "protected" => Self::Protected,
            "private" => Self::Private,
            "abstract" => Self::Abstract,
            "static" => Self::Static,
            "final" => Self::Final,
            "transient" => Self::Transient,
            "volatile" => Self::Volatile,
            "synchronized" => Self::Synchronized,
            "native" => Self::Native,
            "strictfp" => Self::Strictfp,
            "boolean" => Self::Boolean,
            "byte" => Self::Byte,
            "char" => Self::Char,
            "short" => Self::Short,
            "int" => Self::Int,
            "long" => Self::Long,
            "float" => Self::Float,
            "double" => Self::Double,
            "void" => Self::Void,
            "if" => Self::If,
            "else" => Self::Else,
            "while" => Self::While,
            "do" => Self::Do,
            "for" => Self::For,
            "return" => Self::Return,
            "break" => Self::Break,
            "continue" => Self::Continue,
            "throw" => Self::Throw,
            "new" => Self::New,
            "this" => Self::This,
            "instanceof" => Self::Instanceof,
            "true" => Self::True,
            "false" => Self::False,
            "null" => Self::Null,
            _ => return None,
        })
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Package => "package",
            Self::Import => "import",
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Extends => "extends",
            Self::Public => "public",
            Self::Protected => "protected",
            Self::Private => "private",
            Self::Abstract => "abstract",
            Self::Static => "static",
            Self::Final => "final",
            Self::Transient => "transient",
            Self::Volatile => "volatile",
            Self::Synchronized => "synchronized",
            Self::Native => "native",
            Self::Strictfp => "strictfp",
            Self::Boolean => "boolean",
            Self::Byte => "byte",
            Self::Char => "char",
            Self::Short => "short",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::Void => "void",
            Self::If => "if",
            Self::Else => "else",
            Self::While => "while",
            Self::Do => "do",
            Self::For => "for",
            Self::Return => "return",
            Self::Break => "break",
            Self::Continue => "continue",
            Self::Throw => "throw",
            Self::New => "new",
            Self::This => "this",
            Self::Instanceof => "instanceof",
            Self::True => "true",
            Self::False => "false",
            Self::Null => "null",
        }
    }

    pub const fn is_modifier(self) -> bool {
        matches!(
            self,
            Self::Public
                | Self::Protected
                | Self::Private
                | Self::Abstract
                | Self::Static
                | Self::Final
                | Self::Transient
                | Self::Volatile
                | Self::Synchronized
                | Self::Native
                | Self::Strictfp
        )
    }

    /// Primitive type keywords, `void` included.
    pub const fn is_primitive(self) -> bool {
        matches!(
            self,
            Self::Boolean
                | Self::Byte
                | Self::Char
                | Self::Short
                | Self::Int
                | Self::Long
                | Self::Float
                | Self::Double
                | Self::Void
        )
    }
}

/// Operators and separators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Punct {
    // Separators
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Semi,
    Comma,
    Dot,
    Ellipsis,
    Question,
    Colon,

    // Assignment
    Eq,
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,
    PercentEq,
    AmpEq,
    PipeEq,
    CaretEq,
    ShlEq,
    ShrEq,
    UshrEq,

    // Comparison
    EqEq,
    NotEq,
    Lt,
    Gt,
    LtEq,
    GtEq,

    // Arithmetic and bitwise
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Amp,
    Pipe,
    Caret,
    Shl,
    Shr,
    Ushr,
    AmpAmp,
    PipePipe,
    Bang,
    Tilde,
    PlusPlus,
    MinusMinus,
}

impl Punct {
    /// Every punctuator, longest spelling first so the lexer can take the
    /// first prefix match.
    pub const BY_LENGTH: [Punct; 47] = [
        Punct::UshrEq,
        Punct::Ushr,
        Punct::ShlEq,
        Punct::ShrEq,
        Punct::Ellipsis,
        Punct::Shl,
        Punct::Shr,
        Punct::LtEq,
        Punct::GtEq,
        Punct::EqEq,
        Punct::NotEq,
        Punct::AmpAmp,
        Punct::PipePipe,
        Punct::PlusPlus,
        Punct::MinusMinus,
        Punct::PlusEq,
        Punct::MinusEq,
        Punct::StarEq,
        Punct::SlashEq,
        Punct::PercentEq,
        Punct::AmpEq,
        Punct::PipeEq,
        Punct::CaretEq,
        Punct::LParen,
        Punct::RParen,
        Punct::LBrace,
        Punct::RBrace,
        Punct::LBracket,
        Punct::RBracket,
        Punct::Semi,
        Punct::Comma,
        Punct::Dot,
        Punct::Question,
        Punct::Colon,
        Punct::Eq,
        Punct::Lt,
        Punct::Gt,
        Punct::Plus,
        Punct::Minus,
        Punct::Star,
        Punct::Slash,
        Punct::Percent,
        Punct::Amp,
        Punct::Pipe,
        Punct::Caret,
        Punct::Bang,
        Punct::Tilde,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LParen => "(",
            Self::RParen => ")",
            Self::LBrace => "{",
            Self::RBrace => "}",
            Self::LBracket => "[",
            Self::RBracket => "]",
            Self::Semi => ";",
            Self::Comma => ",",
            Self::Dot => ".",
            Self::Ellipsis => "...",
            Self::Question => "?",
            Self::Colon => ":",
            Self::Eq => "=",
            Self::PlusEq => "+=",
            Self::MinusEq => "-=",
            Self::StarEq => "*=",
            Self::SlashEq => "/=",
            Self::PercentEq => "%=",
            Self::AmpEq => "&=",
            Self::PipeEq => "|=",
            Self::CaretEq => "^=",
            Self::ShlEq => "<<=",
            Self::ShrEq => ">>=",
            Self::UshrEq => ">>>=",
            Self::EqEq => "==",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::LtEq => "<=",
            Self::GtEq => ">=",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Percent => "%",
            Self::Amp => "&",
            Self::Pipe => "|",
            Self::Caret => "^",
            Self::Shl => "<<",
            Self::Shr => ">>",
            Self::Ushr => ">>>",
            Self::AmpAmp => "&&",
            Self::PipePipe => "||",
            Self::Bang => "!",
            Self::Tilde => "~",
            Self::PlusPlus => "++",
            Self::MinusMinus => "--",
        }
    }
}

/// Token classes. Text-carrying tokens keep only their span; the parser
/// slices the source when it needs the text.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TokenKind {
    Ident,
    Keyword(Keyword),
    Number,
    Char,
    String,
    Punct(Punct),
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Ident => f.write_str("identifier"),
            TokenKind::Keyword(kw) => write!(f, "`{}`", kw.as_str()),
            TokenKind::Number => f.write_str("number literal"),
            TokenKind::Char => f.write_str("character literal"),
            TokenKind::String => f.write_str("string literal"),
            TokenKind::Punct(p) => write!(f, "`{}`", p.as_str()),
            TokenKind::Eof => f.write_str("end of file"),
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }
}
