//! Java operators and primitive type keywords.

/// Binary operators of an `InfixExpression`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum InfixOperator {
    // Multiplicative
    Times,
    Divide,
    Remainder,

    // Additive
    Plus,
    Minus,

    // Shift
    LeftShift,
    RightShiftSigned,
    RightShiftUnsigned,

    // Relational
    Less,
    Greater,
    LessEquals,
    GreaterEquals,

    // Equality
    Equals,
    NotEquals,

    // Bitwise
    And,
    Xor,
    Or,

    // Logical
    ConditionalAnd,
    ConditionalOr,
}

impl InfixOperator {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Times => "*",
            Self::Divide => "/",
            Self::Remainder => "%",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::LeftShift => "<<",
            Self::RightShiftSigned => ">>",
            Self::RightShiftUnsigned => ">>>",
            Self::Less => "<",
            Self::Greater => ">",
            Self::LessEquals => "<=",
            Self::GreaterEquals => ">=",
            Self::Equals => "==",
            Self::NotEquals => "!=",
            Self::And => "&",
            Self::Xor => "^",
            Self::Or => "|",
            Self::ConditionalAnd => "&&",
            Self::ConditionalOr => "||",
        }
    }

    /// Binding power, higher binds tighter. All infix operators are
    /// left-associative.
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Times | Self::Divide | Self::Remainder => 10,
            Self::Plus | Self::Minus => 9,
            Self::LeftShift | Self::RightShiftSigned | Self::RightShiftUnsigned => 8,
            Self::Less | Self::Greater | Self::LessEquals | Self::GreaterEquals => 7,
            Self::Equals | Self::NotEquals => 6,
            Self::And => 5,
            Self::Xor => 4,
            Self::Or => 3,
            Self::ConditionalAnd => 2,
            Self::ConditionalOr => 1,
        }
    }
}

/// Unary operators written before the operand.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum PrefixOperator {
    Increment,
    Decrement,
    Plus,
    Minus,
    Complement,
    Not,
}

impl PrefixOperator {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Increment => "++",
            Self::Decrement => "--",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Complement => "~",
            Self::Not => "!",
        }
    }
}

/// Unary operators written after the operand.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum PostfixOperator {
    Increment,
    Decrement,
}

impl PostfixOperator {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Increment => "++",
            Self::Decrement => "--",
        }
    }
}

/// Plain and compound assignment operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum AssignmentOperator {
    Assign,
    PlusAssign,
    MinusAssign,
    TimesAssign,
    DivideAssign,
    RemainderAssign,
    BitAndAssign,
    BitOrAssign,
    BitXorAssign,
    LeftShiftAssign,
    RightShiftSignedAssign,
    RightShiftUnsignedAssign,
}

impl AssignmentOperator {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Assign => "=",
            Self::PlusAssign => "+=",
            Self::MinusAssign => "-=",
            Self::TimesAssign => "*=",
            Self::DivideAssign => "/=",
            Self::RemainderAssign => "%=",
            Self::BitAndAssign => "&=",
            Self::BitOrAssign => "|=",
            Self::BitXorAssign => "^=",
            Self::LeftShiftAssign => "<<=",
            Self::RightShiftSignedAssign => ">>=",
            Self::RightShiftUnsignedAssign => ">>>=",
        }
    }
}

/// Keyword of a `PrimitiveType` node.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum PrimitiveKind {
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
    Void,
}

impl PrimitiveKind {
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Byte => "byte",
            Self::Char => "char",
            Self::Short => "short",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::Void => "void",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Some(match keyword {
            "boolean" => Self::Boolean,
            "byte" => Self::Byte,
            "char" => Self::Char,
            "short" => Self::Short,
            "int" => Self::Int,
            "long" => Self::Long,
            "float" => Self::Float,
            "double" => Self::Double,
            "void" => Self::Void,
            _ => return None,
        })
    }
}

bitflags::bitflags! {
    /// Declaration modifiers, in canonical Java order.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct Modifiers: u16 {
        const PUBLIC = 1 << 0;
        const PROTECTED = 1 << 1;
        const PRIVATE = 1 << 2;
        const ABSTRACT = 1 << 3;
        const STATIC = 1 << 4;
        const FINAL = 1 << 5;
        const TRANSIENT = 1 << 6;
        const VOLATILE = 1 << 7;
        const SYNCHRONIZED = 1 << 8;
        const NATIVE = 1 << 9;
        const STRICTFP = 1 << 10;
    }
}

impl Modifiers {
    const KEYWORDS: [(Modifiers, &'static str); 11] = [
        (Modifiers::PUBLIC, "public"),
        (Modifiers::PROTECTED, "protected"),
        (Modifiers::PRIVATE, "private"),
        (Modifiers::ABSTRACT, "abstract"),
        (Modifiers::STATIC, "static"),
        (Modifiers::FINAL, "final"),
        (Modifiers::TRANSIENT, "transient"),
        (Modifiers::VOLATILE, "volatile"),
        (Modifiers::SYNCHRONIZED, "synchronized"),
        (Modifiers::NATIVE, "native"),
        (Modifiers::STRICTFP, "strictfp"),
    ];

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::KEYWORDS
            .iter()
            .find(|(_, kw)| *kw == keyword)
            .map(|(flag, _)| *flag)
    }

    /// Keywords of the set flags, in canonical order.
    pub fn keywords(self) -> impl Iterator<Item = &'static str> {
        Self::KEYWORDS
            .into_iter()
            .filter(move |(flag, _)| self.contains(*flag))
            .map(|(_, kw)| kw)
    }
}
