//! Structural properties and locations.
//!
//! A [`Property`] names one child position of a node kind, the way
//! "the expression of a parenthesized expression" or "the statements of
//! a block" do. A [`Location`] is how a particular node is attached to
//! its parent: a single slot, or an index into a list slot. Locations
//! are computed when a node is attached and consulted by the mutation
//! primitives, which dispatch on the tag.

use std::fmt;

/// Child positions of the node kinds.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Property {
    // Single slots
    Package,
    Name,
    Superclass,
    Type,
    ReturnType,
    Body,
    Initializer,
    Expression,
    ThenStatement,
    ElseStatement,
    LeftOperand,
    RightOperand,
    Operand,
    LeftHandSide,
    RightHandSide,
    ThenExpression,
    ElseExpression,
    Array,
    Index,
    Qualifier,
    ComponentType,

    // List slots
    Imports,
    Types,
    BodyDeclarations,
    Fragments,
    Parameters,
    Statements,
    Initializers,
    Updaters,
    Arguments,
}

impl Property {
    /// Whether the property holds an ordered list of children.
    pub const fn is_list(self) -> bool {
        matches!(
            self,
            Self::Imports
                | Self::Types
                | Self::BodyDeclarations
                | Self::Fragments
                | Self::Parameters
                | Self::Statements
                | Self::Initializers
                | Self::Updaters
                | Self::Arguments
        )
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Package => "package",
            Self::Name => "name",
            Self::Superclass => "superclass",
            Self::Type => "type",
            Self::ReturnType => "returnType",
            Self::Body => "body",
            Self::Initializer => "initializer",
            Self::Expression => "expression",
            Self::ThenStatement => "thenStatement",
            Self::ElseStatement => "elseStatement",
            Self::LeftOperand => "leftOperand",
            Self::RightOperand => "rightOperand",
            Self::Operand => "operand",
            Self::LeftHandSide => "leftHandSide",
            Self::RightHandSide => "rightHandSide",
            Self::ThenExpression => "thenExpression",
            Self::ElseExpression => "elseExpression",
            Self::Array => "array",
            Self::Index => "index",
            Self::Qualifier => "qualifier",
            Self::ComponentType => "componentType",
            Self::Imports => "imports",
            Self::Types => "types",
            Self::BodyDeclarations => "bodyDeclarations",
            Self::Fragments => "fragments",
            Self::Parameters => "parameters",
            Self::Statements => "statements",
            Self::Initializers => "initializers",
            Self::Updaters => "updaters",
            Self::Arguments => "arguments",
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a node sits in its parent.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Location {
    /// The node occupies one fixed position.
    Single(Property),
    /// The node is element `index` of an ordered list.
    List(Property, u32),
}

impl Location {
    #[inline]
    pub const fn property(self) -> Property {
        match self {
            Location::Single(property) | Location::List(property, _) => property,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Single(property) => write!(f, "{property}"),
            Location::List(property, index) => write!(f, "{property}[{index}]"),
        }
    }
}
