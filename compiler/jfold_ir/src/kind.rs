//! Node kinds of the Java subset.
//!
//! [`NodeKind`] is a closed sum type: every structural child is a
//! [`NodeId`] (single slot, `NodeId::INVALID` when an optional slot is
//! empty) or a [`NodeList`] (list slot). Non-child attributes such as
//! operators, modifiers and interned tokens live inline.
//!
//! The child positions of each kind are declared once, in the slot
//! tables at the bottom of this file. Traversal, mutation and matching
//! all go through those tables, so adding a kind means adding its
//! variant, its tag and its table rows.

use smallvec::SmallVec;
use std::fmt;

use crate::interner::Name;
use crate::location::Property;
use crate::node_id::NodeId;
use crate::operators::{
    AssignmentOperator, InfixOperator, Modifiers, PostfixOperator, PrefixOperator, PrimitiveKind,
};

/// Ordered children of a list slot.
pub type NodeList = SmallVec<[NodeId; 4]>;

/// A node's kind together with its children and attributes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    // Declarations
    CompilationUnit {
        package: NodeId,
        imports: NodeList,
        types: NodeList,
    },
    PackageDeclaration {
        name: NodeId,
    },
    ImportDeclaration {
        name: NodeId,
        is_static: bool,
        on_demand: bool,
    },
    TypeDeclaration {
        modifiers: Modifiers,
        interface: bool,
        name: NodeId,
        superclass: NodeId,
        body_declarations: NodeList,
    },
    FieldDeclaration {
        modifiers: Modifiers,
        ty: NodeId,
        fragments: NodeList,
    },
    MethodDeclaration {
        modifiers: Modifiers,
        constructor: bool,
        return_type: NodeId,
        name: NodeId,
        parameters: NodeList,
        body: NodeId,
    },
    SingleVariableDeclaration {
        modifiers: Modifiers,
        ty: NodeId,
        varargs: bool,
        name: NodeId,
    },
    VariableDeclarationFragment {
        name: NodeId,
        initializer: NodeId,
    },

    // Statements
    Block {
        statements: NodeList,
    },
    EmptyStatement,
    ExpressionStatement {
        expression: NodeId,
    },
    VariableDeclarationStatement {
        modifiers: Modifiers,
        ty: NodeId,
        fragments: NodeList,
    },
    IfStatement {
        expression: NodeId,
        then_statement: NodeId,
        else_statement: NodeId,
    },
    WhileStatement {
        expression: NodeId,
        body: NodeId,
    },
    DoStatement {
        body: NodeId,
        expression: NodeId,
    },
    ForStatement {
        initializers: NodeList,
        expression: NodeId,
        updaters: NodeList,
        body: NodeId,
    },
    ReturnStatement {
        expression: NodeId,
    },
    BreakStatement,
    ContinueStatement,
    ThrowStatement {
        expression: NodeId,
    },

    // Expressions
    ParenthesizedExpression {
        expression: NodeId,
    },
    InfixExpression {
        operator: InfixOperator,
        left_operand: NodeId,
        right_operand: NodeId,
    },
    PrefixExpression {
        operator: PrefixOperator,
        operand: NodeId,
    },
    PostfixExpression {
        operator: PostfixOperator,
        operand: NodeId,
    },
    Assignment {
        operator: AssignmentOperator,
        left_hand_side: NodeId,
        right_hand_side: NodeId,
    },
    ConditionalExpression {
        expression: NodeId,
        then_expression: NodeId,
        else_expression: NodeId,
    },
    MethodInvocation {
        expression: NodeId,
        name: NodeId,
        arguments: NodeList,
    },
    FieldAccess {
        expression: NodeId,
        name: NodeId,
    },
    ArrayAccess {
        array: NodeId,
        index: NodeId,
    },
    ClassInstanceCreation {
        ty: NodeId,
        arguments: NodeList,
    },
    CastExpression {
        ty: NodeId,
        expression: NodeId,
    },
    InstanceofExpression {
        left_operand: NodeId,
        right_operand: NodeId,
    },
    ThisExpression,
    SimpleName {
        identifier: Name,
    },
    QualifiedName {
        qualifier: NodeId,
        name: NodeId,
    },

    // Literals
    BooleanLiteral {
        value: bool,
    },
    /// Source token including quotes and escapes, e.g. `'\n'`.
    CharacterLiteral {
        escaped: Name,
    },
    NullLiteral,
    /// Source token including quotes and escapes.
    StringLiteral {
        escaped: Name,
    },
    /// Source token, e.g. `0x1F`, `10L`, `1.5e3`.
    NumberLiteral {
        token: Name,
    },
    /// `T.class`
    TypeLiteral {
        ty: NodeId,
    },

    // Types
    PrimitiveType {
        primitive: PrimitiveKind,
    },
    SimpleType {
        name: NodeId,
    },
    ArrayType {
        component_type: NodeId,
    },
}

/// Fieldless mirror of [`NodeKind`] for cheap kind checks and logging.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum NodeTag {
    CompilationUnit,
    PackageDeclaration,
    ImportDeclaration,
    TypeDeclaration,
    FieldDeclaration,
    MethodDeclaration,
    SingleVariableDeclaration,
    VariableDeclarationFragment,
    Block,
    EmptyStatement,
    ExpressionStatement,
    VariableDeclarationStatement,
    IfStatement,
    WhileStatement,
    DoStatement,
    ForStatement,
    ReturnStatement,
    BreakStatement,
    ContinueStatement,
    ThrowStatement,
    ParenthesizedExpression,
    InfixExpression,
    PrefixExpression,
    PostfixExpression,
    Assignment,
    ConditionalExpression,
    MethodInvocation,
    FieldAccess,
    ArrayAccess,
    ClassInstanceCreation,
    CastExpression,
    InstanceofExpression,
    ThisExpression,
    SimpleName,
    QualifiedName,
    BooleanLiteral,
    CharacterLiteral,
    NullLiteral,
    StringLiteral,
    NumberLiteral,
    TypeLiteral,
    PrimitiveType,
    SimpleType,
    ArrayType,
}

impl NodeTag {
    /// The six literal kinds that stand for a value on their own.
    pub const fn is_literal(self) -> bool {
        matches!(
            self,
            Self::BooleanLiteral
                | Self::CharacterLiteral
                | Self::NullLiteral
                | Self::StringLiteral
                | Self::TypeLiteral
                | Self::NumberLiteral
        )
    }

    pub const fn is_statement(self) -> bool {
        matches!(
            self,
            Self::Block
                | Self::EmptyStatement
                | Self::ExpressionStatement
                | Self::VariableDeclarationStatement
                | Self::IfStatement
                | Self::WhileStatement
                | Self::DoStatement
                | Self::ForStatement
                | Self::ReturnStatement
                | Self::BreakStatement
                | Self::ContinueStatement
                | Self::ThrowStatement
        )
    }
}

impl fmt::Display for NodeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl NodeKind {
    pub fn tag(&self) -> NodeTag {
        match self {
            Self::CompilationUnit { .. } => NodeTag::CompilationUnit,
            Self::PackageDeclaration { .. } => NodeTag::PackageDeclaration,
            Self::ImportDeclaration { .. } => NodeTag::ImportDeclaration,
            Self::TypeDeclaration { .. } => NodeTag::TypeDeclaration,
            Self::FieldDeclaration { .. } => NodeTag::FieldDeclaration,
            Self::MethodDeclaration { .. } => NodeTag::MethodDeclaration,
            Self::SingleVariableDeclaration { .. } => NodeTag::SingleVariableDeclaration,
            Self::VariableDeclarationFragment { .. } => NodeTag::VariableDeclarationFragment,
            Self::Block { .. } => NodeTag::Block,
            Self::EmptyStatement => NodeTag::EmptyStatement,
            Self::ExpressionStatement { .. } => NodeTag::ExpressionStatement,
            Self::VariableDeclarationStatement { .. } => NodeTag::VariableDeclarationStatement,
            Self::IfStatement { .. } => NodeTag::IfStatement,
            Self::WhileStatement { .. } => NodeTag::WhileStatement,
            Self::DoStatement { .. } => NodeTag::DoStatement,
            Self::ForStatement { .. } => NodeTag::ForStatement,
            Self::ReturnStatement { .. } => NodeTag::ReturnStatement,
            Self::BreakStatement => NodeTag::BreakStatement,
            Self::ContinueStatement => NodeTag::ContinueStatement,
            Self::ThrowStatement { .. } => NodeTag::ThrowStatement,
            Self::ParenthesizedExpression { .. } => NodeTag::ParenthesizedExpression,
            Self::InfixExpression { .. } => NodeTag::InfixExpression,
            Self::PrefixExpression { .. } => NodeTag::PrefixExpression,
            Self::PostfixExpression { .. } => NodeTag::PostfixExpression,
            Self::Assignment { .. } => NodeTag::Assignment,
            Self::ConditionalExpression { .. } => NodeTag::ConditionalExpression,
            Self::MethodInvocation { .. } => NodeTag::MethodInvocation,
            Self::FieldAccess { .. } => NodeTag::FieldAccess,
            Self::ArrayAccess { .. } => NodeTag::ArrayAccess,
            Self::ClassInstanceCreation { .. } => NodeTag::ClassInstanceCreation,
            Self::CastExpression { .. } => NodeTag::CastExpression,
            Self::InstanceofExpression { .. } => NodeTag::InstanceofExpression,
            Self::ThisExpression => NodeTag::ThisExpression,
            Self::SimpleName { .. } => NodeTag::SimpleName,
            Self::QualifiedName { .. } => NodeTag::QualifiedName,
            Self::BooleanLiteral { .. } => NodeTag::BooleanLiteral,
            Self::CharacterLiteral { .. } => NodeTag::CharacterLiteral,
            Self::NullLiteral => NodeTag::NullLiteral,
            Self::StringLiteral { .. } => NodeTag::StringLiteral,
            Self::NumberLiteral { .. } => NodeTag::NumberLiteral,
            Self::TypeLiteral { .. } => NodeTag::TypeLiteral,
            Self::PrimitiveType { .. } => NodeTag::PrimitiveType,
            Self::SimpleType { .. } => NodeTag::SimpleType,
            Self::ArrayType { .. } => NodeTag::ArrayType,
        }
    }

    /// Structural properties in source order.
    pub fn properties(&self) -> &'static [Property] {
        use Property as P;
        match self {
            Self::CompilationUnit { .. } => &[P::Package, P::Imports, P::Types],
            Self::PackageDeclaration { .. }
            | Self::ImportDeclaration { .. }
            | Self::SimpleType { .. } => &[P::Name],
            Self::TypeDeclaration { .. } => &[P::Name, P::Superclass, P::BodyDeclarations],
            Self::FieldDeclaration { .. } | Self::VariableDeclarationStatement { .. } => {
                &[P::Type, P::Fragments]
            }
            Self::MethodDeclaration { .. } => &[P::ReturnType, P::Name, P::Parameters, P::Body],
            Self::SingleVariableDeclaration { .. } => &[P::Type, P::Name],
            Self::VariableDeclarationFragment { .. } => &[P::Name, P::Initializer],
            Self::Block { .. } => &[P::Statements],
            Self::ExpressionStatement { .. }
            | Self::ReturnStatement { .. }
            | Self::ThrowStatement { .. }
            | Self::ParenthesizedExpression { .. } => &[P::Expression],
            Self::IfStatement { .. } => &[P::Expression, P::ThenStatement, P::ElseStatement],
            Self::WhileStatement { .. } => &[P::Expression, P::Body],
            Self::DoStatement { .. } => &[P::Body, P::Expression],
            Self::ForStatement { .. } => &[P::Initializers, P::Expression, P::Updaters, P::Body],
            Self::InfixExpression { .. } | Self::InstanceofExpression { .. } => {
                &[P::LeftOperand, P::RightOperand]
            }
            Self::PrefixExpression { .. } | Self::PostfixExpression { .. } => &[P::Operand],
            Self::Assignment { .. } => &[P::LeftHandSide, P::RightHandSide],
            Self::ConditionalExpression { .. } => {
                &[P::Expression, P::ThenExpression, P::ElseExpression]
            }
            Self::MethodInvocation { .. } => &[P::Expression, P::Name, P::Arguments],
            Self::FieldAccess { .. } => &[P::Expression, P::Name],
            Self::ArrayAccess { .. } => &[P::Array, P::Index],
            Self::ClassInstanceCreation { .. } => &[P::Type, P::Arguments],
            Self::CastExpression { .. } => &[P::Type, P::Expression],
            Self::QualifiedName { .. } => &[P::Qualifier, P::Name],
            Self::TypeLiteral { .. } => &[P::Type],
            Self::ArrayType { .. } => &[P::ComponentType],
            Self::EmptyStatement
            | Self::BreakStatement
            | Self::ContinueStatement
            | Self::ThisExpression
            | Self::SimpleName { .. }
            | Self::BooleanLiteral { .. }
            | Self::CharacterLiteral { .. }
            | Self::NullLiteral
            | Self::StringLiteral { .. }
            | Self::NumberLiteral { .. }
            | Self::PrimitiveType { .. } => &[],
        }
    }

    /// Child in a single slot. `None` if this kind has no such single
    /// slot; `Some(NodeId::INVALID)` if the slot exists but is empty.
    pub fn slot(&self, property: Property) -> Option<NodeId> {
        single_slot(self, property).copied()
    }

    pub fn slot_mut(&mut self, property: Property) -> Option<&mut NodeId> {
        single_slot_mut(self, property)
    }

    /// Children of a list slot, `None` if this kind has no such list slot.
    pub fn list(&self, property: Property) -> Option<&NodeList> {
        list_slot(self, property)
    }

    pub fn list_mut(&mut self, property: Property) -> Option<&mut NodeList> {
        list_slot_mut(self, property)
    }

    /// Whether a single slot may be left empty.
    pub fn is_optional(&self, property: Property) -> bool {
        use Property as P;
        matches!(
            (self, property),
            (Self::CompilationUnit { .. }, P::Package)
                | (Self::TypeDeclaration { .. }, P::Superclass)
                | (Self::MethodDeclaration { .. }, P::ReturnType | P::Body)
                | (Self::VariableDeclarationFragment { .. }, P::Initializer)
                | (Self::IfStatement { .. }, P::ElseStatement)
                | (Self::ForStatement { .. }, P::Expression)
                | (Self::ReturnStatement { .. }, P::Expression)
                | (Self::MethodInvocation { .. }, P::Expression)
        )
    }
}

macro_rules! slot_table {
    (
        single { $($sv:ident . $sf:ident => $sp:ident),* $(,)? }
        list { $($lv:ident . $lf:ident => $lp:ident),* $(,)? }
    ) => {
        fn single_slot(kind: &NodeKind, property: Property) -> Option<&NodeId> {
            match (kind, property) {
                $((NodeKind::$sv { $sf, .. }, Property::$sp) => Some($sf),)*
                _ => None,
            }
        }

        fn single_slot_mut(kind: &mut NodeKind, property: Property) -> Option<&mut NodeId> {
            match (kind, property) {
                $((NodeKind::$sv { $sf, .. }, Property::$sp) => Some($sf),)*
                _ => None,
            }
        }

        fn list_slot(kind: &NodeKind, property: Property) -> Option<&NodeList> {
            match (kind, property) {
                $((NodeKind::$lv { $lf, .. }, Property::$lp) => Some($lf),)*
                _ => None,
            }
        }

        fn list_slot_mut(kind: &mut NodeKind, property: Property) -> Option<&mut NodeList> {
            match (kind, property) {
                $((NodeKind::$lv { $lf, .. }, Property::$lp) => Some($lf),)*
                _ => None,
            }
        }
    };
}

slot_table! {
    single {
        CompilationUnit.package => Package,
        PackageDeclaration.name => Name,
        ImportDeclaration.name => Name,
        TypeDeclaration.name => Name,
        TypeDeclaration.superclass => Superclass,
        FieldDeclaration.ty => Type,
        MethodDeclaration.return_type => ReturnType,
        MethodDeclaration.name => Name,
        MethodDeclaration.body => Body,
        SingleVariableDeclaration.ty => Type,
        SingleVariableDeclaration.name => Name,
        VariableDeclarationFragment.name => Name,
        VariableDeclarationFragment.initializer => Initializer,
        ExpressionStatement.expression => Expression,
        VariableDeclarationStatement.ty => Type,
        IfStatement.expression => Expression,
        IfStatement.then_statement => ThenStatement,
        IfStatement.else_statement => ElseStatement,
        WhileStatement.expression => Expression,
        WhileStatement.body => Body,
        DoStatement.body => Body,
        DoStatement.expression => Expression,
        ForStatement.expression => Expression,
        ForStatement.body => Body,
        ReturnStatement.expression => Expression,
        ThrowStatement.expression => Expression,
        ParenthesizedExpression.expression => Expression,
        InfixExpression.left_operand => LeftOperand,
        InfixExpression.right_operand => RightOperand,
        PrefixExpression.operand => Operand,
        PostfixExpression.operand => Operand,
        Assignment.left_hand_side => LeftHandSide,
        Assignment.right_hand_side => RightHandSide,
        ConditionalExpression.expression => Expression,
        ConditionalExpression.then_expression => ThenExpression,
        ConditionalExpression.else_expression => ElseExpression,
        MethodInvocation.expression => Expression,
        MethodInvocation.name => Name,
        FieldAccess.expression => Expression,
        FieldAccess.name => Name,
        ArrayAccess.array => Array,
        ArrayAccess.index => Index,
        ClassInstanceCreation.ty => Type,
        CastExpression.ty => Type,
        CastExpression.expression => Expression,
        InstanceofExpression.left_operand => LeftOperand,
        InstanceofExpression.right_operand => RightOperand,
        QualifiedName.qualifier => Qualifier,
        QualifiedName.name => Name,
        TypeLiteral.ty => Type,
        SimpleType.name => Name,
        ArrayType.component_type => ComponentType,
    }
    list {
        CompilationUnit.imports => Imports,
        CompilationUnit.types => Types,
        TypeDeclaration.body_declarations => BodyDeclarations,
        FieldDeclaration.fragments => Fragments,
        MethodDeclaration.parameters => Parameters,
        VariableDeclarationStatement.fragments => Fragments,
        Block.statements => Statements,
        ForStatement.initializers => Initializers,
        ForStatement.updaters => Updaters,
        MethodInvocation.arguments => Arguments,
        ClassInstanceCreation.arguments => Arguments,
    }
}
