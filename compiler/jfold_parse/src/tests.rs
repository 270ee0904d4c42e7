#![allow(
    clippy::unwrap_used,
    reason = "test code uses unwrap for concise assertions"
)]

use pretty_assertions::assert_eq;

use jfold_ir::visit::descendants;
use jfold_ir::{
    Ast, InfixOperator, Modifiers, NodeId, NodeKind, NodeTag, PrefixOperator, Property,
};

use super::*;

fn tags(ast: &Ast, id: NodeId) -> Vec<NodeTag> {
    descendants(ast, id)
        .into_iter()
        .map(|id| ast.tag(id))
        .collect()
}

fn text(ast: &Ast, id: NodeId) -> String {
    match *ast.kind(id) {
        NodeKind::SimpleName { identifier } => ast.name(identifier).to_owned(),
        NodeKind::NumberLiteral { token } => ast.name(token).to_owned(),
        NodeKind::StringLiteral { escaped } | NodeKind::CharacterLiteral { escaped } => {
            ast.name(escaped).to_owned()
        }
        _ => panic!("no text on {}", ast.tag(id)),
    }
}

/// The expression of the first statement of the first method.
fn first_statement(ast: &Ast) -> NodeId {
    let unit = ast.root();
    let ty = ast.kind(unit).list(Property::Types).unwrap()[0];
    let method = ast.kind(ty).list(Property::BodyDeclarations).unwrap()[0];
    let body = ast.kind(method).slot(Property::Body).unwrap();
    ast.kind(body).list(Property::Statements).unwrap()[0]
}

#[test]
fn test_parse_nested_parentheses() {
    let ast = parse_expression("((14))").unwrap();
    assert_eq!(
        tags(&ast, ast.root()),
        vec![
            NodeTag::ParenthesizedExpression,
            NodeTag::ParenthesizedExpression,
            NodeTag::NumberLiteral,
        ]
    );
}

#[test]
fn test_parse_compilation_unit() {
    let source = "\
package com.example;

import java.util.List;
import static java.lang.Math.*;

public class Foo extends Bar {
    private static final int X = (1);

    public Foo() {
    }

    int get(final int a, String... rest) {
        return (a);
    }

    abstract void todo();
}
";
    let ast = parse(source).unwrap();
    let unit = ast.root();
    assert_eq!(ast.tag(unit), NodeTag::CompilationUnit);

    let NodeKind::CompilationUnit {
        package,
        ref imports,
        ref types,
    } = *ast.kind(unit)
    else {
        panic!("root is not a compilation unit");
    };
    assert!(package.is_present());
    assert_eq!(imports.len(), 2);
    assert_eq!(
        ast.kind(imports[1]),
        &NodeKind::ImportDeclaration {
            name: ast.kind(imports[1]).slot(Property::Name).unwrap(),
            is_static: true,
            on_demand: true,
        }
    );

    let class = types[0];
    let NodeKind::TypeDeclaration {
        modifiers,
        interface,
        superclass,
        ref body_declarations,
        ..
    } = *ast.kind(class)
    else {
        panic!("expected a type declaration");
    };
    assert_eq!(modifiers, Modifiers::PUBLIC);
    assert!(!interface);
    assert_eq!(ast.tag(superclass), NodeTag::SimpleType);
    let members: Vec<_> = body_declarations.iter().map(|&m| ast.tag(m)).collect();
    assert_eq!(
        members,
        vec![
            NodeTag::FieldDeclaration,
            NodeTag::MethodDeclaration,
            NodeTag::MethodDeclaration,
            NodeTag::MethodDeclaration,
        ]
    );

    let NodeKind::MethodDeclaration {
        constructor,
        return_type,
        ..
    } = *ast.kind(body_declarations[1])
    else {
        panic!("expected the constructor");
    };
    assert!(constructor);
    assert!(!return_type.is_present());

    let NodeKind::MethodDeclaration {
        ref parameters,
        body,
        ..
    } = *ast.kind(body_declarations[2])
    else {
        panic!("expected get()");
    };
    assert_eq!(parameters.len(), 2);
    assert!(matches!(
        ast.kind(parameters[1]),
        NodeKind::SingleVariableDeclaration { varargs: true, .. }
    ));
    assert!(body.is_present());

    let abstract_body = ast.kind(body_declarations[3]).slot(Property::Body);
    assert_eq!(abstract_body, Some(NodeId::INVALID));
}

#[test]
fn test_parse_precedence() {
    let ast = parse_expression("1 + 2 * 3 - 4").unwrap();
    // (1 + (2 * 3)) - 4
    let NodeKind::InfixExpression {
        operator,
        left_operand,
        right_operand,
    } = *ast.kind(ast.root())
    else {
        panic!("expected infix");
    };
    assert_eq!(operator, InfixOperator::Minus);
    assert_eq!(text(&ast, right_operand), "4");
    let NodeKind::InfixExpression {
        operator: inner,
        right_operand: product,
        ..
    } = *ast.kind(left_operand)
    else {
        panic!("expected infix");
    };
    assert_eq!(inner, InfixOperator::Plus);
    assert!(matches!(
        ast.kind(product),
        NodeKind::InfixExpression {
            operator: InfixOperator::Times,
            ..
        }
    ));
}

#[test]
fn test_parse_negative_literal_is_prefix() {
    let ast = parse_expression("(-1)").unwrap();
    let inner = ast.kind(ast.root()).slot(Property::Expression).unwrap();
    assert!(matches!(
        ast.kind(inner),
        NodeKind::PrefixExpression {
            operator: PrefixOperator::Minus,
            ..
        }
    ));
}

#[test]
fn test_parse_literal_kinds() {
    let cases = [
        ("true", NodeTag::BooleanLiteral),
        ("'c'", NodeTag::CharacterLiteral),
        ("null", NodeTag::NullLiteral),
        ("\"s\"", NodeTag::StringLiteral),
        ("int.class", NodeTag::TypeLiteral),
        ("String[].class", NodeTag::TypeLiteral),
        ("java.lang.String.class", NodeTag::TypeLiteral),
        ("0x1FL", NodeTag::NumberLiteral),
    ];
    for (source, expected) in cases {
        let ast = parse_expression(source).unwrap();
        assert_eq!(ast.tag(ast.root()), expected, "{source}");
    }
}

#[test]
fn test_parse_cast_versus_parenthesized() {
    let cast = parse_expression("(int) x").unwrap();
    assert_eq!(cast.tag(cast.root()), NodeTag::CastExpression);

    let reference_cast = parse_expression("(String) (o)").unwrap();
    assert_eq!(reference_cast.tag(reference_cast.root()), NodeTag::CastExpression);

    let subtraction = parse_expression("(a) - b").unwrap();
    assert_eq!(subtraction.tag(subtraction.root()), NodeTag::InfixExpression);

    let paren = parse_expression("(a)").unwrap();
    assert_eq!(paren.tag(paren.root()), NodeTag::ParenthesizedExpression);
}

#[test]
fn test_parse_member_access_chain() {
    let ast = parse_expression("a.b.c(x).d[0]").unwrap();
    assert_eq!(
        tags(&ast, ast.root()),
        vec![
            NodeTag::ArrayAccess,
            NodeTag::FieldAccess,
            NodeTag::MethodInvocation,
            NodeTag::QualifiedName,
            NodeTag::SimpleName,
            NodeTag::SimpleName,
            NodeTag::SimpleName,
            NodeTag::SimpleName,
            NodeTag::SimpleName,
            NodeTag::NumberLiteral,
        ]
    );
}

#[test]
fn test_parse_local_declaration_versus_expression() {
    let source = "class A { void m() { int[] xs = (null); } void n() { a.b = (c); } }";
    let ast = parse(source).unwrap();
    assert_eq!(ast.tag(first_statement(&ast)), NodeTag::VariableDeclarationStatement);

    let unit = ast.root();
    let ty = ast.kind(unit).list(Property::Types).unwrap()[0];
    let n = ast.kind(ty).list(Property::BodyDeclarations).unwrap()[1];
    let body = ast.kind(n).slot(Property::Body).unwrap();
    let statement = ast.kind(body).list(Property::Statements).unwrap()[0];
    assert_eq!(ast.tag(statement), NodeTag::ExpressionStatement);
    let assignment = ast.kind(statement).slot(Property::Expression).unwrap();
    assert_eq!(ast.tag(assignment), NodeTag::Assignment);
}

#[test]
fn test_parse_control_flow() {
    let source = "\
class A {
    void m() {
        for (int i = 0; i < (10); i++) {
            if (i == 3) continue; else break;
        }
        while ((true)) { }
        do { x--; } while (x > 0);
        throw (e);
    }
}
";
    let ast = parse(source).unwrap();
    let all = tags(&ast, ast.root());
    for expected in [
        NodeTag::ForStatement,
        NodeTag::IfStatement,
        NodeTag::ContinueStatement,
        NodeTag::BreakStatement,
        NodeTag::WhileStatement,
        NodeTag::DoStatement,
        NodeTag::PostfixExpression,
        NodeTag::ThrowStatement,
    ] {
        assert!(all.contains(&expected), "missing {expected}");
    }
}

#[test]
fn test_parse_records_locations() {
    let ast = parse_expression("f((1), 2)").unwrap();
    let arguments = ast.kind(ast.root()).list(Property::Arguments).unwrap().clone();
    assert_eq!(
        ast.location_of(arguments[1]),
        Ok(Some(jfold_ir::Location::List(Property::Arguments, 1)))
    );
    assert_eq!(ast.parent(arguments[0]), Some(ast.root()));
}

#[test]
fn test_parse_error_reports_position() {
    let source = "class A {\n    void m() { return 1 }\n}";
    let err = parse(source).unwrap_err();
    assert_eq!(err.to_string(), "expected `;`, found `}`");
    assert_eq!(err.line_col(source), (2, 25));
}

#[test]
fn test_parse_unsupported_construct() {
    let err = parse("class A { void m() { for (int x : xs) { } } }").unwrap_err();
    assert!(matches!(
        err,
        ParseError::Unsupported {
            what: "enhanced for loop",
            ..
        }
    ));
}

#[test]
fn test_parse_expression_rejects_trailing_tokens() {
    assert!(parse_expression("1 2").is_err());
}

#[test]
fn test_parse_deep_nesting() {
    let depth = 5_000;
    let source = format!("{}14{}", "(".repeat(depth), ")".repeat(depth));
    let ast = parse_expression(&source).unwrap();
    assert_eq!(ast.len(), depth + 1);
}
