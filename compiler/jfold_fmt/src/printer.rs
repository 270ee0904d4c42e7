//! Tree-to-source printer.
//!
//! Output is canonical: one member or statement per line, four-space
//! indentation, single spaces around binary operators. Parentheses are
//! printed only for `ParenthesizedExpression` nodes; the printer never
//! adds its own, so the tree shape decides what the text says.

use jfold_ir::{
    ensure_sufficient_stack, Ast, Modifiers, NodeId, NodeKind, PrefixOperator,
};

use crate::emitter::Emitter;

pub struct Printer<'a, E: Emitter> {
    ast: &'a Ast,
    out: E,
    level: usize,
}

impl<'a, E: Emitter> Printer<'a, E> {
    pub fn new(ast: &'a Ast, out: E) -> Self {
        Printer { ast, out, level: 0 }
    }

    pub fn finish(self) -> E {
        self.out
    }

    /// Print any node: declarations and statements in their block form,
    /// expressions and types inline.
    pub fn node(&mut self, id: NodeId) {
        let tag = self.ast.tag(id);
        match self.ast.kind(id) {
            NodeKind::CompilationUnit { .. } => self.compilation_unit(id),
            NodeKind::PackageDeclaration { .. } | NodeKind::ImportDeclaration { .. } => {
                self.header_line(id);
            }
            NodeKind::TypeDeclaration { .. }
            | NodeKind::FieldDeclaration { .. }
            | NodeKind::MethodDeclaration { .. } => self.member(id),
            NodeKind::SingleVariableDeclaration { .. } => self.parameter(id),
            NodeKind::VariableDeclarationFragment { .. } => self.fragment(id),
            _ if tag.is_statement() => self.statement(id),
            _ => self.expression(id),
        }
    }

    // Declarations

    fn compilation_unit(&mut self, id: NodeId) {
        let ast = self.ast;
        let NodeKind::CompilationUnit {
            package,
            ref imports,
            ref types,
        } = *ast.kind(id)
        else {
            return;
        };

        if package.is_present() {
            self.header_line(package);
            self.out.emit_newline();
        }
        for &import in imports {
            self.header_line(import);
        }
        if !imports.is_empty() {
            self.out.emit_newline();
        }
        for (i, &ty) in types.iter().enumerate() {
            if i > 0 {
                self.out.emit_newline();
            }
            self.member(ty);
        }
    }

    /// `package a.b;` or `import [static] a.b[.*];`, with newline.
    fn header_line(&mut self, id: NodeId) {
        let ast = self.ast;
        match *ast.kind(id) {
            NodeKind::PackageDeclaration { name } => {
                self.out.emit("package ");
                self.expression(name);
            }
            NodeKind::ImportDeclaration {
                name,
                is_static,
                on_demand,
            } => {
                self.out.emit("import ");
                if is_static {
                    self.out.emit("static ");
                }
                self.expression(name);
                if on_demand {
                    self.out.emit(".*");
                }
            }
            _ => return,
        }
        self.out.emit(";");
        self.out.emit_newline();
    }

    fn modifiers(&mut self, modifiers: Modifiers) {
        for keyword in modifiers.keywords() {
            self.out.emit(keyword);
            self.out.emit_space();
        }
    }

    /// A type member on its own line(s), indented at the current level.
    fn member(&mut self, id: NodeId) {
        ensure_sufficient_stack(|| self.member_inner(id));
    }

    fn member_inner(&mut self, id: NodeId) {
        let ast = self.ast;
        self.out.emit_indent(self.level);
        match *ast.kind(id) {
            NodeKind::TypeDeclaration {
                modifiers,
                interface,
                name,
                superclass,
                ref body_declarations,
            } => {
                self.modifiers(modifiers);
                self.out.emit(if interface { "interface " } else { "class " });
                self.expression(name);
                if superclass.is_present() {
                    self.out.emit(" extends ");
                    self.expression(superclass);
                }
                self.out.emit(" {");
                self.out.emit_newline();
                self.level += 1;
                for (i, &member) in body_declarations.iter().enumerate() {
                    if i > 0 {
                        self.out.emit_newline();
                    }
                    self.member(member);
                }
                self.level -= 1;
                self.out.emit_indent(self.level);
                self.out.emit("}");
            }
            NodeKind::FieldDeclaration {
                modifiers,
                ty,
                ref fragments,
            } => {
                self.modifiers(modifiers);
                self.expression(ty);
                self.out.emit_space();
                self.comma_separated(fragments, Self::fragment);
                self.out.emit(";");
            }
            NodeKind::MethodDeclaration {
                modifiers,
                return_type,
                name,
                ref parameters,
                body,
                ..
            } => {
                self.modifiers(modifiers);
                if return_type.is_present() {
                    self.expression(return_type);
                    self.out.emit_space();
                }
                self.expression(name);
                self.out.emit("(");
                self.comma_separated(parameters, Self::parameter);
                self.out.emit(")");
                if body.is_present() {
                    self.out.emit_space();
                    self.statement(body);
                } else {
                    self.out.emit(";");
                }
            }
            _ => self.expression(id),
        }
        self.out.emit_newline();
    }

    fn parameter(&mut self, id: NodeId) {
        let ast = self.ast;
        let NodeKind::SingleVariableDeclaration {
            modifiers,
            ty,
            varargs,
            name,
        } = *ast.kind(id)
        else {
            return;
        };
        self.modifiers(modifiers);
        self.expression(ty);
        self.out.emit(if varargs { "... " } else { " " });
        self.expression(name);
    }

    fn fragment(&mut self, id: NodeId) {
        let ast = self.ast;
        let NodeKind::VariableDeclarationFragment { name, initializer } = *ast.kind(id) else {
            return;
        };
        self.expression(name);
        if initializer.is_present() {
            self.out.emit(" = ");
            self.expression(initializer);
        }
    }

    /// `[modifiers] Type a = 1, b` without the `;`, shared by local
    /// declarations and `for` initializers.
    fn variable_declaration(&mut self, id: NodeId) {
        let ast = self.ast;
        let NodeKind::VariableDeclarationStatement {
            modifiers,
            ty,
            ref fragments,
        } = *ast.kind(id)
        else {
            return;
        };
        self.modifiers(modifiers);
        self.expression(ty);
        self.out.emit_space();
        self.comma_separated(fragments, Self::fragment);
    }

    // Statements

    /// Print a statement starting at the current column. Nested lines are
    /// indented relative to `self.level`; no trailing newline.
    fn statement(&mut self, id: NodeId) {
        ensure_sufficient_stack(|| self.statement_inner(id));
    }

    fn statement_inner(&mut self, id: NodeId) {
        let ast = self.ast;
        match *ast.kind(id) {
            NodeKind::Block { ref statements } => {
                self.out.emit("{");
                self.out.emit_newline();
                self.level += 1;
                for &statement in statements {
                    self.out.emit_indent(self.level);
                    self.statement(statement);
                    self.out.emit_newline();
                }
                self.level -= 1;
                self.out.emit_indent(self.level);
                self.out.emit("}");
            }
            NodeKind::EmptyStatement => self.out.emit(";"),
            NodeKind::ExpressionStatement { expression } => {
                self.expression(expression);
                self.out.emit(";");
            }
            NodeKind::VariableDeclarationStatement { .. } => {
                self.variable_declaration(id);
                self.out.emit(";");
            }
            NodeKind::IfStatement {
                expression,
                then_statement,
                else_statement,
            } => {
                self.out.emit("if (");
                self.expression(expression);
                self.out.emit(") ");
                self.statement(then_statement);
                if else_statement.is_present() {
                    self.out.emit(" else ");
                    self.statement(else_statement);
                }
            }
            NodeKind::WhileStatement { expression, body } => {
                self.out.emit("while (");
                self.expression(expression);
                self.out.emit(") ");
                self.statement(body);
            }
            NodeKind::DoStatement { body, expression } => {
                self.out.emit("do ");
                self.statement(body);
                self.out.emit(" while (");
                self.expression(expression);
                self.out.emit(");");
            }
            NodeKind::ForStatement {
                ref initializers,
                expression,
                ref updaters,
                body,
            } => {
                self.out.emit("for (");
                self.comma_separated(initializers, |p, init| {
                    if matches!(p.ast.kind(init), NodeKind::VariableDeclarationStatement { .. }) {
                        p.variable_declaration(init);
                    } else {
                        p.expression(init);
                    }
                });
                self.out.emit(";");
                if expression.is_present() {
                    self.out.emit_space();
                    self.expression(expression);
                }
                self.out.emit(";");
                if !updaters.is_empty() {
                    self.out.emit_space();
                    self.comma_separated(updaters, Self::expression);
                }
                self.out.emit(") ");
                self.statement(body);
            }
            NodeKind::ReturnStatement { expression } => {
                self.out.emit("return");
                if expression.is_present() {
                    self.out.emit_space();
                    self.expression(expression);
                }
                self.out.emit(";");
            }
            NodeKind::BreakStatement => self.out.emit("break;"),
            NodeKind::ContinueStatement => self.out.emit("continue;"),
            NodeKind::ThrowStatement { expression } => {
                self.out.emit("throw ");
                self.expression(expression);
                self.out.emit(";");
            }
            _ => self.expression(id),
        }
    }

    // Expressions and types

    pub fn expression(&mut self, id: NodeId) {
        ensure_sufficient_stack(|| self.expression_inner(id));
    }

    fn expression_inner(&mut self, id: NodeId) {
        let ast = self.ast;
        match *ast.kind(id) {
            NodeKind::ParenthesizedExpression { expression } => {
                self.out.emit("(");
                self.expression(expression);
                self.out.emit(")");
            }
            NodeKind::InfixExpression {
                operator,
                left_operand,
                right_operand,
            } => {
                self.expression(left_operand);
                self.out.emit_space();
                self.out.emit(operator.as_symbol());
                self.out.emit_space();
                self.expression(right_operand);
            }
            NodeKind::PrefixExpression { operator, operand } => {
                self.out.emit(operator.as_symbol());
                if self.needs_prefix_space(operator, operand) {
                    self.out.emit_space();
                }
                self.expression(operand);
            }
            NodeKind::PostfixExpression { operator, operand } => {
                self.expression(operand);
                self.out.emit(operator.as_symbol());
            }
            NodeKind::Assignment {
                operator,
                left_hand_side,
                right_hand_side,
            } => {
                self.expression(left_hand_side);
                self.out.emit_space();
                self.out.emit(operator.as_symbol());
                self.out.emit_space();
                self.expression(right_hand_side);
            }
            NodeKind::ConditionalExpression {
                expression,
                then_expression,
                else_expression,
            } => {
                self.expression(expression);
                self.out.emit(" ? ");
                self.expression(then_expression);
                self.out.emit(" : ");
                self.expression(else_expression);
            }
            NodeKind::MethodInvocation {
                expression,
                name,
                ref arguments,
            } => {
                if expression.is_present() {
                    self.expression(expression);
                    self.out.emit(".");
                }
                self.expression(name);
                self.arguments(arguments);
            }
            NodeKind::FieldAccess { expression, name } => {
                self.expression(expression);
                self.out.emit(".");
                self.expression(name);
            }
            NodeKind::ArrayAccess { array, index } => {
                self.expression(array);
                self.out.emit("[");
                self.expression(index);
                self.out.emit("]");
            }
            NodeKind::ClassInstanceCreation { ty, ref arguments } => {
                self.out.emit("new ");
                self.expression(ty);
                self.arguments(arguments);
            }
            NodeKind::CastExpression { ty, expression } => {
                self.out.emit("(");
                self.expression(ty);
                self.out.emit(") ");
                self.expression(expression);
            }
            NodeKind::InstanceofExpression {
                left_operand,
                right_operand,
            } => {
                self.expression(left_operand);
                self.out.emit(" instanceof ");
                self.expression(right_operand);
            }
            NodeKind::ThisExpression => self.out.emit("this"),
            NodeKind::QualifiedName { qualifier, name } => {
                self.expression(qualifier);
                self.out.emit(".");
                self.expression(name);
            }
            NodeKind::SimpleName { identifier: text }
            | NodeKind::CharacterLiteral { escaped: text }
            | NodeKind::StringLiteral { escaped: text }
            | NodeKind::NumberLiteral { token: text } => self.out.emit(ast.name(text)),
            NodeKind::BooleanLiteral { value } => self.out.emit(if value { "true" } else { "false" }),
            NodeKind::NullLiteral => self.out.emit("null"),
            NodeKind::TypeLiteral { ty } => {
                self.expression(ty);
                self.out.emit(".class");
            }
            NodeKind::PrimitiveType { primitive } => self.out.emit(primitive.keyword()),
            NodeKind::SimpleType { name } => self.expression(name),
            NodeKind::ArrayType { component_type } => {
                self.expression(component_type);
                self.out.emit("[]");
            }
            // Declarations and statements reached through an expression
            // slot are printed in their own form.
            _ => self.node(id),
        }
    }

    /// `- -x` and `+ ++x` need a space so they do not lex as `--x`.
    fn needs_prefix_space(&self, operator: PrefixOperator, operand: NodeId) -> bool {
        let NodeKind::PrefixExpression {
            operator: inner, ..
        } = *self.ast.kind(operand)
        else {
            return false;
        };
        let sign = |op: PrefixOperator| match op {
            PrefixOperator::Plus | PrefixOperator::Increment => Some('+'),
            PrefixOperator::Minus | PrefixOperator::Decrement => Some('-'),
            PrefixOperator::Complement | PrefixOperator::Not => None,
        };
        sign(operator).is_some() && sign(operator) == sign(inner)
    }

    fn arguments(&mut self, arguments: &[NodeId]) {
        self.out.emit("(");
        self.comma_separated(arguments, Self::expression);
        self.out.emit(")");
    }

    fn comma_separated(&mut self, items: &[NodeId], mut each: impl FnMut(&mut Self, NodeId)) {
        for (i, &item) in items.iter().enumerate() {
            if i > 0 {
                self.out.emit(", ");
            }
            each(self, item);
        }
    }
}
