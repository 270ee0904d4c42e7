//! jfold renderer - trees back to Java source
//!
//! Rendering is canonical rather than layout-preserving: comments and
//! original whitespace are gone after parsing, and the printer emits a
//! fixed style. What it does preserve is structure. Every
//! `ParenthesizedExpression` prints as `(...)`, nothing else gets
//! parentheses, and literal tokens print exactly as written. Parsing the
//! output therefore yields a tree that matches the input tree.

pub mod emitter;
mod printer;

use jfold_ir::{Ast, NodeId, NodeTag};

use emitter::StringEmitter;
use printer::Printer;

/// Render the tree from its designated root.
///
/// A compilation unit ends with a single trailing newline. A tree with
/// no root renders as the empty string.
pub fn render(ast: &Ast) -> String {
    let root = ast.root();
    if !ast.contains(root) {
        return String::new();
    }
    let mut out = render_with(ast, root);
    if ast.tag(root) == NodeTag::CompilationUnit {
        out.ensure_trailing_newline();
    }
    out.output()
}

/// Render one subtree. Declarations and statements keep their block
/// layout, starting at indentation level zero.
pub fn render_node(ast: &Ast, id: NodeId) -> String {
    if !ast.contains(id) {
        return String::new();
    }
    render_with(ast, id).output()
}

fn render_with(ast: &Ast, id: NodeId) -> StringEmitter {
    let mut printer = Printer::new(ast, StringEmitter::with_capacity(ast.len() * 4));
    printer.node(id);
    printer.finish()
}
