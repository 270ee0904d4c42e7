//! Property-based tests for the folding driver.
//!
//! Random expressions with parentheses sprinkled over literals and
//! non-literals are folded inside a small class. For every input:
//! 1. Termination: the driver reaches a fixed point well below its cap
//! 2. Idempotence: folding the result again changes nothing
//! 3. Completeness: no parenthesized literal is left in the tree
//! 4. Conservation: nodes away from every rewrite keep their links

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![allow(
    clippy::uninlined_format_args,
    reason = "Proptest macros generate code with these patterns"
)]

use jfold_fmt::render;
use jfold_fold::{registry, FoldDriver};
use jfold_ir::visit::descendants;
use jfold_ir::{Ast, Location, NodeId, NodeKind};
use jfold_parse::parse;
use proptest::prelude::*;
use rustc_hash::FxHashSet;

// -- Code Generation Strategies --

fn literal_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        (0u32..=999).prop_map(|n| n.to_string()),
        (0u32..=255).prop_map(|n| format!("0x{:x}", n)),
        Just("3.25e2".to_string()),
        Just("true".to_string()),
        Just("false".to_string()),
        Just("null".to_string()),
        (b'a'..=b'z').prop_map(|c| format!("'{}'", c as char)),
        prop::string::string_regex("[a-z ]{0,8}")
            .expect("valid regex")
            .prop_map(|s| format!("\"{}\"", s)),
        Just("Object.class".to_string()),
    ]
}

fn atom_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => literal_strategy(),
        1 => prop::string::string_regex("v_[a-z]{1,4}").expect("valid regex"),
    ]
}

/// Wrap `inner` in 0 to 3 pairs of parentheses.
fn parenthesize(inner: BoxedStrategy<String>) -> BoxedStrategy<String> {
    (inner, 0usize..4)
        .prop_map(|(e, depth)| format!("{}{}{}", "(".repeat(depth), e, ")".repeat(depth)))
        .boxed()
}

fn expr_strategy(depth: u32) -> BoxedStrategy<String> {
    if depth == 0 {
        return parenthesize(atom_strategy().boxed());
    }
    let inner = || expr_strategy(depth - 1);
    let compound = prop_oneof![
        atom_strategy(),
        (inner(), inner()).prop_map(|(l, r)| format!("{} + {}", l, r)),
        (inner(), inner()).prop_map(|(l, r)| format!("{} == {}", l, r)),
        (inner(), inner(), inner()).prop_map(|(c, t, e)| format!("{} ? {} : {}", c, t, e)),
        prop::collection::vec(inner(), 0..3).prop_map(|args| format!("f({})", args.join(", "))),
        inner().prop_map(|e| format!("v_a[{}]", e)),
    ];
    parenthesize(compound.boxed())
}

fn class_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(expr_strategy(3), 1..4).prop_map(|exprs| {
        let body: Vec<String> = exprs.iter().map(|e| format!("v_x = {};", e)).collect();
        format!("class P {{ Object f = {}; void m() {{ {} }} }}", exprs[0], body.join(" "))
    })
}

// -- Helpers --

type Links = (Option<NodeId>, Option<Location>, Vec<NodeId>);

fn links(ast: &Ast, id: NodeId) -> Links {
    let children = ast.children(id).into_iter().map(|(_, child)| child).collect();
    (ast.parent(id), ast.location(id), children)
}

fn has_parenthesized_literal(ast: &Ast) -> bool {
    descendants(ast, ast.root()).into_iter().any(|id| {
        matches!(*ast.kind(id), NodeKind::ParenthesizedExpression { expression }
            if ast.tag(expression).is_literal())
    })
}

// -- Properties --

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn folding_terminates_and_is_idempotent(source in class_strategy()) {
        let mut ast = parse(&source).unwrap();
        let root = ast.root();
        let driver = FoldDriver::new(registry::default_rules::<&str>(&[]).unwrap());

        let first = driver.run_with_report(&mut ast, root).unwrap();
        prop_assert!(first.rounds <= 2);
        prop_assert!(!has_parenthesized_literal(&ast));

        let rendered = render(&ast);
        let nodes = ast.len();
        let second = driver.run_with_report(&mut ast, first.root).unwrap();
        prop_assert_eq!(second.rounds, 1);
        prop_assert_eq!(second.total_rewrites(), 0);
        prop_assert_eq!(ast.len(), nodes);
        prop_assert_eq!(render(&ast), rendered);
    }

    #[test]
    fn untouched_nodes_keep_their_links(source in class_strategy()) {
        let mut ast = parse(&source).unwrap();
        let root = ast.root();
        let before: Vec<(NodeId, Links)> = descendants(&ast, root)
            .into_iter()
            .map(|id| (id, links(&ast, id)))
            .collect();

        let driver = FoldDriver::new(registry::default_rules::<&str>(&[]).unwrap());
        driver.run_to_fixed_point(&mut ast, root).unwrap();

        let replaced: Vec<NodeId> = before
            .iter()
            .map(|&(id, _)| id)
            .filter(|&id| ast.is_detached(id))
            .collect();
        // Ancestors of a replaced node had a slot rewritten.
        let mut on_path = FxHashSet::default();
        for &(_, (parent, _, _)) in before.iter().filter(|(id, _)| replaced.contains(id)) {
            let mut cursor = parent;
            while let Some(ancestor) = cursor {
                if !on_path.insert(ancestor) {
                    break;
                }
                cursor = before
                    .iter()
                    .find(|(node, _)| *node == ancestor)
                    .and_then(|(_, (parent, _, _))| *parent);
            }
        }

        for (id, old) in &before {
            if replaced.contains(id) || on_path.contains(id) {
                continue;
            }
            prop_assert_eq!(&links(&ast, *id), old, "node {} changed", id);
        }
    }
}
