// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell

//! End-to-end tests: source text through tokenizer, builder and resolver.

use proptest::prelude::*;
use tscript_lexer::{token_at, tokenize, LexToken, TokenCursor};
use tscript_symbols::{Candidate, CandidateKind, SymbolKind, SymbolTree};

/// Build a tree for `source` and return it with a cursor on the token at
/// 1-based `line`, 0-based `column`.
fn query(source: &str, line: u32, column: u32) -> (SymbolTree, Vec<LexToken>, usize) {
    let tokens = tokenize(source);
    let tree = SymbolTree::build(&tokens);
    let index = token_at(&tokens, line, column).expect("no token at position");
    (tree, tokens, index)
}

fn completion_names(source: &str, line: u32, column: u32) -> Vec<String> {
    let (tree, tokens, index) = query(source, line, column);
    tree.completions(&TokenCursor::at(&tokens, index))
        .iter()
        .map(|c| tree.describe(c).name.to_string())
        .collect()
}

#[test]
fn test_dotted_completion_is_visibility_aware() {
    let source = "class X {\n  var secret;\n  public function y() {}\n  public var z;\n}\nvar x X;\nx.";
    let names = completion_names(source, 7, 2);
    assert_eq!(names, vec!["z", "y"]);
}

#[test]
fn test_dotted_completion_through_type_directive() {
    let source = "class Vec {\n  public:\n  var len;\n}\n#type=Vec\nvar v = make();\nv.";
    assert_eq!(completion_names(source, 7, 2), vec!["len"]);
}

#[test]
fn test_dotted_completion_on_namespace() {
    let source = "namespace Math {\n  var pi = 3;\n  function abs(n) {}\n  class Matrix {}\n}\nMath.";
    assert_eq!(completion_names(source, 6, 5), vec!["pi", "abs", "Matrix"]);
}

#[test]
fn test_dotted_completion_through_chain() {
    let source = "namespace Geo {\n  class Point {\n    public var x;\n  }\n}\n\
                  class Line {\n  public:\n  #type=Geo.Point\n  var start;\n}\n\
                  var l Line;\nl.start.";
    assert_eq!(completion_names(source, 12, 8), vec!["x"]);
}

#[test]
fn test_dotted_completion_uses_local_variable() {
    let source = "class A {\n  public var a1;\n}\nclass B {\n  public var b1;\n}\n\
                  var p B;\nfunction f() {\n  A p = make();\n  p.\n}";
    assert_eq!(completion_names(source, 10, 4), vec!["a1"]);
}

#[test]
fn test_dotted_completion_unknown_receiver() {
    assert!(completion_names("var q;\nq.", 2, 2).is_empty());
}

#[test]
fn test_non_dotted_completion_orders_nested_first() {
    let source = "namespace Shapes {\n  var area;\n  function draw() {\n    var angle = 0;\n    a\n  }\n}\nvar alpha;";
    let names = completion_names(source, 5, 5);
    // Inside `draw`: its locals first, then the namespace members, then root.
    assert_eq!(names, vec!["angle", "draw", "area", "Shapes", "alpha"]);
}

#[test]
fn test_nested_ranges_contain_children() {
    let source = "namespace N {\n  class C {\n    public function f(p) {\n      var v;\n    }\n    var w;\n  }\n}";
    let tree = SymbolTree::build(&tokenize(source));
    let f = tree.find_by_name("f").unwrap();
    let c = tree.find_by_name("C").unwrap();
    let n = tree.find_by_name("N").unwrap();
    assert!(tree[c].lines.encloses(tree[f].lines));
    assert!(tree[n].lines.encloses(tree[c].lines));
    assert_eq!(tree[f].parent, Some(c));
    assert_eq!(tree[c].parent, Some(n));
}

#[test]
fn test_full_rebuild_leaves_no_stale_symbols() {
    let first = SymbolTree::build(&tokenize("var alpha;\nfunction old() {}"));
    assert!(first.find_by_name("alpha").is_some());

    let second = SymbolTree::build(&tokenize("var beta;"));
    assert!(second.find_by_name("alpha").is_none());
    assert!(second.find_by_name("old").is_none());
    assert_eq!(second.len(), 1);
}

#[test]
fn test_hover_on_member_access() {
    let source = "class P {\n  public var x;\n}\nvar p P;\np.x = 1;";
    let (tree, tokens, index) = query(source, 5, 2);
    let candidate = tree.hover_lookup(&TokenCursor::at(&tokens, index));
    let description = tree.describe(&candidate);
    assert_eq!(description.kind, CandidateKind::Variable);
    assert_eq!(description.description.as_deref(), Some("var x ( class P )"));
}

#[test]
fn test_hover_on_class_name() {
    let (tree, tokens, index) = query("class Engine {\n}\nvar e Engine;", 1, 7);
    let candidate = tree.hover_lookup(&TokenCursor::at(&tokens, index));
    let Candidate::Symbol(id) = candidate else {
        panic!("expected a symbol");
    };
    assert!(matches!(tree[id].kind, SymbolKind::Class(_)));
}

proptest! {
    #[test]
    fn builder_is_total(source in "(var|function|class|namespace|public|static|[a-z]|[{}();=.,]| |\\n){0,80}") {
        let tokens = tokenize(&source);
        let tree = SymbolTree::build(&tokens);
        for (_, symbol) in tree.iter() {
            if let Some(parent) = symbol.parent {
                prop_assert!(tree[parent].lines.encloses(symbol.lines));
            }
        }
        for index in 0..=tokens.len() {
            let cursor = TokenCursor::at(&tokens, index);
            let _ = tree.completions(&cursor);
            let candidate = tree.hover_lookup(&cursor);
            let _ = tree.describe(&candidate);
        }
    }
}
