// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell

//! Position-based queries against a [`SymbolTree`].
//!
//! Both queries take a [`TokenCursor`] positioned on the token under the
//! caret. Completion either lists the members reachable through a dotted
//! access chain (`a.b.`) or every in-scope symbol whose name contains the
//! partial identifier. Hover resolves the token to the nearest declaration
//! of that name, falling back to the raw token.

use smol_str::SmolStr;
use tscript_lexer::{lexicon, LexToken, TokenCursor, TokenKind};

use crate::symbol::{SymbolId, SymbolKind, Visibility};
use crate::tree::SymbolTree;

/// Something a query can return: a declared symbol or a bare token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Candidate {
    Token(LexToken),
    Symbol(SymbolId),
}

/// Presentation category of a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CandidateKind {
    Keyword,
    Text,
    Namespace,
    Class,
    Function,
    Variable,
}

/// Everything shown to the user about a candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description {
    pub name: SmolStr,
    pub kind: CandidateKind,
    pub type_name: SmolStr,
    /// `None` for punctuation, which has nothing worth showing.
    pub description: Option<String>,
}

/// The identifiers of `a.b.` before the caret, and what was typed after the
/// final dot.
#[derive(Debug, Clone)]
pub struct DottedChain<'a> {
    pub segments: Vec<&'a LexToken>,
    pub partial: &'a str,
}

impl<'a> DottedChain<'a> {
    /// Recognise a dotted access ending at the cursor's current token.
    ///
    /// Returns `None` when neither the current token nor the one before it
    /// is a `.`. An unrecognisable receiver yields an empty segment list.
    pub fn at(cursor: &TokenCursor<'a>) -> Option<Self> {
        let token = cursor.current();
        let mut back = *cursor;

        let partial = if token.kind == TokenKind::Dot {
            ""
        } else if back.last().kind == TokenKind::Dot {
            back.prev();
            token.lexeme.as_str()
        } else {
            return None;
        };

        let mut segments = Vec::new();
        loop {
            let segment = back.prev();
            if segment.kind != TokenKind::Text {
                break;
            }
            segments.push(segment);
            if back.last().kind != TokenKind::Dot {
                break;
            }
            back.prev();
        }
        segments.reverse();

        Some(Self { segments, partial })
    }
}

impl SymbolTree {
    /// Completion candidates for the token under `cursor`.
    ///
    /// Dotted completions are unfiltered; callers narrow them by
    /// [`DottedChain::partial`].
    pub fn completions(&self, cursor: &TokenCursor<'_>) -> Vec<Candidate> {
        let token = cursor.current();

        if let Some(chain) = DottedChain::at(cursor) {
            return self
                .resolve_chain(&chain.segments)
                .map(|container| {
                    self.members(container)
                        .into_iter()
                        .map(Candidate::Symbol)
                        .collect()
                })
                .unwrap_or_default();
        }

        let mut found = Vec::new();
        self.collect(None, &token.lexeme, token.line, &mut found);
        found
    }

    /// The declaration the token under `cursor` refers to, or the token itself.
    pub fn hover_lookup(&self, cursor: &TokenCursor<'_>) -> Candidate {
        let token = cursor.current();
        if token.is_invalid() {
            return Candidate::Token(token.clone());
        }

        if let Some(chain) = DottedChain::at(cursor) {
            if token.kind == TokenKind::Text {
                let member = self.resolve_chain(&chain.segments).and_then(|container| {
                    self.members(container)
                        .into_iter()
                        .find(|&id| self[id].name == token.lexeme)
                });
                if let Some(member) = member {
                    return Candidate::Symbol(member);
                }
            }
        }

        match self.lookup(None, &token.lexeme, token.line) {
            Some(id) => Candidate::Symbol(id),
            None => Candidate::Token(token.clone()),
        }
    }

    /// Name, kind, type and description of a candidate.
    pub fn describe(&self, candidate: &Candidate) -> Description {
        match candidate {
            Candidate::Token(token) => Description {
                name: token.lexeme.clone(),
                kind: if token.kind == TokenKind::Keyword {
                    CandidateKind::Keyword
                } else {
                    CandidateKind::Text
                },
                type_name: SmolStr::new(token.kind.name()),
                description: token_description(token),
            },
            Candidate::Symbol(id) => {
                let symbol = &self[*id];
                let (kind, description) = match &symbol.kind {
                    SymbolKind::Namespace(_) => (
                        CandidateKind::Namespace,
                        format!("namespace {}", self.full_path(*id)),
                    ),
                    SymbolKind::Class(_) => (
                        CandidateKind::Class,
                        format!("class {}", self.full_path(*id)),
                    ),
                    SymbolKind::Function(_) => {
                        let origin = match symbol.parent {
                            Some(parent) if self[parent].is_type() => {
                                format!("{}.", self.full_path(parent))
                            }
                            _ => String::new(),
                        };
                        (
                            CandidateKind::Function,
                            format!("function {origin}{}()", symbol.name),
                        )
                    }
                    SymbolKind::Variable(variable) => {
                        let mut description = format!("{} {}", variable.type_name, symbol.name);
                        if let Some(parent) = symbol.parent {
                            let owner = &self[parent];
                            let path = match owner.kind {
                                SymbolKind::Function(_) => owner.name.to_string(),
                                _ => self.full_path(parent),
                            };
                            description.push_str(&format!(" ( {} {} )", owner.type_name(), path));
                        }
                        (CandidateKind::Variable, description)
                    }
                };
                Description {
                    name: symbol.name.clone(),
                    kind,
                    type_name: SmolStr::new(symbol.type_name()),
                    description: Some(description),
                }
            }
        }
    }

    /// Scopes whose line range contains `line`, innermost first.
    pub fn enclosing_scopes(&self, line: u32) -> Vec<SymbolId> {
        let mut chain = Vec::new();
        let mut scope = None;
        while let Some(inner) = self
            .scope(scope)
            .scopes()
            .find(|&id| self[id].lines.contains(line))
        {
            chain.push(inner);
            scope = Some(inner);
        }
        chain.reverse();
        chain
    }

    /// The variable `name` as seen from `line`: parameters and locals of
    /// the innermost scope first, the buffer root last.
    pub fn visible_variable(&self, name: &str, line: u32) -> Option<SymbolId> {
        self.enclosing_scopes(line)
            .into_iter()
            .map(Some)
            .chain(std::iter::once(None))
            .find_map(|scope| {
                let view = self.scope(scope);
                view.parameters
                    .iter()
                    .chain(view.variables)
                    .copied()
                    .find(|&id| self[id].name == name)
            })
    }

    /// The class or namespace whose name or full dotted path is `name`.
    pub fn find_type(&self, name: &str) -> Option<SymbolId> {
        self.iter()
            .filter(|(_, symbol)| symbol.is_type())
            .find(|(id, symbol)| symbol.name == name || self.full_path(*id) == name)
            .map(|(id, _)| id)
    }

    /// Members reachable with `container.`: public variables and functions
    /// of a class, or everything declared in a namespace.
    pub fn members(&self, container: SymbolId) -> Vec<SymbolId> {
        match &self[container].kind {
            SymbolKind::Class(scope) => scope
                .variables
                .iter()
                .chain(&scope.functions)
                .copied()
                .filter(|&id| self[id].visibility() == Visibility::Public)
                .collect(),
            SymbolKind::Namespace(scope) => scope
                .variables
                .iter()
                .chain(&scope.functions)
                .chain(&scope.classes)
                .chain(&scope.namespaces)
                .copied()
                .collect(),
            SymbolKind::Function(_) | SymbolKind::Variable(_) => Vec::new(),
        }
    }

    /// Resolve `a.b.c` to the class or namespace it denotes.
    fn resolve_chain(&self, segments: &[&LexToken]) -> Option<SymbolId> {
        let (first, rest) = segments.split_first()?;

        let declared = self
            .visible_variable(&first.lexeme, first.line)
            .and_then(|id| self.variable_type(id));
        let mut container = declared.or_else(|| self.find_type(&first.lexeme))?;

        for segment in rest {
            let member = self
                .members(container)
                .into_iter()
                .find(|&id| self[id].name == segment.lexeme)?;
            container = match self[member].kind {
                SymbolKind::Namespace(_) | SymbolKind::Class(_) => member,
                SymbolKind::Variable(_) => self.variable_type(member)?,
                SymbolKind::Function(_) => return None,
            };
        }

        tracing::trace!(path = %self.full_path(container), "resolved dotted chain");
        Some(container)
    }

    fn variable_type(&self, id: SymbolId) -> Option<SymbolId> {
        match &self[id].kind {
            SymbolKind::Variable(variable) => self.find_type(&variable.type_name),
            _ => None,
        }
    }

    fn collect(&self, scope: Option<SymbolId>, partial: &str, line: u32, found: &mut Vec<Candidate>) {
        for id in self.scope(scope).completion_order() {
            let symbol = &self[id];
            if symbol.is_scope() && symbol.lines.contains(line) {
                self.collect(Some(id), partial, line, found);
            }
            if symbol.name.contains(partial) {
                found.push(Candidate::Symbol(id));
            }
        }
    }

    fn lookup(&self, scope: Option<SymbolId>, name: &str, line: u32) -> Option<SymbolId> {
        let view = self.scope(scope);
        view.scopes()
            .filter(|&id| self[id].lines.contains(line))
            .find_map(|id| self.lookup(Some(id), name, line))
            .or_else(|| view.lookup_order().find(|&id| self[id].name == name))
    }
}

/// Description of a token that names no declaration.
fn token_description(token: &LexToken) -> Option<String> {
    let text = if lexicon::is_internal_type(&token.lexeme) {
        "Internal Data Type"
    } else if token.kind == TokenKind::Keyword {
        "Internal Keyword"
    } else if token.kind == TokenKind::Number {
        "Number"
    } else if token.kind != TokenKind::Text && (1..=2).contains(&token.lexeme.chars().count()) {
        return None;
    } else {
        "Unknown Token / Text Token"
    };
    Some(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tscript_lexer::{token_at, tokenize};

    fn names(tree: &SymbolTree, candidates: &[Candidate]) -> Vec<String> {
        candidates
            .iter()
            .map(|c| tree.describe(c).name.to_string())
            .collect()
    }

    #[test]
    fn test_dotted_chain() {
        let tokens = tokenize("a.b.c");
        let chain = DottedChain::at(&TokenCursor::at(&tokens, 4)).unwrap();
        let segments: Vec<_> = chain.segments.iter().map(|t| t.lexeme.as_str()).collect();
        assert_eq!(segments, vec!["a", "b"]);
        assert_eq!(chain.partial, "c");

        let chain = DottedChain::at(&TokenCursor::at(&tokens, 3)).unwrap();
        assert_eq!(chain.segments.len(), 2);
        assert_eq!(chain.partial, "");

        assert!(DottedChain::at(&TokenCursor::at(&tokens, 0)).is_none());
    }

    #[test]
    fn test_dotted_chain_without_receiver() {
        let tokens = tokenize("f().");
        let chain = DottedChain::at(&TokenCursor::at(&tokens, 3)).unwrap();
        assert!(chain.segments.is_empty());
    }

    #[test]
    fn test_token_descriptions() {
        let tree = SymbolTree::default();
        let describe = |kind, lexeme: &str| {
            tree.describe(&Candidate::Token(LexToken::new(kind, lexeme, 1, 0)))
                .description
        };
        assert_eq!(describe(TokenKind::Keyword, "var").as_deref(), Some("Internal Data Type"));
        assert_eq!(describe(TokenKind::Keyword, "while").as_deref(), Some("Internal Keyword"));
        assert_eq!(describe(TokenKind::Number, "42").as_deref(), Some("Number"));
        assert_eq!(describe(TokenKind::PlusEqual, "+="), None);
        assert_eq!(
            describe(TokenKind::Text, "x").as_deref(),
            Some("Unknown Token / Text Token")
        );
    }

    #[test]
    fn test_symbol_descriptions() {
        let tree = SymbolTree::build(&tokenize(
            "namespace Geo {\n  class Point {\n    public var x;\n    public function norm(k) {}\n  }\n  var origin;\n}",
        ));
        let describe = |name| tree.describe(&Candidate::Symbol(tree.find_by_name(name).unwrap()));

        let class = describe("Point");
        assert_eq!(class.kind, CandidateKind::Class);
        assert_eq!(class.type_name, "class");
        assert_eq!(class.description.as_deref(), Some("class Geo.Point"));

        assert_eq!(describe("Geo").description.as_deref(), Some("namespace Geo"));
        assert_eq!(
            describe("norm").description.as_deref(),
            Some("function Geo.Point.norm()")
        );
        assert_eq!(
            describe("x").description.as_deref(),
            Some("var x ( class Geo.Point )")
        );
        assert_eq!(
            describe("origin").description.as_deref(),
            Some("var origin ( namespace Geo )")
        );
        assert_eq!(
            describe("k").description.as_deref(),
            Some("var k ( function norm )")
        );
    }

    #[test]
    fn test_enclosing_scopes() {
        let tree = SymbolTree::build(&tokenize(
            "namespace N {\n  class C {\n    function f() {\n      var v;\n    }\n  }\n}",
        ));
        let chain: Vec<_> = tree
            .enclosing_scopes(4)
            .into_iter()
            .map(|id| tree[id].name.as_str())
            .collect();
        assert_eq!(chain, vec!["f", "C", "N"]);
        assert!(tree.enclosing_scopes(9).is_empty());
    }

    #[test]
    fn test_find_type_by_name_and_path() {
        let tree = SymbolTree::build(&tokenize("namespace A {\n  class B {\n  }\n}"));
        let b = tree.find_by_name("B").unwrap();
        assert_eq!(tree.find_type("B"), Some(b));
        assert_eq!(tree.find_type("A.B"), Some(b));
        assert_eq!(tree.find_type("C"), None);
    }

    #[test]
    fn test_substring_completions_in_scope() {
        let source = "var total;\nfunction sum(items) {\n  var subtotal = 0;\n  \n}\nvar other;";
        let tokens = tokenize(&format!("{source}\nto"));
        let tree = SymbolTree::build(&tokens);

        // Outside `sum`, only root symbols are offered.
        let index = tokens.len() - 1;
        let found = tree.completions(&TokenCursor::at(&tokens, index));
        assert_eq!(names(&tree, &found), vec!["total"]);

        // Inside `sum`, its locals come first.
        let inside = tokenize("var total;\nfunction sum(items) {\n  var subtotal = 0;\n  to\n}");
        let tree = SymbolTree::build(&inside);
        let index = token_at(&inside, 4, 3).unwrap();
        let found = tree.completions(&TokenCursor::at(&inside, index));
        assert_eq!(names(&tree, &found), vec!["subtotal", "total"]);
    }

    #[test]
    fn test_hover_prefers_innermost_declaration() {
        let tokens = tokenize("var x;\nfunction f(x) {\n  return x;\n}\nx = 1;");
        let tree = SymbolTree::build(&tokens);

        let inner = token_at(&tokens, 3, 9).unwrap();
        let Candidate::Symbol(id) = tree.hover_lookup(&TokenCursor::at(&tokens, inner)) else {
            panic!("expected symbol");
        };
        assert_eq!(tree[id].parent, tree.find_by_name("f"));

        let outer = token_at(&tokens, 5, 0).unwrap();
        let Candidate::Symbol(id) = tree.hover_lookup(&TokenCursor::at(&tokens, outer)) else {
            panic!("expected symbol");
        };
        assert_eq!(tree[id].parent, None);
    }

    #[test]
    fn test_hover_falls_back_to_token() {
        let tokens = tokenize("while (y) {}");
        let tree = SymbolTree::build(&tokens);
        assert_eq!(
            tree.hover_lookup(&TokenCursor::at(&tokens, 0)),
            Candidate::Token(tokens[0].clone())
        );
        assert_eq!(
            tree.hover_lookup(&TokenCursor::at(&tokens, 99)),
            Candidate::Token(LexToken::invalid())
        );
    }
}
