// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell

//! Recursive-descent construction of a [`SymbolTree`] from tokens.
//!
//! The builder is total. It only recognises declarations and ignores every
//! other token, so statements and expressions pass through untouched. A
//! scope whose brackets never close is logged and recorded without members.

use la_arena::Arena;
use rustc_hash::FxHashSet;
use smol_str::SmolStr;
use tscript_lexer::{lexicon, LexToken, TokenCursor, TokenKind};

use crate::error::BuildError;
use crate::symbol::{
    FunctionSymbol, LineRange, Scope, Symbol, SymbolId, SymbolKind, VariableSymbol, Visibility,
};
use crate::tree::SymbolTree;

/// Type given to parameters declared without one.
const DEFAULT_PARAMETER_TYPE: &str = "var";

/// Which body is being scanned; decides the declarations it may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScopeKind {
    Root,
    Namespace,
    Class,
    Function,
}

impl ScopeKind {
    fn allows_functions(self) -> bool {
        !matches!(self, ScopeKind::Function)
    }

    fn allows_types(self) -> bool {
        matches!(self, ScopeKind::Root | ScopeKind::Namespace)
    }
}

/// Access state carried through one class body.
#[derive(Debug, Default)]
struct Access {
    visibility: Visibility,
    next_static: bool,
}

impl Access {
    fn take_static(&mut self) -> bool {
        std::mem::take(&mut self.next_static)
    }
}

pub(crate) struct Builder {
    arena: Arena<Symbol>,
    class_names: FxHashSet<SmolStr>,
    pending_type: Option<SmolStr>,
    errors: Vec<BuildError>,
}

impl Builder {
    pub(crate) fn new() -> Self {
        Self {
            arena: Arena::default(),
            class_names: FxHashSet::default(),
            pending_type: None,
            errors: Vec::new(),
        }
    }

    pub(crate) fn build(mut self, tokens: &[LexToken]) -> SymbolTree {
        let mut cursor = TokenCursor::new(tokens);
        let root = self.scan(&mut cursor, None, ScopeKind::Root);
        tracing::debug!(
            symbols = self.arena.len(),
            errors = self.errors.len(),
            "built symbol tree"
        );
        SymbolTree {
            arena: self.arena,
            root,
            errors: self.errors,
        }
    }

    /// Scan one body, returning the members declared directly in it.
    fn scan(&mut self, cursor: &mut TokenCursor<'_>, owner: Option<SymbolId>, kind: ScopeKind) -> Scope {
        let mut members = Scope::default();
        let mut access = Access::default();

        while cursor.has_next() {
            let token = cursor.next();

            if let Some(type_name) = token.type_directive() {
                self.pending_type = Some(SmolStr::new(type_name));
                continue;
            }

            if self.is_declared_type(token, kind) {
                if let Some(id) = self.variable(cursor, token, owner, &mut access) {
                    members.variables.push(id);
                }
                continue;
            }

            if token.kind != TokenKind::Keyword {
                continue;
            }

            match token.lexeme.as_str() {
                "function" if kind.allows_functions() => {
                    let name = cursor.next();
                    if name.kind == TokenKind::Text {
                        members
                            .functions
                            .push(self.function(cursor, name, owner, &mut access));
                    }
                }
                "constructor" if kind == ScopeKind::Class => {
                    members
                        .functions
                        .push(self.function(cursor, token, owner, &mut access));
                }
                "class" if kind.allows_types() => {
                    if let Some(id) = self.container(cursor, owner, ScopeKind::Class) {
                        members.classes.push(id);
                    }
                }
                "namespace" if kind.allows_types() => {
                    if let Some(id) = self.container(cursor, owner, ScopeKind::Namespace) {
                        members.namespaces.push(id);
                    }
                }
                "static" if kind == ScopeKind::Class => access.next_static = true,
                modifier if kind == ScopeKind::Class => {
                    if let Some(visibility) = Visibility::from_keyword(modifier) {
                        access.visibility = visibility;
                        if cursor.current().kind == TokenKind::Colon {
                            cursor.next();
                        }
                    }
                }
                _ => {}
            }
        }

        members
    }

    /// Whether `token` starts a typed declaration in a `kind` body.
    fn is_declared_type(&self, token: &LexToken, kind: ScopeKind) -> bool {
        lexicon::is_internal_type(&token.lexeme)
            || (kind == ScopeKind::Function
                && token.kind == TokenKind::Text
                && self.class_names.contains(&token.lexeme))
    }

    /// Parse `<type> <name> [<annotation>] (= | ;)` after the type token.
    fn variable(
        &mut self,
        cursor: &mut TokenCursor<'_>,
        type_token: &LexToken,
        owner: Option<SymbolId>,
        access: &mut Access,
    ) -> Option<SymbolId> {
        let mut type_name = self.pending_type.take();

        let name = cursor.next();
        if name.kind != TokenKind::Text {
            return None;
        }

        let mut terminator = cursor.current();
        if terminator.kind == TokenKind::Text
            && matches!(cursor.peek().kind, TokenKind::EqualSign | TokenKind::Semicolon)
        {
            if type_name.is_none() {
                type_name = Some(terminator.lexeme.clone());
            }
            cursor.next();
            terminator = cursor.current();
        }
        if !matches!(terminator.kind, TokenKind::EqualSign | TokenKind::Semicolon) {
            tracing::trace!(name = %name.lexeme, line = name.line, "skipping incomplete declaration");
            return None;
        }

        let variable = VariableSymbol {
            type_name: type_name.unwrap_or_else(|| type_token.lexeme.clone()),
            visibility: access.visibility,
            is_static: access.take_static(),
        };
        Some(self.alloc(name, owner, SymbolKind::Variable(variable)))
    }

    /// Parse a function or constructor whose name token has been consumed.
    fn function(
        &mut self,
        cursor: &mut TokenCursor<'_>,
        name: &LexToken,
        owner: Option<SymbolId>,
        access: &mut Access,
    ) -> SymbolId {
        let function = FunctionSymbol {
            parameters: Vec::new(),
            variables: Vec::new(),
            visibility: access.visibility,
            is_static: access.take_static(),
        };
        let id = self.alloc(name, owner, SymbolKind::Function(function));

        if cursor.current().kind != TokenKind::ParenthesisOpen {
            return id;
        }
        let (window, balanced) =
            cursor.sub_range(TokenKind::ParenthesisOpen, TokenKind::ParenthesisClose);
        if !balanced {
            self.unbalanced("function", name, TokenKind::ParenthesisOpen);
            return id;
        }
        let parameters = self.parameters(window, id);
        self.close(id, window);

        let mut variables = Vec::new();
        if cursor.current().kind == TokenKind::BraceOpen {
            let (body, balanced) = cursor.sub_range(TokenKind::BraceOpen, TokenKind::BraceClose);
            if balanced {
                variables = self
                    .scan(&mut TokenCursor::new(body), Some(id), ScopeKind::Function)
                    .variables;
                self.close(id, body);
            } else {
                self.unbalanced("function", name, TokenKind::BraceOpen);
            }
        }

        if let SymbolKind::Function(function) = &mut self.arena[id].kind {
            function.parameters = parameters;
            function.variables = variables;
        }
        id
    }

    /// Split a parameter window (closing parenthesis included) into parameters.
    fn parameters(&mut self, window: &[LexToken], function: SymbolId) -> Vec<SymbolId> {
        let mut segments = Vec::new();
        let mut depth = 0usize;
        let mut start = 0;

        for (index, token) in window.iter().enumerate() {
            match token.kind {
                TokenKind::ParenthesisOpen | TokenKind::BracketOpen | TokenKind::BraceOpen => {
                    depth += 1
                }
                TokenKind::ParenthesisClose | TokenKind::BracketClose | TokenKind::BraceClose
                    if depth > 0 =>
                {
                    depth -= 1
                }
                TokenKind::Comma | TokenKind::ParenthesisClose if depth == 0 => {
                    segments.push(&window[start..index]);
                    start = index + 1;
                }
                _ => {}
            }
        }

        let mut parameters = Vec::new();
        for segment in segments {
            // Anything from `=` on is a default value.
            let declarator: Vec<&LexToken> = segment
                .iter()
                .take_while(|token| token.kind != TokenKind::EqualSign)
                .collect();
            let Some((name, rest)) = declarator.split_last() else {
                continue;
            };
            if name.kind != TokenKind::Text {
                continue;
            }
            let type_name = rest
                .last()
                .map(|token| token.lexeme.clone())
                .unwrap_or_else(|| SmolStr::new_inline(DEFAULT_PARAMETER_TYPE));
            let variable = VariableSymbol {
                type_name,
                visibility: Visibility::default(),
                is_static: false,
            };
            parameters.push(self.alloc(name, Some(function), SymbolKind::Variable(variable)));
        }
        parameters
    }

    /// Parse a class or namespace after its keyword.
    fn container(
        &mut self,
        cursor: &mut TokenCursor<'_>,
        owner: Option<SymbolId>,
        kind: ScopeKind,
    ) -> Option<SymbolId> {
        let name = cursor.next();
        if name.kind != TokenKind::Text {
            return None;
        }

        let (label, symbol_kind) = if kind == ScopeKind::Class {
            self.class_names.insert(name.lexeme.clone());
            ("class", SymbolKind::Class(Scope::default()))
        } else {
            ("namespace", SymbolKind::Namespace(Scope::default()))
        };
        let id = self.alloc(name, owner, symbol_kind);

        if cursor.current().kind != TokenKind::BraceOpen {
            return Some(id);
        }
        let (body, balanced) = cursor.sub_range(TokenKind::BraceOpen, TokenKind::BraceClose);
        if !balanced {
            self.unbalanced(label, name, TokenKind::BraceOpen);
            return Some(id);
        }

        let members = self.scan(&mut TokenCursor::new(body), Some(id), kind);
        self.close(id, body);
        match &mut self.arena[id].kind {
            SymbolKind::Class(scope) | SymbolKind::Namespace(scope) => *scope = members,
            SymbolKind::Function(_) | SymbolKind::Variable(_) => {}
        }
        Some(id)
    }

    fn alloc(&mut self, name: &LexToken, parent: Option<SymbolId>, kind: SymbolKind) -> SymbolId {
        self.arena.alloc(Symbol {
            name: name.lexeme.clone(),
            line: name.line,
            column: name.column,
            parent,
            lines: LineRange::single(name.line),
            kind,
        })
    }

    /// Extend a scope's line range to the closing token of `body`.
    fn close(&mut self, id: SymbolId, body: &[LexToken]) {
        if let Some(close) = body.last() {
            let symbol = &mut self.arena[id];
            symbol.lines = LineRange::new(symbol.line, close.line);
        }
    }

    fn unbalanced(&mut self, scope: &'static str, name: &LexToken, open: TokenKind) {
        let error = BuildError::UnbalancedBrackets {
            scope,
            name: name.lexeme.clone(),
            line: name.line,
            open,
        };
        tracing::warn!(%error, "recording scope without members");
        self.errors.push(error);
    }
}
