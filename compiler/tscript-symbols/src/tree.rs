// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell

//! The per-buffer symbol tree.

use std::ops::Index;

use la_arena::Arena;
use tscript_lexer::LexToken;

use crate::builder::Builder;
use crate::error::BuildError;
use crate::symbol::{Scope, Symbol, SymbolId, SymbolKind};

/// All symbols declared in one buffer.
///
/// A tree is built once from a token stream and never mutated afterwards;
/// edits produce a fresh tree.
#[derive(Debug, Clone, Default)]
pub struct SymbolTree {
    pub(crate) arena: Arena<Symbol>,
    pub(crate) root: Scope,
    pub(crate) errors: Vec<BuildError>,
}

/// Borrowed view of the members declared directly in one scope.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScopeView<'t> {
    pub namespaces: &'t [SymbolId],
    pub classes: &'t [SymbolId],
    pub functions: &'t [SymbolId],
    /// Function parameters; empty for other scopes.
    pub parameters: &'t [SymbolId],
    pub variables: &'t [SymbolId],
}

impl<'t> ScopeView<'t> {
    fn of(scope: &'t Scope) -> Self {
        Self {
            namespaces: &scope.namespaces,
            classes: &scope.classes,
            functions: &scope.functions,
            parameters: &[],
            variables: &scope.variables,
        }
    }

    /// Members that may contain further symbols: functions, classes, namespaces.
    pub fn scopes(&self) -> impl Iterator<Item = SymbolId> + 't {
        self.functions
            .iter()
            .chain(self.classes)
            .chain(self.namespaces)
            .copied()
    }

    /// Every member in name-lookup order: parameters, variables, functions,
    /// classes, namespaces.
    pub fn lookup_order(&self) -> impl Iterator<Item = SymbolId> + 't {
        self.parameters
            .iter()
            .chain(self.variables)
            .chain(self.functions)
            .chain(self.classes)
            .chain(self.namespaces)
            .copied()
    }

    /// Every member in completion order: namespaces, classes, functions,
    /// parameters, variables.
    pub fn completion_order(&self) -> impl Iterator<Item = SymbolId> + 't {
        self.namespaces
            .iter()
            .chain(self.classes)
            .chain(self.functions)
            .chain(self.parameters)
            .chain(self.variables)
            .copied()
    }
}

impl SymbolTree {
    /// Build the tree for a token stream. Never fails.
    pub fn build(tokens: &[LexToken]) -> Self {
        Builder::new().build(tokens)
    }

    /// Members declared at the buffer root.
    pub fn root(&self) -> &Scope {
        &self.root
    }

    pub fn get(&self, id: SymbolId) -> &Symbol {
        &self.arena[id]
    }

    /// All symbols in declaration order, parents before children.
    pub fn iter(&self) -> impl Iterator<Item = (SymbolId, &Symbol)> + '_ {
        self.arena.iter()
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.len() == 0
    }

    /// Problems found while building; each affected scope was left empty.
    pub fn errors(&self) -> &[BuildError] {
        &self.errors
    }

    /// Members declared directly in `scope`, or at the root for `None`.
    pub fn scope(&self, scope: Option<SymbolId>) -> ScopeView<'_> {
        let Some(id) = scope else {
            return ScopeView::of(&self.root);
        };
        match &self.arena[id].kind {
            SymbolKind::Namespace(members) | SymbolKind::Class(members) => ScopeView::of(members),
            SymbolKind::Function(function) => ScopeView {
                parameters: &function.parameters,
                variables: &function.variables,
                ..ScopeView::default()
            },
            SymbolKind::Variable(_) => ScopeView::default(),
        }
    }

    /// Dotted path through enclosing namespaces and classes, e.g. `Geo.Point`.
    pub fn full_path(&self, id: SymbolId) -> String {
        let symbol = &self.arena[id];
        match symbol.parent {
            Some(parent) if self.arena[parent].is_type() => {
                format!("{}.{}", self.full_path(parent), symbol.name)
            }
            _ => symbol.name.to_string(),
        }
    }

    /// Find the first symbol with `name`, anywhere in the tree.
    pub fn find_by_name(&self, name: &str) -> Option<SymbolId> {
        self.arena
            .iter()
            .find(|(_, symbol)| symbol.name == name)
            .map(|(id, _)| id)
    }
}

impl Index<SymbolId> for SymbolTree {
    type Output = Symbol;

    fn index(&self, id: SymbolId) -> &Symbol {
        &self.arena[id]
    }
}
