// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell

//! Symbol records stored in a [`SymbolTree`](crate::SymbolTree) arena.

use la_arena::Idx;
use smol_str::SmolStr;

/// Index of a symbol in its tree's arena.
///
/// Only meaningful against the tree that produced it.
pub type SymbolId = Idx<Symbol>;

/// Member access level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    Public,
    Protected,
    #[default]
    Private,
}

impl Visibility {
    /// Parse an access-modifier keyword.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "public" => Some(Visibility::Public),
            "protected" => Some(Visibility::Protected),
            "private" => Some(Visibility::Private),
            _ => None,
        }
    }
}

/// Inclusive range of 1-based source lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineRange {
    pub start: u32,
    pub end: u32,
}

impl LineRange {
    pub fn new(start: u32, end: u32) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    /// A range covering one line.
    pub fn single(line: u32) -> Self {
        Self::new(line, line)
    }

    pub fn contains(&self, line: u32) -> bool {
        self.start <= line && line <= self.end
    }

    /// Whether `other` lies entirely inside this range.
    pub fn encloses(&self, other: LineRange) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

/// Members declared directly inside a namespace, class or the buffer root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scope {
    pub namespaces: Vec<SymbolId>,
    pub classes: Vec<SymbolId>,
    pub functions: Vec<SymbolId>,
    pub variables: Vec<SymbolId>,
}

impl Scope {
    pub fn is_empty(&self) -> bool {
        self.namespaces.is_empty()
            && self.classes.is_empty()
            && self.functions.is_empty()
            && self.variables.is_empty()
    }
}

/// A function, method or constructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSymbol {
    /// Parameters in declaration order.
    pub parameters: Vec<SymbolId>,
    /// Locals declared in the body.
    pub variables: Vec<SymbolId>,
    pub visibility: Visibility,
    pub is_static: bool,
}

/// A variable, field or parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableSymbol {
    /// Declared type name, possibly a dotted path.
    pub type_name: SmolStr,
    pub visibility: Visibility,
    pub is_static: bool,
}

/// Variant payload of a symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolKind {
    Namespace(Scope),
    /// Classes only ever hold functions and variables.
    Class(Scope),
    Function(FunctionSymbol),
    Variable(VariableSymbol),
}

/// A declared symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub name: SmolStr,
    /// 1-based line of the name token.
    pub line: u32,
    /// 0-based column of the name token.
    pub column: u32,
    /// Enclosing namespace, class or function; `None` at the buffer root.
    pub parent: Option<SymbolId>,
    /// Lines spanned by the declaration, body included.
    pub lines: LineRange,
    pub kind: SymbolKind,
}

impl Symbol {
    /// Whether this symbol has a body that can contain other symbols.
    pub fn is_scope(&self) -> bool {
        !matches!(self.kind, SymbolKind::Variable(_))
    }

    pub fn is_type(&self) -> bool {
        matches!(self.kind, SymbolKind::Namespace(_) | SymbolKind::Class(_))
    }

    /// Visibility of a function or variable; namespaces and classes are public.
    pub fn visibility(&self) -> Visibility {
        match &self.kind {
            SymbolKind::Function(function) => function.visibility,
            SymbolKind::Variable(variable) => variable.visibility,
            SymbolKind::Namespace(_) | SymbolKind::Class(_) => Visibility::Public,
        }
    }

    /// Short type label: `namespace`, `class`, `function` or the variable's type.
    pub fn type_name(&self) -> &str {
        match &self.kind {
            SymbolKind::Namespace(_) => "namespace",
            SymbolKind::Class(_) => "class",
            SymbolKind::Function(_) => "function",
            SymbolKind::Variable(variable) => &variable.type_name,
        }
    }
}
