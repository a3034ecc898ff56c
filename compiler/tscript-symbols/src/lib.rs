// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell

//! Symbol tables for TScript buffers.
//!
//! A [`SymbolTree`] is built from the token stream of one buffer. It records
//! namespaces, classes, functions and variables in an arena, each with the
//! lines its declaration spans, and answers the position-based completion and
//! hover queries an editor needs.
//!
//! ```
//! use tscript_lexer::tokenize;
//! use tscript_symbols::SymbolTree;
//!
//! let tree = SymbolTree::build(&tokenize("namespace Geo {\n  class Point {}\n}"));
//! let point = tree.find_type("Geo.Point").unwrap();
//! assert_eq!(tree.full_path(point), "Geo.Point");
//! ```

mod builder;
pub mod error;
pub mod resolve;
pub mod symbol;
pub mod tree;

pub use error::BuildError;
pub use resolve::{Candidate, CandidateKind, Description, DottedChain};
pub use symbol::{
    FunctionSymbol, LineRange, Scope, Symbol, SymbolId, SymbolKind, VariableSymbol, Visibility,
};
pub use tree::{ScopeView, SymbolTree};
