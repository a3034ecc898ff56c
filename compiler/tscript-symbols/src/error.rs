// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell

//! Symbol tree construction errors.
//!
//! Building a tree never fails; these are logged and kept on the tree so
//! callers can inspect why a scope came out empty.

use smol_str::SmolStr;
use thiserror::Error;
use tscript_lexer::TokenKind;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("unbalanced {open} in {scope} `{name}` declared on line {line}")]
    UnbalancedBrackets {
        scope: &'static str,
        name: SmolStr,
        line: u32,
        open: TokenKind,
    },
}
