// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell

//! Tokenizer error types.

use thiserror::Error;

/// Result type for scanning a single line.
pub type LexResult<T> = Result<T, LexLineError>;

/// An error that aborts scanning of one source line.
///
/// The tokenizer logs these and drops the offending line's tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexLineError {
    #[error("line {line}: unknown escape sequence `\\{escape}` at column {column}")]
    UnknownEscape {
        line: u32,
        column: u32,
        escape: char,
    },
}

impl LexLineError {
    /// The 1-based line the error occurred on.
    pub fn line(&self) -> u32 {
        match self {
            LexLineError::UnknownEscape { line, .. } => *line,
        }
    }
}
