// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell

//! Lexer for the TScript scripting language.
//!
//! This crate turns TScript source text into positioned tokens and provides
//! a cursor for walking them. The tokenizer handles:
//!
//! - Keywords, identifiers and integer literals (decimal, `0x`, `0b`)
//! - Double-quoted strings with backslash escapes
//! - One- and two-character operators
//! - `#` comment lines and the `#type=<Name>` type-override directive
//!
//! Tokenizing never fails as a whole: a line that cannot be scanned is
//! logged and skipped.

pub mod cursor;
pub mod error;
pub mod lexicon;
pub mod token;
pub mod tokenizer;

pub use cursor::TokenCursor;
pub use error::{LexLineError, LexResult};
pub use token::{LexToken, TokenKind, INVALID_TOKEN, TYPE_DIRECTIVE};
pub use tokenizer::{token_at, tokenize, tokenize_with_errors};
