// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell

//! Positioned cursor over a token slice.
//!
//! Every accessor is total: reads outside the slice yield the shared
//! [`INVALID_TOKEN`] sentinel instead of failing.

use crate::token::{LexToken, TokenKind, INVALID_TOKEN};

/// A cursor over a borrowed token slice.
#[derive(Debug, Clone, Copy)]
pub struct TokenCursor<'a> {
    tokens: &'a [LexToken],
    position: usize,
}

impl<'a> TokenCursor<'a> {
    /// Create a cursor at the start of `tokens`.
    pub fn new(tokens: &'a [LexToken]) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    /// Create a cursor positioned on `tokens[position]`.
    pub fn at(tokens: &'a [LexToken], position: usize) -> Self {
        Self { tokens, position }
    }

    /// The underlying tokens.
    pub fn tokens(&self) -> &'a [LexToken] {
        self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn set_position(&mut self, position: usize) {
        self.position = position;
    }

    /// Whether `next` would return a real token.
    pub fn has_next(&self) -> bool {
        self.position < self.tokens.len()
    }

    /// Return the current token and advance past it.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> &'a LexToken {
        match self.tokens.get(self.position) {
            Some(token) => {
                self.position += 1;
                token
            }
            None => &INVALID_TOKEN,
        }
    }

    /// The token under the cursor.
    pub fn current(&self) -> &'a LexToken {
        self.get(self.position)
    }

    /// The token just before the cursor.
    pub fn last(&self) -> &'a LexToken {
        match self.position.checked_sub(1) {
            Some(index) => self.get(index),
            None => &INVALID_TOKEN,
        }
    }

    /// Step back one token and return the new current token.
    pub fn prev(&mut self) -> &'a LexToken {
        if self.position == 0 {
            return &INVALID_TOKEN;
        }
        self.position -= 1;
        self.current()
    }

    /// The token just after the cursor.
    pub fn peek(&self) -> &'a LexToken {
        self.get(self.position + 1)
    }

    /// Extract the bracketed span opened by the current token.
    ///
    /// The cursor must sit on an `open` token. Tokens are consumed until the
    /// matching `close` (included in the returned span) or until input runs
    /// out. The flag is true when the brackets balanced. Afterwards the cursor
    /// sits just past the last consumed token.
    pub fn sub_range(&mut self, open: TokenKind, close: TokenKind) -> (&'a [LexToken], bool) {
        let start = (self.position + 1).min(self.tokens.len());
        let mut depth = 1usize;
        let mut index = start;

        while depth > 0 && index < self.tokens.len() {
            let kind = self.tokens[index].kind;
            if kind == open {
                depth += 1;
            } else if kind == close {
                depth -= 1;
            }
            index += 1;
        }

        self.position = index;
        (&self.tokens[start..index], depth == 0)
    }

    fn get(&self, index: usize) -> &'a LexToken {
        self.tokens.get(index).unwrap_or(&INVALID_TOKEN)
    }
}
