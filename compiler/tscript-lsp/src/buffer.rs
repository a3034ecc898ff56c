// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell

//! In-memory store of open buffers.
//!
//! Each update retokenizes the whole text and rebuilds its symbol tree into a
//! new immutable [`Buffer`], which then replaces the previous one in a single
//! map write. Readers holding an `Arc<Buffer>` keep a consistent snapshot.

use std::sync::Arc;

use dashmap::DashMap;
use tower_lsp::lsp_types::{Position, Range};
use tscript_lexer::{token_at, tokenize, LexToken, TokenCursor};
use tscript_symbols::SymbolTree;

use crate::position::splice;

/// One parsed generation of a buffer.
#[derive(Debug, Default)]
pub struct Buffer {
    text: String,
    tokens: Vec<LexToken>,
    tree: SymbolTree,
}

impl Buffer {
    /// Tokenize `text` and build its symbol tree.
    pub fn parse(text: String) -> Self {
        let tokens = tokenize(&text);
        let tree = SymbolTree::build(&tokens);
        Self { text, tokens, tree }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tokens(&self) -> &[LexToken] {
        &self.tokens
    }

    pub fn tree(&self) -> &SymbolTree {
        &self.tree
    }

    /// Index of the token under an LSP position.
    pub fn token_index(&self, position: Position) -> Option<usize> {
        token_at(&self.tokens, position.line + 1, position.character)
    }

    /// A cursor on the token under an LSP position.
    pub fn cursor_at(&self, position: Position) -> Option<TokenCursor<'_>> {
        self.token_index(position)
            .map(|index| TokenCursor::at(&self.tokens, index))
    }
}

/// Open buffers keyed by document path or URI.
#[derive(Debug, Default)]
pub struct BufferStore {
    buffers: DashMap<String, Arc<Buffer>>,
}

impl BufferStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole text of `path`.
    pub fn update_full(&self, path: &str, text: String) -> Arc<Buffer> {
        let buffer = Arc::new(Buffer::parse(text));
        self.buffers.insert(path.to_string(), Arc::clone(&buffer));
        tracing::debug!(path, symbols = buffer.tree().len(), "replaced buffer");
        buffer
    }

    /// Replace `range` of `path` with `new_text`. An unknown path starts empty.
    ///
    /// The entry stays locked from reading the old text until the new
    /// generation is stored, so edits to one path apply in order.
    pub fn update_range(&self, path: &str, new_text: &str, range: Range) -> Arc<Buffer> {
        let mut entry = self
            .buffers
            .entry(path.to_string())
            .or_insert_with(|| Arc::new(Buffer::default()));

        let text = splice(entry.text(), range, new_text);
        let buffer = Arc::new(Buffer::parse(text));
        *entry = Arc::clone(&buffer);
        tracing::debug!(path, symbols = buffer.tree().len(), "patched buffer");
        buffer
    }

    /// The latest generation of `path`.
    pub fn get(&self, path: &str) -> Option<Arc<Buffer>> {
        self.buffers.get(path).map(|entry| Arc::clone(entry.value()))
    }

    pub fn remove(&self, path: &str) -> Option<Arc<Buffer>> {
        self.buffers.remove(path).map(|(_, buffer)| buffer)
    }

    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }
}
