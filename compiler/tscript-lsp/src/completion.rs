// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell

//! Completion requests.

use tower_lsp::lsp_types::{
    CompletionItem, CompletionItemKind, CompletionList, CompletionTextEdit, CompletionTriggerKind,
    Position, Range, TextEdit,
};
use tscript_lexer::{lexicon, LexToken, TokenCursor, TokenKind};
use tscript_symbols::{Candidate, CandidateKind, DottedChain};

use crate::buffer::Buffer;

/// Completion items for `position`, keyword suggestions first.
///
/// A `trigger` of [`CompletionTriggerKind::TRIGGER_CHARACTER`] yields plain
/// insertions; otherwise each item replaces the identifier typed so far.
pub fn completions(
    buffer: &Buffer,
    position: Position,
    trigger: Option<CompletionTriggerKind>,
) -> CompletionList {
    // With nothing under the caret, complete an empty identifier there.
    let probe = [LexToken::new(
        TokenKind::Text,
        "",
        position.line + 1,
        position.character,
    )];
    let cursor = buffer
        .cursor_at(position)
        .unwrap_or_else(|| TokenCursor::new(&probe));
    let token = cursor.current();
    let tree = buffer.tree();

    let mut candidates = Vec::new();
    let dotted = DottedChain::at(&cursor);
    if dotted.is_none() && !token.lexeme.is_empty() {
        candidates.extend(lexicon::keywords_with_prefix(&token.lexeme).map(|keyword| {
            let kind = lexicon::keyword(keyword).map_or(TokenKind::Keyword, |(kind, _)| kind);
            Candidate::Token(LexToken::new(kind, keyword, token.line, token.column))
        }));
    }
    candidates.extend(tree.completions(&cursor));

    let edit_range = if token.kind == TokenKind::Dot {
        Range::new(position, position)
    } else {
        Range::new(Position::new(position.line, token.column), position)
    };
    let plain_insert = trigger == Some(CompletionTriggerKind::TRIGGER_CHARACTER);

    let items: Vec<CompletionItem> = candidates
        .iter()
        .map(|candidate| tree.describe(candidate))
        .filter(|described| match &dotted {
            Some(chain) => described.name.starts_with(chain.partial),
            None => true,
        })
        .map(|described| {
            let label = described.name.to_string();
            let mut item = CompletionItem {
                label: label.clone(),
                kind: Some(item_kind(described.kind)),
                detail: Some(described.type_name.to_string()),
                ..CompletionItem::default()
            };
            if plain_insert {
                item.insert_text = Some(label);
            } else {
                item.text_edit = Some(CompletionTextEdit::Edit(TextEdit::new(edit_range, label)));
            }
            item
        })
        .collect();

    tracing::debug!(
        line = position.line,
        character = position.character,
        count = items.len(),
        "completion"
    );
    CompletionList {
        is_incomplete: items.len() > 1,
        items,
    }
}

fn item_kind(kind: CandidateKind) -> CompletionItemKind {
    match kind {
        CandidateKind::Keyword => CompletionItemKind::KEYWORD,
        CandidateKind::Text => CompletionItemKind::TEXT,
        CandidateKind::Namespace => CompletionItemKind::MODULE,
        CandidateKind::Class => CompletionItemKind::CLASS,
        CandidateKind::Function => CompletionItemKind::FUNCTION,
        CandidateKind::Variable => CompletionItemKind::VARIABLE,
    }
}
