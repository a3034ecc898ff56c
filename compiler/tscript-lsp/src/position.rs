// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell

//! Conversions between LSP positions and byte offsets.
//!
//! Lines end in `\n` or `\r\n`; columns count characters.

use tower_lsp::lsp_types::{Position, Range};

/// Byte offset of `position` in `text`.
///
/// Columns past the end of a line clamp to the line end, lines past the end
/// of the text clamp to the text end.
pub fn offset_at(text: &str, position: Position) -> usize {
    let mut offset = 0;

    for (index, line) in text.split_inclusive('\n').enumerate() {
        if index as u32 == position.line {
            let content = line.strip_suffix('\n').unwrap_or(line);
            let content = content.strip_suffix('\r').unwrap_or(content);
            let column = content
                .char_indices()
                .nth(position.character as usize)
                .map_or(content.len(), |(byte, _)| byte);
            return offset + column;
        }
        offset += line.len();
    }

    text.len()
}

/// LSP position of byte `offset` in `text`.
pub fn position_at(text: &str, offset: usize) -> Position {
    let mut offset = offset.min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }

    let before = &text[..offset];
    let line = before.matches('\n').count();
    let line_start = before.rfind('\n').map_or(0, |newline| newline + 1);
    let character = before[line_start..].chars().count();
    Position::new(line as u32, character as u32)
}

/// `text` with `range` replaced by `new_text`.
pub fn splice(text: &str, range: Range, new_text: &str) -> String {
    let start = offset_at(text, range.start);
    let end = offset_at(text, range.end).max(start);

    let mut spliced = String::with_capacity(text.len() - (end - start) + new_text.len());
    spliced.push_str(&text[..start]);
    spliced.push_str(new_text);
    spliced.push_str(&text[end..]);
    spliced
}
