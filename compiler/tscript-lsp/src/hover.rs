// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell

//! Hover requests.

use tower_lsp::lsp_types::{Hover, HoverContents, MarkupContent, MarkupKind, Position, Range};

use crate::buffer::Buffer;

/// Hover card for the token at `position`, if it has anything to say.
pub fn hover(buffer: &Buffer, position: Position) -> Option<Hover> {
    let cursor = buffer.cursor_at(position)?;
    let token = cursor.current();
    let tree = buffer.tree();

    let described = tree.describe(&tree.hover_lookup(&cursor));
    let description = described.description?;

    let line = token.line.saturating_sub(1);
    Some(Hover {
        contents: HoverContents::Markup(MarkupContent {
            kind: MarkupKind::Markdown,
            value: format!("{} ({})\n\n{}", described.name, described.type_name, description),
        }),
        range: Some(Range::new(
            Position::new(line, token.column),
            Position::new(line, token.end_column()),
        )),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn markup(hover: &Hover) -> &str {
        match &hover.contents {
            HoverContents::Markup(content) => &content.value,
            other => panic!("unexpected hover contents {other:?}"),
        }
    }

    #[test]
    fn test_hover_on_variable() {
        let buffer = Buffer::parse("namespace Net {\n  var port = 80;\n}".to_string());
        let hover = hover(&buffer, Position::new(1, 7)).unwrap();
        assert_eq!(markup(&hover), "port (var)\n\nvar port ( namespace Net )");
        assert_eq!(
            hover.range,
            Some(Range::new(Position::new(1, 6), Position::new(1, 10)))
        );
    }

    #[test]
    fn test_hover_on_keyword_and_number() {
        let buffer = Buffer::parse("while (x) { y = 42; }".to_string());
        let keyword = hover(&buffer, Position::new(0, 1)).unwrap();
        assert_eq!(markup(&keyword), "while (KEYWORD)\n\nInternal Keyword");

        let number = hover(&buffer, Position::new(0, 17)).unwrap();
        assert_eq!(markup(&number), "42 (NUMBER)\n\nNumber");
    }

    #[test]
    fn test_no_hover_on_punctuation_or_whitespace() {
        let buffer = Buffer::parse("a += 1;\n\nb".to_string());
        assert!(hover(&buffer, Position::new(0, 3)).is_none());
        assert!(hover(&buffer, Position::new(1, 0)).is_none());
    }
}
