// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell

//! Line-based tokenizer.
//!
//! Source text is scanned one line at a time. A line that fails to scan is
//! logged and dropped as a whole; the remaining lines are still tokenized, so
//! an editor buffer in the middle of being typed always yields a usable
//! token stream.

use crate::error::{LexLineError, LexResult};
use crate::lexicon;
use crate::token::{LexToken, TokenKind, TYPE_DIRECTIVE};

/// Tokenize `source`, logging and skipping lines that fail to scan.
pub fn tokenize(source: &str) -> Vec<LexToken> {
    tokenize_with_errors(source).0
}

/// Tokenize `source`, also returning the errors of every discarded line.
pub fn tokenize_with_errors(source: &str) -> (Vec<LexToken>, Vec<LexLineError>) {
    let mut tokens = Vec::new();
    let mut errors = Vec::new();

    for (index, raw) in source.split('\n').enumerate() {
        let text = raw.strip_suffix('\r').unwrap_or(raw);
        let line = index as u32 + 1;
        let trimmed = text.trim();

        if trimmed.is_empty() {
            continue;
        }

        if trimmed.starts_with('#') {
            if trimmed.contains(TYPE_DIRECTIVE) {
                let column = text.chars().take_while(|c| c.is_whitespace()).count() as u32;
                tokens.push(LexToken::new(TokenKind::Text, trimmed, line, column));
            }
            continue;
        }

        match LineScanner::new(text, line).scan() {
            Ok(line_tokens) => tokens.extend(line_tokens),
            Err(error) => {
                tracing::error!(%error, "discarding unscannable line");
                errors.push(error);
            }
        }
    }

    tracing::trace!(count = tokens.len(), "tokenized buffer");
    (tokens, errors)
}

/// Index of the last token on 1-based `line` whose span contains `column`.
pub fn token_at(tokens: &[LexToken], line: u32, column: u32) -> Option<usize> {
    tokens.iter().rposition(|token| token.contains(line, column))
}

/// Scanner state for a single line.
struct LineScanner {
    chars: Vec<char>,
    line: u32,
    tokens: Vec<LexToken>,
}

impl LineScanner {
    fn new(text: &str, line: u32) -> Self {
        Self {
            chars: text.chars().collect(),
            line,
            tokens: Vec::new(),
        }
    }

    fn scan(mut self) -> LexResult<Vec<LexToken>> {
        let mut in_string = false;
        let mut start = 0;
        let mut pos = 0;

        while pos < self.chars.len() {
            let c = self.chars[pos];

            if in_string {
                if c == '\\' {
                    pos += 2;
                    continue;
                }
                if c == '"' {
                    self.flush(start, pos, true)?;
                    self.push(TokenKind::DoubleQuote, "\"", pos);
                    in_string = false;
                    start = pos + 1;
                }
                pos += 1;
                continue;
            }

            if c.is_whitespace() {
                self.flush(start, pos, false)?;
                start = pos + 1;
            } else if let Some(kind) = lexicon::single_char(c) {
                self.flush(start, pos, false)?;
                if c == '"' {
                    in_string = true;
                    self.push(kind, "\"", pos);
                } else {
                    self.emit_operator(kind, c, pos);
                }
                start = pos + 1;
            }
            pos += 1;
        }

        self.flush(start, self.chars.len(), in_string)?;
        Ok(self.tokens)
    }

    fn push(&mut self, kind: TokenKind, lexeme: &str, column: usize) {
        self.tokens
            .push(LexToken::new(kind, lexeme, self.line, column as u32));
    }

    /// Emit a punctuation token, folding it into the directly preceding
    /// one-character operator when the pair spells a two-character operator.
    fn emit_operator(&mut self, kind: TokenKind, c: char, column: usize) {
        if let Some(previous) = self.tokens.last() {
            let adjacent = previous.column as usize + 1 == column;
            let first = previous.lexeme.chars().next();
            if adjacent && previous.kind.is_single_char_operator() {
                if let Some((first, combined)) =
                    first.and_then(|f| lexicon::two_char(f, c).map(|kind| (f, kind)))
                {
                    let start = previous.column;
                    self.tokens.pop();
                    let lexeme: String = [first, c].iter().collect();
                    self.tokens
                        .push(LexToken::new(combined, lexeme, self.line, start));
                    return;
                }
            }
        }
        let mut buf = [0u8; 4];
        self.push(kind, c.encode_utf8(&mut buf), column);
    }

    /// Classify and emit the buffered characters in `start..end`.
    fn flush(&mut self, start: usize, end: usize, in_string: bool) -> LexResult<()> {
        let end = end.min(self.chars.len());
        if start >= end {
            return Ok(());
        }

        let raw: String = self.chars[start..end].iter().collect();
        let (text, column) = if in_string {
            (raw.as_str(), start)
        } else {
            let leading = raw.chars().take_while(|c| c.is_whitespace()).count();
            (raw.trim(), start + leading)
        };
        if text.is_empty() {
            return Ok(());
        }

        let token = self.classify(text, column as u32)?;
        self.tokens.push(token);
        Ok(())
    }

    fn classify(&self, text: &str, column: u32) -> LexResult<LexToken> {
        let mut chars = text.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            let kind = if c.is_ascii_digit() {
                TokenKind::Number
            } else {
                lexicon::single_char(c).unwrap_or(TokenKind::Text)
            };
            return Ok(LexToken::new(kind, text, self.line, column));
        }

        if let Some((kind, canonical)) = lexicon::keyword(text) {
            return Ok(LexToken::new(kind, canonical, self.line, column));
        }
        if lexicon::is_numeric(text) {
            return Ok(LexToken::new(TokenKind::Number, text, self.line, column));
        }

        let resolved = self.resolve_escapes(text, column)?;
        Ok(LexToken::new(TokenKind::Text, resolved, self.line, column))
    }

    fn resolve_escapes(&self, text: &str, column: u32) -> LexResult<String> {
        if !text.contains('\\') {
            return Ok(text.to_string());
        }

        let mut resolved = String::with_capacity(text.len());
        let mut chars = text.chars().enumerate();
        while let Some((offset, c)) = chars.next() {
            if c != '\\' {
                resolved.push(c);
                continue;
            }
            match chars.next() {
                Some((_, letter)) => match lexicon::escape(letter) {
                    Some(escaped) => resolved.push(escaped),
                    None => {
                        return Err(LexLineError::UnknownEscape {
                            line: self.line,
                            column: column + offset as u32,
                            escape: letter,
                        })
                    }
                },
                None => resolved.push('\\'),
            }
        }
        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).into_iter().map(|t| t.kind).collect()
    }

    fn lexemes(source: &str) -> Vec<String> {
        tokenize(source)
            .into_iter()
            .map(|t| t.lexeme.to_string())
            .collect()
    }

    #[test]
    fn test_simple_declaration() {
        let tokens = tokenize("var x = 5;");
        let expected = [
            (TokenKind::Keyword, "var", 0),
            (TokenKind::Text, "x", 4),
            (TokenKind::EqualSign, "=", 6),
            (TokenKind::Number, "5", 8),
            (TokenKind::Semicolon, ";", 9),
        ];
        assert_eq!(tokens.len(), expected.len());
        for (token, (kind, lexeme, column)) in tokens.iter().zip(expected) {
            assert_eq!(token.kind, kind);
            assert_eq!(token.lexeme, lexeme);
            assert_eq!(token.column, column);
            assert_eq!(token.line, 1);
        }
    }

    #[test]
    fn test_two_char_operator() {
        let tokens = tokenize("a += 1;");
        assert_eq!(
            tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
            vec![
                TokenKind::Text,
                TokenKind::PlusEqual,
                TokenKind::Number,
                TokenKind::Semicolon
            ]
        );
        assert_eq!(tokens[1].lexeme, "+=");
        assert_eq!(tokens[1].column, 2);
    }

    #[test]
    fn test_operators_need_adjacency() {
        assert_eq!(
            kinds("a = = b"),
            vec![
                TokenKind::Text,
                TokenKind::EqualSign,
                TokenKind::EqualSign,
                TokenKind::Text
            ]
        );
        assert_eq!(
            kinds("i+++j"),
            vec![
                TokenKind::Text,
                TokenKind::PlusPlus,
                TokenKind::Plus,
                TokenKind::Text
            ]
        );
        assert_eq!(
            kinds("x=-1"),
            vec![
                TokenKind::Text,
                TokenKind::EqualSign,
                TokenKind::Minus,
                TokenKind::Number
            ]
        );
    }

    #[test]
    fn test_comparisons_and_shifts() {
        assert_eq!(
            kinds("a<=b>>2!=c"),
            vec![
                TokenKind::Text,
                TokenKind::LessEqual,
                TokenKind::Text,
                TokenKind::ShiftRight,
                TokenKind::Number,
                TokenKind::NotEqual,
                TokenKind::Text
            ]
        );
    }

    #[test]
    fn test_dotted_access() {
        assert_eq!(lexemes("foo.bar()"), vec!["foo", ".", "bar", "(", ")"]);
    }

    #[test]
    fn test_string_literal() {
        let tokens = tokenize(r#"var s = "hello world";"#);
        assert_eq!(tokens[3].kind, TokenKind::DoubleQuote);
        assert_eq!(tokens[4].kind, TokenKind::Text);
        assert_eq!(tokens[4].lexeme, "hello world");
        assert_eq!(tokens[4].column, 9);
        assert_eq!(tokens[5].kind, TokenKind::DoubleQuote);
        assert_eq!(tokens[6].kind, TokenKind::Semicolon);
    }

    #[test]
    fn test_string_escapes() {
        let tokens = tokenize(r#"x = "a\tb\"c";"#);
        let content = tokens
            .iter()
            .find(|t| t.kind == TokenKind::Text && t.lexeme != "x")
            .unwrap();
        assert_eq!(content.lexeme, "a\tb\"c");
    }

    #[test]
    fn test_empty_string() {
        assert_eq!(
            kinds(r#"x = "";"#),
            vec![
                TokenKind::Text,
                TokenKind::EqualSign,
                TokenKind::DoubleQuote,
                TokenKind::DoubleQuote,
                TokenKind::Semicolon
            ]
        );
    }

    #[test]
    fn test_unknown_escape_discards_only_that_line() {
        let (tokens, errors) = tokenize_with_errors("var a;\nx = \"bad\\q\";\nvar b;");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].line(), 2);
        assert!(tokens.iter().all(|t| t.line != 2));
        assert_eq!(tokens.iter().filter(|t| t.lexeme == "var").count(), 2);
        assert_eq!(tokens.last().unwrap().line, 3);
    }

    #[test]
    fn test_comments_and_blank_lines() {
        let tokens = tokenize("# a comment\n\n   \nvar a;");
        assert_eq!(tokens.len(), 3);
        assert!(tokens.iter().all(|t| t.line == 4));
    }

    #[test]
    fn test_type_directive_line() {
        let tokens = tokenize("  #type=Vector\nvar v;");
        assert_eq!(tokens[0].kind, TokenKind::Text);
        assert_eq!(tokens[0].lexeme, "#type=Vector");
        assert_eq!(tokens[0].line, 1);
        assert_eq!(tokens[0].column, 2);
        assert_eq!(tokens[0].type_directive(), Some("Vector"));
    }

    #[test]
    fn test_crlf_line_numbers() {
        let tokens = tokenize("var a;\r\nvar b;\r\n");
        assert_eq!(tokens.len(), 6);
        assert_eq!(tokens[3].line, 2);
        assert_eq!(tokens[3].column, 0);
        assert_eq!(tokens[5].lexeme, ";");
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            kinds("0x1F 0b101 42 4x"),
            vec![
                TokenKind::Number,
                TokenKind::Number,
                TokenKind::Number,
                TokenKind::Text
            ]
        );
        assert_eq!(
            kinds("1.5"),
            vec![TokenKind::Number, TokenKind::Dot, TokenKind::Number]
        );
    }

    #[test]
    fn test_null_keyword() {
        assert_eq!(kinds("x = null;")[2], TokenKind::Null);
    }

    #[test]
    fn test_unterminated_string_is_text() {
        let tokens = tokenize("x = \"open  ");
        let last = tokens.last().unwrap();
        assert_eq!(last.kind, TokenKind::Text);
        assert_eq!(last.lexeme, "open  ");
    }

    #[test]
    fn test_token_at() {
        let tokens = tokenize("var x = 5;\nfoo.bar");
        assert_eq!(token_at(&tokens, 1, 4), Some(1));
        assert_eq!(token_at(&tokens, 1, 5), Some(1));
        // `foo` ends where `.` starts; the later token wins.
        assert_eq!(token_at(&tokens, 2, 3), Some(6));
        assert_eq!(token_at(&tokens, 2, 7), Some(7));
        assert_eq!(token_at(&tokens, 3, 0), None);
    }
}
