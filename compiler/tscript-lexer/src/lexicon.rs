// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell

//! Static tables of keywords, operators and escape sequences.

use crate::token::TokenKind;

/// Built-in data type names usable in declarations.
pub const DATA_TYPES: &[&str] = &["var"];

/// Reserved words and their kinds.
pub const KEYWORDS: &[(&str, TokenKind)] = &[
    ("null", TokenKind::Null),
    ("if", TokenKind::Keyword),
    ("in", TokenKind::Keyword),
    ("then", TokenKind::Keyword),
    ("else", TokenKind::Keyword),
    ("for", TokenKind::Keyword),
    ("do", TokenKind::Keyword),
    ("while", TokenKind::Keyword),
    ("break", TokenKind::Keyword),
    ("continue", TokenKind::Keyword),
    ("return", TokenKind::Keyword),
    ("try", TokenKind::Keyword),
    ("catch", TokenKind::Keyword),
    ("throw", TokenKind::Keyword),
    ("from", TokenKind::Keyword),
    ("use", TokenKind::Keyword),
    ("as", TokenKind::Keyword),
    ("var", TokenKind::Keyword),
    ("function", TokenKind::Keyword),
    ("class", TokenKind::Keyword),
    ("namespace", TokenKind::Keyword),
    ("constructor", TokenKind::Keyword),
    ("public", TokenKind::Keyword),
    ("protected", TokenKind::Keyword),
    ("private", TokenKind::Keyword),
    ("static", TokenKind::Keyword),
    ("and", TokenKind::Keyword),
    ("or", TokenKind::Keyword),
    ("not", TokenKind::Keyword),
    ("xor", TokenKind::Keyword),
    ("true", TokenKind::Keyword),
    ("false", TokenKind::Keyword),
    ("this", TokenKind::Keyword),
    ("super", TokenKind::Keyword),
];

/// Operators spelled with two characters.
pub const TWO_CHAR_OPERATORS: &[(&str, TokenKind)] = &[
    ("==", TokenKind::EqualTo),
    ("!=", TokenKind::NotEqual),
    ("<=", TokenKind::LessEqual),
    (">=", TokenKind::GreaterEqual),
    ("%=", TokenKind::ModEqual),
    ("/=", TokenKind::DivEqual),
    ("*=", TokenKind::MulEqual),
    ("-=", TokenKind::MinusEqual),
    ("+=", TokenKind::PlusEqual),
    ("&=", TokenKind::AndEqual),
    ("|=", TokenKind::OrEqual),
    ("^=", TokenKind::XorEqual),
    ("&&", TokenKind::AndAnd),
    ("||", TokenKind::OrOr),
    ("--", TokenKind::MinusMinus),
    ("++", TokenKind::PlusPlus),
    ("<<", TokenKind::ShiftLeft),
    (">>", TokenKind::ShiftRight),
];

/// Single-character operators and punctuation.
pub const SINGLE_CHAR_OPERATORS: &[(char, TokenKind)] = &[
    ('+', TokenKind::Plus),
    ('-', TokenKind::Minus),
    ('*', TokenKind::Asterisk),
    ('/', TokenKind::Slash),
    ('%', TokenKind::Modulo),
    ('&', TokenKind::And),
    ('|', TokenKind::Or),
    ('~', TokenKind::Tilde),
    ('^', TokenKind::Caret),
    ('(', TokenKind::ParenthesisOpen),
    (')', TokenKind::ParenthesisClose),
    ('=', TokenKind::EqualSign),
    ('[', TokenKind::BracketOpen),
    (']', TokenKind::BracketClose),
    ('{', TokenKind::BraceOpen),
    ('}', TokenKind::BraceClose),
    ('.', TokenKind::Dot),
    (':', TokenKind::Colon),
    (',', TokenKind::Comma),
    ('<', TokenKind::LessThan),
    ('>', TokenKind::GreaterThan),
    ('"', TokenKind::DoubleQuote),
    ('\'', TokenKind::Quote),
    ('!', TokenKind::ExclamationPoint),
    (';', TokenKind::Semicolon),
];

/// Escape letters recognised after a backslash, and what they stand for.
pub const ESCAPES: &[(char, char)] = &[
    ('a', '\u{07}'),
    ('b', '\u{08}'),
    ('f', '\u{0C}'),
    ('n', '\n'),
    ('r', '\r'),
    ('t', '\t'),
    ('v', '\u{0B}'),
    ('\\', '\\'),
    ('\'', '\''),
    ('"', '"'),
    ('?', '?'),
    ('0', '\0'),
];

/// Look up a reserved word, returning its kind and canonical spelling.
pub fn keyword(lexeme: &str) -> Option<(TokenKind, &'static str)> {
    KEYWORDS
        .iter()
        .find(|(name, _)| *name == lexeme)
        .map(|&(name, kind)| (kind, name))
}

/// Keywords that start with `prefix`, in table order.
pub fn keywords_with_prefix(prefix: &str) -> impl Iterator<Item = &'static str> + '_ {
    KEYWORDS
        .iter()
        .map(|&(name, _)| name)
        .filter(move |name| name.starts_with(prefix))
}

/// Kind of a single-character operator or punctuation mark.
pub fn single_char(c: char) -> Option<TokenKind> {
    SINGLE_CHAR_OPERATORS
        .iter()
        .find(|&&(op, _)| op == c)
        .map(|&(_, kind)| kind)
}

/// Kind of the two-character operator spelled `first` then `second`.
pub fn two_char(first: char, second: char) -> Option<TokenKind> {
    TWO_CHAR_OPERATORS
        .iter()
        .find(|(op, _)| {
            let mut chars = op.chars();
            chars.next() == Some(first) && chars.next() == Some(second)
        })
        .map(|&(_, kind)| kind)
}

/// Resolve the character following a backslash.
pub fn escape(c: char) -> Option<char> {
    ESCAPES
        .iter()
        .find(|&&(letter, _)| letter == c)
        .map(|&(_, resolved)| resolved)
}

/// Whether `lexeme` names a built-in data type.
pub fn is_internal_type(lexeme: &str) -> bool {
    DATA_TYPES.contains(&lexeme)
}

/// Whether `lexeme` is an integer literal: 32-bit decimal, `0x` hex or `0b` binary.
pub fn is_numeric(lexeme: &str) -> bool {
    if lexeme.parse::<i32>().is_ok() {
        return true;
    }
    if let Some(digits) = lexeme
        .strip_prefix("0x")
        .or_else(|| lexeme.strip_prefix("0X"))
    {
        return digits.chars().all(|c| c.is_ascii_hexdigit());
    }
    if let Some(digits) = lexeme
        .strip_prefix("0b")
        .or_else(|| lexeme.strip_prefix("0B"))
    {
        return digits.chars().all(|c| c == '0' || c == '1');
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_lookup() {
        assert_eq!(keyword("null"), Some((TokenKind::Null, "null")));
        assert_eq!(keyword("while"), Some((TokenKind::Keyword, "while")));
        assert_eq!(keyword("While"), None);
        assert_eq!(keyword("foo"), None);
    }

    #[test]
    fn test_keyword_table_has_no_duplicates() {
        let mut names: Vec<_> = KEYWORDS.iter().map(|(name, _)| *name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), KEYWORDS.len());
    }

    #[test]
    fn test_keywords_with_prefix() {
        let found: Vec<_> = keywords_with_prefix("c").collect();
        assert_eq!(found, vec!["continue", "catch", "class", "constructor"]);
        assert_eq!(keywords_with_prefix("zz").count(), 0);
    }

    #[test]
    fn test_operator_tables() {
        assert_eq!(single_char('{'), Some(TokenKind::BraceOpen));
        assert_eq!(single_char('#'), None);
        assert_eq!(two_char('+', '='), Some(TokenKind::PlusEqual));
        assert_eq!(two_char('>', '>'), Some(TokenKind::ShiftRight));
        assert_eq!(two_char('=', '-'), None);
    }

    #[test]
    fn test_escapes() {
        assert_eq!(escape('n'), Some('\n'));
        assert_eq!(escape('0'), Some('\0'));
        assert_eq!(escape('q'), None);
    }

    #[test]
    fn test_is_numeric() {
        assert!(is_numeric("42"));
        assert!(is_numeric("0x1F"));
        assert!(is_numeric("0XfF"));
        assert!(is_numeric("0b1010"));
        assert!(!is_numeric("0b102"));
        assert!(!is_numeric("0xZZ"));
        assert!(!is_numeric("1.5"));
        assert!(!is_numeric("99999999999"));
        assert!(!is_numeric("abc"));
    }

    #[test]
    fn test_internal_types() {
        assert!(is_internal_type("var"));
        assert!(!is_internal_type("int"));
    }
}
