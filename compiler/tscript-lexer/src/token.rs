// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell

//! Token kinds and positioned tokens.

use std::fmt;

use smol_str::SmolStr;

/// Token kinds produced by the tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Sentinel kind for "no token".
    Invalid,
    /// Decimal, hexadecimal (`0x`) or binary (`0b`) integer literal.
    Number,
    /// A reserved word other than `null`.
    Keyword,
    /// Identifiers, string contents and anything unclassified.
    Text,
    /// The `null` literal.
    Null,

    // === Punctuation ===
    Dot,
    Colon,
    Comma,
    ParenthesisOpen,
    ParenthesisClose,
    BracketOpen,
    BracketClose,
    BraceOpen,
    BraceClose,
    ExclamationPoint,
    Semicolon,
    Quote,
    DoubleQuote,

    // === Single-character operators ===
    Plus,
    Minus,
    Asterisk,
    Slash,
    Modulo,
    And,
    Or,
    Tilde,
    Caret,
    EqualSign,
    LessThan,
    GreaterThan,

    // === Two-character operators ===
    EqualTo,
    NotEqual,
    LessEqual,
    GreaterEqual,
    ModEqual,
    DivEqual,
    MulEqual,
    MinusEqual,
    PlusEqual,
    AndEqual,
    OrEqual,
    XorEqual,
    AndAnd,
    OrOr,
    MinusMinus,
    PlusPlus,
    ShiftLeft,
    ShiftRight,
}

impl TokenKind {
    /// Upper-case display name, shown as the type of a raw token on hover.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Invalid => "INVALID",
            TokenKind::Number => "NUMBER",
            TokenKind::Keyword => "KEYWORD",
            TokenKind::Text => "TEXT",
            TokenKind::Null => "NULL",
            TokenKind::Dot => "DOT",
            TokenKind::Colon => "COLON",
            TokenKind::Comma => "COMMA",
            TokenKind::ParenthesisOpen => "PARENTHESISOPEN",
            TokenKind::ParenthesisClose => "PARENTHESISCLOSE",
            TokenKind::BracketOpen => "BRACKETOPEN",
            TokenKind::BracketClose => "BRACKETCLOSE",
            TokenKind::BraceOpen => "CURLYBRACKETOPEN",
            TokenKind::BraceClose => "CURLYBRACKETCLOSE",
            TokenKind::ExclamationPoint => "EXCLAMATIONPOINT",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Quote => "QUOTE",
            TokenKind::DoubleQuote => "DOUBLEQUOTE",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Asterisk => "ASTERISK",
            TokenKind::Slash => "SLASH",
            TokenKind::Modulo => "MODULO",
            TokenKind::And => "AND",
            TokenKind::Or => "OR",
            TokenKind::Tilde => "TILDE",
            TokenKind::Caret => "CARET",
            TokenKind::EqualSign => "EQUALSIGN",
            TokenKind::LessThan => "LESSTHAN",
            TokenKind::GreaterThan => "GREATERTHAN",
            TokenKind::EqualTo => "EQUALTO",
            TokenKind::NotEqual => "NOTEQUAL",
            TokenKind::LessEqual => "LESSEQUAL",
            TokenKind::GreaterEqual => "GREATEREQUAL",
            TokenKind::ModEqual => "MODEQUAL",
            TokenKind::DivEqual => "DIVEQUAL",
            TokenKind::MulEqual => "MULEQUAL",
            TokenKind::MinusEqual => "MINUSEQUAL",
            TokenKind::PlusEqual => "PLUSEQUAL",
            TokenKind::AndEqual => "ANDEQUAL",
            TokenKind::OrEqual => "OREQUAL",
            TokenKind::XorEqual => "XOREQUAL",
            TokenKind::AndAnd => "ANDAND",
            TokenKind::OrOr => "OROR",
            TokenKind::MinusMinus => "MINUSMINUS",
            TokenKind::PlusPlus => "PLUSPLUS",
            TokenKind::ShiftLeft => "BITSHIFTLEFT",
            TokenKind::ShiftRight => "BITSHIFTRIGHT",
        }
    }

    /// Whether this kind is a one-character operator or punctuation mark
    /// that may combine with the next character into a two-character operator.
    pub fn is_single_char_operator(self) -> bool {
        matches!(
            self,
            TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::Asterisk
                | TokenKind::Slash
                | TokenKind::Modulo
                | TokenKind::And
                | TokenKind::Or
                | TokenKind::Caret
                | TokenKind::EqualSign
                | TokenKind::LessThan
                | TokenKind::GreaterThan
                | TokenKind::ExclamationPoint
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A token with its position in the source.
///
/// Lines are 1-based; columns are 0-based character offsets within the line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LexToken {
    /// The kind of this token.
    pub kind: TokenKind,
    /// The canonical text of this token (escapes resolved for strings).
    pub lexeme: SmolStr,
    /// 1-based line number.
    pub line: u32,
    /// 0-based starting column.
    pub column: u32,
}

/// Shared sentinel returned by out-of-range cursor accesses.
pub static INVALID_TOKEN: LexToken = LexToken::invalid();

/// Prefix of the type-override directive line.
pub const TYPE_DIRECTIVE: &str = "#type=";

impl LexToken {
    /// Create a new token.
    pub fn new(kind: TokenKind, lexeme: impl Into<SmolStr>, line: u32, column: u32) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            line,
            column,
        }
    }

    /// The "no token" sentinel.
    pub const fn invalid() -> Self {
        Self {
            kind: TokenKind::Invalid,
            lexeme: SmolStr::new_inline(""),
            line: u32::MIN,
            column: u32::MIN,
        }
    }

    /// Returns true for the sentinel.
    pub fn is_invalid(&self) -> bool {
        self.kind == TokenKind::Invalid
    }

    /// Column just past the last character of the lexeme.
    pub fn end_column(&self) -> u32 {
        self.column + self.lexeme.chars().count() as u32
    }

    /// Whether the 1-based `line` and `column` fall on this token,
    /// end column included.
    pub fn contains(&self, line: u32, column: u32) -> bool {
        self.line == line && self.column <= column && column <= self.end_column()
    }

    /// The type named by a `#type=<X>` directive token, if this is one.
    pub fn type_directive(&self) -> Option<&str> {
        if self.kind != TokenKind::Text {
            return None;
        }
        let start = self.lexeme.find(TYPE_DIRECTIVE)? + TYPE_DIRECTIVE.len();
        let value = self.lexeme[start..].split_whitespace().next()?;
        Some(value)
    }
}

impl Default for LexToken {
    fn default() -> Self {
        Self::invalid()
    }
}

impl fmt::Display for LexToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} `{}` at {}:{}", self.kind, self.lexeme, self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_column_counts_chars() {
        let token = LexToken::new(TokenKind::Text, "héllo", 3, 4);
        assert_eq!(token.end_column(), 9);
    }

    #[test]
    fn test_contains_is_inclusive() {
        let token = LexToken::new(TokenKind::Text, "abc", 2, 4);
        assert!(token.contains(2, 4));
        assert!(token.contains(2, 7));
        assert!(!token.contains(2, 8));
        assert!(!token.contains(1, 5));
    }

    #[test]
    fn test_sentinel_never_matches_real_line() {
        assert!(INVALID_TOKEN.is_invalid());
        assert!(!INVALID_TOKEN.contains(1, 0));
        assert_eq!(LexToken::default(), INVALID_TOKEN);
    }

    #[test]
    fn test_type_directive() {
        let token = LexToken::new(TokenKind::Text, "#type=Vector", 1, 0);
        assert_eq!(token.type_directive(), Some("Vector"));

        let commented = LexToken::new(TokenKind::Text, "# hint #type=Math.Matrix", 1, 0);
        assert_eq!(commented.type_directive(), Some("Math.Matrix"));

        let plain = LexToken::new(TokenKind::Text, "Vector", 1, 0);
        assert_eq!(plain.type_directive(), None);

        let empty = LexToken::new(TokenKind::Text, "#type=", 1, 0);
        assert_eq!(empty.type_directive(), None);
    }
}
