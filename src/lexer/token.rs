use std::fmt;

use serde::{Deserialize, Serialize};

/// A location in the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Line number (1-indexed)
    pub line: u32,
    /// Column number (1-indexed)
    pub column: u32,
}

impl Position {
    /// Position of the first character of any input
    pub const START: Position = Position { line: 1, column: 1 };

    /// Creates a position
    pub fn new(line: u32, column: u32) -> Self {
        Position { line, column }
    }

    /// Returns the position following `c`
    pub(crate) fn after(self, c: char) -> Self {
        if c == '\n' {
            Position {
                line: self.line.saturating_add(1),
                column: 1,
            }
        } else {
            Position {
                line: self.line,
                column: self.column.saturating_add(1),
            }
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::START
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Source range covered by a token's content, both ends inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// Position of the first character in the token
    pub start: Position,
    /// Position of the last character in the token
    pub end: Position,
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// A single lexical unit
///
/// Tokens are immutable once built by the tokenizer. The `Display`
/// implementation renders the raw content only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    content: String,
    is_string_literal: bool,
    span: Span,
}

impl Token {
    /// Creates a new token with the given properties
    pub fn new(content: impl Into<String>, is_string_literal: bool, span: Span) -> Self {
        Token {
            content: content.into(),
            is_string_literal,
            span,
        }
    }

    /// Raw text of the token, without surrounding quotes for string literals
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Whether this token came from a double-quoted string literal
    pub fn is_string_literal(&self) -> bool {
        self.is_string_literal
    }

    /// Where the token's content sits in the input
    pub fn span(&self) -> Span {
        self.span
    }

    /// Consumes the token, returning its content
    pub fn into_content(self) -> String {
        self.content
    }

    /// Compares content and literal flag, ignoring position
    pub fn same_lexeme(&self, other: &Token) -> bool {
        self.content == other.content && self.is_string_literal == other.is_string_literal
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_advances_column() {
        let pos = Position::START.after('a');
        assert_eq!(pos, Position::new(1, 2));
    }

    #[test]
    fn test_position_newline_resets_column() {
        let pos = Position::new(4, 9).after('\n');
        assert_eq!(pos, Position::new(5, 1));
    }

    #[test]
    fn test_position_saturates_at_limits() {
        let pos = Position::new(u32::MAX, u32::MAX);
        assert_eq!(pos.after('x'), Position::new(u32::MAX, u32::MAX));
        assert_eq!(pos.after('\n'), Position::new(u32::MAX, 1));
    }

    #[test]
    fn test_display_is_content() {
        let span = Span {
            start: Position::START,
            end: Position::new(1, 5),
        };
        let token = Token::new("Hello", true, span);
        assert_eq!(token.to_string(), "Hello");
        assert_eq!(span.to_string(), "1:1-1:5");
    }

    #[test]
    fn test_same_lexeme_ignores_span() {
        let a = Token::new(
            "x",
            false,
            Span {
                start: Position::START,
                end: Position::START,
            },
        );
        let b = Token::new(
            "x",
            false,
            Span {
                start: Position::new(2, 3),
                end: Position::new(2, 3),
            },
        );
        assert!(a.same_lexeme(&b));
        assert_ne!(a, b);
        assert!(!a.same_lexeme(&Token::new("x", true, a.span())));
    }

    #[test]
    fn test_serializes_to_json() {
        let token = Token::new(
            "(",
            false,
            Span {
                start: Position::new(1, 4),
                end: Position::new(1, 4),
            },
        );
        let json = serde_json::to_value(&token).unwrap();
        assert_eq!(json["content"], "(");
        assert_eq!(json["is_string_literal"], false);
        assert_eq!(json["span"]["start"]["column"], 4);
    }
}
