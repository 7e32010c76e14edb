//! Character classes recognised by the lexer rules
//!
//! Classes are plain predicates over a single character. Only ASCII sets are
//! recognised; everything else falls through to the single-character rule.

/// Predicate over one lookahead character
pub type CharClass = fn(char) -> bool;

/// Insignificant whitespace: space, tab, newline
pub fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n')
}

/// First character of an identifier: `[A-Za-z_]`
pub fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Remaining characters of an identifier: `[A-Za-z0-9_]`
pub fn is_identifier_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// String literal delimiter
pub fn is_quote(c: char) -> bool {
    c == '"'
}

/// Anything inside a string literal
pub fn is_not_quote(c: char) -> bool {
    c != '"'
}

/// Matches every character
pub fn any(_: char) -> bool {
    true
}
