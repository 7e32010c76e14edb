//! # Sanity Lex - incremental lexer for the Sanity language
//!
//! Turns source text into a lazy sequence of tokens. Characters are pulled
//! one at a time from a character source and tokens are produced one per
//! pull, so neither the input nor the output is ever held in memory whole.
//!
//! ## Quick Start
//!
//! ```rust
//! use sanity_lex::{tokenize, PullSequence, Step};
//!
//! let chars = PullSequence::from_iter("print(\"hi\")".chars());
//! let mut tokens = tokenize(chars);
//!
//! let mut contents = Vec::new();
//! while let Step::Value(token) = tokens.next() {
//!     contents.push(token.content().to_string());
//! }
//! assert_eq!(contents, ["print", "(", "hi", ")"]);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Character source → PullSequence<char> → Tokenizer (driven by Lexer rules) → PullSequence<Token>
//! ```
//!
//! - [`PullSequence`] - single-pass lazy sequence over a [`Pull`] producer
//! - [`Tokenizer`] - accumulates characters and finalizes tokens
//! - [`Lexer`] - the ordered rule list that drives a tokenizer
//! - [`ReaderChars`] - UTF-8 character source over any buffered reader
//!
//! ## Grammar
//!
//! Rules are tried in this order on every pull:
//!
//! 1. Space, tab and newline are skipped.
//! 2. `[A-Za-z_][A-Za-z0-9_]*` is an identifier.
//! 3. `"..."` is a string literal; the quotes are dropped, and a literal
//!    missing its closing quote runs to end-of-input.
//! 4. Any other character is a token on its own.
//!
//! Lexing never fails on input text. Digits are not identifier starts, so
//! `42` lexes as `4` and `2`.

pub mod error;
pub mod lexer;
pub mod sequence;
pub mod source;

pub use error::{Error, Result};
pub use lexer::{tokenize, Lexer, Position, Span, Token, Tokenizer};
pub use sequence::{Pull, PullSequence, Step};
pub use source::{FileChars, ReaderChars};

/// Version of the lexer
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Lexes an in-memory string into a vector of tokens
pub fn tokenize_str(source: &str) -> Vec<Token> {
    tokenize(PullSequence::from_iter(source.chars())).collect_vec()
}
