//! Lexical analysis for Sanity
//!
//! Converts a pull sequence of characters into a pull sequence of tokens,
//! one token per pull, without buffering either side.

pub mod class;
mod rules;
mod token;
mod tokenizer;

pub use rules::{grammar, tokenize, Lexer, Repetition, Rule};
pub use token::{Position, Span, Token};
pub use tokenizer::Tokenizer;
