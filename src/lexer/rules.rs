use std::fmt;

use super::class::{self, CharClass};
use super::token::Token;
use super::tokenizer::Tokenizer;
use crate::sequence::{Pull, PullSequence, Step};

/// How often a rule fires within one pass of the grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repetition {
    /// Fires for as long as its class matches, then later rules run
    WhileMatching,
    /// Fires once if its class matches; later single-shot rules are skipped
    Once,
}

/// A lexer rule: a character class guarding an action on the tokenizer
pub struct Rule<P> {
    name: &'static str,
    class: CharClass,
    repetition: Repetition,
    action: fn(&mut Tokenizer<P>),
}

impl<P> Rule<P> {
    /// A rule applied once when `class` matches the lookahead
    pub fn once(name: &'static str, class: CharClass, action: fn(&mut Tokenizer<P>)) -> Self {
        Rule {
            name,
            class,
            repetition: Repetition::Once,
            action,
        }
    }

    /// A rule applied repeatedly while `class` matches the lookahead
    ///
    /// Its action must advance exactly one character per invocation.
    pub fn repeat(name: &'static str, class: CharClass, action: fn(&mut Tokenizer<P>)) -> Self {
        Rule {
            name,
            class,
            repetition: Repetition::WhileMatching,
            action,
        }
    }

    /// Human-readable rule name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// How the rule fires
    pub fn repetition(&self) -> Repetition {
        self.repetition
    }
}

impl<P> fmt::Debug for Rule<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("repetition", &self.repetition)
            .finish_non_exhaustive()
    }
}

/// The Sanity grammar, highest priority first
pub fn grammar<P: Pull<Item = char>>() -> Vec<Rule<P>> {
    vec![
        Rule::repeat("whitespace", class::is_whitespace, skip),
        Rule::once("identifier", class::is_identifier_start, identifier),
        Rule::once("string literal", class::is_quote, string_literal),
        Rule::once("single character", class::any, single_character),
    ]
}

fn skip<P: Pull<Item = char>>(t: &mut Tokenizer<P>) {
    t.ignore(1);
}

fn identifier<P: Pull<Item = char>>(t: &mut Tokenizer<P>) {
    t.consume(1)
        .repeat_while(class::is_identifier_continue, |t| {
            t.consume(1);
        })
        .finalize();
}

fn string_literal<P: Pull<Item = char>>(t: &mut Tokenizer<P>) {
    // Opening quote, body, closing quote. A missing closing quote is a no-op
    // ignore at end-of-input and the body is still emitted.
    t.ignore(1)
        .repeat_while(class::is_not_quote, |t| {
            t.consume(1);
        })
        .ignore(1)
        .finalize_literal();
}

fn single_character<P: Pull<Item = char>>(t: &mut Tokenizer<P>) {
    t.consume(1).finalize();
}

/// Drives a [`Tokenizer`] through an ordered rule list, one token per pull
pub struct Lexer<P> {
    tokenizer: Tokenizer<P>,
    rules: Vec<Rule<P>>,
}

impl<P: Pull<Item = char>> Lexer<P> {
    /// Creates a lexer over `chars` using the Sanity [`grammar`]
    pub fn new(chars: PullSequence<P>) -> Self {
        Lexer::with_rules(chars, grammar())
    }

    /// Creates a lexer with a custom rule list
    ///
    /// A rule list that leaves some character unmatched makes the lexer
    /// panic when that character is reached.
    pub fn with_rules(chars: PullSequence<P>, rules: Vec<Rule<P>>) -> Self {
        Lexer {
            tokenizer: Tokenizer::new(chars),
            rules,
        }
    }

    /// The rules in priority order
    pub fn rules(&self) -> &[Rule<P>] {
        &self.rules
    }

    /// Gives back the character sequence being lexed
    pub fn into_chars(self) -> PullSequence<P> {
        self.tokenizer.into_chars()
    }

    /// Runs every rule once, in order
    fn run_pass(&mut self) {
        for rule in &self.rules {
            match rule.repetition {
                Repetition::WhileMatching => {
                    self.tokenizer.repeat_while(rule.class, rule.action);
                }
                Repetition::Once => {
                    if self.tokenizer.matches(rule.class) {
                        (rule.action)(&mut self.tokenizer);
                        break;
                    }
                }
            }
        }
    }
}

impl<P: Pull<Item = char>> Pull for Lexer<P> {
    type Item = Token;

    fn pull(&mut self) -> Step<Token> {
        loop {
            let before = self.tokenizer.offset();
            self.run_pass();
            let progressed = self.tokenizer.offset() != before;
            // A pass can advance without producing anything, e.g. over an
            // empty string literal. Keep scanning in that case.
            if self.tokenizer.has_pending() || self.tokenizer.is_exhausted() || !progressed {
                return self.tokenizer.extract();
            }
        }
    }
}

impl<P> fmt::Debug for Lexer<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lexer")
            .field("rules", &self.rules)
            .finish_non_exhaustive()
    }
}

/// Lexes a character sequence into a lazy sequence of tokens
pub fn tokenize<P: Pull<Item = char>>(chars: PullSequence<P>) -> PullSequence<Lexer<P>> {
    PullSequence::new(Lexer::new(chars))
}
