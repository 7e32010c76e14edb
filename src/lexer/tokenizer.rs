use tracing::{debug, trace};

use super::token::{Position, Span, Token};
use crate::sequence::{Pull, PullSequence, Step};

/// Rule-driven token builder over a character pull sequence
///
/// A tokenizer builds at most one token per cycle. Rules inspect the
/// lookahead with [`matches`](Tokenizer::matches), move past characters with
/// [`ignore`](Tokenizer::ignore) or [`consume`](Tokenizer::consume), and close
/// the buffer off with [`finalize`](Tokenizer::finalize). Once a token is
/// pending every mutating operation is a no-op until
/// [`extract`](Tokenizer::extract) hands it out. The same holds once the
/// character source is exhausted.
///
/// Operations return `&mut Self` so rules can be chained.
pub struct Tokenizer<P> {
    chars: PullSequence<P>,
    /// Next unconsumed character, `None` once the source is exhausted
    lookahead: Option<char>,
    /// Position of the lookahead
    position: Position,
    /// Total characters advanced past, consumed or ignored
    advanced: u64,
    buffer: String,
    start: Position,
    end: Position,
    pending: Option<Token>,
}

impl<P: Pull<Item = char>> Tokenizer<P> {
    /// Creates a tokenizer, pulling the first lookahead character immediately
    pub fn new(mut chars: PullSequence<P>) -> Self {
        let lookahead = chars.next().into_option();
        if lookahead.is_none() {
            debug!("character source is empty");
        }
        Tokenizer {
            chars,
            lookahead,
            position: Position::START,
            advanced: 0,
            buffer: String::new(),
            start: Position::START,
            end: Position::START,
            pending: None,
        }
    }

    /// The current lookahead character, if any input remains
    pub fn lookahead(&self) -> Option<char> {
        self.lookahead
    }

    /// Position of the lookahead character
    pub fn position(&self) -> Position {
        self.position
    }

    /// Number of characters advanced past so far, consumed or ignored
    pub fn offset(&self) -> u64 {
        self.advanced
    }

    /// Returns true once the character source has reported end-of-input
    pub fn is_exhausted(&self) -> bool {
        self.lookahead.is_none()
    }

    /// Returns true while a finalized token awaits extraction
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Gives back the character sequence the tokenizer was reading
    pub fn into_chars(self) -> PullSequence<P> {
        self.chars
    }

    fn is_active(&self) -> bool {
        self.pending.is_none() && self.lookahead.is_some()
    }

    /// Tests the lookahead against `predicate` without consuming it
    ///
    /// Always false once input is exhausted or a token is pending.
    pub fn matches<F>(&self, predicate: F) -> bool
    where
        F: Fn(char) -> bool,
    {
        self.pending.is_none() && self.lookahead.is_some_and(predicate)
    }

    /// Invokes `action` once if the lookahead matches `predicate`
    pub fn match_once<F, A>(&mut self, predicate: F, action: A) -> &mut Self
    where
        F: Fn(char) -> bool,
        A: FnOnce(&mut Self),
    {
        if self.matches(predicate) {
            action(self);
        }
        self
    }

    /// Invokes `action` for as long as the lookahead matches `predicate`
    ///
    /// Stops when the predicate fails, input runs out, or the action
    /// finalizes a token.
    ///
    /// # Panics
    ///
    /// Each invocation of `action` must advance the lookahead by exactly one
    /// character (or finalize a token). Anything else would loop forever or
    /// skip characters the predicate never saw, so it panics.
    pub fn repeat_while<F, A>(&mut self, predicate: F, mut action: A) -> &mut Self
    where
        F: Fn(char) -> bool,
        A: FnMut(&mut Self),
    {
        while self.matches(&predicate) {
            let before = self.advanced;
            action(self);
            let step = self.advanced - before;
            assert!(
                step == 1 || (step == 0 && self.pending.is_some()),
                "repeat_while action advanced {} characters at {}; it must advance exactly one",
                step,
                self.position
            );
        }
        self
    }

    /// Skips `n` characters without adding them to the token
    pub fn ignore(&mut self, n: usize) -> &mut Self {
        self.advance(n, false);
        self
    }

    /// Appends the next `n` characters to the token being built
    pub fn consume(&mut self, n: usize) -> &mut Self {
        self.advance(n, true);
        self
    }

    fn advance(&mut self, n: usize, keep: bool) {
        for _ in 0..n {
            if !self.is_active() {
                break;
            }
            let Some(c) = self.lookahead else {
                break;
            };
            if keep {
                if self.buffer.is_empty() {
                    self.start = self.position;
                }
                self.buffer.push(c);
                self.end = self.position;
            }
            self.position = self.position.after(c);
            self.advanced += 1;
            self.lookahead = self.chars.next().into_option();
            if self.lookahead.is_none() {
                debug!(position = %self.position, "character source exhausted");
            }
        }
    }

    /// Closes off the buffer as a plain token
    pub fn finalize(&mut self) -> &mut Self {
        self.finish(false)
    }

    /// Closes off the buffer as a string literal token
    pub fn finalize_literal(&mut self) -> &mut Self {
        self.finish(true)
    }

    fn finish(&mut self, is_string_literal: bool) -> &mut Self {
        // Empty buffers never become tokens.
        if self.pending.is_some() || self.buffer.is_empty() {
            return self;
        }
        let content = std::mem::take(&mut self.buffer);
        let span = Span {
            start: self.start,
            end: self.end,
        };
        trace!(content = %content, is_string_literal, span = %span, "finalized token");
        self.pending = Some(Token::new(content, is_string_literal, span));
        self
    }

    /// Hands out the pending token, resetting for the next cycle
    ///
    /// Returns `Done` when no token is pending and input is exhausted.
    ///
    /// # Panics
    ///
    /// Panics when no token is pending but input remains: no rule matched the
    /// lookahead, so the rule set has a gap.
    pub fn extract(&mut self) -> Step<Token> {
        if let Some(token) = self.pending.take() {
            return Step::Value(token);
        }
        match self.lookahead {
            None => Step::Done,
            Some(c) => panic!(
                "no rule produced a token for {:?} at {}; the lexer rule set is incomplete",
                c, self.position
            ),
        }
    }
}
