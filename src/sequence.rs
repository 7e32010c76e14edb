//! Lazy pull sequences
//!
//! A [`PullSequence`] hands out one item per call to [`PullSequence::next`],
//! computing it on demand from a [`Pull`] producer. Items are never cached
//! and the sequence cannot be rewound. Both the lexer's character input and
//! its token output are pull sequences.

use std::fmt;

/// Result of a single pull: either a value or the end of the sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step<T> {
    /// The next item
    Value(T),
    /// The sequence is exhausted
    Done,
}

impl<T> Step<T> {
    /// Returns true if this step signals the end of the sequence
    pub fn is_done(&self) -> bool {
        matches!(self, Step::Done)
    }

    /// Converts the step into an `Option`, mapping `Done` to `None`
    pub fn into_option(self) -> Option<T> {
        match self {
            Step::Value(value) => Some(value),
            Step::Done => None,
        }
    }
}

impl<T> From<Option<T>> for Step<T> {
    fn from(option: Option<T>) -> Self {
        match option {
            Some(value) => Step::Value(value),
            None => Step::Done,
        }
    }
}

/// A producer of steps
///
/// Implementors own whatever state they need to compute the next item.
/// Once a producer returns [`Step::Done`] it is never asked again.
pub trait Pull {
    /// Type of item produced
    type Item;

    /// Computes the next step
    fn pull(&mut self) -> Step<Self::Item>;
}

impl<P: Pull + ?Sized> Pull for Box<P> {
    type Item = P::Item;

    fn pull(&mut self) -> Step<Self::Item> {
        (**self).pull()
    }
}

/// Adapts any [`Iterator`] into a [`Pull`] producer
#[derive(Debug, Clone)]
pub struct FromIter<I>(I);

impl<I: Iterator> Pull for FromIter<I> {
    type Item = I::Item;

    fn pull(&mut self) -> Step<Self::Item> {
        self.0.next().into()
    }
}

/// Single-pass lazy sequence over a [`Pull`] producer
pub struct PullSequence<P> {
    producer: P,
    finished: bool,
}

impl<P: Pull> PullSequence<P> {
    /// Wraps a producer
    pub fn new(producer: P) -> Self {
        PullSequence {
            producer,
            finished: false,
        }
    }

    /// Pulls the next step from the producer
    ///
    /// # Panics
    ///
    /// Panics if called again after a previous call returned [`Step::Done`].
    /// Polling a finished sequence is a bug in the consumer.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Step<P::Item> {
        assert!(
            !self.finished,
            "pull sequence polled again after it signalled Done"
        );
        let step = self.producer.pull();
        if step.is_done() {
            self.finished = true;
        }
        step
    }

    /// Returns true once the sequence has yielded `Done`
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Pulls until `Done`, invoking `f` on each value in order
    pub fn drain<F>(&mut self, mut f: F)
    where
        F: FnMut(P::Item),
    {
        while let Step::Value(value) = self.next() {
            f(value);
        }
    }

    /// Drains the sequence into a vector
    pub fn collect_vec(mut self) -> Vec<P::Item> {
        let mut items = Vec::new();
        self.drain(|item| items.push(item));
        items
    }

    /// Borrows the sequence as a fused [`Iterator`]
    ///
    /// The iterator stops at the first `Done` and never polls past it.
    pub fn values(&mut self) -> Values<'_, P> {
        Values { sequence: self }
    }

    /// Borrows the underlying producer
    pub fn producer(&self) -> &P {
        &self.producer
    }

    /// Unwraps the underlying producer
    pub fn into_producer(self) -> P {
        self.producer
    }
}

impl<I: Iterator> PullSequence<FromIter<I>> {
    /// Builds a sequence that pulls from an iterator
    #[allow(clippy::should_implement_trait)]
    pub fn from_iter<T>(iter: T) -> Self
    where
        T: IntoIterator<IntoIter = I>,
    {
        PullSequence::new(FromIter(iter.into_iter()))
    }
}

impl<P> fmt::Debug for PullSequence<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PullSequence")
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}

/// Fused iterator view over a [`PullSequence`]
pub struct Values<'a, P> {
    sequence: &'a mut PullSequence<P>,
}

impl<P: Pull> Iterator for Values<'_, P> {
    type Item = P::Item;

    fn next(&mut self) -> Option<Self::Item> {
        if self.sequence.is_finished() {
            return None;
        }
        self.sequence.next().into_option()
    }
}

impl<P: Pull> std::iter::FusedIterator for Values<'_, P> {}

#[cfg(test)]
mod tests {
    use super::*;

    /// Counts down from `n`, then reports `Done`
    struct Countdown(u32);

    impl Pull for Countdown {
        type Item = u32;

        fn pull(&mut self) -> Step<u32> {
            if self.0 == 0 {
                Step::Done
            } else {
                self.0 -= 1;
                Step::Value(self.0 + 1)
            }
        }
    }

    #[test]
    fn test_next_yields_values_then_done() {
        let mut seq = PullSequence::new(Countdown(2));
        assert_eq!(seq.next(), Step::Value(2));
        assert_eq!(seq.next(), Step::Value(1));
        assert!(!seq.is_finished());
        assert_eq!(seq.next(), Step::Done);
        assert!(seq.is_finished());
    }

    #[test]
    #[should_panic(expected = "polled again")]
    fn test_polling_after_done_panics() {
        let mut seq = PullSequence::new(Countdown(0));
        assert_eq!(seq.next(), Step::Done);
        seq.next();
    }

    #[test]
    fn test_drain_visits_in_order() {
        let mut seq = PullSequence::from_iter(vec!['a', 'b', 'c']);
        let mut seen = String::new();
        seq.drain(|c| seen.push(c));
        assert_eq!(seen, "abc");
        assert!(seq.is_finished());
    }

    #[test]
    fn test_collect_vec() {
        let seq = PullSequence::new(Countdown(3));
        assert_eq!(seq.collect_vec(), vec![3, 2, 1]);
    }

    #[test]
    fn test_collect_empty() {
        let seq = PullSequence::from_iter(Vec::<char>::new());
        assert!(seq.collect_vec().is_empty());
    }

    #[test]
    fn test_values_is_fused() {
        let mut seq = PullSequence::new(Countdown(1));
        let mut values = seq.values();
        assert_eq!(values.next(), Some(1));
        assert_eq!(values.next(), None);
        // Would panic if the view polled the finished sequence.
        assert_eq!(values.next(), None);
    }

    #[test]
    fn test_step_option_conversions() {
        assert_eq!(Step::from(Some(5)), Step::Value(5));
        assert_eq!(Step::<i32>::from(None), Step::Done);
        assert_eq!(Step::Value('x').into_option(), Some('x'));
    }
}
