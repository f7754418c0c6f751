//! Quantifier expansion: every ordered tuple of `min..=max` draws, with
//! repetition, from a lazily discovered alphabet.
//!
//! Lengths are visited in increasing order. Within one length the tuple
//! indices form a counter whose last position turns fastest and whose base
//! grows whenever the underlying source yields a new value. The source is
//! drained at most once; later lengths replay the cached alphabet without
//! pulling it again, so side effects attached to the source fire once per
//! discovered value, not once per use.

use crate::source::Source;

enum State {
    /// Start enumerating tuples of the current length.
    Start,
    Running,
    Done,
}

pub struct Repetition<'a, T> {
    source: Source<'a, T>,
    alphabet: Vec<T>,
    drained: bool,
    length: usize,
    max: Option<usize>,
    counter: Vec<usize>,
    pending_empty: bool,
    state: State,
}

impl<'a, T: Clone> Repetition<'a, T> {
    /// Repeat `source` between `min` and `max` times; `max` of `None` never
    /// stops on its own.
    pub fn new(source: Source<'a, T>, min: usize, max: Option<usize>) -> Self {
        Repetition {
            source,
            alphabet: Vec::new(),
            drained: false,
            length: min.max(1),
            max,
            counter: Vec::new(),
            pending_empty: min == 0,
            state: State::Start,
        }
    }

    /// Number of distinct values discovered so far.
    pub fn alphabet_len(&self) -> usize {
        self.alphabet.len()
    }

    fn pull(&mut self) {
        if self.drained {
            return;
        }
        match self.source.next() {
            Some(value) => self.alphabet.push(value),
            None => self.drained = true,
        }
    }

    /// Step the counter; `false` once it wraps back to all zeroes.
    fn increment(&mut self) -> bool {
        let base = self.alphabet.len();
        for index in self.counter.iter_mut().rev() {
            *index += 1;
            if *index < base {
                return true;
            }
            *index = 0;
        }
        false
    }

    fn current(&self) -> Vec<T> {
        self.counter
            .iter()
            .map(|&index| self.alphabet[index].clone())
            .collect()
    }
}

impl<T: Clone> Iterator for Repetition<'_, T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Vec<T>> {
        if self.pending_empty {
            self.pending_empty = false;
            return Some(Vec::new());
        }
        loop {
            match self.state {
                State::Done => return None,
                State::Start => {
                    if self.max.is_some_and(|max| self.length > max) {
                        self.state = State::Done;
                        continue;
                    }
                    if self.alphabet.is_empty() {
                        self.pull();
                    }
                    if self.alphabet.is_empty() {
                        self.state = State::Done;
                        continue;
                    }
                    self.counter = vec![0; self.length];
                    self.state = State::Running;
                    return Some(self.current());
                }
                State::Running => {
                    self.pull();
                    if self.increment() {
                        return Some(self.current());
                    }
                    self.length += 1;
                    self.state = State::Start;
                }
            }
        }
    }
}
