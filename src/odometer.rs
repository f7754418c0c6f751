//! Lazy cartesian product of several sources.
//!
//! Each source is a digit of a mixed-radix counter whose base is the number
//! of values discovered from it so far. Digit 0 turns fastest. A digit's
//! alphabet only grows when every digit sits on its newest value, so no
//! source is ever pulled further than the output requires.

use crate::source::{self, Source};

struct Digit<'a, T> {
    source: Source<'a, T>,
    alphabet: Vec<T>,
    cursor: usize,
}

impl<T> Digit<'_, T> {
    fn at_frontier(&self) -> bool {
        self.cursor + 1 == self.alphabet.len()
    }
}

enum State {
    Unseeded,
    Running,
    Done,
}

/// Ordered cartesian product over `N` sources, yielding `N`-tuples.
///
/// For `[1, 2, 3]` × `[4, 5, 6]` the order is `(1,4) (2,4) (3,4) (1,5) ...`.
pub struct Odometer<'a, T> {
    digits: Vec<Digit<'a, T>>,
    state: State,
}

impl<'a, T: Clone> Odometer<'a, T> {
    pub fn new(sources: Vec<Source<'a, T>>) -> Self {
        let digits = sources
            .into_iter()
            .map(|source| Digit {
                source,
                alphabet: Vec::new(),
                cursor: 0,
            })
            .collect();
        Odometer {
            digits,
            state: State::Unseeded,
        }
    }

    /// Pull the first value of every source, in position order.
    fn seed(&mut self) -> bool {
        if self.digits.is_empty() {
            return false;
        }
        for digit in &mut self.digits {
            match digit.source.next() {
                Some(value) => digit.alphabet.push(value),
                None => return false,
            }
        }
        true
    }

    /// Step to the next tuple. Returns `false` once every source is spent.
    fn advance(&mut self) -> bool {
        let at_frontier = self.digits.iter().all(Digit::at_frontier);
        self.digits[0].cursor += 1;
        let mut active = 0;

        if at_frontier {
            // Extend the lowest digit whose source still has values, and
            // restart every digit below it.
            let value = loop {
                if let Some(value) = self.digits[active].source.next() {
                    break value;
                }
                active += 1;
                if active == self.digits.len() {
                    return false;
                }
            };
            let digit = &mut self.digits[active];
            digit.alphabet.push(value);
            digit.cursor = digit.alphabet.len() - 1;
            for lower in &mut self.digits[..active] {
                lower.cursor = 0;
            }
        }

        if self.digits[active].cursor >= self.digits[active].alphabet.len() {
            // Carry into the next digit that has an unvisited value.
            self.digits[active].cursor = 0;
            for digit in &mut self.digits[active + 1..] {
                if digit.cursor + 1 < digit.alphabet.len() {
                    digit.cursor += 1;
                    return true;
                }
                digit.cursor = 0;
            }
            return false;
        }
        true
    }

    fn current(&self) -> Vec<T> {
        self.digits
            .iter()
            .map(|digit| digit.alphabet[digit.cursor].clone())
            .collect()
    }
}

impl<T: Clone> Iterator for Odometer<'_, T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Vec<T>> {
        let ready = match self.state {
            State::Done => false,
            State::Unseeded => self.seed(),
            State::Running => self.advance(),
        };
        if !ready {
            self.state = State::Done;
            return None;
        }
        self.state = State::Running;
        Some(self.current())
    }
}

/// Cartesian product of sources that themselves yield tuples, flattened by
/// one level on output.
pub fn combine_nested<'a, T>(sources: Vec<Source<'a, Vec<T>>>) -> Source<'a, Vec<T>>
where
    T: Clone + 'a,
{
    source::flatten(source::boxed(Odometer::new(sources)))
}
