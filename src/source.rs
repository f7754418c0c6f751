//! Lazy sources: boxed, fused, pull-based sequences.
//!
//! Every combinator in this crate owns the sources it wraps and pulls from
//! them one value at a time. A source never rewinds; anything that needs to
//! revisit earlier values keeps its own cache. All constructors here fuse
//! their output, so pulling past the end keeps returning `None`.

use std::fmt::Debug;

/// An owned lazy sequence of `T`.
pub type Source<'a, T> = Box<dyn Iterator<Item = T> + 'a>;

/// Box an iterator as a fused [`Source`].
pub fn boxed<'a, I>(iter: I) -> Source<'a, I::Item>
where
    I: Iterator + 'a,
{
    Box::new(iter.fuse())
}

/// A source that is exhausted from the start.
pub fn empty<'a, T: 'a>() -> Source<'a, T> {
    Box::new(std::iter::empty())
}

/// A source yielding exactly one value.
pub fn once<'a, T: 'a>(value: T) -> Source<'a, T> {
    Box::new(std::iter::once(value))
}

/// Yield the elements of a fixed collection in order.
pub fn from_collection<'a, C>(items: C) -> Source<'a, C::Item>
where
    C: IntoIterator,
    C::IntoIter: 'a,
{
    boxed(items.into_iter())
}

/// Yield `f(x)` for each `x`.
pub fn map<'a, T, U, F>(f: F, source: Source<'a, T>) -> Source<'a, U>
where
    T: 'a,
    F: FnMut(T) -> U + 'a,
{
    boxed(source.map(f))
}

/// Invoke `f` on each value, exactly once and in pull order, before
/// re-yielding it unchanged.
pub fn tap<'a, T, F>(f: F, source: Source<'a, T>) -> Source<'a, T>
where
    T: 'a,
    F: FnMut(&T) + 'a,
{
    boxed(source.inspect(f))
}

/// A value-to-value transformation step for [`pipeline`].
pub type Stage<'a, T> = Box<dyn Fn(T) -> T + 'a>;

/// Thread each value through `stages` in order.
pub fn pipeline<'a, T: 'a>(stages: Vec<Stage<'a, T>>, source: Source<'a, T>) -> Source<'a, T> {
    map(move |value| stages.iter().fold(value, |acc, stage| stage(acc)), source)
}

/// Drain each source completely before moving on to the next.
pub fn concat<'a, T: 'a>(sources: Vec<Source<'a, T>>) -> Source<'a, T> {
    boxed(sources.into_iter().flatten())
}

/// Join a tuple of strings into one string.
pub fn join<'a>(source: Source<'a, Vec<String>>) -> Source<'a, String> {
    map(|parts| parts.concat(), source)
}

/// Flatten a tuple of tuples by one level.
pub fn flatten<'a, T: 'a>(source: Source<'a, Vec<Vec<T>>>) -> Source<'a, Vec<T>> {
    map(|nested| nested.into_iter().flatten().collect(), source)
}

/// Trace every value passing through, leaving it untouched.
pub fn log<'a, T: Debug + 'a>(label: &'a str, source: Source<'a, T>) -> Source<'a, T> {
    tap(move |value| ::log::trace!("{label}: {value:?}"), source)
}

/// Pull at most `limit` values (all of them when `limit` is `None`).
pub fn take_results<T>(source: impl Iterator<Item = T>, limit: Option<usize>) -> Vec<T> {
    match limit {
        Some(n) => source.take(n).collect(),
        None => source.collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn exhausted_sources_stay_exhausted() {
        let mut source = concat(vec![from_collection([1]), empty(), once(2)]);
        assert_eq!(source.next(), Some(1));
        assert_eq!(source.next(), Some(2));
        assert_eq!(source.next(), None);
        assert_eq!(source.next(), None);
    }

    #[test]
    fn concat_drains_in_order() {
        let source = concat(vec![from_collection(["a", "b"]), from_collection(["c"])]);
        assert_eq!(take_results(source, None), ["a", "b", "c"]);
    }

    #[test]
    fn tap_fires_once_per_value_before_yielding() {
        let seen = RefCell::new(Vec::new());
        let mut source = tap(|x: &i32| seen.borrow_mut().push(*x), from_collection([1, 2, 3]));
        assert!(seen.borrow().is_empty());
        assert_eq!(source.next(), Some(1));
        assert_eq!(*seen.borrow(), [1]);
        assert_eq!(take_results(source, None), [2, 3]);
        assert_eq!(*seen.borrow(), [1, 2, 3]);
    }

    #[test]
    fn pipeline_applies_stages_in_order() {
        let stages: Vec<Stage<'_, String>> = vec![
            Box::new(|s: String| s.replace('a', "b")),
            Box::new(|s: String| s.replace('b', "c")),
        ];
        let source = pipeline(stages, from_collection(["a".to_string(), "xb".to_string()]));
        assert_eq!(take_results(source, None), ["c", "xc"]);
    }

    #[test]
    fn join_and_flatten() {
        let joined = join(once(vec!["ab".to_string(), "c".to_string()]));
        assert_eq!(take_results(joined, None), ["abc"]);
        let flat = flatten(once(vec![vec![1], vec![2, 3]]));
        assert_eq!(take_results(flat, None), [vec![1, 2, 3]]);
    }

    #[test]
    fn log_passes_values_through() {
        let traced = log("numbers", from_collection([3, 1, 2]));
        assert_eq!(take_results(traced, None), [3, 1, 2]);
    }

    #[test]
    fn take_results_respects_limit() {
        assert_eq!(take_results(from_collection(1..), Some(3)), [1, 2, 3]);
        assert_eq!(take_results(from_collection([1]), Some(3)), [1]);
        assert!(take_results(from_collection([1]), Some(0)).is_empty());
    }
}
