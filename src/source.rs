//! In-memory and generated sources.
//!
//! Every function here returns a ready [`Sequence`]. Generated sources
//! ([`iterate`], [`generate`]) are infinite; bound them with
//! [`limit`](Sequence::limit) or [`take_while`](Sequence::take_while)
//! before a terminal operation.

use std::collections::HashSet;
use std::iter;

use anyhow::Result;

use crate::sequence::{SeqBound, Sequence};
use crate::stage::{IterSource, Stage};

/// Ordered sequence over the elements of `data`.
///
/// # Example
/// ```
/// use seqflow::*;
///
/// let lengths = from_vec(vec!["hello", "world", "whatcha"])
///     .map(str::len)
///     .to_vec()?;
/// assert_eq!(lengths, vec![5, 5, 7]);
/// # anyhow::Result::<()>::Ok(())
/// ```
pub fn from_vec<T: SeqBound>(data: Vec<T>) -> Sequence<T> {
    from_iter(data)
}

/// Ordered sequence over a fixed list of values.
pub fn of<T: SeqBound, const N: usize>(values: [T; N]) -> Sequence<T> {
    from_iter(values)
}

/// Ordered sequence pulling lazily from any `Send` iterator.
pub fn from_iter<I>(iter: I) -> Sequence<I::Item>
where
    I: IntoIterator,
    I::IntoIter: Send + 'static,
    I::Item: SeqBound,
{
    Sequence::from_boxed(Box::new(IterSource(iter.into_iter())), true)
}

/// Unordered sequence over the members of a set.
pub fn from_set<T: SeqBound>(set: HashSet<T>) -> Sequence<T> {
    Sequence::from_boxed(Box::new(IterSource(set.into_iter())), false)
}

/// A sequence with no elements.
pub fn empty<T: SeqBound>() -> Sequence<T> {
    from_iter(iter::empty())
}

/// Infinite sequence `seed, f(seed), f(f(seed)), ...`.
///
/// `f` runs only when the next element is pulled, so a `limit(n)` calls it
/// exactly `n - 1` times.
///
/// ```
/// use seqflow::*;
///
/// let powers = iterate(1u64, |x| x * 2).limit(5).to_vec()?;
/// assert_eq!(powers, vec![1, 2, 4, 8, 16]);
/// # anyhow::Result::<()>::Ok(())
/// ```
pub fn iterate<T, F>(seed: T, f: F) -> Sequence<T>
where
    T: SeqBound + Clone,
    F: FnMut(&T) -> T + Send + 'static,
{
    iterate_while(seed, |_| true, f)
}

/// Like [`iterate`], but ends before the first element failing `has_next`.
pub fn iterate_while<T, P, F>(seed: T, has_next: P, f: F) -> Sequence<T>
where
    T: SeqBound + Clone,
    P: FnMut(&T) -> bool + Send + 'static,
    F: FnMut(&T) -> T + Send + 'static,
{
    Sequence::from_stage(Iterate { seed: Some(seed), prev: None, has_next, f })
}

struct Iterate<T, P, F> {
    seed: Option<T>,
    prev: Option<T>,
    has_next: P,
    f: F,
}

impl<T, P, F> Stage<T> for Iterate<T, P, F>
where
    T: Send + Clone,
    P: FnMut(&T) -> bool + Send,
    F: FnMut(&T) -> T + Send,
{
    fn try_advance(&mut self) -> Result<Option<T>> {
        let next = match (self.seed.take(), self.prev.take()) {
            (Some(seed), _) => seed,
            (None, Some(prev)) => (self.f)(&prev),
            (None, None) => return Ok(None),
        };
        if !(self.has_next)(&next) {
            return Ok(None);
        }
        self.prev = Some(next.clone());
        Ok(Some(next))
    }
}

/// Infinite sequence of values produced by `supplier`.
pub fn generate<T, F>(supplier: F) -> Sequence<T>
where
    T: SeqBound,
    F: FnMut() -> T + Send + 'static,
{
    from_iter(iter::repeat_with(supplier))
}
