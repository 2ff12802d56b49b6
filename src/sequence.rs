//! The [`Sequence`] handle: chaining stages and driving terminal operations.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::hash::Hash;
use std::ops::ControlFlow;
use std::sync::{Arc, Mutex, PoisonError};

use anyhow::Result;

use crate::collectors::{self, Reducer};
use crate::error::SeqError;
use crate::stage::{
    BoxStage, Distinct, DropWhile, Filter, FlatMap, Limit, Map, OnClose, Peek, Skip,
    Sorted, Stage, TakeWhile, TryFilter, TryMap,
};

/// Bounds every element type must satisfy to flow through a sequence.
pub trait SeqBound: 'static + Send {}
impl<T> SeqBound for T where T: 'static + Send {}

/// Lifecycle slot shared by all clones of one sequence handle.
enum Link<T> {
    Ready(BoxStage<T>),
    Linked,
    Consumed,
    /// Built on a spent handle; holds the lifecycle error until first use.
    Poisoned(anyhow::Error),
}

impl<T> Link<T> {
    const fn state(&self) -> &'static str {
        match self {
            Self::Ready(_) => "ready",
            Self::Linked => "linked",
            Self::Consumed => "consumed",
            Self::Poisoned(_) => "poisoned",
        }
    }
}

/// A lazy, single-pass sequence of `T`.
///
/// Intermediate operations (`filter`, `map`, `sorted`, ...) only build a
/// chain of stages; a terminal operation (`collect`, `count`, `find_first`,
/// ...) pulls every element through the chain exactly once.
///
/// Cloning a `Sequence` clones the handle. All clones share one lifecycle:
/// once any of them has been chained or consumed, every other operation
/// fails with [`SeqError::IllegalState`].
///
/// # Example
/// ```
/// use seqflow::*;
///
/// let words = from_vec(vec!["hello", "world", "bello", "whatcha", "yellow"]);
/// let ll = words
///     .filter(|s| s.contains("ll"))
///     .sorted_by_key(|s| s.len())
///     .to_vec()
///     .unwrap();
/// assert_eq!(ll, vec!["hello", "bello", "yellow"]);
/// ```
pub struct Sequence<T> {
    link: Arc<Mutex<Link<T>>>,
    ordered: bool,
}

impl<T> Clone for Sequence<T> {
    fn clone(&self) -> Self {
        Self { link: Arc::clone(&self.link), ordered: self.ordered }
    }
}

impl<T> fmt::Debug for Sequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let link = self.link.lock().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("Sequence")
            .field("state", &link.state())
            .field("ordered", &self.ordered)
            .finish()
    }
}

/* ===================== construction & lifecycle ===================== */

impl<T: SeqBound> Sequence<T> {
    /// Wrap an arbitrary stage as an ordered sequence.
    pub fn from_stage<S>(stage: S) -> Self
    where
        S: Stage<T> + 'static,
    {
        Self::from_boxed(Box::new(stage), true)
    }

    pub(crate) fn from_boxed(stage: BoxStage<T>, ordered: bool) -> Self {
        Self {
            link: Arc::new(Mutex::new(Link::Ready(stage))),
            ordered,
        }
    }

    fn poisoned(err: anyhow::Error, ordered: bool) -> Self {
        Self {
            link: Arc::new(Mutex::new(Link::Poisoned(err))),
            ordered,
        }
    }

    /// Take the chain out of the shared slot, leaving `after` behind.
    /// A poisoned slot hands over its error once and then reads as `after`.
    fn take(&self, after: Link<T>) -> Result<BoxStage<T>> {
        let mut link = self.link.lock().unwrap_or_else(PoisonError::into_inner);
        match std::mem::replace(&mut *link, after) {
            Link::Ready(stage) => Ok(stage),
            Link::Poisoned(err) => Err(err),
            prev @ (Link::Linked | Link::Consumed) => {
                let err = match prev {
                    Link::Linked => SeqError::LINKED,
                    _ => SeqError::CONSUMED,
                };
                *link = prev;
                Err(err.into())
            }
        }
    }

    /// Append a stage. On a spent handle the returned sequence is poisoned:
    /// its first terminal, `close` or `iter` fails with the lifecycle error.
    fn chain<O, F>(self, wrap: F) -> Sequence<O>
    where
        O: SeqBound,
        F: FnOnce(BoxStage<T>) -> BoxStage<O>,
    {
        let ordered = self.ordered;
        match self.take(Link::Linked) {
            Ok(up) => Sequence::from_boxed(wrap(up), ordered),
            Err(e) => Sequence::poisoned(e, ordered),
        }
    }

    /// True unless the source is unordered or [`unordered`](Self::unordered)
    /// was applied.
    #[must_use]
    pub const fn is_ordered(&self) -> bool {
        self.ordered
    }

    /// True while the chain has not been taken by any handle.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        let link = self.link.lock().unwrap_or_else(PoisonError::into_inner);
        matches!(*link, Link::Ready(_))
    }

    /// Release the chain (and any resources held by its source) without
    /// pulling. Registered close handlers run before this returns.
    ///
    /// # Errors
    /// [`SeqError::IllegalState`] if the sequence was already chained or
    /// consumed.
    pub fn close(self) -> Result<()> {
        drop(self.take(Link::Consumed)?);
        Ok(())
    }

    /// Drive one pass, feeding each element into `sink` until it breaks or
    /// the chain is exhausted. The chain is dropped on every exit path.
    fn drive<F>(self, mut sink: F) -> Result<()>
    where
        F: FnMut(T) -> ControlFlow<()>,
    {
        let mut stage = self.take(Link::Consumed)?;
        while let Some(v) = stage.try_advance()? {
            if sink(v).is_break() {
                break;
            }
        }
        Ok(())
    }
}

/* ===================== intermediate operations ===================== */

impl<T: SeqBound> Sequence<T> {
    /// Keep elements matching `pred`.
    #[must_use]
    pub fn filter<P>(self, pred: P) -> Self
    where
        P: FnMut(&T) -> bool + Send + 'static,
    {
        self.chain(|upstream| Box::new(Filter { upstream, pred }))
    }

    /// Like [`filter`](Self::filter), but the predicate may fail; an error
    /// aborts the pass.
    #[must_use]
    pub fn try_filter<P>(self, pred: P) -> Self
    where
        P: FnMut(&T) -> Result<bool> + Send + 'static,
    {
        self.chain(|upstream| Box::new(TryFilter { upstream, pred }))
    }

    /// Transform each element, possibly changing its type.
    #[must_use]
    pub fn map<O, F>(self, f: F) -> Sequence<O>
    where
        O: SeqBound,
        F: FnMut(T) -> O + Send + 'static,
    {
        self.chain(|upstream| Box::new(Map { upstream, f }))
    }

    /// Fallible [`map`](Self::map); an error aborts the pass.
    #[must_use]
    pub fn try_map<O, F>(self, f: F) -> Sequence<O>
    where
        O: SeqBound,
        F: FnMut(T) -> Result<O> + Send + 'static,
    {
        self.chain(|upstream| Box::new(TryMap { upstream, f }))
    }

    /// Replace each element with zero or more elements.
    #[must_use]
    pub fn flat_map<U, F>(self, mut f: F) -> Sequence<U::Item>
    where
        U: IntoIterator,
        U::IntoIter: Send + 'static,
        U::Item: SeqBound,
        F: FnMut(T) -> U + Send + 'static,
    {
        self.chain(|upstream| {
            Box::new(FlatMap {
                upstream,
                f: move |v: T| f(v).into_iter(),
                current: None,
            })
        })
    }

    /// Run `f` on each element as it passes, without altering it.
    #[must_use]
    pub fn peek<F>(self, f: F) -> Self
    where
        F: FnMut(&T) + Send + 'static,
    {
        self.chain(|upstream| Box::new(Peek { upstream, f }))
    }

    /// Emit at most `n` elements. Upstream is never pulled past the `n`th,
    /// so this terminates over infinite sources.
    #[must_use]
    pub fn limit(self, n: usize) -> Self {
        self.chain(|upstream| Box::new(Limit { upstream, remaining: n }))
    }

    /// Discard the first `n` elements.
    #[must_use]
    pub fn skip(self, n: usize) -> Self {
        self.chain(|upstream| Box::new(Skip { upstream, pending: n }))
    }

    /// Emit elements while `pred` holds; stop at the first failure.
    #[must_use]
    pub fn take_while<P>(self, pred: P) -> Self
    where
        P: FnMut(&T) -> bool + Send + 'static,
    {
        self.chain(|upstream| Box::new(TakeWhile { upstream, pred, done: false }))
    }

    /// Discard elements while `pred` holds, then emit the rest unfiltered.
    #[must_use]
    pub fn drop_while<P>(self, pred: P) -> Self
    where
        P: FnMut(&T) -> bool + Send + 'static,
    {
        self.chain(|upstream| Box::new(DropWhile { upstream, pred, dropping: true }))
    }

    /// Stable sort with a comparator. Buffers the whole upstream on the
    /// first pull; never completes over an infinite source.
    #[must_use]
    pub fn sorted_by<C>(self, cmp: C) -> Self
    where
        C: FnMut(&T, &T) -> Ordering + Send + 'static,
    {
        self.chain(|upstream| Box::new(Sorted { upstream, cmp, buffer: None }))
    }

    /// Stable sort by a derived key.
    #[must_use]
    pub fn sorted_by_key<K, F>(self, mut key: F) -> Self
    where
        K: Ord,
        F: FnMut(&T) -> K + Send + 'static,
    {
        self.sorted_by(move |a, b| key(a).cmp(&key(b)))
    }

    /// Clear the ordered characteristic. Elements still arrive in source
    /// order; reducers and `find_any` may no longer rely on it.
    #[must_use]
    pub fn unordered(mut self) -> Self {
        self.ordered = false;
        self
    }

    /// Register a handler that runs once when the chain is released: after
    /// the terminal operation on every exit path, on [`close`](Self::close),
    /// or when the last handle is dropped.
    #[must_use]
    pub fn on_close<H>(self, handler: H) -> Self
    where
        H: FnOnce() + Send + 'static,
    {
        self.chain(|upstream| {
            Box::new(OnClose { upstream: Some(upstream), handler: Some(handler) })
        })
    }
}

impl<T: SeqBound + Ord> Sequence<T> {
    /// Stable sort in natural order.
    #[must_use]
    pub fn sorted(self) -> Self {
        self.sorted_by(T::cmp)
    }
}

impl<T: SeqBound + Eq + Hash + Clone> Sequence<T> {
    /// Keep the first occurrence of each element, in pull order.
    #[must_use]
    pub fn distinct(self) -> Self {
        self.chain(|upstream| Box::new(Distinct { upstream, seen: HashSet::new() }))
    }
}

/* ===================== terminal operations ===================== */

impl<T: SeqBound> Sequence<T> {
    /// Fold every element into `reducer` and return its finished result.
    ///
    /// # Errors
    /// [`SeqError::IllegalState`] on a spent handle, or any error raised by
    /// the chain. Partial accumulator state is discarded.
    pub fn collect<R>(self, reducer: R) -> Result<R::Output>
    where
        R: Reducer<T>,
    {
        let mut acc = reducer.create();
        self.drive(|v| {
            reducer.add_input(&mut acc, v);
            ControlFlow::Continue(())
        })?;
        Ok(reducer.finish(acc))
    }

    /// Collect into a `Vec` in pull order.
    ///
    /// # Errors
    /// See [`collect`](Self::collect).
    pub fn to_vec(self) -> Result<Vec<T>> {
        self.collect(collectors::to_vec())
    }

    /// Invoke `f` on each element in pull order.
    ///
    /// # Errors
    /// See [`collect`](Self::collect).
    pub fn for_each<F>(self, mut f: F) -> Result<()>
    where
        F: FnMut(T),
    {
        self.drive(|v| {
            f(v);
            ControlFlow::Continue(())
        })
    }

    /// Number of elements that survive the chain.
    ///
    /// # Errors
    /// See [`collect`](Self::collect).
    pub fn count(self) -> Result<u64> {
        self.collect(collectors::counting())
    }

    /// First element in pull order, or `None` if the chain is exhausted
    /// without producing one. Stops pulling once found.
    ///
    /// # Errors
    /// See [`collect`](Self::collect).
    pub fn find_first(self) -> Result<Option<T>> {
        let mut found = None;
        self.drive(|v| {
            found = Some(v);
            ControlFlow::Break(())
        })?;
        Ok(found)
    }

    /// Any element of the sequence; this implementation returns the first
    /// one pulled, ordered or not.
    ///
    /// # Errors
    /// See [`collect`](Self::collect).
    pub fn find_any(self) -> Result<Option<T>> {
        self.find_first()
    }

    /// True if some element matches. Short-circuits on the first match.
    ///
    /// # Errors
    /// See [`collect`](Self::collect).
    pub fn any_match<P>(self, mut pred: P) -> Result<bool>
    where
        P: FnMut(&T) -> bool,
    {
        let mut hit = false;
        self.drive(|v| {
            if pred(&v) {
                hit = true;
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        })?;
        Ok(hit)
    }

    /// True if every element matches (vacuously true when empty).
    ///
    /// # Errors
    /// See [`collect`](Self::collect).
    pub fn all_match<P>(self, mut pred: P) -> Result<bool>
    where
        P: FnMut(&T) -> bool,
    {
        Ok(!self.any_match(move |v| !pred(v))?)
    }

    /// True if no element matches.
    ///
    /// # Errors
    /// See [`collect`](Self::collect).
    pub fn none_match<P>(self, pred: P) -> Result<bool>
    where
        P: FnMut(&T) -> bool,
    {
        Ok(!self.any_match(pred)?)
    }

    /// Left fold starting from `init`.
    ///
    /// # Errors
    /// See [`collect`](Self::collect).
    pub fn fold<A, F>(self, init: A, mut f: F) -> Result<A>
    where
        F: FnMut(A, T) -> A,
    {
        let mut stage = self.take(Link::Consumed)?;
        let mut acc = init;
        while let Some(v) = stage.try_advance()? {
            acc = f(acc, v);
        }
        Ok(acc)
    }

    /// Combine elements pairwise; `None` for an empty sequence.
    ///
    /// # Errors
    /// See [`collect`](Self::collect).
    pub fn reduce<F>(self, mut f: F) -> Result<Option<T>>
    where
        F: FnMut(T, T) -> T,
    {
        self.fold(None, |acc, v| Some(match acc {
            Some(a) => f(a, v),
            None => v,
        }))
    }

    /// Smallest element by `cmp`; the first of equal minima wins.
    ///
    /// # Errors
    /// See [`collect`](Self::collect).
    pub fn min_by<C>(self, mut cmp: C) -> Result<Option<T>>
    where
        C: FnMut(&T, &T) -> Ordering,
    {
        self.reduce(|a, b| if cmp(&b, &a) == Ordering::Less { b } else { a })
    }

    /// Largest element by `cmp`; the last of equal maxima wins.
    ///
    /// # Errors
    /// See [`collect`](Self::collect).
    pub fn max_by<C>(self, mut cmp: C) -> Result<Option<T>>
    where
        C: FnMut(&T, &T) -> Ordering,
    {
        self.reduce(|a, b| if cmp(&b, &a) == Ordering::Less { a } else { b })
    }

    /// Pull-based bridge to a std iterator. The first item is the lifecycle
    /// error when the handle was already spent; after any error the iterator
    /// is fused.
    #[must_use]
    pub fn iter(self) -> SeqIter<T> {
        match self.take(Link::Consumed) {
            Ok(stage) => SeqIter { stage: Some(stage), pending: None },
            Err(e) => SeqIter { stage: None, pending: Some(e) },
        }
    }
}

impl<T: SeqBound + Ord> Sequence<T> {
    /// Smallest element in natural order.
    ///
    /// # Errors
    /// See [`Sequence::collect`].
    pub fn min(self) -> Result<Option<T>> {
        self.min_by(T::cmp)
    }

    /// Largest element in natural order.
    ///
    /// # Errors
    /// See [`Sequence::collect`].
    pub fn max(self) -> Result<Option<T>> {
        self.max_by(T::cmp)
    }

    /// Collect into a `BTreeSet` (sorted, deduplicated).
    ///
    /// # Errors
    /// See [`Sequence::collect`].
    pub fn to_sorted_set(self) -> Result<BTreeSet<T>> {
        self.collect(collectors::to_sorted_set())
    }
}

impl<T: SeqBound + Eq + Hash> Sequence<T> {
    /// Collect into a `HashSet` (deduplicated, unordered).
    ///
    /// # Errors
    /// See [`Sequence::collect`].
    pub fn to_set(self) -> Result<HashSet<T>> {
        self.collect(collectors::to_set())
    }
}

/// Std iterator over a consumed sequence; see [`Sequence::iter`].
pub struct SeqIter<T> {
    stage: Option<BoxStage<T>>,
    pending: Option<anyhow::Error>,
}

impl<T> Iterator for SeqIter<T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(e) = self.pending.take() {
            return Some(Err(e));
        }
        let stage = self.stage.as_mut()?;
        match stage.try_advance() {
            Ok(Some(v)) => Some(Ok(v)),
            Ok(None) => {
                self.stage = None;
                None
            }
            Err(e) => {
                self.stage = None;
                Some(Err(e))
            }
        }
    }
}

impl<T: SeqBound> IntoIterator for Sequence<T> {
    type Item = Result<T>;
    type IntoIter = SeqIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Buffers the iterator, so it need not be `Send`.
impl<T: SeqBound> FromIterator<T> for Sequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        crate::source::from_vec(iter.into_iter().collect())
    }
}
