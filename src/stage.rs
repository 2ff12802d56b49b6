//! Pull-based stages that make up a sequence chain.
//!
//! A [`Stage`] produces one element per call to [`Stage::try_advance`] and
//! returns `Ok(None)` once it is exhausted. Every intermediate stage owns its
//! upstream stage, so a chain is a singly linked list of boxed stages that is
//! released as a whole when the terminal operation returns.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::hash::Hash;
use std::vec;

use anyhow::Result;

/// Boxed, type-erased stage as stored inside a [`Sequence`](crate::Sequence).
pub type BoxStage<T> = Box<dyn Stage<T>>;

/// One lazily evaluated step of a sequence chain.
///
/// Implement this to plug a custom source into
/// [`Sequence::from_stage`](crate::Sequence::from_stage).
pub trait Stage<T>: Send {
    /// Pull the next element. `Ok(None)` means the stage is exhausted and
    /// must keep returning `Ok(None)` afterwards.
    ///
    /// # Errors
    /// Any error aborts the pass that is pulling from this stage.
    fn try_advance(&mut self) -> Result<Option<T>>;
}

/* ===================== sources ===================== */

/// Adapts any `Send` iterator into a stage.
pub(crate) struct IterSource<I>(pub(crate) I);

impl<I> Stage<I::Item> for IterSource<I>
where
    I: Iterator + Send,
{
    fn try_advance(&mut self) -> Result<Option<I::Item>> {
        Ok(self.0.next())
    }
}

/* ===================== element-wise ===================== */

pub(crate) struct Filter<T, P> {
    pub(crate) upstream: BoxStage<T>,
    pub(crate) pred: P,
}

impl<T, P> Stage<T> for Filter<T, P>
where
    T: Send,
    P: FnMut(&T) -> bool + Send,
{
    fn try_advance(&mut self) -> Result<Option<T>> {
        while let Some(v) = self.upstream.try_advance()? {
            if (self.pred)(&v) {
                return Ok(Some(v));
            }
        }
        Ok(None)
    }
}

pub(crate) struct TryFilter<T, P> {
    pub(crate) upstream: BoxStage<T>,
    pub(crate) pred: P,
}

impl<T, P> Stage<T> for TryFilter<T, P>
where
    T: Send,
    P: FnMut(&T) -> Result<bool> + Send,
{
    fn try_advance(&mut self) -> Result<Option<T>> {
        while let Some(v) = self.upstream.try_advance()? {
            if (self.pred)(&v)? {
                return Ok(Some(v));
            }
        }
        Ok(None)
    }
}

pub(crate) struct Map<I, F> {
    pub(crate) upstream: BoxStage<I>,
    pub(crate) f: F,
}

impl<I, O, F> Stage<O> for Map<I, F>
where
    I: Send,
    F: FnMut(I) -> O + Send,
{
    fn try_advance(&mut self) -> Result<Option<O>> {
        Ok(self.upstream.try_advance()?.map(&mut self.f))
    }
}

pub(crate) struct TryMap<I, F> {
    pub(crate) upstream: BoxStage<I>,
    pub(crate) f: F,
}

impl<I, O, F> Stage<O> for TryMap<I, F>
where
    I: Send,
    F: FnMut(I) -> Result<O> + Send,
{
    fn try_advance(&mut self) -> Result<Option<O>> {
        match self.upstream.try_advance()? {
            Some(v) => (self.f)(v).map(Some),
            None => Ok(None),
        }
    }
}

pub(crate) struct FlatMap<I, F, It> {
    pub(crate) upstream: BoxStage<I>,
    pub(crate) f: F,
    pub(crate) current: Option<It>,
}

impl<I, F, It> Stage<It::Item> for FlatMap<I, F, It>
where
    I: Send,
    It: Iterator + Send,
    F: FnMut(I) -> It + Send,
{
    fn try_advance(&mut self) -> Result<Option<It::Item>> {
        loop {
            if let Some(v) = self.current.as_mut().and_then(Iterator::next) {
                return Ok(Some(v));
            }
            match self.upstream.try_advance()? {
                Some(v) => self.current = Some((self.f)(v)),
                None => {
                    self.current = None;
                    return Ok(None);
                }
            }
        }
    }
}

pub(crate) struct Peek<T, F> {
    pub(crate) upstream: BoxStage<T>,
    pub(crate) f: F,
}

impl<T, F> Stage<T> for Peek<T, F>
where
    T: Send,
    F: FnMut(&T) + Send,
{
    fn try_advance(&mut self) -> Result<Option<T>> {
        let next = self.upstream.try_advance()?;
        if let Some(v) = &next {
            (self.f)(v);
        }
        Ok(next)
    }
}

/* ===================== stateful ===================== */

/// Emits the first occurrence of each element.
pub(crate) struct Distinct<T> {
    pub(crate) upstream: BoxStage<T>,
    pub(crate) seen: HashSet<T>,
}

impl<T> Stage<T> for Distinct<T>
where
    T: Send + Eq + Hash + Clone,
{
    fn try_advance(&mut self) -> Result<Option<T>> {
        while let Some(v) = self.upstream.try_advance()? {
            if !self.seen.contains(&v) {
                self.seen.insert(v.clone());
                return Ok(Some(v));
            }
        }
        Ok(None)
    }
}

/// Stops pulling upstream once `remaining` reaches zero.
pub(crate) struct Limit<T> {
    pub(crate) upstream: BoxStage<T>,
    pub(crate) remaining: usize,
}

impl<T: Send> Stage<T> for Limit<T> {
    fn try_advance(&mut self) -> Result<Option<T>> {
        if self.remaining == 0 {
            return Ok(None);
        }
        let next = self.upstream.try_advance()?;
        if next.is_some() {
            self.remaining -= 1;
        } else {
            self.remaining = 0;
        }
        Ok(next)
    }
}

pub(crate) struct Skip<T> {
    pub(crate) upstream: BoxStage<T>,
    pub(crate) pending: usize,
}

impl<T: Send> Stage<T> for Skip<T> {
    fn try_advance(&mut self) -> Result<Option<T>> {
        while self.pending > 0 {
            self.pending -= 1;
            if self.upstream.try_advance()?.is_none() {
                self.pending = 0;
                return Ok(None);
            }
        }
        self.upstream.try_advance()
    }
}

pub(crate) struct TakeWhile<T, P> {
    pub(crate) upstream: BoxStage<T>,
    pub(crate) pred: P,
    pub(crate) done: bool,
}

impl<T, P> Stage<T> for TakeWhile<T, P>
where
    T: Send,
    P: FnMut(&T) -> bool + Send,
{
    fn try_advance(&mut self) -> Result<Option<T>> {
        if self.done {
            return Ok(None);
        }
        match self.upstream.try_advance()? {
            Some(v) if (self.pred)(&v) => Ok(Some(v)),
            _ => {
                self.done = true;
                Ok(None)
            }
        }
    }
}

pub(crate) struct DropWhile<T, P> {
    pub(crate) upstream: BoxStage<T>,
    pub(crate) pred: P,
    pub(crate) dropping: bool,
}

impl<T, P> Stage<T> for DropWhile<T, P>
where
    T: Send,
    P: FnMut(&T) -> bool + Send,
{
    fn try_advance(&mut self) -> Result<Option<T>> {
        if !self.dropping {
            return self.upstream.try_advance();
        }
        while let Some(v) = self.upstream.try_advance()? {
            if !(self.pred)(&v) {
                self.dropping = false;
                return Ok(Some(v));
            }
        }
        Ok(None)
    }
}

/// Buffers the entire upstream on the first pull, then emits in order.
pub(crate) struct Sorted<T, C> {
    pub(crate) upstream: BoxStage<T>,
    pub(crate) cmp: C,
    pub(crate) buffer: Option<vec::IntoIter<T>>,
}

impl<T, C> Stage<T> for Sorted<T, C>
where
    T: Send,
    C: FnMut(&T, &T) -> Ordering + Send,
{
    fn try_advance(&mut self) -> Result<Option<T>> {
        if self.buffer.is_none() {
            let mut all = Vec::new();
            while let Some(v) = self.upstream.try_advance()? {
                all.push(v);
            }
            all.sort_by(&mut self.cmp);
            self.buffer = Some(all.into_iter());
        }
        Ok(self.buffer.as_mut().and_then(Iterator::next))
    }
}

/* ===================== resources ===================== */

/// Runs `handler` once when the chain is released.
///
/// The upstream is dropped first, so the source has already released its
/// resources when the handler runs, and handlers registered earlier (deeper
/// in the chain) run before later ones.
pub(crate) struct OnClose<T, H: FnOnce()> {
    pub(crate) upstream: Option<BoxStage<T>>,
    pub(crate) handler: Option<H>,
}

impl<T, H> Stage<T> for OnClose<T, H>
where
    T: Send,
    H: FnOnce() + Send,
{
    fn try_advance(&mut self) -> Result<Option<T>> {
        match self.upstream.as_mut() {
            Some(up) => up.try_advance(),
            None => Ok(None),
        }
    }
}

impl<T, H: FnOnce()> Drop for OnClose<T, H> {
    fn drop(&mut self) {
        drop(self.upstream.take());
        if let Some(h) = self.handler.take() {
            h();
        }
    }
}
