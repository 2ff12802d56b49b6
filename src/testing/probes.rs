//! Probes for observing how a pass actually ran: how many elements were
//! pulled from a source and whether the chain was released.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::sequence::{SeqBound, Sequence};
use crate::source::from_iter;

/// Counts elements pulled out of a source.
///
/// ```
/// use seqflow::testing::PullCounter;
///
/// let counter = PullCounter::new();
/// let first_two = counter.wrap(seqflow::iterate(0u32, |x| x + 1)).limit(2).to_vec()?;
/// assert_eq!(first_two, vec![0, 1]);
/// assert_eq!(counter.pulled(), 2);
/// # anyhow::Result::<()>::Ok(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct PullCounter(Arc<AtomicUsize>);

impl PullCounter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count every element that leaves `seq`.
    #[must_use]
    pub fn wrap<T: SeqBound>(&self, seq: Sequence<T>) -> Sequence<T> {
        let count = Arc::clone(&self.0);
        seq.peek(move |_| {
            count.fetch_add(1, Ordering::SeqCst);
        })
    }

    /// Ordered source over `data` that counts its pulls.
    #[must_use]
    pub fn source<T: SeqBound>(&self, data: Vec<T>) -> Sequence<T> {
        self.wrap(from_iter(data))
    }

    /// Elements pulled so far.
    #[must_use]
    pub fn pulled(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

/// Records how many times a sequence's close handler ran.
///
/// ```
/// use seqflow::*;
/// use seqflow::testing::CloseProbe;
///
/// let probe = CloseProbe::new();
/// let s = probe.attach(of([1, 2, 3]));
/// assert_eq!(probe.closes(), 0);
/// s.count()?;
/// assert_eq!(probe.closes(), 1);
/// # anyhow::Result::<()>::Ok(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct CloseProbe(Arc<AtomicUsize>);

impl CloseProbe {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register this probe as a close handler of `seq`.
    #[must_use]
    pub fn attach<T: SeqBound>(&self, seq: Sequence<T>) -> Sequence<T> {
        let closes = Arc::clone(&self.0);
        seq.on_close(move || {
            closes.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[must_use]
    pub fn closes(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closes() > 0
    }
}
