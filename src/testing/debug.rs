//! Debug taps for inspecting sequences during test execution.
//!
//! Every tap is a pass-through stage that reports to stderr with a
//! `[Debug: <label>]` prefix, so output of several taps in one chain can be
//! told apart.

use std::fmt::Debug;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::sequence::{SeqBound, Sequence};

/// Elements printed by [`SequenceDebugExt::debug_inspect`] before it goes
/// quiet.
const INSPECT_LIMIT: usize = 10;

/// Extension trait adding debug taps to [`Sequence`].
pub trait SequenceDebugExt<T: SeqBound> {
    /// Print the first elements passing this point.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use seqflow::*;
    /// use seqflow::testing::SequenceDebugExt;
    ///
    /// # fn main() -> anyhow::Result<()> {
    /// let result = of([1, 2, 3])
    ///     .debug_inspect("after source")
    ///     .map(|x| x * 2)
    ///     .debug_inspect("after map")
    ///     .to_vec()?;
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    fn debug_inspect(self, label: &str) -> Sequence<T>
    where
        T: Debug;

    /// Like `debug_inspect`, but also runs `inspector` on every element.
    #[must_use]
    fn debug_inspect_with<F>(self, label: &str, inspector: F) -> Sequence<T>
    where
        T: Debug,
        F: FnMut(&T) + Send + 'static;

    /// Print how many elements passed this point once the chain is released.
    #[must_use]
    fn debug_count(self, label: &str) -> Sequence<T>;

    /// Print the first `n` elements passing this point.
    #[must_use]
    fn debug_sample(self, n: usize, label: &str) -> Sequence<T>
    where
        T: Debug;
}

impl<T: SeqBound> SequenceDebugExt<T> for Sequence<T> {
    fn debug_inspect(self, label: &str) -> Self
    where
        T: Debug,
    {
        self.debug_inspect_with(label, |_| {})
    }

    fn debug_inspect_with<F>(self, label: &str, mut inspector: F) -> Self
    where
        T: Debug,
        F: FnMut(&T) + Send + 'static,
    {
        let label = label.to_string();
        let mut seen = 0usize;
        self.peek(move |item| {
            inspector(item);
            if seen < INSPECT_LIMIT {
                eprintln!("[Debug: {label}] [{seen}]: {item:?}");
            } else if seen == INSPECT_LIMIT {
                eprintln!("[Debug: {label}] ... (further elements not shown)");
            }
            seen += 1;
        })
    }

    fn debug_count(self, label: &str) -> Self {
        let label = label.to_string();
        let count = Arc::new(AtomicUsize::new(0));
        let tally = Arc::clone(&count);
        self.peek(move |_| {
            tally.fetch_add(1, Ordering::Relaxed);
        })
        .on_close(move || {
            eprintln!("[Debug: {label}] Count: {} elements", count.load(Ordering::Relaxed));
        })
    }

    fn debug_sample(self, n: usize, label: &str) -> Self
    where
        T: Debug,
    {
        let label = label.to_string();
        let mut seen = 0usize;
        eprintln!("[Debug: {label}] Sampling first {n} elements:");
        self.peek(move |item| {
            if seen < n {
                eprintln!("[Debug: {label}] [{seen}]: {item:?}");
            }
            seen += 1;
        })
    }
}
