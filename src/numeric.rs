//! Numeric sequences: integer ranges and arithmetic terminal operations on
//! `Sequence<i32>`, `Sequence<i64>` and `Sequence<f64>`.

use std::ops::{Range, RangeInclusive};

use anyhow::Result;

use crate::collectors::{
    averaging_double, averaging_int, averaging_long, summarizing_double, summarizing_int,
    summarizing_long, summing_double, summing_int, summing_long, DoubleSummaryStatistics,
    IntSummaryStatistics, LongSummaryStatistics,
};
use crate::sequence::{SeqBound, Sequence};
use crate::source::from_iter;

/// Half-open integer range `[start, end)`.
///
/// ```
/// use seqflow::*;
///
/// assert_eq!(range(1, 1024).count()?, 1023);
/// assert_eq!(range(5, 5).count()?, 0);
/// # anyhow::Result::<()>::Ok(())
/// ```
pub fn range<N>(start: N, end: N) -> Sequence<N>
where
    N: SeqBound,
    Range<N>: Iterator<Item = N> + Send,
{
    from_iter(start..end)
}

/// Closed integer range `[start, end]`.
pub fn range_closed<N>(start: N, end: N) -> Sequence<N>
where
    N: SeqBound,
    RangeInclusive<N>: Iterator<Item = N> + Send,
{
    from_iter(start..=end)
}

/// Average of a non-empty sequence, `None` when empty.
fn optional_average(count: u64, average: f64) -> Option<f64> {
    (count > 0).then_some(average)
}

impl Sequence<i32> {
    /// Sum in `i64`.
    ///
    /// # Errors
    /// See [`Sequence::collect`].
    pub fn sum(self) -> Result<i64> {
        self.collect(summing_int(|v: &i32| *v))
    }

    /// Arithmetic mean, `None` for an empty sequence.
    ///
    /// # Errors
    /// See [`Sequence::collect`].
    pub fn average(self) -> Result<Option<f64>> {
        let stats = self.summary_statistics()?;
        Ok(optional_average(stats.count(), stats.average()))
    }

    /// # Errors
    /// See [`Sequence::collect`].
    pub fn summary_statistics(self) -> Result<IntSummaryStatistics> {
        self.collect(summarizing_int(|v: &i32| *v))
    }

    /// Widen every element to `i64`.
    #[must_use]
    pub fn as_long(self) -> Sequence<i64> {
        self.map(i64::from)
    }

    /// Convert every element to `f64`.
    #[must_use]
    pub fn as_double(self) -> Sequence<f64> {
        self.map(f64::from)
    }

    /// Mean computed without materializing statistics.
    ///
    /// # Errors
    /// See [`Sequence::collect`].
    pub fn mean_or_zero(self) -> Result<f64> {
        self.collect(averaging_int(|v: &i32| *v))
    }
}

impl Sequence<i64> {
    /// Sum, wrapping on overflow.
    ///
    /// # Errors
    /// See [`Sequence::collect`].
    pub fn sum(self) -> Result<i64> {
        self.collect(summing_long(|v: &i64| *v))
    }

    /// Arithmetic mean, `None` for an empty sequence.
    ///
    /// # Errors
    /// See [`Sequence::collect`].
    pub fn average(self) -> Result<Option<f64>> {
        let stats = self.summary_statistics()?;
        Ok(optional_average(stats.count(), stats.average()))
    }

    /// # Errors
    /// See [`Sequence::collect`].
    pub fn summary_statistics(self) -> Result<LongSummaryStatistics> {
        self.collect(summarizing_long(|v: &i64| *v))
    }

    /// # Errors
    /// See [`Sequence::collect`].
    pub fn mean_or_zero(self) -> Result<f64> {
        self.collect(averaging_long(|v: &i64| *v))
    }

    /// Convert every element to `f64` (lossy above 2^53).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_double(self) -> Sequence<f64> {
        self.map(|v| v as f64)
    }
}

impl Sequence<f64> {
    /// Compensated sum.
    ///
    /// # Errors
    /// See [`Sequence::collect`].
    pub fn sum(self) -> Result<f64> {
        self.collect(summing_double(|v: &f64| *v))
    }

    /// Arithmetic mean, `None` for an empty sequence.
    ///
    /// # Errors
    /// See [`Sequence::collect`].
    pub fn average(self) -> Result<Option<f64>> {
        let stats = self.summary_statistics()?;
        Ok(optional_average(stats.count(), stats.average()))
    }

    /// # Errors
    /// See [`Sequence::collect`].
    pub fn summary_statistics(self) -> Result<DoubleSummaryStatistics> {
        self.collect(summarizing_double(|v: &f64| *v))
    }

    /// # Errors
    /// See [`Sequence::collect`].
    pub fn mean_or_zero(self) -> Result<f64> {
        self.collect(averaging_double(|v: &f64| *v))
    }

    /// Sort by IEEE 754 total order (`-NaN < -inf < ... < inf < NaN`).
    #[must_use]
    pub fn sorted_total(self) -> Self {
        self.sorted_by(f64::total_cmp)
    }
}
