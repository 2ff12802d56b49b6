//! Summary statistics: count, sum, min, max and average in one pass.
//!
//! Empty statistics are well defined: `count == 0`, `sum == 0`,
//! `average() == 0.0`, and `min`/`max` hold the identity sentinels of the
//! element type:
//!
//! | type                        | `min`            | `max`            |
//! |-----------------------------|------------------|------------------|
//! | [`IntSummaryStatistics`]    | `i32::MAX`       | `i32::MIN`       |
//! | [`LongSummaryStatistics`]   | `i64::MAX`       | `i64::MIN`       |
//! | [`DoubleSummaryStatistics`] | `f64::INFINITY`  | `f64::NEG_INFINITY` |
//!
//! Use `min_value()` / `max_value()` to get `None` instead of a sentinel.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Reducer;

/// Kahan-Babuska compensated `f64` summation; the accumulator of
/// [`summing_double`](super::summing_double).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CompensatedSum {
    sum: f64,
    compensation: f64,
    simple: f64,
}

impl CompensatedSum {
    pub(crate) fn add(&mut self, v: f64) {
        self.simple += v;
        self.compensate(v);
    }

    fn compensate(&mut self, v: f64) {
        let t = self.sum + v;
        if self.sum.abs() >= v.abs() {
            self.compensation += (self.sum - t) + v;
        } else {
            self.compensation += (v - t) + self.sum;
        }
        self.sum = t;
    }

    /// Compensated total; falls back to the naive sum when the compensated
    /// one is NaN because of infinities.
    pub(crate) fn value(&self) -> f64 {
        let total = self.sum + self.compensation;
        if total.is_nan() && self.simple.is_infinite() {
            self.simple
        } else {
            total
        }
    }
}

macro_rules! integral_statistics {
    ($name:ident, $elem:ty, $sum:ty, $doc:literal) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
        pub struct $name {
            count: u64,
            sum: $sum,
            min: $elem,
            max: $elem,
        }

        impl Default for $name {
            fn default() -> Self {
                Self { count: 0, sum: 0, min: <$elem>::MAX, max: <$elem>::MIN }
            }
        }

        impl $name {
            #[must_use]
            pub fn new() -> Self {
                Self::default()
            }

            /// Record one value.
            pub fn accept(&mut self, v: $elem) {
                self.count += 1;
                self.sum = self.sum.wrapping_add(<$sum>::from(v));
                self.min = self.min.min(v);
                self.max = self.max.max(v);
            }

            #[must_use]
            pub const fn count(&self) -> u64 {
                self.count
            }

            #[must_use]
            pub const fn sum(&self) -> $sum {
                self.sum
            }

            /// Minimum, or the `MAX` sentinel when empty.
            #[must_use]
            pub const fn min(&self) -> $elem {
                self.min
            }

            /// Maximum, or the `MIN` sentinel when empty.
            #[must_use]
            pub const fn max(&self) -> $elem {
                self.max
            }

            #[must_use]
            pub const fn min_value(&self) -> Option<$elem> {
                if self.count == 0 { None } else { Some(self.min) }
            }

            #[must_use]
            pub const fn max_value(&self) -> Option<$elem> {
                if self.count == 0 { None } else { Some(self.max) }
            }

            /// Mean, `0.0` when empty.
            #[must_use]
            #[allow(clippy::cast_precision_loss)]
            pub fn average(&self) -> f64 {
                if self.count == 0 {
                    0.0
                } else {
                    self.sum as f64 / self.count as f64
                }
            }
        }

        impl Extend<$elem> for $name {
            fn extend<I: IntoIterator<Item = $elem>>(&mut self, iter: I) {
                for v in iter {
                    self.accept(v);
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(
                    f,
                    "{}{{count={}, sum={}, min={}, average={:.6}, max={}}}",
                    stringify!($name),
                    self.count,
                    self.sum,
                    self.min,
                    self.average(),
                    self.max
                )
            }
        }
    };
}

integral_statistics!(
    IntSummaryStatistics,
    i32,
    i64,
    "Statistics over `i32` values; the sum is kept in `i64`."
);
integral_statistics!(
    LongSummaryStatistics,
    i64,
    i64,
    "Statistics over `i64` values; the sum wraps on overflow."
);

/// Statistics over `f64` values with a compensated sum.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DoubleSummaryStatistics {
    count: u64,
    sum: CompensatedSum,
    min: f64,
    max: f64,
}

impl Default for DoubleSummaryStatistics {
    fn default() -> Self {
        Self {
            count: 0,
            sum: CompensatedSum::default(),
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }
}

impl DoubleSummaryStatistics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one value. A NaN makes `min`, `max` and `average` NaN.
    pub fn accept(&mut self, v: f64) {
        self.count += 1;
        self.sum.add(v);
        self.min = nan_min(self.min, v);
        self.max = nan_max(self.max, v);
    }

    #[must_use]
    pub const fn count(&self) -> u64 {
        self.count
    }

    #[must_use]
    pub fn sum(&self) -> f64 {
        self.sum.value()
    }

    /// Minimum, or `+inf` when empty.
    #[must_use]
    pub const fn min(&self) -> f64 {
        self.min
    }

    /// Maximum, or `-inf` when empty.
    #[must_use]
    pub const fn max(&self) -> f64 {
        self.max
    }

    #[must_use]
    pub const fn min_value(&self) -> Option<f64> {
        if self.count == 0 { None } else { Some(self.min) }
    }

    #[must_use]
    pub const fn max_value(&self) -> Option<f64> {
        if self.count == 0 { None } else { Some(self.max) }
    }

    /// Mean, `0.0` when empty.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn average(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum() / self.count as f64
        }
    }
}

impl Extend<f64> for DoubleSummaryStatistics {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        for v in iter {
            self.accept(v);
        }
    }
}

impl fmt::Display for DoubleSummaryStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DoubleSummaryStatistics{{count={}, sum={:.6}, min={:.6}, average={:.6}, max={:.6}}}",
            self.count,
            self.sum(),
            self.min,
            self.average(),
            self.max
        )
    }
}

fn nan_min(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() { f64::NAN } else { a.min(b) }
}

fn nan_max(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() { f64::NAN } else { a.max(b) }
}

/* ===================== reducers ===================== */

macro_rules! summarizing {
    ($reducer:ident, $ctor:ident, $stats:ty, $elem:ty) => {
        #[derive(Clone, Copy, Debug)]
        pub struct $reducer<F>(F);

        impl<T, F> Reducer<T> for $reducer<F>
        where
            F: Fn(&T) -> $elem,
        {
            type Acc = $stats;
            type Output = $stats;

            fn create(&self) -> $stats {
                <$stats>::default()
            }

            fn add_input(&self, acc: &mut $stats, v: T) {
                acc.accept((self.0)(&v));
            }

            fn finish(&self, acc: $stats) -> $stats {
                acc
            }
        }

        #[doc = concat!("Summarize a `", stringify!($elem), "` projection into [`", stringify!($stats), "`].")]
        pub const fn $ctor<T, F>(f: F) -> $reducer<F>
        where
            F: Fn(&T) -> $elem,
        {
            $reducer(f)
        }
    };
}

summarizing!(SummarizingInt, summarizing_int, IntSummaryStatistics, i32);
summarizing!(SummarizingLong, summarizing_long, LongSummaryStatistics, i64);
summarizing!(SummarizingDouble, summarizing_double, DoubleSummaryStatistics, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compensated_sum_beats_naive_sum() {
        let mut s = CompensatedSum::default();
        for v in [1.0, 1e100, 1.0, -1e100] {
            s.add(v);
        }
        assert_eq!(s.value(), 2.0);
    }

    #[test]
    fn compensated_sum_falls_back_on_infinity() {
        let mut s = CompensatedSum::default();
        s.add(f64::INFINITY);
        s.add(1.0);
        assert_eq!(s.value(), f64::INFINITY);
    }
}
