//! Built-in reducers for [`Sequence::collect`](crate::Sequence::collect).
//!
//! A [`Reducer`] folds a sequence into one value through three steps:
//! [`create`](Reducer::create) a fresh accumulator,
//! [`add_input`](Reducer::add_input) one element at a time, then
//! [`finish`](Reducer::finish) the accumulator into the output.
//!
//! - Containers: [`to_vec`], [`to_set`], [`to_sorted_set`], [`to_collection`].
//! - Grouping: [`grouping_by`], [`grouping_by_with`], [`grouping_by_into`],
//!   [`partitioning_by`], [`partitioning_by_with`].
//! - Text: [`joining`], [`joining_with`], [`joining_wrapped`].
//! - Arithmetic: [`counting`], `summing_*`, `averaging_*`, [`min_by`],
//!   [`max_by`], [`reducing`].
//! - Statistics: `summarizing_*` producing [`IntSummaryStatistics`],
//!   [`LongSummaryStatistics`] and [`DoubleSummaryStatistics`].
//! - Adapters: [`mapping`], [`filtering`], [`collecting_and_then`],
//!   [`teeing`].
//!
//! Reducers nest: a grouping reducer keeps one downstream accumulator per
//! key inside its own accumulator and finishes each of them before building
//! the outer result.
//!
//! # Examples
//! ```
//! use seqflow::*;
//! use seqflow::collectors::{counting, grouping_by_with, joining_wrapped};
//!
//! let words = vec!["hi", "by", "ok", "hey"];
//!
//! let text = from_vec(words.clone()).collect(joining_wrapped(", ", "[", "]"))?;
//! assert_eq!(text, "[hi, by, ok, hey]");
//!
//! let per_len = from_vec(words).collect(grouping_by_with(|w: &&str| w.len(), counting()))?;
//! assert_eq!(per_len[&2], 3);
//! # anyhow::Result::<()>::Ok(())
//! ```

mod adapters;
mod basic;
mod containers;
mod grouping;
mod joining;
mod statistical;

pub use adapters::{
    collecting_and_then, filtering, mapping, teeing, CollectingAndThen, Filtering, Mapping,
    Teeing,
};
pub use basic::{
    averaging_double, averaging_int, averaging_long, counting, max_by, min_by, reducing,
    summing_double, summing_int, summing_long, AveragingDouble, AveragingInt, AveragingLong,
    Counting, MaxBy, MinBy, Reducing, SummingDouble, SummingInt, SummingLong,
};
pub use containers::{to_collection, to_set, to_sorted_set, to_vec, ToCollection};
pub use grouping::{
    grouping_by, grouping_by_into, grouping_by_with, partitioning_by, partitioning_by_with,
    GroupingBy, Partitioned, PartitioningBy,
};
pub use joining::{joining, joining_with, joining_wrapped, Joining};
pub use statistical::{
    CompensatedSum, summarizing_double, summarizing_int, summarizing_long, DoubleSummaryStatistics,
    IntSummaryStatistics, LongSummaryStatistics, SummarizingDouble, SummarizingInt,
    SummarizingLong,
};

/// Strategy that folds elements of type `T` into a single result.
///
/// Implementations must tolerate `finish` being called on a freshly created
/// accumulator (the empty sequence).
pub trait Reducer<T> {
    /// Mutable accumulation state.
    type Acc;
    /// Final result.
    type Output;

    /// Supply a fresh accumulator.
    fn create(&self) -> Self::Acc;

    /// Fold one element into `acc`.
    fn add_input(&self, acc: &mut Self::Acc, v: T);

    /// Turn the accumulator into the result.
    fn finish(&self, acc: Self::Acc) -> Self::Output;
}

impl<T, R: Reducer<T> + ?Sized> Reducer<T> for &R {
    type Acc = R::Acc;
    type Output = R::Output;

    fn create(&self) -> Self::Acc {
        (**self).create()
    }

    fn add_input(&self, acc: &mut Self::Acc, v: T) {
        (**self).add_input(acc, v);
    }

    fn finish(&self, acc: Self::Acc) -> Self::Output {
        (**self).finish(acc)
    }
}
