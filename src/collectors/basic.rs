//! Arithmetic reducers: counting, summing, averaging, extremes and folding.

use std::cmp::Ordering;

use super::statistical::CompensatedSum;
use super::Reducer;

/* ===================== Counting ===================== */

/// Number of elements. Order-independent.
#[derive(Clone, Copy, Debug, Default)]
pub struct Counting;

impl<T> Reducer<T> for Counting {
    type Acc = u64;
    type Output = u64;

    fn create(&self) -> u64 {
        0
    }

    fn add_input(&self, acc: &mut u64, _v: T) {
        *acc += 1;
    }

    fn finish(&self, acc: u64) -> u64 {
        acc
    }
}

/// Counts the elements.
#[must_use]
pub const fn counting() -> Counting {
    Counting
}

/* ===================== Summing ===================== */

/// Sum of an `i32` projection, accumulated in `i64`.
#[derive(Clone, Copy, Debug)]
pub struct SummingInt<F>(F);

impl<T, F> Reducer<T> for SummingInt<F>
where
    F: Fn(&T) -> i32,
{
    type Acc = i64;
    type Output = i64;

    fn create(&self) -> i64 {
        0
    }

    fn add_input(&self, acc: &mut i64, v: T) {
        *acc += i64::from((self.0)(&v));
    }

    fn finish(&self, acc: i64) -> i64 {
        acc
    }
}

/// Sum of an `i32` projection of each element.
pub const fn summing_int<T, F>(f: F) -> SummingInt<F>
where
    F: Fn(&T) -> i32,
{
    SummingInt(f)
}

/// Sum of an `i64` projection. Overflow wraps.
#[derive(Clone, Copy, Debug)]
pub struct SummingLong<F>(F);

impl<T, F> Reducer<T> for SummingLong<F>
where
    F: Fn(&T) -> i64,
{
    type Acc = i64;
    type Output = i64;

    fn create(&self) -> i64 {
        0
    }

    fn add_input(&self, acc: &mut i64, v: T) {
        *acc = acc.wrapping_add((self.0)(&v));
    }

    fn finish(&self, acc: i64) -> i64 {
        acc
    }
}

/// Sum of an `i64` projection of each element (wrapping on overflow).
pub const fn summing_long<T, F>(f: F) -> SummingLong<F>
where
    F: Fn(&T) -> i64,
{
    SummingLong(f)
}

/// Compensated sum of an `f64` projection.
#[derive(Clone, Copy, Debug)]
pub struct SummingDouble<F>(F);

impl<T, F> Reducer<T> for SummingDouble<F>
where
    F: Fn(&T) -> f64,
{
    type Acc = CompensatedSum;
    type Output = f64;

    fn create(&self) -> CompensatedSum {
        CompensatedSum::default()
    }

    fn add_input(&self, acc: &mut CompensatedSum, v: T) {
        acc.add((self.0)(&v));
    }

    fn finish(&self, acc: CompensatedSum) -> f64 {
        acc.value()
    }
}

/// Sum of an `f64` projection of each element, using Kahan summation.
pub const fn summing_double<T, F>(f: F) -> SummingDouble<F>
where
    F: Fn(&T) -> f64,
{
    SummingDouble(f)
}

/* ===================== Averaging ===================== */

/// Arithmetic mean of an `i32` projection. Empty input yields `0.0`.
#[derive(Clone, Copy, Debug)]
pub struct AveragingInt<F>(F);

impl<T, F> Reducer<T> for AveragingInt<F>
where
    F: Fn(&T) -> i32,
{
    type Acc = (i64, u64);
    type Output = f64;

    fn create(&self) -> (i64, u64) {
        (0, 0)
    }

    fn add_input(&self, acc: &mut (i64, u64), v: T) {
        acc.0 += i64::from((self.0)(&v));
        acc.1 += 1;
    }

    #[allow(clippy::cast_precision_loss)]
    fn finish(&self, acc: (i64, u64)) -> f64 {
        if acc.1 == 0 {
            0.0
        } else {
            acc.0 as f64 / acc.1 as f64
        }
    }
}

/// See [`AveragingInt`].
pub const fn averaging_int<T, F>(f: F) -> AveragingInt<F>
where
    F: Fn(&T) -> i32,
{
    AveragingInt(f)
}

/// Arithmetic mean of an `i64` projection, summed in `i128`.
#[derive(Clone, Copy, Debug)]
pub struct AveragingLong<F>(F);

impl<T, F> Reducer<T> for AveragingLong<F>
where
    F: Fn(&T) -> i64,
{
    type Acc = (i128, u64);
    type Output = f64;

    fn create(&self) -> (i128, u64) {
        (0, 0)
    }

    fn add_input(&self, acc: &mut (i128, u64), v: T) {
        acc.0 += i128::from((self.0)(&v));
        acc.1 += 1;
    }

    #[allow(clippy::cast_precision_loss)]
    fn finish(&self, acc: (i128, u64)) -> f64 {
        if acc.1 == 0 {
            0.0
        } else {
            acc.0 as f64 / acc.1 as f64
        }
    }
}

/// Mean of an `i64` projection as `f64`.
pub const fn averaging_long<T, F>(f: F) -> AveragingLong<F>
where
    F: Fn(&T) -> i64,
{
    AveragingLong(f)
}

/// Arithmetic mean of an `f64` projection.
#[derive(Clone, Copy, Debug)]
pub struct AveragingDouble<F>(F);

impl<T, F> Reducer<T> for AveragingDouble<F>
where
    F: Fn(&T) -> f64,
{
    type Acc = (CompensatedSum, u64);
    type Output = f64;

    fn create(&self) -> (CompensatedSum, u64) {
        (CompensatedSum::default(), 0)
    }

    fn add_input(&self, acc: &mut (CompensatedSum, u64), v: T) {
        acc.0.add((self.0)(&v));
        acc.1 += 1;
    }

    #[allow(clippy::cast_precision_loss)]
    fn finish(&self, acc: (CompensatedSum, u64)) -> f64 {
        if acc.1 == 0 {
            0.0
        } else {
            acc.0.value() / acc.1 as f64
        }
    }
}

/// Compensated mean of an `f64` projection.
pub const fn averaging_double<T, F>(f: F) -> AveragingDouble<F>
where
    F: Fn(&T) -> f64,
{
    AveragingDouble(f)
}

/* ===================== MinBy / MaxBy ===================== */

/// Smallest element by comparator; the first of equal minima wins.
#[derive(Clone, Copy, Debug)]
pub struct MinBy<C>(C);

impl<T, C> Reducer<T> for MinBy<C>
where
    C: Fn(&T, &T) -> Ordering,
{
    type Acc = Option<T>;
    type Output = Option<T>;

    fn create(&self) -> Option<T> {
        None
    }

    fn add_input(&self, acc: &mut Option<T>, v: T) {
        match acc {
            Some(cur) => {
                if (self.0)(&v, cur) == Ordering::Less {
                    *cur = v;
                }
            }
            None => *acc = Some(v),
        }
    }

    fn finish(&self, acc: Option<T>) -> Option<T> {
        acc
    }
}

/// See [`MinBy`].
pub const fn min_by<T, C>(cmp: C) -> MinBy<C>
where
    C: Fn(&T, &T) -> Ordering,
{
    MinBy(cmp)
}

/// Largest element by comparator; the last of equal maxima wins.
#[derive(Clone, Copy, Debug)]
pub struct MaxBy<C>(C);

impl<T, C> Reducer<T> for MaxBy<C>
where
    C: Fn(&T, &T) -> Ordering,
{
    type Acc = Option<T>;
    type Output = Option<T>;

    fn create(&self) -> Option<T> {
        None
    }

    fn add_input(&self, acc: &mut Option<T>, v: T) {
        match acc {
            Some(cur) => {
                if (self.0)(&v, cur) != Ordering::Less {
                    *cur = v;
                }
            }
            None => *acc = Some(v),
        }
    }

    fn finish(&self, acc: Option<T>) -> Option<T> {
        acc
    }
}

/// See [`MaxBy`].
pub const fn max_by<T, C>(cmp: C) -> MaxBy<C>
where
    C: Fn(&T, &T) -> Ordering,
{
    MaxBy(cmp)
}

/* ===================== Reducing ===================== */

/// Fold with an identity and a binary operator.
#[derive(Clone, Debug)]
pub struct Reducing<T, F> {
    identity: T,
    op: F,
}

impl<T, F> Reducer<T> for Reducing<T, F>
where
    T: Clone,
    F: Fn(T, T) -> T,
{
    type Acc = Option<T>;
    type Output = T;

    fn create(&self) -> Option<T> {
        Some(self.identity.clone())
    }

    fn add_input(&self, acc: &mut Option<T>, v: T) {
        *acc = acc.take().map(|a| (self.op)(a, v));
    }

    fn finish(&self, acc: Option<T>) -> T {
        acc.unwrap_or_else(|| self.identity.clone())
    }
}

/// `identity op e1 op e2 ...`; `identity` for an empty sequence.
pub const fn reducing<T, F>(identity: T, op: F) -> Reducing<T, F>
where
    T: Clone,
    F: Fn(T, T) -> T,
{
    Reducing { identity, op }
}
