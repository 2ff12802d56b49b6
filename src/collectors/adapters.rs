//! Reducers that wrap other reducers.

use super::Reducer;

/// Applies `f` to each element before handing it downstream.
#[derive(Clone, Copy, Debug)]
pub struct Mapping<F, D> {
    f: F,
    downstream: D,
}

impl<T, U, F, D> Reducer<T> for Mapping<F, D>
where
    F: Fn(T) -> U,
    D: Reducer<U>,
{
    type Acc = D::Acc;
    type Output = D::Output;

    fn create(&self) -> D::Acc {
        self.downstream.create()
    }

    fn add_input(&self, acc: &mut D::Acc, v: T) {
        self.downstream.add_input(acc, (self.f)(v));
    }

    fn finish(&self, acc: D::Acc) -> D::Output {
        self.downstream.finish(acc)
    }
}

/// Map each element with `f`, then reduce with `downstream`. Mostly useful
/// inside grouping reducers.
///
/// ```
/// use seqflow::*;
/// use seqflow::collectors::{grouping_by_with, joining_with, mapping};
///
/// let by_parity = from_vec(vec!["apple", "avocado", "banana"])
///     .collect(grouping_by_with(
///         |s: &&str| s.len() % 2,
///         mapping(|s: &str| s.to_uppercase(), joining_with("|")),
///     ))?;
/// assert_eq!(by_parity[&1], "APPLE|AVOCADO");
/// assert_eq!(by_parity[&0], "BANANA");
/// # anyhow::Result::<()>::Ok(())
/// ```
pub const fn mapping<T, U, F, D>(f: F, downstream: D) -> Mapping<F, D>
where
    F: Fn(T) -> U,
    D: Reducer<U>,
{
    Mapping { f, downstream }
}

/// Passes only elements matching `pred` downstream.
#[derive(Clone, Copy, Debug)]
pub struct Filtering<P, D> {
    pred: P,
    downstream: D,
}

impl<T, P, D> Reducer<T> for Filtering<P, D>
where
    P: Fn(&T) -> bool,
    D: Reducer<T>,
{
    type Acc = D::Acc;
    type Output = D::Output;

    fn create(&self) -> D::Acc {
        self.downstream.create()
    }

    fn add_input(&self, acc: &mut D::Acc, v: T) {
        if (self.pred)(&v) {
            self.downstream.add_input(acc, v);
        }
    }

    fn finish(&self, acc: D::Acc) -> D::Output {
        self.downstream.finish(acc)
    }
}

/// Unlike a `filter` stage, a group whose elements are all rejected still
/// appears in a grouping result, with an empty downstream result.
pub const fn filtering<T, P, D>(pred: P, downstream: D) -> Filtering<P, D>
where
    P: Fn(&T) -> bool,
    D: Reducer<T>,
{
    Filtering { pred, downstream }
}

/// Post-processes the downstream result.
#[derive(Clone, Copy, Debug)]
pub struct CollectingAndThen<D, G> {
    downstream: D,
    finisher: G,
}

impl<T, R, D, G> Reducer<T> for CollectingAndThen<D, G>
where
    D: Reducer<T>,
    G: Fn(D::Output) -> R,
{
    type Acc = D::Acc;
    type Output = R;

    fn create(&self) -> D::Acc {
        self.downstream.create()
    }

    fn add_input(&self, acc: &mut D::Acc, v: T) {
        self.downstream.add_input(acc, v);
    }

    fn finish(&self, acc: D::Acc) -> R {
        (self.finisher)(self.downstream.finish(acc))
    }
}

pub const fn collecting_and_then<T, R, D, G>(downstream: D, finisher: G) -> CollectingAndThen<D, G>
where
    D: Reducer<T>,
    G: Fn(D::Output) -> R,
{
    CollectingAndThen { downstream, finisher }
}

/// Feeds every element to two reducers and merges their results.
#[derive(Clone, Copy, Debug)]
pub struct Teeing<A, B, G> {
    left: A,
    right: B,
    merger: G,
}

impl<T, R, A, B, G> Reducer<T> for Teeing<A, B, G>
where
    T: Clone,
    A: Reducer<T>,
    B: Reducer<T>,
    G: Fn(A::Output, B::Output) -> R,
{
    type Acc = (A::Acc, B::Acc);
    type Output = R;

    fn create(&self) -> Self::Acc {
        (self.left.create(), self.right.create())
    }

    fn add_input(&self, acc: &mut Self::Acc, v: T) {
        self.left.add_input(&mut acc.0, v.clone());
        self.right.add_input(&mut acc.1, v);
    }

    fn finish(&self, acc: Self::Acc) -> R {
        (self.merger)(self.left.finish(acc.0), self.right.finish(acc.1))
    }
}

/// Run two reducers over the same pass.
///
/// ```
/// use seqflow::*;
/// use seqflow::collectors::{counting, summing_int, teeing};
///
/// let mean = of([2, 4, 9])
///     .collect(teeing(summing_int(|x: &i32| *x), counting(), |s: i64, c: u64| s as f64 / c as f64))?;
/// assert_eq!(mean, 5.0);
/// # anyhow::Result::<()>::Ok(())
/// ```
pub const fn teeing<T, R, A, B, G>(left: A, right: B, merger: G) -> Teeing<A, B, G>
where
    T: Clone,
    A: Reducer<T>,
    B: Reducer<T>,
    G: Fn(A::Output, B::Output) -> R,
{
    Teeing { left, right, merger }
}
