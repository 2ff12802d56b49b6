//! Grouping and partitioning reducers.
//!
//! Both keep one downstream accumulator per group and finish every one of
//! them before the outer result is built, so any reducer can be nested
//! (including another grouping).

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

use super::containers::{to_vec, ToCollection};
use super::Reducer;

/* ===================== GroupingBy ===================== */

/// Groups elements by a key and reduces each group with `downstream`.
///
/// The key function runs once per element. Within a group, elements reach
/// the downstream reducer in pull order. The output map type `M` is any
/// `FromIterator<(K, Output)>`, e.g. `HashMap` or `BTreeMap`.
pub struct GroupingBy<F, D, M> {
    key: F,
    downstream: D,
    _m: PhantomData<fn() -> M>,
}

impl<F: Clone, D: Clone, M> Clone for GroupingBy<F, D, M> {
    fn clone(&self) -> Self {
        Self { key: self.key.clone(), downstream: self.downstream.clone(), _m: PhantomData }
    }
}

impl<F, D: fmt::Debug, M> fmt::Debug for GroupingBy<F, D, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroupingBy").field("downstream", &self.downstream).finish_non_exhaustive()
    }
}

impl<T, K, F, D, M> Reducer<T> for GroupingBy<F, D, M>
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
    D: Reducer<T>,
    M: FromIterator<(K, D::Output)>,
{
    type Acc = HashMap<K, D::Acc>;
    type Output = M;

    fn create(&self) -> Self::Acc {
        HashMap::new()
    }

    fn add_input(&self, acc: &mut Self::Acc, v: T) {
        let group = acc.entry((self.key)(&v)).or_insert_with(|| self.downstream.create());
        self.downstream.add_input(group, v);
    }

    fn finish(&self, acc: Self::Acc) -> M {
        acc.into_iter().map(|(k, a)| (k, self.downstream.finish(a))).collect()
    }
}

/// Group into `HashMap<K, Vec<T>>`.
///
/// ```
/// use seqflow::*;
/// use seqflow::collectors::grouping_by;
///
/// let by_len = from_vec(vec!["hi", "by", "ok", "hey"])
///     .collect(grouping_by(|s: &&str| s.len()))?;
/// assert_eq!(by_len[&2], vec!["hi", "by", "ok"]);
/// assert_eq!(by_len[&3], vec!["hey"]);
/// # anyhow::Result::<()>::Ok(())
/// ```
pub fn grouping_by<T, K, F>(key: F) -> GroupingBy<F, ToCollection<Vec<T>>, HashMap<K, Vec<T>>>
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    grouping_by_into(key, to_vec())
}

/// Group into `HashMap<K, O>` where `O` is the downstream output.
pub fn grouping_by_with<T, K, F, D>(key: F, downstream: D) -> GroupingBy<F, D, HashMap<K, D::Output>>
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
    D: Reducer<T>,
{
    grouping_by_into(key, downstream)
}

/// Group into a caller-chosen map type.
///
/// ```
/// use std::collections::BTreeMap;
/// use seqflow::*;
/// use seqflow::collectors::{counting, grouping_by_into};
///
/// let m: BTreeMap<usize, u64> = from_vec(vec!["a", "bb", "cc"])
///     .collect(grouping_by_into(|s: &&str| s.len(), counting()))?;
/// assert_eq!(m.into_iter().collect::<Vec<_>>(), vec![(1, 1), (2, 2)]);
/// # anyhow::Result::<()>::Ok(())
/// ```
pub const fn grouping_by_into<M, F, D>(key: F, downstream: D) -> GroupingBy<F, D, M> {
    GroupingBy { key, downstream, _m: PhantomData }
}

/* ===================== Partitioning ===================== */

/// The two groups produced by [`partitioning_by`]. Both are always present,
/// even when empty.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Partitioned<O> {
    /// Result for elements the predicate accepted.
    pub accepted: O,
    /// Result for elements the predicate rejected.
    pub rejected: O,
}

impl<O> Partitioned<O> {
    /// The group for predicate outcome `key`.
    #[must_use]
    pub const fn get(&self, key: bool) -> &O {
        if key { &self.accepted } else { &self.rejected }
    }

    /// `(accepted, rejected)`.
    #[must_use]
    pub fn into_pair(self) -> (O, O) {
        (self.accepted, self.rejected)
    }

    fn group_mut(&mut self, key: bool) -> &mut O {
        if key { &mut self.accepted } else { &mut self.rejected }
    }
}

impl<O: fmt::Debug> fmt::Display for Partitioned<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{false={:?}, true={:?}}}", self.rejected, self.accepted)
    }
}

/// Splits elements by a predicate and reduces each side with `downstream`.
#[derive(Clone, Copy, Debug)]
pub struct PartitioningBy<P, D> {
    pred: P,
    downstream: D,
}

impl<T, P, D> Reducer<T> for PartitioningBy<P, D>
where
    P: Fn(&T) -> bool,
    D: Reducer<T>,
{
    type Acc = Partitioned<D::Acc>;
    type Output = Partitioned<D::Output>;

    fn create(&self) -> Self::Acc {
        Partitioned { accepted: self.downstream.create(), rejected: self.downstream.create() }
    }

    fn add_input(&self, acc: &mut Self::Acc, v: T) {
        let side = acc.group_mut((self.pred)(&v));
        self.downstream.add_input(side, v);
    }

    fn finish(&self, acc: Self::Acc) -> Self::Output {
        Partitioned {
            accepted: self.downstream.finish(acc.accepted),
            rejected: self.downstream.finish(acc.rejected),
        }
    }
}

/// Partition into two `Vec<T>` groups.
pub const fn partitioning_by<T, P>(pred: P) -> PartitioningBy<P, ToCollection<Vec<T>>>
where
    P: Fn(&T) -> bool,
{
    PartitioningBy { pred, downstream: to_vec() }
}

/// Partition and reduce each side with `downstream`.
pub const fn partitioning_by_with<T, P, D>(pred: P, downstream: D) -> PartitioningBy<P, D>
where
    P: Fn(&T) -> bool,
    D: Reducer<T>,
{
    PartitioningBy { pred, downstream }
}
