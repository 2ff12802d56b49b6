//! Container reducers: `Vec`, `HashSet`, `BTreeSet` and any `Default + Extend`.

use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

use super::Reducer;

/// Collects into any container `C: Default + Extend<T>`.
///
/// Order of the output is whatever `C` makes of pull order: `Vec` keeps it,
/// `HashSet` drops it, `BTreeSet` sorts.
pub struct ToCollection<C>(PhantomData<fn() -> C>);

impl<C> Clone for ToCollection<C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for ToCollection<C> {}

impl<C> fmt::Debug for ToCollection<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ToCollection")
    }
}

impl<T, C> Reducer<T> for ToCollection<C>
where
    C: Default + Extend<T>,
{
    type Acc = C;
    type Output = C;

    fn create(&self) -> C {
        C::default()
    }

    fn add_input(&self, acc: &mut C, v: T) {
        acc.extend(Some(v));
    }

    fn finish(&self, acc: C) -> C {
        acc
    }
}

/// Collect into the container named by the type parameter.
///
/// ```
/// use std::collections::VecDeque;
/// use seqflow::*;
/// use seqflow::collectors::to_collection;
///
/// let q = of([1, 2, 3]).collect(to_collection::<VecDeque<_>>())?;
/// assert_eq!(q.front(), Some(&1));
/// # anyhow::Result::<()>::Ok(())
/// ```
#[must_use]
pub const fn to_collection<C>() -> ToCollection<C> {
    ToCollection(PhantomData)
}

/// Ordered collection in pull order.
#[must_use]
pub const fn to_vec<T>() -> ToCollection<Vec<T>> {
    to_collection()
}

/// Deduplicating, unordered set.
#[must_use]
pub const fn to_set<T: Eq + Hash>() -> ToCollection<HashSet<T>> {
    to_collection()
}

/// Deduplicating set in natural order.
#[must_use]
pub const fn to_sorted_set<T: Ord>() -> ToCollection<BTreeSet<T>> {
    to_collection()
}
