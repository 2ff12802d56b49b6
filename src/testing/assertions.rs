//! Assertion functions for testing sequence outputs.
//!
//! This module provides specialized assertion functions for comparing the
//! results of terminal operations with expected values.

use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::hash::{BuildHasher, Hash};

use crate::collectors::Partitioned;
use crate::error::SeqError;

/// Assert that two collections are equal in order and content.
///
/// This function compares two slices element-by-element and panics with
/// a detailed message if they differ.
///
/// # Panics
///
/// Panics if the collections differ in length or content.
///
/// # Example
///
/// ```
/// use seqflow::testing::assert_collections_equal;
///
/// let actual = vec![1, 2, 3];
/// let expected = vec![1, 2, 3];
/// assert_collections_equal(&actual, &expected);
/// ```
pub fn assert_collections_equal<T: Debug + PartialEq>(actual: &[T], expected: &[T]) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "Collection length mismatch:\n  Expected length: {}\n  Actual length: {}\n  Expected: {expected:?}\n  Actual: {actual:?}",
        expected.len(),
        actual.len()
    );

    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        assert_eq!(
            a, e,
            "Collection mismatch at index {i}:\n  Expected: {e:?}\n  Actual: {a:?}\n  Full expected: {expected:?}\n  Full actual: {actual:?}"
        );
    }
}

/// Assert that two collections contain the same elements, ignoring order.
///
/// # Panics
///
/// Panics if the collections differ in length or content (ignoring order).
///
/// # Example
///
/// ```
/// use seqflow::testing::assert_collections_unordered_equal;
///
/// let actual = vec![3, 1, 2];
/// let expected = vec![1, 2, 3];
/// assert_collections_unordered_equal(&actual, &expected);
/// ```
pub fn assert_collections_unordered_equal<T: Debug + Eq + Hash>(actual: &[T], expected: &[T]) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "Collection length mismatch:\n  Expected length: {}\n  Actual length: {}\n  Expected: {expected:?}\n  Actual: {actual:?}",
        expected.len(),
        actual.len()
    );

    let actual_counts = multiset(actual);
    let expected_counts = multiset(expected);
    if actual_counts != expected_counts {
        let actual_set: HashSet<_> = actual_counts.keys().collect();
        let expected_set: HashSet<_> = expected_counts.keys().collect();
        let missing: Vec<_> = expected_set.difference(&actual_set).collect();
        let extra: Vec<_> = actual_set.difference(&expected_set).collect();

        panic!(
            "Collection content mismatch:\n  Missing elements: {missing:?}\n  Extra elements: {extra:?}\n  Expected: {expected:?}\n  Actual: {actual:?}"
        );
    }
}

fn multiset<T: Eq + Hash>(items: &[T]) -> HashMap<&T, usize> {
    let mut counts = HashMap::new();
    for item in items {
        *counts.entry(item).or_insert(0) += 1;
    }
    counts
}

/// Assert that a grouping result has exactly the expected groups, each with
/// its elements in the expected (source) order.
///
/// # Panics
///
/// Panics if the key sets differ or any group differs in content or order.
///
/// # Example
///
/// ```
/// use seqflow::testing::assert_groups_equal;
/// use std::collections::HashMap;
///
/// let mut actual = HashMap::new();
/// actual.insert(3, vec!["hey"]);
/// actual.insert(2, vec!["hi", "by"]);
/// assert_groups_equal(&actual, vec![(2, vec!["hi", "by"]), (3, vec!["hey"])]);
/// ```
pub fn assert_groups_equal<K, V, S: BuildHasher>(
    actual: &HashMap<K, Vec<V>, S>,
    mut expected: Vec<(K, Vec<V>)>,
) where
    K: Debug + Ord + Hash,
    V: Debug + PartialEq,
{
    expected.sort_by(|a, b| a.0.cmp(&b.0));
    let mut keys: Vec<&K> = actual.keys().collect();
    keys.sort();

    assert_eq!(
        keys.len(),
        expected.len(),
        "Group count mismatch:\n  Expected keys: {:?}\n  Actual keys: {keys:?}",
        expected.iter().map(|(k, _)| k).collect::<Vec<_>>()
    );

    for (key, (ek, ev)) in keys.into_iter().zip(expected.iter()) {
        assert_eq!(key, ek, "Key mismatch:\n  Expected: {ek:?}\n  Actual: {key:?}");
        let av = &actual[key];
        assert_eq!(
            av, ev,
            "Group mismatch for key {key:?}:\n  Expected: {ev:?}\n  Actual: {av:?}"
        );
    }
}

/// Assert that a partition splits `source` exactly: every element is in one
/// group, no element is in both, and `pred` agrees with the placement.
///
/// # Panics
///
/// Panics if an element is misplaced, missing or duplicated.
///
/// # Example
///
/// ```
/// use seqflow::collectors::Partitioned;
/// use seqflow::testing::assert_partition_exact;
///
/// let p = Partitioned { accepted: vec![2, 4], rejected: vec![1, 3] };
/// assert_partition_exact(&p, &[1, 2, 3, 4], |x| x % 2 == 0);
/// ```
pub fn assert_partition_exact<T>(
    partition: &Partitioned<Vec<T>>,
    source: &[T],
    pred: impl Fn(&T) -> bool,
) where
    T: Debug + Eq + Hash,
{
    assert_all(&partition.accepted, &pred);
    assert_none(&partition.rejected, &pred);

    let mut union: Vec<&T> = partition.accepted.iter().collect();
    union.extend(partition.rejected.iter());
    let union_counts = multiset(&union);
    let source_refs: Vec<&T> = source.iter().collect();
    assert_eq!(
        union_counts,
        multiset(&source_refs),
        "Partition does not cover the source:\n  Source: {source:?}\n  Partition: {partition:?}"
    );
}

/// Assert that all elements in a collection satisfy a predicate.
///
/// # Panics
///
/// Panics if any element does not satisfy the predicate.
///
/// # Example
///
/// ```
/// use seqflow::testing::assert_all;
///
/// let data = vec![2, 4, 6, 8];
/// assert_all(&data, |x| x % 2 == 0);
/// ```
pub fn assert_all<T: Debug>(collection: &[T], predicate: impl Fn(&T) -> bool) {
    for (i, item) in collection.iter().enumerate() {
        assert!(
            predicate(item),
            "Predicate failed for element at index {i}:\n  Element: {item:?}\n  Collection: {collection:?}"
        );
    }
}

/// Assert that no elements in a collection satisfy a predicate.
///
/// # Panics
///
/// Panics if any element satisfies the predicate.
///
/// # Example
///
/// ```
/// use seqflow::testing::assert_none;
///
/// let data = vec![1, 3, 5, 7];
/// assert_none(&data, |x| x % 2 == 0);
/// ```
pub fn assert_none<T: Debug>(collection: &[T], predicate: impl Fn(&T) -> bool) {
    for (i, item) in collection.iter().enumerate() {
        assert!(
            !predicate(item),
            "Predicate unexpectedly succeeded for element at index {i}:\n  Element: {item:?}\n  Collection: {collection:?}"
        );
    }
}

/// Assert that a result failed with [`SeqError::IllegalState`].
///
/// # Panics
///
/// Panics if the result is `Ok` or fails with another error.
///
/// # Example
///
/// ```
/// use seqflow::*;
/// use seqflow::testing::assert_illegal_state;
///
/// let s = of([1, 2, 3]);
/// let again = s.clone();
/// s.count().unwrap();
/// assert_illegal_state(&again.count());
/// ```
pub fn assert_illegal_state<T: Debug>(result: &anyhow::Result<T>) {
    match result {
        Ok(v) => panic!("Expected an IllegalState error, got Ok({v:?})"),
        Err(e) => assert!(
            e.downcast_ref::<SeqError>().is_some_and(SeqError::is_illegal_state),
            "Expected an IllegalState error, got: {e:#}"
        ),
    }
}

/// Assert that two floats are within `eps` of each other.
///
/// # Panics
///
/// Panics if `|actual - expected| > eps`.
///
/// # Example
///
/// ```
/// use seqflow::testing::assert_close;
///
/// assert_close(0.1 + 0.2, 0.3, 1e-12);
/// ```
pub fn assert_close(actual: f64, expected: f64, eps: f64) {
    assert!(
        (actual - expected).abs() <= eps,
        "Float mismatch:\n  Expected: {expected} (+/- {eps})\n  Actual: {actual}"
    );
}
