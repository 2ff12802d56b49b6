//! Walkthrough of the built-in reducers.
//!
//! Demonstrates:
//! - Collecting into sets, sorted sets and groups
//! - Joining with separator, prefix and suffix
//! - Partitioning by a predicate
//! - Counting, summing and summary statistics
//!
//! Run with: cargo run --example collectors

use std::collections::BTreeMap;

use anyhow::Result;
use seqflow::collectors::{
    counting, grouping_by_into, joining_wrapped, partitioning_by, summarizing_int, summing_int,
    to_vec,
};
use seqflow::testing::collector_words;
use seqflow::*;

fn main() -> Result<()> {
    let words = collector_words();
    println!("Original list: {words:?}");

    let as_set = from_vec(words.clone()).to_set()?;
    println!("List as a set: {as_set:?}");

    let as_sorted_set = from_vec(words.clone()).to_sorted_set()?;
    println!("List as a sorted set: {as_sorted_set:?}");

    // BTreeMap keeps the printed groups in key order.
    let by_length: BTreeMap<usize, Vec<String>> = from_vec(words.clone())
        .collect(grouping_by_into(|s: &String| s.len(), to_vec()))?;
    println!("Strings and lengths: {by_length:?}");

    let listing = from_vec(words.clone())
        .map(|s| s.to_uppercase())
        .distinct()
        .collect(joining_wrapped(", ", "[", "]"))?;
    println!("List as a string: {listing}");

    let by_emptiness = from_vec(words.clone()).collect(partitioning_by(|s: &String| s.is_empty()))?;
    println!("Partitioning: {by_emptiness}");

    let count = from_vec(words.clone()).collect(counting())?;
    let total_length = from_vec(words.clone())
        .collect(summing_int(|s: &String| i32::try_from(s.len()).unwrap_or(i32::MAX)))?;
    println!("Count: {count}, total length: {total_length}");

    let stats = from_vec(words)
        .collect(summarizing_int(|s: &String| i32::try_from(s.len()).unwrap_or(i32::MAX)))?;
    println!("Statistics: {stats}");
    println!(
        "avg={:.2} count={} max={} min={}",
        stats.average(),
        stats.count(),
        stats.max(),
        stats.min()
    );

    Ok(())
}
