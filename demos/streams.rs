//! Walkthrough of sequence stages and terminal operations.
//!
//! Demonstrates:
//! - filter, sorted, limit, skip, map, distinct, peek
//! - find_first and optional handling
//! - Reading lines of a file (a missing file is reported, not fatal)
//! - Numeric sequences and for_each
//!
//! Run with: cargo run --example streams

use anyhow::Result;
use seqflow::collectors::joining_with;
use seqflow::testing::stream_words;
use seqflow::*;

fn main() -> Result<()> {
    println!("Sequence Walkthrough\n");

    let words = stream_words();
    println!("Original list: {words:?}");

    // =============================================================================
    // Filtering and ordering
    // =============================================================================
    let with_ll = from_vec(words.clone())
        .filter(|s| s.contains("ll"))
        .sorted_by_key(String::len)
        .to_vec()?;
    println!("Words containing ll: {with_ll:?}");

    let first_with_o = from_vec(words.clone())
        .filter(|s| s.contains('o'))
        .limit(1)
        .to_vec()?;
    println!("Words containing o, limited to 1: {first_with_o:?}");

    let skipped = from_vec(words.clone()).skip(2).to_vec()?;
    println!("Skipped two values: {skipped:?}");

    // =============================================================================
    // Mapping
    // =============================================================================
    let lengths = from_vec(words.clone()).map(|s| s.len()).to_vec()?;
    println!("Lengths of words: {lengths:?}");

    let unique_lengths = from_vec(words.clone()).map(|s| s.len()).distinct().to_vec()?;
    println!("Lengths of words, no repeats: {unique_lengths:?}");

    // take_while stops at the first failure; filter would keep going.
    let leading_short = from_vec(words.clone()).take_while(|s| s.len() <= 5).to_vec()?;
    let after_short = from_vec(words.clone()).drop_while(|s| s.len() <= 5).to_vec()?;
    println!("Leading words of at most five letters: {leading_short:?}");
    println!("Everything from the first longer word: {after_short:?}");

    // =============================================================================
    // Peeking
    // =============================================================================
    let doubled = from_vec(words.clone())
        .map(|s| s.len())
        .peek(|x| print!("Word length normal: {x} "))
        .map(|x| x * 2)
        .peek(|x| print!("Word length doubled: {x} "))
        .to_vec()?;
    println!("\nWord lengths doubled with peek: {doubled:?}");

    // =============================================================================
    // Finding elements
    // =============================================================================
    let longer_than_five = from_vec(words.clone())
        .map(|s| s.len())
        .filter(|x| *x > 5)
        .find_first()?;
    longer_than_five.if_present(|x| println!("{x}"));
    let value = longer_than_five.require()?;
    let otherwise = longer_than_five.unwrap_or(6);
    println!("findFirst where element length greater than 5: {longer_than_five:?} ({value}, {otherwise})");

    // =============================================================================
    // Reading a file
    // =============================================================================
    match lines("test.txt").and_then(|seq| seq.collect(joining_with("\n"))) {
        Ok(text) => println!("{text}"),
        Err(e) => eprintln!("Could not read test.txt: {e:#}"),
    }

    // =============================================================================
    // Numeric sequences
    // =============================================================================
    let ints = of([1, 43, 23, 2]);
    println!("Int sequence: {ints:?}");
    println!("Range 1..1024 has {} elements", range(1, 1024).count()?);
    ints.for_each(|x| println!("{x}"))?;

    Ok(())
}
