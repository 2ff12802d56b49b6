//! Integration tests demonstrating the testing utilities.

use anyhow::Result;
use seqflow::collectors::{grouping_by, partitioning_by};
use seqflow::testing::*;
use seqflow::*;

#[test]
fn test_basic_sequence_with_assertions() -> Result<()> {
    let result = of([1, 2, 3]).map(|x| x * 2).to_vec()?;
    assert_collections_equal(&result, &[2, 4, 6]);
    Ok(())
}

#[test]
fn test_unordered_comparison() -> Result<()> {
    let result = from_set([3, 1, 2].into_iter().collect()).map(|x| x * 10).to_vec()?;
    assert_collections_unordered_equal(&result, &[10, 20, 30]);
    Ok(())
}

#[test]
fn test_group_and_partition_assertions() -> Result<()> {
    let words = stream_words();
    let groups = from_vec(words.clone()).collect(grouping_by(|s: &String| s.len()))?;
    assert_groups_equal(
        &groups,
        vec![
            (5, ["hello", "world", "bello", "mello"].map(String::from).to_vec()),
            (6, vec!["yellow".to_string()]),
            (7, vec!["whatcha".to_string()]),
        ],
    );

    let parts = from_vec(words.clone()).collect(partitioning_by(|s: &String| s.contains("ll")))?;
    assert_partition_exact(&parts, &words, |s| s.contains("ll"));
    Ok(())
}

#[test]
fn test_predicate_assertions() -> Result<()> {
    let evens = range(0_u32, 10).filter(|x| x % 2 == 0).to_vec()?;
    assert_all(&evens, |x| x % 2 == 0);
    assert_none(&evens, |x| *x > 8);
    Ok(())
}

#[test]
#[should_panic(expected = "Collection length mismatch")]
fn test_assertion_failure_reports_lengths() {
    assert_collections_equal(&[1, 2], &[1, 2, 3]);
}

#[test]
fn test_illegal_state_assertion() {
    let s = of([1]);
    let twin = s.clone();
    drop(s.count());
    assert_illegal_state(&twin.to_vec());
}

#[test]
fn test_probes() -> Result<()> {
    let pulls = PullCounter::new();
    let probe = CloseProbe::new();
    let first = probe
        .attach(pulls.source(vec![1, 2, 3, 4]))
        .filter(|x| x % 2 == 0)
        .find_first()?;
    assert_eq!(first, Some(2));
    assert_eq!(pulls.pulled(), 2);
    assert_eq!(probe.closes(), 1);
    Ok(())
}

#[test]
fn test_debug_taps_pass_elements_through() -> Result<()> {
    let result = of([1, 2, 3])
        .debug_inspect("source")
        .map(|x| x * 2)
        .debug_count("after map")
        .debug_sample(2, "sample")
        .to_vec()?;
    assert_eq!(result, vec![2, 4, 6]);

    let tapped = of(["a", "b"])
        .debug_inspect_with("with", |s| assert!(!s.is_empty()))
        .to_vec()?;
    assert_eq!(tapped, vec!["a", "b"]);
    Ok(())
}

#[test]
fn test_fixtures() -> Result<()> {
    assert_eq!(collector_words().len(), 6);
    let file = temp_text_file(&collector_words())?;
    assert_eq!(lines(file.path())?.count()?, 6);
    Ok(())
}
