#![cfg(feature = "io-jsonl")]

use anyhow::Result;
use seqflow::collectors::{grouping_by_into, summing_int};
use seqflow::testing::*;
use seqflow::*;
use std::collections::BTreeMap;

#[test]
fn reads_typed_records() -> Result<()> {
    let records = sample_word_counts();
    let file = temp_jsonl_file(&records)?;
    let back = read_jsonl::<WordCount>(file.path())?.to_vec()?;
    assert_eq!(back, records);
    Ok(())
}

#[test]
fn blank_lines_are_skipped() -> Result<()> {
    let file = temp_text_file(&[
        r#"{"word":"a","count":1}"#,
        "",
        "   ",
        r#"{"word":"b","count":2}"#,
    ])?;
    let words = read_jsonl::<WordCount>(file.path())?.map(|w| w.word).to_vec()?;
    assert_eq!(words, vec!["a", "b"]);
    Ok(())
}

#[test]
fn parse_error_carries_line_number() -> Result<()> {
    let file = temp_text_file(&[r#"{"word":"a","count":1}"#, "", r#"{"word":"b","count":"x"}"#])?;
    let err = read_jsonl::<WordCount>(file.path())?.to_vec().unwrap_err();
    match err.downcast_ref::<SeqError>() {
        Some(SeqError::Parse { line, reason }) => {
            assert_eq!(*line, 3);
            assert!(!reason.is_empty());
        }
        other => panic!("expected SeqError::Parse, got {other:?}"),
    }
    Ok(())
}

#[test]
fn records_feed_reducers() -> Result<()> {
    let file = temp_jsonl_file(&sample_word_counts())?;
    let totals: BTreeMap<bool, i64> = read_jsonl::<WordCount>(file.path())?.collect(grouping_by_into(
        |w: &WordCount| w.word.contains("ll"),
        summing_int(|w: &WordCount| i32::try_from(w.count).unwrap_or(i32::MAX)),
    ))?;
    assert_eq!(totals[&true], 12);
    assert_eq!(totals[&false], 1);
    Ok(())
}

#[test]
fn missing_jsonl_file_is_an_io_error() {
    let err = read_jsonl::<WordCount>("no/such/file.jsonl").unwrap_err();
    assert!(matches!(err.downcast_ref::<SeqError>(), Some(SeqError::Io { .. })));
}
