use std::io::Cursor;

use anyhow::Result;
use seqflow::collectors::joining_with;
use seqflow::io::{lines_from_reader, LineOptions};
use seqflow::testing::*;
use seqflow::*;

#[test]
fn reads_lines_lazily_and_joins_them() -> Result<()> {
    let file = temp_text_file(&["first", "second", "third"])?;
    let text = lines(file.path())?.collect(joining_with("\n"))?;
    assert_eq!(text, "first\nsecond\nthird");
    Ok(())
}

#[test]
fn missing_file_fails_at_open() {
    let err = lines("definitely/not/here.txt").unwrap_err();
    match err.downcast_ref::<SeqError>() {
        Some(SeqError::Io { path, source }) => {
            assert_eq!(path.as_deref(), Some(std::path::Path::new("definitely/not/here.txt")));
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("expected SeqError::Io, got {other:?}"),
    }
    assert!(err.to_string().contains("definitely/not/here.txt"));
}

#[test]
fn strips_crlf_and_keeps_empty_lines() -> Result<()> {
    let file = temp_bytes_file(b"a\r\n\r\nb\nlast")?;
    assert_eq!(lines(file.path())?.to_vec()?, vec!["a", "", "b", "last"]);
    Ok(())
}

#[test]
fn empty_file_has_no_lines() -> Result<()> {
    let file = temp_bytes_file(b"")?;
    assert_eq!(lines(file.path())?.count()?, 0);
    Ok(())
}

#[test]
fn invalid_utf8_is_an_error_in_strict_mode() -> Result<()> {
    let file = temp_bytes_file(b"ok\n\xff\xfe\nafter\n")?;
    let err = lines(file.path())?.to_vec().unwrap_err();
    assert!(matches!(err.downcast_ref::<SeqError>(), Some(SeqError::InvalidUtf8 { line: 2 })));
    Ok(())
}

#[test]
fn invalid_utf8_is_replaced_in_lossy_mode() -> Result<()> {
    let file = temp_bytes_file(b"ok\n\xff\nafter\n")?;
    let opts = LineOptions { lossy: true, ..LineOptions::default() };
    let out = lines_with(file.path(), opts)?.to_vec()?;
    assert_eq!(out, vec!["ok", "\u{fffd}", "after"]);
    Ok(())
}

#[test]
fn tiny_buffer_still_reads_whole_lines() -> Result<()> {
    let file = temp_text_file(&["a fairly long line of text", "short"])?;
    let opts = LineOptions { buffer_capacity: 1, ..LineOptions::default() };
    let out = lines_with(file.path(), opts)?.to_vec()?;
    assert_eq!(out, vec!["a fairly long line of text", "short"]);
    Ok(())
}

#[test]
fn limit_releases_the_source_early() -> Result<()> {
    let file = temp_text_file(&["1", "2", "3", "4"])?;
    let probe = CloseProbe::new();
    let pulls = PullCounter::new();
    let first_two = probe.attach(pulls.wrap(lines(file.path())?)).limit(2).to_vec()?;
    assert_eq!(first_two, vec!["1", "2"]);
    assert_eq!(pulls.pulled(), 2);
    assert!(probe.is_closed());
    Ok(())
}

#[test]
fn line_stages_compose() -> Result<()> {
    let file = temp_text_file(&stream_words())?;
    let long = lines(file.path())?
        .filter(|l| l.len() > 5)
        .map(|l| l.to_uppercase())
        .to_vec()?;
    assert_eq!(long, vec!["WHATCHA", "YELLOW"]);
    Ok(())
}

#[test]
fn reader_source_without_a_path() -> Result<()> {
    let seq = lines_from_reader(Cursor::new(b"x\ny".to_vec()), LineOptions::default());
    assert_eq!(seq.to_vec()?, vec!["x", "y"]);

    let bad = lines_from_reader(Cursor::new(b"\xc3".to_vec()), LineOptions::default());
    let err = bad.count().unwrap_err();
    assert_eq!(err.to_string(), "line 1 is not valid UTF-8");
    Ok(())
}
