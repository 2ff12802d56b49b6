use std::cell::Cell;

use anyhow::Result;
use seqflow::testing::*;
use seqflow::*;

fn first_longer_than(n: usize) -> Result<Option<usize>> {
    from_vec(stream_words()).map(|s| s.len()).filter(move |x| *x > n).find_first()
}

#[test]
fn present_value() -> Result<()> {
    let found = first_longer_than(5)?;
    assert_eq!(found.require()?, 7);
    assert_eq!(found.unwrap_or(6), 7);
    Ok(())
}

#[test]
fn absent_value_falls_back_or_fails() -> Result<()> {
    let missing = first_longer_than(10)?;
    assert_eq!(missing, None);
    assert_eq!(missing.unwrap_or(6), 6);

    let err = missing.require().unwrap_err();
    assert!(matches!(err.downcast_ref::<SeqError>(), Some(SeqError::NotPresent)));
    assert_eq!(err.to_string(), "no value present");
    Ok(())
}

#[test]
fn if_present_runs_only_with_a_value() -> Result<()> {
    let calls = Cell::new(0);
    first_longer_than(5)?.if_present(|v| {
        assert_eq!(*v, 7);
        calls.set(calls.get() + 1);
    });
    first_longer_than(10)?.if_present(|_| calls.set(calls.get() + 1));
    assert_eq!(calls.get(), 1);
    Ok(())
}
