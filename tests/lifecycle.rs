//! Single-pass lifecycle: reuse detection and close handlers.

use std::sync::{Arc, Mutex};

use anyhow::Result;
use seqflow::testing::*;
use seqflow::*;

#[test]
fn second_terminal_on_clone_is_illegal_state() -> Result<()> {
    let s = of([1, 2, 3]);
    let again = s.clone();
    assert_eq!(s.count()?, 3);
    assert_illegal_state(&again.count());
    Ok(())
}

#[test]
fn chaining_a_linked_handle_fails_at_the_terminal() -> Result<()> {
    let s = of([1, 2, 3]);
    let twin = s.clone();
    let doubled = s.map(|x| x * 2);

    // The intermediate call itself succeeds; the failure surfaces at the terminal.
    let bad = twin.filter(|x| *x > 1);
    assert_illegal_state(&bad.to_vec());

    assert_eq!(doubled.to_vec()?, vec![2, 4, 6]);
    Ok(())
}

#[test]
fn spent_chain_fails_even_when_nothing_is_pulled() -> Result<()> {
    let s = of([1, 2, 3]);
    let twin = s.clone();
    assert_eq!(s.count()?, 3);

    let chained = twin.map(|x| x + 1).limit(0);
    assert!(!chained.is_ready());
    assert_illegal_state(&chained.count());
    Ok(())
}

#[test]
fn closing_a_spent_chain_is_illegal_state() -> Result<()> {
    let s = of([1, 2, 3]);
    let twin = s.clone();
    s.count()?;
    assert_illegal_state(&twin.filter(|_| true).close());
    Ok(())
}

#[test]
fn spent_chain_reports_its_error_once() -> Result<()> {
    let s = of([1]);
    let twin = s.clone();
    s.count()?;
    let chained = twin.map(|x| x * 2);
    let again = chained.clone();
    let err = chained.count().unwrap_err();
    assert_eq!(err.to_string(), "sequence has already been consumed or closed");
    assert_illegal_state(&again.to_vec());
    Ok(())
}

#[test]
fn illegal_state_messages_name_the_state() {
    let s = of([1]);
    let linked = s.clone();
    let _chained = s.map(|x| x + 1);
    let err = linked.count().unwrap_err();
    assert_eq!(err.to_string(), "sequence has already been operated upon");

    let s = of([1]);
    let consumed = s.clone();
    s.count().unwrap();
    let err = consumed.count().unwrap_err();
    assert_eq!(err.to_string(), "sequence has already been consumed or closed");
}

#[test]
fn readiness_tracks_the_shared_slot() -> Result<()> {
    let s = of([1, 2]);
    let twin = s.clone();
    assert!(twin.is_ready());
    s.to_vec()?;
    assert!(!twin.is_ready());
    Ok(())
}

#[test]
fn iter_on_spent_handle_yields_the_error_first() {
    let s = of([1, 2]);
    let twin = s.clone();
    s.count().unwrap();
    let mut it = twin.iter();
    let first = it.next().expect("lifecycle error");
    let err = first.unwrap_err();
    assert!(err.downcast_ref::<SeqError>().is_some_and(SeqError::is_illegal_state));
    assert!(it.next().is_none());
}

#[test]
fn close_runs_handlers_without_pulling() -> Result<()> {
    let pulls = PullCounter::new();
    let probe = CloseProbe::new();
    let s = probe.attach(pulls.source(vec![1, 2, 3]));
    let twin = s.clone();

    s.close()?;
    assert_eq!(probe.closes(), 1);
    assert_eq!(pulls.pulled(), 0);
    assert_illegal_state(&twin.count());
    Ok(())
}

#[test]
fn close_handlers_run_once_in_registration_order() -> Result<()> {
    let log = Arc::new(Mutex::new(Vec::new()));
    let (a, b) = (Arc::clone(&log), Arc::clone(&log));

    let total = of([1, 2, 3])
        .on_close(move || a.lock().unwrap().push("first"))
        .map(|x| x * 10)
        .on_close(move || b.lock().unwrap().push("second"))
        .collect(seqflow::collectors::summing_int(|x: &i32| *x))?;

    assert_eq!(total, 60);
    assert_eq!(*log.lock().unwrap(), vec!["first", "second"]);
    Ok(())
}

#[test]
fn close_handler_runs_on_early_termination() -> Result<()> {
    let probe = CloseProbe::new();
    let first = probe.attach(iterate(0, |x| x + 1)).filter(|x| *x > 10).find_first()?;
    assert_eq!(first, Some(11));
    assert_eq!(probe.closes(), 1);

    let probe = CloseProbe::new();
    assert_eq!(probe.attach(generate(|| 7)).limit(2).count()?, 2);
    assert_eq!(probe.closes(), 1);
    Ok(())
}

#[test]
fn close_handler_runs_when_the_pass_fails() {
    let probe = CloseProbe::new();
    let result = probe
        .attach(of(["1", "oops"]))
        .try_map(|s| Ok(s.parse::<u8>()?))
        .to_vec();
    assert!(result.is_err());
    assert_eq!(probe.closes(), 1);
}

#[test]
fn dropping_the_last_handle_releases_the_chain() {
    let probe = CloseProbe::new();
    let s = probe.attach(of([1, 2, 3]));
    let twin = s.clone();
    drop(s);
    assert_eq!(probe.closes(), 0);
    drop(twin);
    assert_eq!(probe.closes(), 1);
}

#[test]
fn handles_move_across_threads() -> Result<()> {
    let s = of([1, 2, 3]).map(|x| x + 1);
    let sum = std::thread::spawn(move || s.fold(0, |a, b| a + b)).join().expect("worker panicked")?;
    assert_eq!(sum, 9);
    Ok(())
}
