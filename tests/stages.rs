use anyhow::Result;
use seqflow::testing::*;
use seqflow::*;

#[test]
fn filter_keeps_matching_in_order() -> Result<()> {
    let out = from_vec(stream_words()).filter(|s| s.contains("ll")).to_vec()?;
    assert_collections_equal(&out, &["hello", "bello", "yellow", "mello"].map(String::from));
    Ok(())
}

#[test]
fn sorted_by_key_is_stable() -> Result<()> {
    let out = from_vec(stream_words())
        .filter(|s| s.contains("ll"))
        .sorted_by_key(String::len)
        .to_vec()?;
    // equal lengths keep encounter order
    assert_eq!(out, vec!["hello", "bello", "mello", "yellow"]);
    Ok(())
}

#[test]
fn sorted_natural_and_by_comparator() -> Result<()> {
    assert_eq!(of([3, 1, 2]).sorted().to_vec()?, vec![1, 2, 3]);
    assert_eq!(of([3, 1, 2]).sorted_by(|a, b| b.cmp(a)).to_vec()?, vec![3, 2, 1]);
    assert!(empty::<i32>().sorted().to_vec()?.is_empty());
    Ok(())
}

#[test]
fn limit_and_skip_window() -> Result<()> {
    let data: Vec<u32> = (0..10).collect();
    assert_eq!(from_vec(data.clone()).limit(3).to_vec()?, vec![0, 1, 2]);
    assert_eq!(from_vec(data.clone()).limit(0).count()?, 0);
    assert_eq!(from_vec(data.clone()).limit(50).count()?, 10);
    assert_eq!(from_vec(data.clone()).skip(8).to_vec()?, vec![8, 9]);
    assert_eq!(from_vec(data.clone()).skip(20).count()?, 0);
    assert_eq!(from_vec(data).skip(2).limit(3).to_vec()?, vec![2, 3, 4]);
    Ok(())
}

#[test]
fn limit_on_infinite_source_pulls_exactly_n() -> Result<()> {
    let pulls = PullCounter::new();
    let out = pulls.wrap(iterate(1u64, |x| x * 3)).limit(4).to_vec()?;
    assert_eq!(out, vec![1, 3, 9, 27]);
    assert_eq!(pulls.pulled(), 4);

    let mut n = 0;
    let gen_out = generate(move || {
        n += 1;
        n
    })
    .limit(3)
    .to_vec()?;
    assert_eq!(gen_out, vec![1, 2, 3]);
    Ok(())
}

#[test]
fn iterate_while_stops_before_failing_element() -> Result<()> {
    let out = iterate_while(1, |x| *x < 100, |x| x * 10).to_vec()?;
    assert_eq!(out, vec![1, 10]);
    Ok(())
}

#[test]
fn distinct_keeps_first_occurrence_and_is_idempotent() -> Result<()> {
    let lengths = from_vec(stream_words()).map(|s| s.len()).distinct().to_vec()?;
    assert_eq!(lengths, vec![5, 7, 6]);

    let twice = from_vec(stream_words()).map(|s| s.len()).distinct().distinct().to_vec()?;
    assert_eq!(twice, lengths);
    Ok(())
}

#[test]
fn map_changes_element_type() -> Result<()> {
    let lengths = from_vec(stream_words()).map(|s| s.len()).to_vec()?;
    assert_eq!(lengths, vec![5, 5, 5, 7, 6, 5]);
    Ok(())
}

#[test]
fn flat_map_expands_in_order() -> Result<()> {
    let chars = of(["ab", "", "c"]).flat_map(|s| s.chars().collect::<Vec<_>>()).to_vec()?;
    assert_eq!(chars, vec!['a', 'b', 'c']);
    Ok(())
}

#[test]
fn peek_runs_once_per_element_reaching_it() -> Result<()> {
    let seen = PullCounter::new();
    let doubled = seen
        .wrap(from_vec(stream_words()).map(|s| s.len()))
        .map(|x| x * 2)
        .to_vec()?;
    assert_eq!(doubled, vec![10, 10, 10, 14, 12, 10]);
    assert_eq!(seen.pulled(), 6);

    // Elements filtered out upstream never reach the peek.
    let after_filter = PullCounter::new();
    after_filter.wrap(of([1, 2, 3, 4]).filter(|x| x % 2 == 0)).count()?;
    assert_eq!(after_filter.pulled(), 2);
    Ok(())
}

#[test]
fn take_while_and_drop_while_split_at_first_failure() -> Result<()> {
    let take = of([1, 2, 5, 1, 2]).take_while(|x| *x < 3).to_vec()?;
    let drop = of([1, 2, 5, 1, 2]).drop_while(|x| *x < 3).to_vec()?;
    assert_eq!(take, vec![1, 2]);
    assert_eq!(drop, vec![5, 1, 2]);
    Ok(())
}

#[test]
fn take_while_stops_pulling_upstream() -> Result<()> {
    let pulls = PullCounter::new();
    let out = pulls.wrap(iterate(0, |x| x + 1)).take_while(|x| *x < 3).to_vec()?;
    assert_eq!(out, vec![0, 1, 2]);
    assert_eq!(pulls.pulled(), 4);
    Ok(())
}

#[test]
fn try_map_error_aborts_the_pass() -> Result<()> {
    let pulls = PullCounter::new();
    let result = pulls
        .source(vec!["1", "2", "x", "4"])
        .try_map(|s| Ok(s.parse::<i32>()?))
        .to_vec();
    let err = result.unwrap_err();
    assert!(err.downcast_ref::<std::num::ParseIntError>().is_some());
    assert_eq!(pulls.pulled(), 3);
    Ok(())
}

#[test]
fn try_filter_error_propagates() {
    let result = of([1, 2, 3])
        .try_filter(|x| if *x == 2 { anyhow::bail!("bad element {x}") } else { Ok(true) })
        .count();
    assert_eq!(result.unwrap_err().to_string(), "bad element 2");
}

#[test]
fn short_circuit_terminals() -> Result<()> {
    let pulls = PullCounter::new();
    assert!(pulls.source(vec![1, 2, 3, 4]).any_match(|x| *x == 2)?);
    assert_eq!(pulls.pulled(), 2);

    assert!(of([2, 4, 6]).all_match(|x| x % 2 == 0)?);
    assert!(empty::<i32>().all_match(|_| false)?);
    assert!(of([1, 3]).none_match(|x| x % 2 == 0)?);
    assert!(!empty::<i32>().any_match(|_| true)?);
    Ok(())
}

#[test]
fn find_first_and_find_any() -> Result<()> {
    let first = from_vec(stream_words()).map(|s| s.len()).filter(|x| *x > 5).find_first()?;
    assert_eq!(first, Some(7));
    assert_eq!(of([1, 2]).filter(|x| *x > 5).find_first()?, None);
    assert_eq!(of([9, 8]).unordered().find_any()?, Some(9));
    Ok(())
}

#[test]
fn reduce_fold_min_max() -> Result<()> {
    assert_eq!(of([1, 2, 3, 4]).reduce(|a, b| a + b)?, Some(10));
    assert_eq!(empty::<i32>().reduce(|a, b| a + b)?, None);
    assert_eq!(of(["a", "b"]).fold(String::new(), |acc, s| acc + s)?, "ab");
    assert_eq!(of([3, 1, 2]).min()?, Some(1));
    assert_eq!(of([3, 1, 2]).max()?, Some(3));
    assert_eq!(empty::<i32>().max()?, None);
    Ok(())
}

#[test]
fn min_by_and_max_by_tie_breaking() -> Result<()> {
    let words = || from_vec(vec!["bb", "aa", "c", "dd"]);
    assert_eq!(words().min_by(|a, b| a.len().cmp(&b.len()))?, Some("c"));
    // first of equal maxima would be "bb"; the last one wins
    assert_eq!(words().max_by(|a, b| a.len().cmp(&b.len()))?, Some("dd"));
    let shortest_pair = from_vec(vec!["bb", "aa"]).min_by(|a, b| a.len().cmp(&b.len()))?;
    assert_eq!(shortest_pair, Some("bb"));
    Ok(())
}

#[test]
fn iter_bridges_to_std() -> Result<()> {
    let doubled: Vec<i32> = of([1, 2, 3]).map(|x| x * 2).iter().collect::<Result<_>>()?;
    assert_eq!(doubled, vec![2, 4, 6]);

    let mut total = 0;
    for x in of([1, 2, 3]) {
        total += x?;
    }
    assert_eq!(total, 6);
    Ok(())
}

#[test]
fn iter_is_fused_after_error() {
    let mut it = of([1, 0, 2]).try_map(|x| if x == 0 { anyhow::bail!("zero") } else { Ok(x) }).iter();
    assert_eq!(it.next().map(|r| r.ok()), Some(Some(1)));
    assert!(matches!(it.next(), Some(Err(_))));
    assert!(it.next().is_none());
}

#[test]
fn from_iterator_and_from_set() -> Result<()> {
    let seq: Sequence<i32> = (1..=3).collect();
    assert_eq!(seq.to_vec()?, vec![1, 2, 3]);

    let set = from_set([1, 2, 3].into_iter().collect());
    assert!(!set.is_ordered());
    let mut members = set.to_vec()?;
    members.sort_unstable();
    assert_eq!(members, vec![1, 2, 3]);
    Ok(())
}

#[test]
fn unordered_clears_characteristic_only() -> Result<()> {
    let s = of([1, 2, 3]);
    assert!(s.is_ordered());
    let u = s.unordered();
    assert!(!u.is_ordered());
    assert_eq!(u.to_vec()?, vec![1, 2, 3]);
    Ok(())
}

#[test]
fn custom_stage_source() -> Result<()> {
    struct Countdown(u32);

    impl Stage<u32> for Countdown {
        fn try_advance(&mut self) -> Result<Option<u32>> {
            if self.0 == 0 {
                return Ok(None);
            }
            self.0 -= 1;
            Ok(Some(self.0 + 1))
        }
    }

    assert_eq!(Sequence::from_stage(Countdown(3)).to_vec()?, vec![3, 2, 1]);
    Ok(())
}
