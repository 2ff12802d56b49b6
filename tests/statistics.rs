use anyhow::Result;
use seqflow::collectors::*;
use seqflow::testing::*;
use seqflow::*;

#[test]
fn summarizing_int_over_word_lengths() -> Result<()> {
    let stats = from_vec(collector_words())
        .collect(summarizing_int(|s: &String| i32::try_from(s.len()).unwrap_or(i32::MAX)))?;
    assert_eq!(stats.count(), 6);
    assert_eq!(stats.sum(), 21);
    assert_eq!(stats.min(), 0);
    assert_eq!(stats.max(), 5);
    assert_close(stats.average(), 3.5, 1e-12);
    Ok(())
}

#[test]
fn empty_statistics_use_sentinels() -> Result<()> {
    let ints = empty::<i32>().collect(summarizing_int(|x: &i32| *x))?;
    assert_eq!(ints.count(), 0);
    assert_eq!(ints.sum(), 0);
    assert_eq!(ints.min(), i32::MAX);
    assert_eq!(ints.max(), i32::MIN);
    assert_eq!(ints.min_value(), None);
    assert_eq!(ints.average(), 0.0);

    let longs = empty::<i64>().collect(summarizing_long(|x: &i64| *x))?;
    assert_eq!((longs.min(), longs.max()), (i64::MAX, i64::MIN));

    let doubles = empty::<f64>().collect(summarizing_double(|x: &f64| *x))?;
    assert_eq!(doubles.min(), f64::INFINITY);
    assert_eq!(doubles.max(), f64::NEG_INFINITY);
    assert_eq!(doubles.max_value(), None);
    assert_eq!(doubles.average(), 0.0);
    Ok(())
}

#[test]
fn display_matches_summary_format() -> Result<()> {
    let stats = of([1, 43, 23, 2]).collect(summarizing_int(|x: &i32| *x))?;
    assert_eq!(
        stats.to_string(),
        "IntSummaryStatistics{count=4, sum=69, min=1, average=17.250000, max=43}"
    );
    Ok(())
}

#[test]
fn int_sum_does_not_overflow_i32() -> Result<()> {
    let stats = of([i32::MAX, i32::MAX]).collect(summarizing_int(|x: &i32| *x))?;
    assert_eq!(stats.sum(), 2 * i64::from(i32::MAX));
    Ok(())
}

#[test]
fn double_statistics_propagate_nan() -> Result<()> {
    let stats = of([1.0, f64::NAN, 3.0]).collect(summarizing_double(|x: &f64| *x))?;
    assert_eq!(stats.count(), 3);
    assert!(stats.min().is_nan());
    assert!(stats.max().is_nan());
    assert!(stats.average().is_nan());
    Ok(())
}

#[test]
fn double_sum_is_compensated() -> Result<()> {
    let stats = from_vec(vec![0.1; 10]).collect(summarizing_double(|x: &f64| *x))?;
    assert_eq!(stats.sum(), 1.0);
    Ok(())
}

#[test]
fn statistics_serialize() -> Result<()> {
    let stats = of([2_i64, 6]).collect(summarizing_long(|x: &i64| *x))?;
    let json = serde_json::to_string(&stats)?;
    let back: LongSummaryStatistics = serde_json::from_str(&json)?;
    assert_eq!(back, stats);
    Ok(())
}
