//! Frequency calculations over signed integer deltas.
//!
//! A frequency input holds one signed delta per line (`+1`, `-2`, `7`). The
//! skew is the plain sum of those deltas; the first repeat is the first
//! running total revisited while cycling through the deltas indefinitely.

use std::collections::HashSet;

use tracing::{debug, instrument};

use crate::error::{InputError, Result};

/// Parses a single delta, attributing failures to the 1-based `line`.
///
/// Surrounding whitespace is ignored and an explicit `+` sign is accepted.
///
/// # Errors
/// Returns [`InputError::InvalidInteger`] when `raw` is not a signed integer
/// that fits in an `i64`.
///
/// # Examples
/// ```
/// use advent_core::parse_delta;
///
/// assert_eq!(parse_delta("+14", 1)?, 14);
/// assert_eq!(parse_delta(" -3 ", 2)?, -3);
/// assert!(parse_delta("three", 3).is_err());
/// # Ok::<(), advent_core::InputError>(())
/// ```
pub fn parse_delta(raw: &str, line: usize) -> Result<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|source| InputError::InvalidInteger {
            line,
            value: raw.to_owned(),
            source,
        })
}

/// Parses every line as a delta, stopping at the first failure.
///
/// # Errors
/// Propagates read failures from `lines` and returns
/// [`InputError::InvalidInteger`] for the first line that does not parse.
pub fn parse_deltas<I>(lines: I) -> Result<Vec<i64>>
where
    I: IntoIterator<Item = Result<String>>,
{
    lines
        .into_iter()
        .enumerate()
        .map(|(index, line)| parse_delta(&line?, index + 1))
        .collect()
}

/// Sums the deltas held by `lines`.
///
/// The total is accumulated in an `i128`, so no realistic input can overflow
/// it. An empty input has a skew of zero.
///
/// # Errors
/// Returns the first read or parse failure; no partial sum is reported.
///
/// # Examples
/// ```
/// use advent_core::skew;
///
/// let lines = ["+1", "-2", "+3", "+1"].map(|line| Ok(line.to_owned()));
/// assert_eq!(skew(lines)?, 3);
/// # Ok::<(), advent_core::InputError>(())
/// ```
#[instrument(name = "core.skew", err, skip(lines))]
pub fn skew<I>(lines: I) -> Result<i128>
where
    I: IntoIterator<Item = Result<String>>,
{
    let mut total = 0_i128;
    let mut count = 0_usize;
    for (index, line) in lines.into_iter().enumerate() {
        total += i128::from(parse_delta(&line?, index + 1)?);
        count = index + 1;
    }
    debug!(deltas = count, total = %total, "skew computed");
    Ok(total)
}

/// First running total that recurs while cycling through a delta sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FirstRepeat {
    /// Running total observed for the second time.
    pub value: i128,
    /// 1-based number of the step that revisited [`Self::value`].
    pub step: usize,
}

/// Finds the first running total reached twice while cycling through `deltas`.
///
/// The running total starts at zero and is not itself considered seen: the
/// first step's total is the first entry recorded. The scan has no iteration
/// cap, so a sequence whose totals never coincide (for example `[3]`) does not
/// return.
///
/// # Errors
/// Returns [`InputError::EmptySequence`] when `deltas` is empty.
///
/// # Examples
/// ```
/// use advent_core::{FirstRepeat, first_repeat};
///
/// let repeat = first_repeat(&[1, -2, 3, 1])?;
/// assert_eq!(repeat, FirstRepeat { value: 2, step: 6 });
/// # Ok::<(), advent_core::InputError>(())
/// ```
#[instrument(name = "core.first_repeat", err, skip(deltas), fields(deltas = deltas.len()))]
pub fn first_repeat(deltas: &[i64]) -> Result<FirstRepeat> {
    let mut steps = deltas.iter().cycle().enumerate();
    let mut seen = HashSet::new();
    let mut total = 0_i128;
    loop {
        let Some((index, delta)) = steps.next() else {
            return Err(InputError::EmptySequence);
        };
        total += i128::from(*delta);
        if !seen.insert(total) {
            let step = index + 1;
            debug!(
                value = %total,
                step,
                passes = step.div_ceil(deltas.len()),
                distinct_totals = seen.len(),
                "running total repeated"
            );
            return Ok(FirstRepeat { value: total, step });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;
    use rstest::rstest;

    fn lines(raw: &[&str]) -> Vec<Result<String>> {
        raw.iter().map(|line| Ok((*line).to_owned())).collect()
    }

    #[rstest]
    #[case::mixed(&["+1", "-2", "+3", "+1"], 3)]
    #[case::positive(&["+1", "+1", "+1"], 3)]
    #[case::cancelling(&["+1", "+1", "-2"], 0)]
    #[case::negative(&["-1", "-2", "-3"], -6)]
    #[case::unsigned(&["5", "-5", "12"], 12)]
    #[case::empty(&[], 0)]
    fn skew_sums_deltas(#[case] raw: &[&str], #[case] expected: i128) {
        match skew(lines(raw)) {
            Ok(total) => assert_eq!(total, expected),
            Err(err) => panic!("skew must succeed: {err}"),
        }
    }

    #[rstest]
    fn skew_does_not_overflow_i64() {
        let max = i64::MAX.to_string();
        let total = skew(lines(&[max.as_str(), max.as_str()])).expect("wide totals must fit");
        assert_eq!(total, i128::from(i64::MAX) * 2);
    }

    #[rstest]
    fn skew_reports_first_invalid_line() {
        let err = skew(lines(&["+1", "+2", "two", "nope"])).expect_err("`two` must fail");
        match err {
            InputError::InvalidInteger { line, value, .. } => {
                assert_eq!(line, 3);
                assert_eq!(value, "two");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[rstest]
    fn skew_rejects_interior_blank_lines() {
        let err = skew(lines(&["+1", "", "+2"])).expect_err("blank delta must fail");
        assert!(matches!(err, InputError::InvalidInteger { line: 2, .. }));
    }

    #[rstest]
    fn skew_propagates_read_failures() {
        let failing = vec![
            Ok("+1".to_owned()),
            Err(InputError::Io {
                line: 2,
                source: std::io::Error::other("boom"),
            }),
        ];
        let err = skew(failing).expect_err("read failure must propagate");
        assert!(matches!(err, InputError::Io { line: 2, .. }));
    }

    #[rstest]
    #[case::reference(&[1, -2, 3, 1], 2, 6)]
    #[case::zero_is_not_seen_initially(&[1, -1], 1, 3)]
    #[case::second_pass(&[3, 3, 4, -2, -4], 10, 7)]
    #[case::slow_drift(&[-6, 3, 8, 5, -6], 5, 12)]
    #[case::late(&[7, 7, -2, -7, -4], 14, 13)]
    #[case::single_zero(&[0], 0, 2)]
    #[case::zeros(&[0, 0, 0], 0, 2)]
    fn first_repeat_detects_revisited_total(
        #[case] deltas: &[i64],
        #[case] value: i128,
        #[case] step: usize,
    ) {
        let repeat = first_repeat(deltas).expect("repeat must be found");
        assert_eq!(repeat, FirstRepeat { value, step });
    }

    #[rstest]
    fn first_repeat_rejects_empty_input() {
        let err = first_repeat(&[]).expect_err("empty input must fail");
        assert!(matches!(err, InputError::EmptySequence));
    }

    #[rstest]
    fn parse_deltas_numbers_lines_from_one() {
        let err = parse_deltas(lines(&["+1", "x"])).expect_err("`x` must fail");
        assert!(matches!(err, InputError::InvalidInteger { line: 2, .. }));
        let deltas = parse_deltas(lines(&["+1", "-7", "0"])).expect("deltas must parse");
        assert_eq!(deltas, [1, -7, 0]);
    }

    proptest! {
        #[test]
        fn skew_equals_arithmetic_sum(values in prop::collection::vec(any::<i64>(), 0..64)) {
            let raw: Vec<Result<String>> = values
                .iter()
                .map(|value| Ok(format!("{value:+}")))
                .collect();
            let expected: i128 = values.iter().copied().map(i128::from).sum();
            let total = skew(raw).map_err(|err| TestCaseError::fail(err.to_string()))?;
            prop_assert_eq!(total, expected);
        }

        #[test]
        fn first_repeat_is_deterministic(
            mut values in prop::collection::vec(-50_i64..50, 1..16),
        ) {
            // A zero-sum cycle is guaranteed to revisit its own totals.
            let drift: i64 = values.iter().sum();
            values.push(-drift);
            let first = first_repeat(&values).map_err(|err| TestCaseError::fail(err.to_string()))?;
            let second = first_repeat(&values).map_err(|err| TestCaseError::fail(err.to_string()))?;
            prop_assert_eq!(first, second);
            prop_assert!(first.step <= values.len() + 1);
        }
    }
}
