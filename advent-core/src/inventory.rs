//! Inventory calculations over box identifiers.
//!
//! Box identifiers are short strings, one per line. The checksum classifies
//! each identifier by the shape of its letter counts; the common-runes scan
//! looks for the two identifiers that differ in exactly one position.

use std::collections::HashMap;
use std::iter;

use tracing::{debug, instrument};

use crate::error::Result;

/// Occurrence count of every character in a single identifier.
///
/// # Examples
/// ```
/// use advent_core::LetterCounts;
///
/// let counts = LetterCounts::from_line("bababc");
/// assert_eq!(counts.get('b'), 3);
/// assert!(counts.has_exactly(2));
/// assert!(counts.has_exactly(3));
/// assert!(!counts.has_exactly(4));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LetterCounts {
    counts: HashMap<char, usize>,
}

impl LetterCounts {
    /// Counts the characters of `line`.
    #[must_use]
    pub fn from_line(line: &str) -> Self {
        let mut counts = HashMap::new();
        for letter in line.chars() {
            *counts.entry(letter).or_insert(0) += 1;
        }
        Self { counts }
    }

    /// Number of times `letter` occurs; zero when absent.
    #[must_use]
    pub fn get(&self, letter: char) -> usize {
        self.counts.get(&letter).copied().unwrap_or_default()
    }

    /// Whether any character occurs exactly `count` times.
    #[must_use]
    pub fn has_exactly(&self, count: usize) -> bool {
        self.counts.values().any(|&occurrences| occurrences == count)
    }
}

/// Number of identifiers holding a letter exactly twice and exactly thrice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Checksum {
    /// Identifiers with at least one letter occurring exactly twice.
    pub twos: usize,
    /// Identifiers with at least one letter occurring exactly three times.
    pub threes: usize,
}

impl Checksum {
    /// Folds one identifier into the tally. Each identifier contributes at
    /// most once to each count.
    pub fn record(&mut self, line: &str) {
        let counts = LetterCounts::from_line(line);
        if counts.has_exactly(2) {
            self.twos += 1;
        }
        if counts.has_exactly(3) {
            self.threes += 1;
        }
    }

    /// The checksum proper: `twos * threes`.
    #[must_use]
    pub const fn product(&self) -> usize {
        self.twos * self.threes
    }
}

/// Computes the inventory checksum of the identifiers held by `lines`.
///
/// Empty lines contribute to neither count.
///
/// # Errors
/// Returns the first read failure reported by `lines`.
///
/// # Examples
/// ```
/// use advent_core::checksum;
///
/// let ids = ["abcdef", "bababc", "abbcde", "abcccd", "aabcdd", "abcdee", "ababab"];
/// let tally = checksum(ids.map(|id| Ok(id.to_owned())))?;
/// assert_eq!((tally.twos, tally.threes, tally.product()), (4, 3, 12));
/// # Ok::<(), advent_core::InputError>(())
/// ```
#[instrument(name = "core.checksum", err, skip(lines))]
pub fn checksum<I>(lines: I) -> Result<Checksum>
where
    I: IntoIterator<Item = Result<String>>,
{
    let mut tally = Checksum::default();
    for line in lines {
        tally.record(&line?);
    }
    debug!(twos = tally.twos, threes = tally.threes, "checksum computed");
    Ok(tally)
}

/// Counts the positions of `id` at which `other` differs.
///
/// Only the positions of `id` are scanned: a position past the end of `other`
/// counts as a difference, but characters of `other` past the end of `id` are
/// ignored. The measure is therefore asymmetric when the lengths differ.
/// Positions are counted in `char`s.
///
/// # Examples
/// ```
/// use advent_core::id_distance;
///
/// assert_eq!(id_distance("fghij", "fguij"), 1);
/// assert_eq!(id_distance("abcd", "abc"), 1);
/// assert_eq!(id_distance("abc", "abcd"), 0);
/// ```
#[must_use]
pub fn id_distance(id: &str, other: &str) -> usize {
    let padded = other.chars().map(Some).chain(iter::repeat(None));
    id.chars()
        .zip(padded)
        .filter(|&(letter, candidate)| candidate != Some(letter))
        .count()
}

/// Characters of `id` that `other` matches at the same position, in order.
#[must_use]
pub fn shared_letters(id: &str, other: &str) -> String {
    id.chars()
        .zip(other.chars())
        .filter_map(|(letter, candidate)| (letter == candidate).then_some(letter))
        .collect()
}

/// The near-duplicate identifier pair found by [`common_runes`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedRunes {
    /// Index of the scanned identifier in the input list.
    pub first: usize,
    /// Index of the identifier it was compared against.
    pub second: usize,
    /// Characters the pair shares at matching positions.
    pub runes: String,
}

/// Finds the first identifier pair at distance one and returns what they share.
///
/// Pairs are visited in nested order (outer index ascending, then inner index
/// ascending, self-pairs included) and compared with [`id_distance`]. The
/// first pair at distance exactly one wins. Returns `None` when no pair
/// qualifies.
///
/// # Examples
/// ```
/// use advent_core::common_runes;
///
/// let ids = ["abcde", "fghij", "klmno", "pqrst", "fguij", "axcye", "wvxyz"];
/// let found = common_runes(&ids).map(|shared| shared.runes);
/// assert_eq!(found.as_deref(), Some("fgij"));
/// assert!(common_runes(&["abc", "xyz"]).is_none());
/// ```
#[instrument(name = "core.common_runes", skip(ids), fields(ids = ids.len()))]
pub fn common_runes<S: AsRef<str>>(ids: &[S]) -> Option<SharedRunes> {
    for (first, id) in ids.iter().enumerate() {
        for (second, other) in ids.iter().enumerate() {
            let (id, other) = (id.as_ref(), other.as_ref());
            if id_distance(id, other) == 1 {
                debug!(first, second, "near-duplicate identifiers found");
                return Some(SharedRunes {
                    first,
                    second,
                    runes: shared_letters(id, other),
                });
            }
        }
    }
    debug!("no identifiers differ in exactly one position");
    None
}
