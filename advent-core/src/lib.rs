//! Advent core library.
//!
//! Pure computations behind the `advent` command-line tool: frequency skew and
//! first-repeat detection over signed deltas, and the inventory checksum and
//! near-duplicate scan over box identifiers. Every computation consumes lines
//! produced by [`LineSource`] (or any iterator of line results) and returns a
//! typed [`Result`]; none of them print or exit.

mod error;
mod frequency;
mod inventory;
mod lines;

pub use crate::{
    error::{InputError, InputErrorCode, Result},
    frequency::{FirstRepeat, first_repeat, parse_delta, parse_deltas, skew},
    inventory::{
        Checksum, LetterCounts, SharedRunes, checksum, common_runes, id_distance, shared_letters,
    },
    lines::LineSource,
};
