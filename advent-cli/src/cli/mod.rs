//! Command-line interface orchestration for the advent puzzles.
//!
//! The CLI offers two namespaces: `freq` computes the skew and first repeat of
//! a list of frequency deltas, and `inventory` computes the checksum and the
//! shared letters of a list of box IDs. Every calculation reads one input file
//! named by `--input-path`.

mod commands;

pub use commands::{
    Cli, CliError, Command, CommandOutcome, FreqAction, FreqCommand, InputArgs, InventoryAction,
    InventoryCommand, render_outcome, run_cli,
};

#[cfg(test)]
mod test_helpers;
