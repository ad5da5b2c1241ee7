//! Command implementations and argument parsing for the advent CLI.

use std::ffi::OsString;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use advent_core::{
    Checksum, FirstRepeat, InputError, LineSource, SharedRunes, checksum, common_runes,
    first_repeat, parse_deltas, skew,
};
use clap::error::ErrorKind;
use clap::{Args, CommandFactory, Parser, Subcommand};
use thiserror::Error;
use tracing::{Span, field, info, instrument, warn};

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "advent",
    version,
    about = "Solve the frequency and inventory puzzles from line-based input files."
)]
pub struct Cli {
    /// Command namespace to execute.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parses the process arguments, exiting with clap's usage error when the
    /// input file is missing.
    #[must_use]
    pub fn parse_checked() -> Self {
        Self::try_parse_checked_from(std::env::args_os()).unwrap_or_else(|err| err.exit())
    }

    /// Parses `args` and rejects a command line that names no input file.
    ///
    /// `--input-path` is global to each namespace, so it may appear before or
    /// after the calculation name. clap cannot mark a global argument as
    /// required, so its presence is checked here.
    ///
    /// # Errors
    /// Returns a [`clap::Error`] for malformed arguments, and one of kind
    /// [`ErrorKind::MissingRequiredArgument`] when `--input-path` is absent.
    ///
    /// # Examples
    /// ```
    /// use std::path::Path;
    ///
    /// use advent_cli::cli::Cli;
    ///
    /// let cli = Cli::try_parse_checked_from(["advent", "freq", "-i", "in.txt", "skew"])?;
    /// assert_eq!(cli.input().input_path.as_deref(), Some(Path::new("in.txt")));
    /// assert!(Cli::try_parse_checked_from(["advent", "freq", "skew"]).is_err());
    /// # Ok::<(), clap::Error>(())
    /// ```
    pub fn try_parse_checked_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let cli = Self::try_parse_from(args)?;
        if cli.input().input_path.is_none() {
            return Err(Self::command().error(
                ErrorKind::MissingRequiredArgument,
                "the following required arguments were not provided:\n  --input-path <FILE>",
            ));
        }
        Ok(cli)
    }

    /// Input options of whichever namespace was selected.
    #[must_use]
    pub const fn input(&self) -> &InputArgs {
        match &self.command {
            Command::Freq(freq) => &freq.input,
            Command::Inventory(inventory) => &inventory.input,
        }
    }
}

/// Top-level command namespaces.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Frequency related commands.
    Freq(FreqCommand),
    /// Inventory related commands.
    Inventory(InventoryCommand),
}

/// Options accepted by the `freq` namespace.
#[derive(Debug, Args, Clone)]
pub struct FreqCommand {
    /// Input file for the calculation.
    #[command(flatten)]
    pub input: InputArgs,
    /// Frequency calculation to run.
    #[command(subcommand)]
    pub action: FreqAction,
}

/// Calculations offered by the `freq` namespace.
#[derive(Debug, Subcommand, Clone)]
pub enum FreqAction {
    /// Calculate the frequency skew from an input file.
    Skew,
    /// Find the first running frequency reached twice.
    Repeat,
}

/// Options accepted by the `inventory` namespace.
#[derive(Debug, Args, Clone)]
pub struct InventoryCommand {
    /// Input file for the calculation.
    #[command(flatten)]
    pub input: InputArgs,
    /// Inventory calculation to run.
    #[command(subcommand)]
    pub action: InventoryAction,
}

/// Calculations offered by the `inventory` namespace.
#[derive(Debug, Subcommand, Clone)]
pub enum InventoryAction {
    /// Find the checksum of exactly-two and exactly-three letter repeats.
    Checksum,
    /// Find the letters shared by the two box IDs that differ in one position.
    Common,
}

/// Input file shared by every calculation of a namespace.
#[derive(Debug, Args, Clone, Default)]
pub struct InputArgs {
    /// Path to the input file, one record per line.
    #[arg(short = 'i', long = "input-path", value_name = "FILE", global = true)]
    pub input_path: Option<PathBuf>,
}

impl InputArgs {
    /// Input file for `command`.
    ///
    /// # Errors
    /// Returns [`CliError::MissingInputPath`] when no path was supplied.
    pub fn require(&self, command: &'static str) -> Result<&Path, CliError> {
        self.input_path
            .as_deref()
            .ok_or(CliError::MissingInputPath { command })
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// The input file could not be opened.
    #[error("failed to open `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// The command was built without an input file.
    #[error("`{command}` needs an input file; pass --input-path <FILE>")]
    MissingInputPath {
        /// Namespace that was asked to run.
        command: &'static str,
    },
    /// Reading or interpreting the input failed.
    #[error(transparent)]
    Input(#[from] InputError),
}

impl CliError {
    /// Stable machine-readable code for log records.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Io { .. } => "CLI_OPEN_INPUT",
            Self::MissingInputPath { .. } => "CLI_MISSING_INPUT_PATH",
            Self::Input(input) => input.code().as_str(),
        }
    }
}

/// Result of a single calculation, ready to be rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Sum of every frequency delta.
    Skew(i128),
    /// First running frequency reached twice.
    Repeat(FirstRepeat),
    /// Inventory checksum tally.
    Checksum(Checksum),
    /// Near-duplicate box IDs, or `None` when no pair differs in one position.
    Common(Option<SharedRunes>),
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError::MissingInputPath`] when no input file was named, and
/// another [`CliError`] when the input cannot be opened, read, or parsed.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use advent_cli::cli::{Cli, Command, CommandOutcome, FreqAction, FreqCommand, InputArgs, run_cli};
/// # use tempfile::NamedTempFile;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(file.path(), "+1\n-2\n+3\n+1\n")?;
/// let cli = Cli {
///     command: Command::Freq(FreqCommand {
///         input: InputArgs {
///             input_path: Some(file.path().to_path_buf()),
///         },
///         action: FreqAction::Skew,
///     }),
/// };
/// assert_eq!(run_cli(cli)?, CommandOutcome::Skew(3));
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<CommandOutcome, CliError> {
    let outcome = match cli.command {
        Command::Freq(freq) => {
            Span::current().record("command", field::display("freq"));
            run_freq(freq)?
        }
        Command::Inventory(inventory) => {
            Span::current().record("command", field::display("inventory"));
            run_inventory(inventory)?
        }
    };
    info!("command completed");
    Ok(outcome)
}

#[instrument(
    name = "cli.freq",
    err,
    skip(command),
    fields(action = field::Empty, path = field::Empty),
)]
pub(super) fn run_freq(command: FreqCommand) -> Result<CommandOutcome, CliError> {
    let span = Span::current();
    let action = match command.action {
        FreqAction::Skew => "skew",
        FreqAction::Repeat => "repeat",
    };
    span.record("action", field::display(action));
    let path = command.input.require("freq")?;
    span.record("path", field::display(path.display()));

    let lines = LineSource::new(open_input(path)?);
    let outcome = match command.action {
        FreqAction::Skew => {
            let total = skew(lines)?;
            info!(total = %total, "frequency skew computed");
            CommandOutcome::Skew(total)
        }
        FreqAction::Repeat => {
            let deltas = parse_deltas(lines)?;
            let repeat = first_repeat(&deltas)?;
            info!(
                value = %repeat.value,
                step = repeat.step,
                "first repeat found"
            );
            CommandOutcome::Repeat(repeat)
        }
    };
    Ok(outcome)
}

#[instrument(
    name = "cli.inventory",
    err,
    skip(command),
    fields(action = field::Empty, path = field::Empty),
)]
pub(super) fn run_inventory(command: InventoryCommand) -> Result<CommandOutcome, CliError> {
    let span = Span::current();
    let action = match command.action {
        InventoryAction::Checksum => "checksum",
        InventoryAction::Common => "common",
    };
    span.record("action", field::display(action));
    let path = command.input.require("inventory")?;
    span.record("path", field::display(path.display()));

    let lines = LineSource::new(open_input(path)?);
    let outcome = match command.action {
        InventoryAction::Checksum => {
            let tally = checksum(lines)?;
            info!(
                twos = tally.twos,
                threes = tally.threes,
                "inventory checksum computed"
            );
            CommandOutcome::Checksum(tally)
        }
        InventoryAction::Common => {
            let ids = lines.collect::<Result<Vec<_>, _>>()?;
            let shared = common_runes(&ids);
            match &shared {
                Some(found) => info!(
                    first = found.first,
                    second = found.second,
                    "near-duplicate box IDs found"
                ),
                None => warn!(ids = ids.len(), "no box IDs differ in exactly one position"),
            }
            CommandOutcome::Common(shared)
        }
    };
    Ok(outcome)
}

#[instrument(name = "cli.open_input", err, fields(path = field::Empty))]
pub(super) fn open_input(path: &Path) -> Result<BufReader<File>, CliError> {
    Span::current().record("path", field::display(path.display()));
    let file = File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file))
}

/// Renders `outcome` to `writer` as a single human-readable line.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use advent_cli::cli::{CommandOutcome, render_outcome};
/// # use advent_core::Checksum;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let outcome = CommandOutcome::Checksum(Checksum { twos: 4, threes: 3 });
/// let mut buffer = Vec::new();
/// render_outcome(&outcome, &mut buffer)?;
/// assert_eq!(String::from_utf8(buffer)?, "checksum: 4 * 3 = 12\n");
/// # Ok(())
/// # }
/// ```
pub fn render_outcome(outcome: &CommandOutcome, mut writer: impl Write) -> io::Result<()> {
    match outcome {
        CommandOutcome::Skew(total) => writeln!(writer, "freq skew: {total}"),
        CommandOutcome::Repeat(repeat) => writeln!(writer, "first repeat: {}", repeat.value),
        CommandOutcome::Checksum(tally) => writeln!(
            writer,
            "checksum: {} * {} = {}",
            tally.twos,
            tally.threes,
            tally.product()
        ),
        CommandOutcome::Common(Some(shared)) => writeln!(writer, "shared runes: {}", shared.runes),
        CommandOutcome::Common(None) => writeln!(writer, "no shared runes found"),
    }
}
