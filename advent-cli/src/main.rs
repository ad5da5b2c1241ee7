//! `advent` binary.
//!
//! Solves one puzzle per invocation: the answer goes to stdout as a single
//! line, diagnostics go to stderr through `tracing`, and any failure ends the
//! process with a non-zero status.

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};

use advent_cli::{
    cli::{Cli, CliError, render_outcome, run_cli},
    logging::{self, LoggingError},
};
use tracing::{error, field};

/// Solves the requested puzzle and writes its answer line.
///
/// A missing or malformed argument ends the process inside clap with a usage
/// message. Nothing is written to stdout unless the calculation succeeds.
fn try_main() -> Result<()> {
    let outcome = run_cli(Cli::parse_checked()).context("failed to execute command")?;
    let mut stdout = BufWriter::new(io::stdout().lock());
    render_outcome(&outcome, &mut stdout).context("failed to write answer")?;
    stdout.flush().context("failed to flush answer")?;
    Ok(())
}

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        report_logging_failure(&err);
        return ExitCode::FAILURE;
    }

    match try_main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let code = err.downcast_ref::<CliError>().map(CliError::code);
            error!(
                error = field::display(format!("{err:#}")),
                code = code.map(field::display),
                "puzzle run failed"
            );
            ExitCode::FAILURE
        }
    }
}

#[expect(
    clippy::print_stderr,
    reason = "no subscriber is installed to carry this message"
)]
fn report_logging_failure(err: &LoggingError) {
    eprintln!("advent: cannot set up logging: {err}");
}
