//! Command-line run controller for facility triage.
//!
//! `triage rank` reads a facility dataset and a case document from an inputs
//! directory, ranks the facilities, and writes `result.json` (or `error.txt`
//! on failure) into an output directory.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod rank;

pub use error::CliError;

use rank::RankArgs;

const ARG_INPUTS_DIR: &str = "inputs-dir";
const ARG_DATASET: &str = "dataset";
const ARG_CASE: &str = "case";
const ARG_OUTPUT_DIR: &str = "output-dir";
const ARG_TOP: &str = "top";
const ARG_DISTANCE_WEIGHT: &str = "distance-weight";
const ARG_SPECIALIZATION_WEIGHT: &str = "specialization-weight";
const ARG_CAPACITY_WEIGHT: &str = "capacity-weight";

/// Run the triage CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError::ArgumentParsing`] for unusable arguments and any
/// failure raised while ranking.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Rank(args) => rank::run_rank(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "triage",
    about = "Match an incoming case to the most suitable facilities",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Rank facilities for the case in the inputs directory.
    Rank(RankArgs),
}

#[cfg(test)]
mod tests;
