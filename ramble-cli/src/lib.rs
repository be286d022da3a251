//! Command-line interface for the Ramble walking-tour planner.
//!
//! The `ramble` binary loads POI catalogs, interest profiles and novelty
//! tables from JSON files, then either plans a route (`ramble plan`) or
//! ranks the catalog from a location (`ramble rank`). Options are layered
//! from CLI flags, configuration files and `RAMBLE_`-prefixed environment
//! variables.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod catalog;
mod error;
mod fs;
mod output;
mod plan;
mod rank;

pub use catalog::CatalogRecordError;
pub use error::CliError;
pub use output::OutputFormat;

pub(crate) const ARG_CATALOG: &str = "catalog";
pub(crate) const ARG_PROFILE: &str = "profile";
pub(crate) const ARG_NOVELTY: &str = "novelty";
pub(crate) const ARG_START_LAT: &str = "start-lat";
pub(crate) const ARG_START_LNG: &str = "start-lng";
pub(crate) const ARG_DURATION: &str = "duration";
pub(crate) const ARG_LAT: &str = "lat";
pub(crate) const ARG_LNG: &str = "lng";
pub(crate) const ENV_PLAN_CATALOG: &str = "RAMBLE_CMDS_PLAN_CATALOG";
pub(crate) const ENV_PLAN_START_LAT: &str = "RAMBLE_CMDS_PLAN_START_LAT";
pub(crate) const ENV_PLAN_START_LNG: &str = "RAMBLE_CMDS_PLAN_START_LNG";
pub(crate) const ENV_PLAN_DURATION: &str = "RAMBLE_CMDS_PLAN_DURATION";
pub(crate) const ENV_RANK_CATALOG: &str = "RAMBLE_CMDS_RANK_CATALOG";
pub(crate) const ENV_RANK_LAT: &str = "RAMBLE_CMDS_RANK_LAT";
pub(crate) const ENV_RANK_LNG: &str = "RAMBLE_CMDS_RANK_LNG";

/// Run the Ramble CLI with the current process arguments and environment.
///
/// Command output is written to standard output.
///
/// # Errors
/// Returns [`CliError`] when arguments, configuration or input files are
/// invalid, or when output cannot be written.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let mut stdout = std::io::stdout().lock();
    match cli.command {
        Command::Plan(args) => plan::run_plan(args, &mut stdout),
        Command::Rank(args) => rank::run_rank(args, &mut stdout),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "ramble",
    about = "Plan time-boxed walking tours from a POI catalog",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Plan a walking route within a time budget.
    Plan(plan::PlanArgs),
    /// Rank catalog POIs from a location.
    Rank(rank::RankArgs),
}

#[cfg(test)]
mod tests;
