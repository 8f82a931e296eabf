//! Command-line access to the ridepool route planner.
//!
//! Every command reads JSON from disk, runs one planner operation with the
//! straight-line distance provider, and prints pretty JSON to stdout.
#![forbid(unsafe_code)]

use std::io::Write;

use clap::{Parser, Subcommand};

mod construct;
mod edit;
mod error;
mod io;
mod rank;

pub use error::CliError;

use construct::ConstructArgs;
use edit::{InsertArgs, ReorderArgs, TimelineArgs};
use rank::RankArgs;

const ARG_INPUT: &str = "input";
const ARG_SNAPSHOT: &str = "snapshot";
const ARG_DATE: &str = "date";
const ENV_CONSTRUCT_INPUT: &str = "RIDEPOOL_CMDS_CONSTRUCT_INPUT";
const ENV_RANK_SNAPSHOT: &str = "RIDEPOOL_CMDS_RANK_SNAPSHOT";
const ENV_RANK_DATE: &str = "RIDEPOOL_CMDS_RANK_DATE";

/// Run the ridepool CLI with the current process arguments and environment.
///
/// # Errors
/// Returns a [`CliError`] when arguments, configuration, input files or the
/// planner reject the invocation, or when writing to stdout fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let mut stdout = std::io::stdout().lock();
    dispatch(cli.command, &mut stdout)
}

fn dispatch(command: Command, writer: &mut dyn Write) -> Result<(), CliError> {
    match command {
        Command::Construct(args) => construct::run_construct(args, writer),
        Command::Insert(args) => edit::run_insert(&args, writer),
        Command::Reorder(args) => edit::run_reorder(&args, writer),
        Command::Rank(args) => rank::run_rank(args, writer),
        Command::Timeline(args) => edit::run_timeline(&args, writer),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "ridepool",
    about = "Route assembly and request matching for ridepool drivers",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Build a route from an origin, a destination and queued entries.
    Construct(ConstructArgs),
    /// Splice an accepted request into a committed route.
    Insert(InsertArgs),
    /// Move a stop within a route, or preview the move.
    Reorder(ReorderArgs),
    /// Rank inbound requests against a route.
    Rank(RankArgs),
    /// Project a route onto the driver's point timeline.
    Timeline(TimelineArgs),
}

#[cfg(test)]
mod tests;
