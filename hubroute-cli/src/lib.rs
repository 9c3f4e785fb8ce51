//! Command-line interface for the hubroute engine.
//!
//! Every subcommand reads a JSON network snapshot, runs one operation
//! against it and prints the structured result as pretty JSON on stdout.
//! Options are layered with `ortho_config`: CLI flags override
//! `HUBROUTE_CMDS_<COMMAND>_<FIELD>` environment variables, which override
//! configuration files.
#![forbid(unsafe_code)]

mod error;
mod load;
mod network;
mod search;
mod waypoints;

use std::fmt::Display;
use std::io::Write;
use std::str::FromStr;

use clap::{Parser, Subcommand};
use serde::Serialize;

pub use error::CliError;

use load::{LoadArgs, PackagesArgs};
use search::{SearchArgs, ShortestPathArgs, SpanningTreeArgs};
use waypoints::WaypointArgs;

pub(crate) const ARG_NETWORK: &str = "network";
pub(crate) const ARG_ORIGIN: &str = "origin";
pub(crate) const ARG_DESTINATION: &str = "destination";
pub(crate) const ARG_START: &str = "start";
pub(crate) const ARG_DEPOT: &str = "depot";
pub(crate) const ARG_ALGORITHM: &str = "algorithm";
pub(crate) const ARG_CRITERION: &str = "criterion";
pub(crate) const ARG_TOLL_FACTOR: &str = "toll-factor";
pub(crate) const ARG_STRATEGY: &str = "strategy";
pub(crate) const ARG_METHOD: &str = "method";
pub(crate) const ARG_VIA_BRANCH: &str = "via-branch";

/// Run the hubroute CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let mut stdout = std::io::stdout().lock();
    run_command(cli.command, &mut stdout)
}

fn run_command(command: Command, writer: &mut dyn Write) -> Result<(), CliError> {
    log::debug!("running {}", command.name());
    match command {
        Command::Search(args) => search::run_search(args, writer),
        Command::ShortestPath(args) => search::run_shortest_path(args, writer),
        Command::SpanningTree(args) => search::run_spanning_tree(args, writer),
        Command::Waypoints(args) => waypoints::run_waypoints(args, writer),
        Command::Load(args) => load::run_load(args, writer),
        Command::Packages(args) => load::run_packages(args, writer),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "hubroute",
    about = "Route search and load planning over a logistics network snapshot",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Breadth- or depth-first search and traversal.
    Search(SearchArgs),
    /// Weighted shortest path between hubs or to a client.
    ShortestPath(ShortestPathArgs),
    /// Minimum spanning tree over a zone of hubs.
    SpanningTree(SpanningTreeArgs),
    /// Cheapest route through a set of mandatory stops.
    Waypoints(WaypointArgs),
    /// Plan a vehicle load at a depot.
    Load(LoadArgs),
    /// List a depot's pending packages in loading order.
    Packages(PackagesArgs),
}

impl Command {
    /// Subcommand name as typed on the command line.
    const fn name(&self) -> &'static str {
        match self {
            Self::Search(_) => "search",
            Self::ShortestPath(_) => "shortest-path",
            Self::SpanningTree(_) => "spanning-tree",
            Self::Waypoints(_) => "waypoints",
            Self::Load(_) => "load",
            Self::Packages(_) => "packages",
        }
    }
}

/// Unwrap a merged option or report which flag and variable would set it.
pub(crate) fn require<T>(
    value: Option<T>,
    field: &'static str,
    env: &'static str,
) -> Result<T, CliError> {
    value.ok_or(CliError::MissingArgument { field, env })
}

/// Parse an optional textual option, falling back to `default`.
pub(crate) fn parse_or<T>(
    raw: Option<&str>,
    field: &'static str,
    default: T,
) -> Result<T, CliError>
where
    T: FromStr,
    T::Err: Display,
{
    raw.map_or(Ok(default), |value| {
        value.parse().map_err(|err: T::Err| CliError::InvalidOption {
            field,
            value: value.to_owned(),
            reason: err.to_string(),
        })
    })
}

/// Validate a toll factor: finite and not negative.
pub(crate) fn toll_factor(raw: Option<f64>) -> Result<f64, CliError> {
    let factor = raw.unwrap_or(1.0);
    if factor.is_finite() && factor >= 0.0 {
        Ok(factor)
    } else {
        Err(CliError::InvalidOption {
            field: ARG_TOLL_FACTOR,
            value: factor.to_string(),
            reason: "must be a finite, non-negative number".to_owned(),
        })
    }
}

/// Split a comma-separated id list, dropping blank entries.
pub(crate) fn split_ids(raw: Option<&str>) -> Vec<String> {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Write `value` as pretty JSON followed by a newline.
pub(crate) fn write_json<T: Serialize>(
    writer: &mut dyn Write,
    value: &T,
) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
mod tests;
