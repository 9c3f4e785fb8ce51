//! The `waypoints` command.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use hubroute_core::{MemoryNetwork, WaypointRequest, WaypointRoute, WaypointSolver};
use hubroute_search::{DEFAULT_MAX_DEPTH, RouterConfig, Strategy, WaypointRouter};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::network::load_network;
use crate::{
    ARG_DESTINATION, ARG_NETWORK, ARG_ORIGIN, ARG_STRATEGY, CliError, parse_or, require,
    split_ids, write_json,
};

pub(crate) const ENV_WAYPOINTS_NETWORK: &str = "HUBROUTE_CMDS_WAYPOINTS_NETWORK";
pub(crate) const ENV_WAYPOINTS_ORIGIN: &str = "HUBROUTE_CMDS_WAYPOINTS_ORIGIN";
pub(crate) const ENV_WAYPOINTS_DESTINATION: &str = "HUBROUTE_CMDS_WAYPOINTS_DESTINATION";

/// CLI arguments for the `waypoints` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Find the cheapest distance route from an origin hub to a \
                 destination that visits every mandatory stop in some order. \
                 Prints null when no ordering connects.",
    about = "Route through mandatory stops"
)]
#[ortho_config(prefix = "HUBROUTE")]
pub(crate) struct WaypointArgs {
    /// Hub to start from.
    #[arg(value_name = "origin")]
    #[serde(default)]
    pub(crate) origin: Option<String>,
    /// Hub or client to finish at.
    #[arg(value_name = "destination")]
    #[serde(default)]
    pub(crate) destination: Option<String>,
    /// Path to the JSON network snapshot.
    #[arg(long = ARG_NETWORK, value_name = "path")]
    #[serde(default)]
    pub(crate) network: Option<Utf8PathBuf>,
    /// Comma-separated hub ids that must be visited.
    #[arg(long, value_name = "ids")]
    #[serde(default)]
    pub(crate) stops: Option<String>,
    /// `backtracking` (default) or `branch-and-bound`.
    #[arg(long = ARG_STRATEGY, value_name = "name")]
    #[serde(default)]
    pub(crate) strategy: Option<String>,
    /// Most stops the backtracking router accepts.
    #[arg(long, value_name = "count")]
    #[serde(default)]
    pub(crate) max_depth: Option<usize>,
}

impl WaypointArgs {
    pub(crate) fn into_config(self) -> Result<WaypointConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        WaypointConfig::try_from(merged)
    }
}

/// Resolved `waypoints` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct WaypointConfig {
    pub(crate) network: Utf8PathBuf,
    pub(crate) request: WaypointRequest,
    pub(crate) strategy: Strategy,
    pub(crate) router: RouterConfig,
}

impl TryFrom<WaypointArgs> for WaypointConfig {
    type Error = CliError;

    fn try_from(args: WaypointArgs) -> Result<Self, Self::Error> {
        let network = require(args.network, ARG_NETWORK, ENV_WAYPOINTS_NETWORK)?;
        let origin = require(args.origin, ARG_ORIGIN, ENV_WAYPOINTS_ORIGIN)?;
        let destination = require(
            args.destination,
            ARG_DESTINATION,
            ENV_WAYPOINTS_DESTINATION,
        )?;
        Ok(Self {
            network,
            request: WaypointRequest::new(origin, destination, split_ids(args.stops.as_deref())),
            strategy: parse_or(args.strategy.as_deref(), ARG_STRATEGY, Strategy::default())?,
            router: RouterConfig {
                max_depth: args.max_depth.unwrap_or(DEFAULT_MAX_DEPTH),
            },
        })
    }
}

pub(crate) fn execute_waypoints(
    config: &WaypointConfig,
    network: &MemoryNetwork,
) -> Result<Option<WaypointRoute>, CliError> {
    let router = WaypointRouter::with_config(network, config.strategy, config.router);
    Ok(router.solve(&config.request)?)
}

pub(crate) fn run_waypoints(args: WaypointArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let network = load_network(&config.network)?;
    write_json(writer, &execute_waypoints(&config, &network)?)
}
