//! The `load` and `packages` commands.
//!
//! Planning runs against the in-memory copy of the snapshot; the file on
//! disk is left untouched and the resulting plan is printed instead.

use std::io::Write;
use std::str::FromStr;

use camino::Utf8PathBuf;
use clap::Parser;
use hubroute_core::{MemoryNetwork, Package};
use hubroute_load::{GreedyPlan, KnapsackPlan, LoadPlanner, LoadRequest};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::network::load_network;
use crate::{ARG_DEPOT, ARG_METHOD, ARG_NETWORK, CliError, parse_or, require, write_json};

pub(crate) const ENV_LOAD_NETWORK: &str = "HUBROUTE_CMDS_LOAD_NETWORK";
pub(crate) const ENV_LOAD_DEPOT: &str = "HUBROUTE_CMDS_LOAD_DEPOT";
pub(crate) const ENV_PACKAGES_NETWORK: &str = "HUBROUTE_CMDS_PACKAGES_NETWORK";
pub(crate) const ENV_PACKAGES_DEPOT: &str = "HUBROUTE_CMDS_PACKAGES_DEPOT";

/// Load planning method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Method {
    Greedy,
    Knapsack,
}

impl FromStr for Method {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "greedy" => Ok(Self::Greedy),
            "knapsack" | "dp" => Ok(Self::Knapsack),
            _ => Err("expected greedy or knapsack".to_owned()),
        }
    }
}

/// CLI arguments for the `load` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Choose which pending packages of a depot go on one of its \
                 vehicles. `greedy` fills by priority then weight within \
                 weight and volume capacity; `knapsack` maximises total \
                 priority value within weight capacity.",
    about = "Plan a vehicle load"
)]
#[ortho_config(prefix = "HUBROUTE")]
pub(crate) struct LoadArgs {
    /// Depot whose pending packages are loaded.
    #[arg(value_name = "depot")]
    #[serde(default)]
    pub(crate) depot: Option<String>,
    /// Path to the JSON network snapshot.
    #[arg(long = ARG_NETWORK, value_name = "path")]
    #[serde(default)]
    pub(crate) network: Option<Utf8PathBuf>,
    /// `greedy` (default) or `knapsack`.
    #[arg(long = ARG_METHOD, value_name = "name")]
    #[serde(default)]
    pub(crate) method: Option<String>,
    /// Vehicle to load; defaults to the depot's first vehicle.
    #[arg(long, value_name = "id")]
    #[serde(default)]
    pub(crate) vehicle: Option<String>,
    /// Destination tag for loaded packages.
    #[arg(long, value_name = "id")]
    #[serde(default)]
    pub(crate) destination: Option<String>,
}

impl LoadArgs {
    pub(crate) fn into_config(self) -> Result<LoadConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        LoadConfig::try_from(merged)
    }
}

/// Resolved `load` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LoadConfig {
    pub(crate) network: Utf8PathBuf,
    pub(crate) method: Method,
    pub(crate) request: LoadRequest,
}

impl TryFrom<LoadArgs> for LoadConfig {
    type Error = CliError;

    fn try_from(args: LoadArgs) -> Result<Self, Self::Error> {
        let network = require(args.network, ARG_NETWORK, ENV_LOAD_NETWORK)?;
        let depot = require(args.depot, ARG_DEPOT, ENV_LOAD_DEPOT)?;
        let method = parse_or(args.method.as_deref(), ARG_METHOD, Method::Greedy)?;
        let mut request = LoadRequest::new(depot);
        if let Some(vehicle) = args.vehicle {
            request = request.with_vehicle(vehicle);
        }
        if let Some(destination) = args.destination {
            request = request.with_destination(destination);
        }
        Ok(Self {
            network,
            method,
            request,
        })
    }
}

/// Result printed by `load`.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub(crate) enum LoadOutput {
    Greedy(GreedyPlan),
    Knapsack(KnapsackPlan),
}

pub(crate) fn execute_load(
    config: &LoadConfig,
    network: &MemoryNetwork,
) -> Result<LoadOutput, CliError> {
    let planner = LoadPlanner::new(network);
    Ok(match config.method {
        Method::Greedy => LoadOutput::Greedy(planner.plan_greedy(&config.request)?),
        Method::Knapsack => LoadOutput::Knapsack(planner.plan_knapsack(&config.request)?),
    })
}

pub(crate) fn run_load(args: LoadArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let network = load_network(&config.network)?;
    write_json(writer, &execute_load(&config, &network)?)
}

/// CLI arguments for the `packages` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "List the pending packages of a depot sorted by priority \
                 (unset last) and then by weight.",
    about = "Pending packages in loading order"
)]
#[ortho_config(prefix = "HUBROUTE")]
pub(crate) struct PackagesArgs {
    /// Depot to list.
    #[arg(value_name = "depot")]
    #[serde(default)]
    pub(crate) depot: Option<String>,
    /// Path to the JSON network snapshot.
    #[arg(long = ARG_NETWORK, value_name = "path")]
    #[serde(default)]
    pub(crate) network: Option<Utf8PathBuf>,
}

impl PackagesArgs {
    pub(crate) fn into_config(self) -> Result<PackagesConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PackagesConfig::try_from(merged)
    }
}

/// Resolved `packages` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PackagesConfig {
    pub(crate) network: Utf8PathBuf,
    pub(crate) depot: String,
}

impl TryFrom<PackagesArgs> for PackagesConfig {
    type Error = CliError;

    fn try_from(args: PackagesArgs) -> Result<Self, Self::Error> {
        Ok(Self {
            network: require(args.network, ARG_NETWORK, ENV_PACKAGES_NETWORK)?,
            depot: require(args.depot, ARG_DEPOT, ENV_PACKAGES_DEPOT)?,
        })
    }
}

pub(crate) fn execute_packages(
    config: &PackagesConfig,
    network: &MemoryNetwork,
) -> Result<Vec<Package>, CliError> {
    Ok(LoadPlanner::new(network).ordered_packages(&config.depot)?)
}

pub(crate) fn run_packages(args: PackagesArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let network = load_network(&config.network)?;
    write_json(writer, &execute_packages(&config, &network)?)
}
