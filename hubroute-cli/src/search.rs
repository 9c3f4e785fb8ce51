//! The `search`, `shortest-path` and `spanning-tree` commands.

use std::io::Write;
use std::str::FromStr;

use camino::Utf8PathBuf;
use clap::Parser;
use hubroute_core::{
    Criterion, DepthFirstPath, DepthLimit, HopPath, MemoryNetwork, SpanningTree, Traversal,
    WeightedPath,
};
use hubroute_search::{BreadthFirst, DepthFirst, ShortestPaths, SpanningTrees};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::network::load_network;
use crate::{
    ARG_ALGORITHM, ARG_CRITERION, ARG_DESTINATION, ARG_NETWORK, ARG_ORIGIN, ARG_START,
    ARG_VIA_BRANCH, CliError, parse_or, require, split_ids, toll_factor, write_json,
};

pub(crate) const ENV_SEARCH_NETWORK: &str = "HUBROUTE_CMDS_SEARCH_NETWORK";
pub(crate) const ENV_SEARCH_ORIGIN: &str = "HUBROUTE_CMDS_SEARCH_ORIGIN";
pub(crate) const ENV_SHORTEST_PATH_NETWORK: &str = "HUBROUTE_CMDS_SHORTEST_PATH_NETWORK";
pub(crate) const ENV_SHORTEST_PATH_ORIGIN: &str = "HUBROUTE_CMDS_SHORTEST_PATH_ORIGIN";
pub(crate) const ENV_SHORTEST_PATH_DESTINATION: &str = "HUBROUTE_CMDS_SHORTEST_PATH_DESTINATION";
pub(crate) const ENV_SPANNING_TREE_NETWORK: &str = "HUBROUTE_CMDS_SPANNING_TREE_NETWORK";
pub(crate) const ENV_SPANNING_TREE_START: &str = "HUBROUTE_CMDS_SPANNING_TREE_START";

/// Unweighted search strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Algorithm {
    BreadthFirst,
    DepthFirst,
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bfs" | "breadth-first" => Ok(Self::BreadthFirst),
            "dfs" | "depth-first" => Ok(Self::DepthFirst),
            _ => Err("expected bfs or dfs".to_owned()),
        }
    }
}

/// CLI arguments for the `search` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Find a path with breadth- or depth-first search over the \
                 undirected route graph. Without a destination, list every \
                 node reachable from the origin in visit order.",
    about = "Unweighted path search and traversal"
)]
#[ortho_config(prefix = "HUBROUTE")]
pub(crate) struct SearchArgs {
    /// Node to start from.
    #[arg(value_name = "origin")]
    #[serde(default)]
    pub(crate) origin: Option<String>,
    /// Node to reach; omit to traverse.
    #[arg(value_name = "destination")]
    #[serde(default)]
    pub(crate) destination: Option<String>,
    /// Path to the JSON network snapshot.
    #[arg(long = ARG_NETWORK, value_name = "path")]
    #[serde(default)]
    pub(crate) network: Option<Utf8PathBuf>,
    /// `bfs` (default) or `dfs`.
    #[arg(long = ARG_ALGORITHM, value_name = "name")]
    #[serde(default)]
    pub(crate) algorithm: Option<String>,
    /// Maximum hops; zero or negative means unbounded.
    #[arg(long, value_name = "hops", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) depth: Option<i64>,
    /// Let branches hop to the clients they serve.
    #[arg(long)]
    #[serde(default)]
    pub(crate) include_clients: bool,
    /// Reach a client destination through its first serving branch.
    #[arg(long = ARG_VIA_BRANCH)]
    #[serde(default)]
    pub(crate) via_branch: bool,
}

impl SearchArgs {
    pub(crate) fn into_config(self) -> Result<SearchConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        SearchConfig::try_from(merged)
    }
}

/// Resolved `search` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SearchConfig {
    pub(crate) network: Utf8PathBuf,
    pub(crate) origin: String,
    pub(crate) destination: Option<String>,
    pub(crate) algorithm: Algorithm,
    pub(crate) depth: DepthLimit,
    pub(crate) include_clients: bool,
    pub(crate) via_branch: bool,
}

impl TryFrom<SearchArgs> for SearchConfig {
    type Error = CliError;

    fn try_from(args: SearchArgs) -> Result<Self, Self::Error> {
        let network = require(args.network, ARG_NETWORK, ENV_SEARCH_NETWORK)?;
        let origin = require(args.origin, ARG_ORIGIN, ENV_SEARCH_ORIGIN)?;
        let algorithm = parse_or(
            args.algorithm.as_deref(),
            ARG_ALGORITHM,
            Algorithm::BreadthFirst,
        )?;
        if args.via_branch && (algorithm != Algorithm::BreadthFirst || args.destination.is_none())
        {
            return Err(CliError::InvalidOption {
                field: ARG_VIA_BRANCH,
                value: "true".to_owned(),
                reason: "requires breadth-first search and a destination".to_owned(),
            });
        }
        Ok(Self {
            network,
            origin,
            destination: args.destination,
            algorithm,
            depth: DepthLimit::from_raw(args.depth),
            include_clients: args.include_clients,
            via_branch: args.via_branch,
        })
    }
}

/// Result printed by `search`.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub(crate) enum SearchOutput {
    Hops(HopPath),
    DepthFirst(DepthFirstPath),
    Walk(Traversal),
}

pub(crate) fn execute_search(
    config: &SearchConfig,
    network: &MemoryNetwork,
) -> Result<SearchOutput, CliError> {
    let origin = config.origin.as_str();
    let output = match (config.algorithm, config.destination.as_deref()) {
        (_, Some(client)) if config.via_branch => SearchOutput::Hops(
            BreadthFirst::new(network).find_path_to_client(origin, client, config.depth)?,
        ),
        (Algorithm::BreadthFirst, Some(destination)) => {
            SearchOutput::Hops(BreadthFirst::new(network).find_path(
                origin,
                destination,
                config.depth,
                config.include_clients,
            )?)
        }
        (Algorithm::DepthFirst, Some(destination)) => {
            SearchOutput::DepthFirst(DepthFirst::new(network).find_path(
                origin,
                destination,
                config.depth,
                config.include_clients,
            )?)
        }
        (Algorithm::BreadthFirst, None) => SearchOutput::Walk(BreadthFirst::new(network).traverse(
            origin,
            config.depth,
            config.include_clients,
        )?),
        (Algorithm::DepthFirst, None) => SearchOutput::Walk(DepthFirst::new(network).traverse(
            origin,
            config.depth,
            config.include_clients,
        )?),
    };
    Ok(output)
}

pub(crate) fn run_search(args: SearchArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let network = load_network(&config.network)?;
    write_json(writer, &execute_search(&config, &network)?)
}

/// CLI arguments for the `shortest-path` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Run Dijkstra over the directed routes. A client \
                 destination is reached through its cheapest serving branch. \
                 An unreachable destination prints an empty path with a null \
                 total.",
    about = "Weighted shortest path"
)]
#[ortho_config(prefix = "HUBROUTE")]
pub(crate) struct ShortestPathArgs {
    /// Hub to start from.
    #[arg(value_name = "origin")]
    #[serde(default)]
    pub(crate) origin: Option<String>,
    /// Hub or client to reach.
    #[arg(value_name = "destination")]
    #[serde(default)]
    pub(crate) destination: Option<String>,
    /// Path to the JSON network snapshot.
    #[arg(long = ARG_NETWORK, value_name = "path")]
    #[serde(default)]
    pub(crate) network: Option<Utf8PathBuf>,
    /// `distance` (default), `time` or `cost`.
    #[arg(long = ARG_CRITERION, value_name = "name")]
    #[serde(default)]
    pub(crate) criterion: Option<String>,
    /// Multiplier applied to tolls under the `cost` criterion.
    #[arg(long, value_name = "factor")]
    #[serde(default)]
    pub(crate) toll_factor: Option<f64>,
}

impl ShortestPathArgs {
    pub(crate) fn into_config(self) -> Result<ShortestPathConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ShortestPathConfig::try_from(merged)
    }
}

/// Resolved `shortest-path` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ShortestPathConfig {
    pub(crate) network: Utf8PathBuf,
    pub(crate) origin: String,
    pub(crate) destination: String,
    pub(crate) criterion: Criterion,
    pub(crate) toll_factor: f64,
}

impl TryFrom<ShortestPathArgs> for ShortestPathConfig {
    type Error = CliError;

    fn try_from(args: ShortestPathArgs) -> Result<Self, Self::Error> {
        Ok(Self {
            network: require(args.network, ARG_NETWORK, ENV_SHORTEST_PATH_NETWORK)?,
            origin: require(args.origin, ARG_ORIGIN, ENV_SHORTEST_PATH_ORIGIN)?,
            destination: require(
                args.destination,
                ARG_DESTINATION,
                ENV_SHORTEST_PATH_DESTINATION,
            )?,
            criterion: parse_or(args.criterion.as_deref(), ARG_CRITERION, Criterion::Distance)?,
            toll_factor: toll_factor(args.toll_factor)?,
        })
    }
}

pub(crate) fn execute_shortest_path(
    config: &ShortestPathConfig,
    network: &MemoryNetwork,
) -> Result<WeightedPath, CliError> {
    Ok(ShortestPaths::new(network).find_path(
        &config.origin,
        &config.destination,
        config.criterion,
        config.toll_factor,
    )?)
}

pub(crate) fn run_shortest_path(
    args: ShortestPathArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let network = load_network(&config.network)?;
    write_json(writer, &execute_shortest_path(&config, &network)?)
}

/// CLI arguments for the `spanning-tree` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Grow a Prim minimum spanning tree from a start hub over \
                 the directed routes of a zone. Without a zone every hub is \
                 eligible; ids in the zone that are not hubs are ignored.",
    about = "Minimum spanning tree over a zone"
)]
#[ortho_config(prefix = "HUBROUTE")]
pub(crate) struct SpanningTreeArgs {
    /// Hub the tree grows from.
    #[arg(value_name = "start")]
    #[serde(default)]
    pub(crate) start: Option<String>,
    /// Path to the JSON network snapshot.
    #[arg(long = ARG_NETWORK, value_name = "path")]
    #[serde(default)]
    pub(crate) network: Option<Utf8PathBuf>,
    /// Comma-separated hub ids restricting the tree.
    #[arg(long, value_name = "ids")]
    #[serde(default)]
    pub(crate) zone: Option<String>,
    /// `distance` (default), `time` or `cost`.
    #[arg(long = ARG_CRITERION, value_name = "name")]
    #[serde(default)]
    pub(crate) criterion: Option<String>,
    /// Multiplier applied to tolls under the `cost` criterion.
    #[arg(long, value_name = "factor")]
    #[serde(default)]
    pub(crate) toll_factor: Option<f64>,
}

impl SpanningTreeArgs {
    pub(crate) fn into_config(self) -> Result<SpanningTreeConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        SpanningTreeConfig::try_from(merged)
    }
}

/// Resolved `spanning-tree` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SpanningTreeConfig {
    pub(crate) network: Utf8PathBuf,
    pub(crate) start: String,
    pub(crate) zone: Vec<String>,
    pub(crate) criterion: Criterion,
    pub(crate) toll_factor: f64,
}

impl TryFrom<SpanningTreeArgs> for SpanningTreeConfig {
    type Error = CliError;

    fn try_from(args: SpanningTreeArgs) -> Result<Self, Self::Error> {
        Ok(Self {
            network: require(args.network, ARG_NETWORK, ENV_SPANNING_TREE_NETWORK)?,
            start: require(args.start, ARG_START, ENV_SPANNING_TREE_START)?,
            zone: split_ids(args.zone.as_deref()),
            criterion: parse_or(args.criterion.as_deref(), ARG_CRITERION, Criterion::Distance)?,
            toll_factor: toll_factor(args.toll_factor)?,
        })
    }
}

pub(crate) fn execute_spanning_tree(
    config: &SpanningTreeConfig,
    network: &MemoryNetwork,
) -> Result<SpanningTree, CliError> {
    Ok(SpanningTrees::new(network).build(
        &config.start,
        &config.zone,
        config.criterion,
        config.toll_factor,
    )?)
}

pub(crate) fn run_spanning_tree(
    args: SpanningTreeArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let network = load_network(&config.network)?;
    write_json(writer, &execute_spanning_tree(&config, &network)?)
}
