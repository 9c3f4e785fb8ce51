//! Graph search over a hubroute network.
//!
//! Every algorithm is a small struct generic over a
//! [`GraphStore`](hubroute_core::GraphStore) and builds its own frontier and
//! visited sets per call, so one instance can serve concurrent queries:
//!
//! - [`BreadthFirst`] and [`DepthFirst`] walk the symmetric closure of the
//!   route relation, optionally hopping from branches to the clients they
//!   serve.
//! - [`ShortestPaths`] runs Dijkstra over directed routes under a
//!   [`Criterion`](hubroute_core::Criterion), resolving client destinations
//!   through their serving branches.
//! - [`SpanningTrees`] grows a Prim tree over a zone of hubs.
//! - [`BacktrackingRouter`] and [`BranchAndBoundRouter`] implement
//!   [`WaypointSolver`](hubroute_core::WaypointSolver), chaining distance
//!   legs through a set of mandatory stops.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod dijkstra;
mod spanning;
mod traversal;
mod waypoint;

pub use dijkstra::ShortestPaths;
pub use spanning::SpanningTrees;
pub use traversal::{BreadthFirst, DepthFirst};
pub use waypoint::{
    BacktrackingRouter, BranchAndBoundRouter, DEFAULT_MAX_DEPTH, ParseStrategyError,
    RouterConfig, Strategy, WaypointRouter,
};
