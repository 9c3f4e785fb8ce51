//! Facade crate for the hubroute logistics routing engine.
//!
//! This crate re-exports the core domain types and exposes the search
//! algorithms and load planners behind feature flags.

#![forbid(unsafe_code)]

pub use hubroute_core::{
    Criterion, DepthFirstPath, DepthLimit, FleetStore, GraphStore, HopPath, MemoryNetwork, Node,
    NodeKind, Package, PackageState, Priority, RouteEdge, RoutingError, SpanningTree, StoreError,
    Traversal, UnknownNodeReason, Vehicle, WaypointRequest, WaypointRoute, WaypointSolver,
    WeightedPath,
};

#[cfg(feature = "serde")]
pub use hubroute_core::{NetworkSnapshot, SnapshotError};

#[cfg(feature = "search")]
pub use hubroute_search::{
    BacktrackingRouter, BranchAndBoundRouter, BreadthFirst, DepthFirst, RouterConfig,
    ShortestPaths, SpanningTrees, Strategy, WaypointRouter,
};

#[cfg(feature = "load")]
pub use hubroute_load::{GreedyPlan, KnapsackPlan, LoadError, LoadPlanner, LoadRequest};
