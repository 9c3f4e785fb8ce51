//! Core domain types for the hubroute engine.
//!
//! The crate models the logistics network (hubs, clients, directed route
//! edges), the load-planning records (packages and vehicles), the result
//! shapes produced by the search and load crates, and the two store
//! boundaries every algorithm reads through: [`GraphStore`] and
//! [`FleetStore`].
#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod error;
pub mod fleet;
pub mod node;
pub mod path;
pub mod route;
pub mod solver;
pub mod store;
#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use error::{RoutingError, UnknownNodeReason};
pub use fleet::{Package, PackageState, Priority, PriorityError, Vehicle};
pub use node::{Node, NodeKind, ParseNodeKindError};
pub use path::{DepthFirstPath, DepthLimit, HopPath, SpanningTree, Traversal, WeightedPath};
pub use route::{Criterion, ParseCriterionError, RouteEdge, RouteEdgeError};
pub use solver::{WaypointRequest, WaypointRoute, WaypointSolver};
pub use store::{
    FleetStore, GraphStore, MemoryNetwork, NetworkError, StoreError, StoreResult, TransportRecord,
};

#[cfg(feature = "serde")]
pub use store::{DepotPackage, DepotVehicle, NetworkSnapshot, ServesEntry, SnapshotError};
