//! Result shapes returned by the search algorithms.
//!
//! Every path-shaped result keeps `path` and `names` aligned: `names[i]` is
//! the display name of `path[i]`, falling back to the id when the store has
//! none. An empty `path` means "no path", never an error.

use std::collections::BTreeMap;

use crate::{Criterion, RouteEdge};

/// Hop bound for unweighted traversal.
///
/// A node discovered at depth `n` is reported but only expanded while
/// `n < limit`.
///
/// # Examples
/// ```
/// use hubroute_core::DepthLimit;
///
/// assert_eq!(DepthLimit::from_raw(None), DepthLimit::Unbounded);
/// assert_eq!(DepthLimit::from_raw(Some(0)), DepthLimit::Unbounded);
/// assert_eq!(DepthLimit::from_raw(Some(-3)), DepthLimit::Unbounded);
/// assert!(DepthLimit::from_raw(Some(2)).allows_expansion(1));
/// assert!(!DepthLimit::from_raw(Some(2)).allows_expansion(2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DepthLimit {
    /// No hop bound.
    #[default]
    Unbounded,
    /// Expand nodes strictly shallower than this many hops.
    Hops(u32),
}

impl DepthLimit {
    /// Interpret a caller-supplied bound: absent or non-positive means
    /// unbounded.
    #[must_use]
    pub fn from_raw(raw: Option<i64>) -> Self {
        match raw.and_then(|value| u32::try_from(value).ok()) {
            Some(0) | None => Self::Unbounded,
            Some(hops) => Self::Hops(hops),
        }
    }

    /// Return `true` when a node at `depth` may enqueue its neighbours.
    #[must_use]
    pub const fn allows_expansion(self, depth: u32) -> bool {
        match self {
            Self::Unbounded => true,
            Self::Hops(limit) => depth < limit,
        }
    }
}

/// Hop-count path found by breadth-first search.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct HopPath {
    /// Requested origin.
    pub origin: String,
    /// Requested destination.
    pub destination: String,
    /// Node ids from origin to destination; empty when unreachable.
    pub path: Vec<String>,
    /// Display names aligned with `path`.
    pub names: Vec<String>,
}

impl HopPath {
    /// Return `true` when no path was found.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Number of hops on the path, `None` when no path was found.
    #[must_use]
    pub const fn hops(&self) -> Option<usize> {
        self.path.len().checked_sub(1)
    }
}

/// Visitation order of a traversal without destination.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Traversal {
    /// Starting node.
    pub origin: String,
    /// Node ids in the order they were visited.
    pub order: Vec<String>,
    /// Display names aligned with `order`.
    pub names: Vec<String>,
}

/// Path found by depth-first search, with the nodes popped along the way.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DepthFirstPath {
    /// Requested origin.
    pub origin: String,
    /// Requested destination.
    pub destination: String,
    /// Node ids from origin to destination; empty when unreachable.
    pub path: Vec<String>,
    /// Display names aligned with `path`.
    pub names: Vec<String>,
    /// Every node popped before the search stopped.
    pub visited: Vec<String>,
    /// Display names aligned with `visited`.
    pub visited_names: Vec<String>,
}

impl DepthFirstPath {
    /// Return `true` when no path was found.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Number of hops on the path, `None` when no path was found.
    #[must_use]
    pub const fn hops(&self) -> Option<usize> {
        self.path.len().checked_sub(1)
    }
}

/// Minimum-weight path under a [`Criterion`].
///
/// `edges.len() == path.len() - 1` for any non-empty path. When the
/// destination is a client, the final edge is a zero-weight serving hop.
/// An unreachable destination gives an empty path and an infinite `total`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct WeightedPath {
    /// Requested origin hub.
    pub origin: String,
    /// Requested destination (hub or client).
    pub destination: String,
    /// Node ids from origin to destination.
    pub path: Vec<String>,
    /// Display names aligned with `path`.
    pub names: Vec<String>,
    /// Route edges taken, in order.
    pub edges: Vec<RouteEdge>,
    /// Total weight of `edges` under `criterion`.
    pub total: f64,
    /// Weighing criterion used.
    pub criterion: Criterion,
    /// Best-known cumulative weight of every labelled hub.
    pub cumulative: BTreeMap<String, f64>,
}

impl WeightedPath {
    /// Return `true` when no path was found.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.path.is_empty()
    }
}

/// Minimum spanning tree over a zone, or over the component reachable from
/// the start when the zone is disconnected.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SpanningTree {
    /// Hub the tree grew from.
    pub start: String,
    /// Tree edges in admission order.
    pub edges: Vec<RouteEdge>,
    /// Total weight of `edges` under `criterion`.
    pub total: f64,
    /// Hubs in the tree, sorted by id.
    pub nodes: Vec<String>,
    /// Weighing criterion used.
    pub criterion: Criterion,
}
