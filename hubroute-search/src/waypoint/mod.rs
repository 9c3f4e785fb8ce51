//! Multi-waypoint routing over Dijkstra distance legs.
//!
//! Both strategies search over orderings of the mandatory stops. A leg
//! between two waypoints is the distance-shortest hub path, computed once
//! per call and cached. A client destination is tried through every branch
//! that serves it and the cheapest complete route wins.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;
use std::str::FromStr;

use hubroute_core::{
    Criterion, GraphStore, RoutingError, UnknownNodeReason, WaypointRequest, WaypointRoute,
    WaypointSolver,
};
use thiserror::Error;

use crate::dijkstra::ShortestPaths;

mod backtracking;
mod branch_and_bound;

pub use backtracking::BacktrackingRouter;
pub use branch_and_bound::BranchAndBoundRouter;

/// Deepest stop ordering the backtracking router explores by default.
pub const DEFAULT_MAX_DEPTH: usize = 15;

/// Configuration for [`BacktrackingRouter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouterConfig {
    /// Maximum number of mandatory stops a request may carry. Requests with
    /// more stops report no route.
    pub max_depth: usize,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Search strategy for [`WaypointRouter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Depth-first permutation search with cost pruning.
    #[default]
    Backtracking,
    /// Best-first search ordered by a lower-bound estimate.
    BranchAndBound,
}

impl Strategy {
    /// Canonical name used on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Backtracking => "backtracking",
            Self::BranchAndBound => "branch-and-bound",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown [`Strategy`] name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown waypoint strategy `{0}` (expected backtracking or branch-and-bound)")]
pub struct ParseStrategyError(pub String);

impl FromStr for Strategy {
    type Err = ParseStrategyError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "backtracking" | "bt" => Ok(Self::Backtracking),
            "branch-and-bound" | "branch_and_bound" | "bnb" => Ok(Self::BranchAndBound),
            _ => Err(ParseStrategyError(raw.to_owned())),
        }
    }
}

/// Waypoint router selected at runtime.
///
/// # Examples
/// ```
/// use hubroute_core::test_support::sample_network;
/// use hubroute_core::{WaypointRequest, WaypointSolver};
/// use hubroute_search::{Strategy, WaypointRouter};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let network = sample_network();
/// let router = WaypointRouter::new(&network, Strategy::BranchAndBound);
/// let request = WaypointRequest::new("DEP_1", "CLI_1", ["SUC_3"]);
/// let route = router.solve(&request)?.ok_or("no route")?;
/// assert_eq!(route.path.last().map(String::as_str), Some("CLI_1"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub enum WaypointRouter<G> {
    /// Exhaustive backtracking.
    Backtracking(BacktrackingRouter<G>),
    /// Best-first branch-and-bound.
    BranchAndBound(BranchAndBoundRouter<G>),
}

impl<G: GraphStore> WaypointRouter<G> {
    /// Build a router for `strategy` with the default configuration.
    #[must_use]
    pub fn new(store: G, strategy: Strategy) -> Self {
        Self::with_config(store, strategy, RouterConfig::default())
    }

    /// Build a router for `strategy` with explicit configuration.
    #[must_use]
    pub const fn with_config(store: G, strategy: Strategy, config: RouterConfig) -> Self {
        match strategy {
            Strategy::Backtracking => {
                Self::Backtracking(BacktrackingRouter::with_config(store, config))
            }
            Strategy::BranchAndBound => Self::BranchAndBound(BranchAndBoundRouter::new(store)),
        }
    }

    /// Strategy this router runs.
    #[must_use]
    pub const fn strategy(&self) -> Strategy {
        match self {
            Self::Backtracking(_) => Strategy::Backtracking,
            Self::BranchAndBound(_) => Strategy::BranchAndBound,
        }
    }
}

impl<G: GraphStore> WaypointSolver for WaypointRouter<G> {
    fn solve(&self, request: &WaypointRequest) -> Result<Option<WaypointRoute>, RoutingError> {
        match self {
            Self::Backtracking(router) => router.solve(request),
            Self::BranchAndBound(router) => router.solve(request),
        }
    }
}

/// Cheapest stop ordering towards one end hub.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct Tour {
    pub(super) cost: f64,
    pub(super) order: Vec<String>,
}

#[derive(Debug, Clone)]
struct Leg {
    path: Vec<String>,
    cost: f64,
}

/// Distance legs between hubs, computed on first use.
pub(super) struct LegCache<'a, G> {
    paths: ShortestPaths<&'a G>,
    legs: HashMap<(String, String), Option<Leg>>,
}

impl<'a, G: GraphStore> LegCache<'a, G> {
    fn new(store: &'a G) -> Self {
        Self {
            paths: ShortestPaths::new(store),
            legs: HashMap::new(),
        }
    }

    /// Distance of the shortest leg, or `None` when `to` is unreachable.
    pub(super) fn cost(&mut self, from: &str, to: &str) -> Result<Option<f64>, RoutingError> {
        Ok(self.leg(from, to)?.map(|leg| leg.cost))
    }

    fn leg(&mut self, from: &str, to: &str) -> Result<Option<&Leg>, RoutingError> {
        let leg = match self.legs.entry((from.to_owned(), to.to_owned())) {
            Entry::Occupied(slot) => slot.into_mut(),
            Entry::Vacant(slot) => {
                let found = self
                    .paths
                    .between_hubs(from, to, Criterion::Distance, 1.0)?;
                slot.insert((!found.is_empty()).then(|| Leg {
                    cost: found.total,
                    path: found.path,
                }))
            }
        };
        Ok(leg.as_ref())
    }

    /// Concatenate the legs through `order` to `end`, dropping the repeated
    /// joint node of each leg.
    fn stitch(
        &mut self,
        origin: &str,
        order: &[String],
        end: &str,
    ) -> Result<Option<Vec<String>>, RoutingError> {
        let mut path = vec![origin.to_owned()];
        let mut at = origin;
        for next in order.iter().map(String::as_str).chain(std::iter::once(end)) {
            let Some(leg) = self.leg(at, next)? else {
                return Ok(None);
            };
            path.extend(leg.path.iter().skip(1).cloned());
            at = next;
        }
        Ok(Some(path))
    }
}

/// End hubs to try and the client to append, if any.
struct Targets {
    ends: Vec<String>,
    client: Option<String>,
}

fn resolve_targets<G: GraphStore>(
    store: &G,
    request: &WaypointRequest,
) -> Result<Targets, RoutingError> {
    if !store.hub_exists(&request.origin)? {
        return Err(RoutingError::InvalidOrigin {
            id: request.origin.clone(),
        });
    }
    for stop in &request.stops {
        if !store.hub_exists(stop)? {
            return Err(RoutingError::InvalidStop { id: stop.clone() });
        }
    }
    let destination = &request.destination;
    if store.hub_exists(destination)? {
        return Ok(Targets {
            ends: vec![destination.clone()],
            client: None,
        });
    }
    if !store.client_exists(destination)? {
        return Err(RoutingError::unknown(destination, UnknownNodeReason::Missing));
    }
    let ends = store.serving_branches(destination)?;
    if ends.is_empty() {
        return Err(RoutingError::unknown(destination, UnknownNodeReason::NotServed));
    }
    Ok(Targets {
        ends,
        client: Some(destination.clone()),
    })
}

/// Validate `request`, run `search` towards every end hub and assemble the
/// cheapest tour into a route.
pub(super) fn route<'a, G, F>(
    store: &'a G,
    request: &WaypointRequest,
    mut search: F,
) -> Result<Option<WaypointRoute>, RoutingError>
where
    G: GraphStore,
    F: FnMut(&mut LegCache<'a, G>, &str, &[String], &str) -> Result<Option<Tour>, RoutingError>,
{
    let targets = resolve_targets(store, request)?;
    let mut legs = LegCache::new(store);
    let mut best: Option<(String, Tour)> = None;
    for end in &targets.ends {
        let Some(tour) = search(&mut legs, &request.origin, &request.stops, end)? else {
            continue;
        };
        if best.as_ref().is_none_or(|(_, current)| tour.cost < current.cost) {
            best = Some((end.clone(), tour));
        }
    }

    let Some((end, tour)) = best else {
        log::debug!(
            "waypoints {} -> {}: no complete route",
            request.origin,
            request.destination
        );
        return Ok(None);
    };
    let Some(mut path) = legs.stitch(&request.origin, &tour.order, &end)? else {
        return Ok(None);
    };
    if let Some(client) = targets.client {
        path.push(client);
    }
    log::debug!(
        "waypoints {} -> {} via {end}: {} km",
        request.origin,
        request.destination,
        tour.cost
    );
    Ok(Some(WaypointRoute {
        origin: request.origin.clone(),
        destination: request.destination.clone(),
        stops: request.stops.clone(),
        stop_order: tour.order,
        names: store.names_of(&path)?,
        path,
        cost: tour.cost,
    }))
}
