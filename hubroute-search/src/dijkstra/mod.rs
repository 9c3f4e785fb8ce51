//! Dijkstra shortest paths over directed routes.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BinaryHeap, HashMap, HashSet};

use hubroute_core::{
    Criterion, GraphStore, RouteEdge, RoutingError, UnknownNodeReason, WeightedPath,
};

/// Heap entry ordered so that [`BinaryHeap`] pops the cheapest node first,
/// breaking ties on the lower id.
#[derive(Debug, Clone, PartialEq)]
struct Frontier {
    cost: f64,
    node: String,
}

impl Eq for Frontier {}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Dijkstra search over the outgoing routes of a [`GraphStore`].
///
/// Each hub is settled at most once. Stale heap entries left behind by a
/// cheaper relaxation are skipped when popped.
///
/// # Examples
/// ```
/// use hubroute_core::{Criterion, MemoryNetwork, Node, RouteEdge};
/// use hubroute_search::ShortestPaths;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut network = MemoryNetwork::new();
/// for id in ["A", "B", "C"] {
///     network.add_node(Node::branch(id, id, "Test"))?;
/// }
/// network.add_route(RouteEdge::new("A", "B", 1.0, 5.0, 0.0)?)?;
/// network.add_route(RouteEdge::new("B", "C", 1.0, 5.0, 0.0)?)?;
/// network.add_route(RouteEdge::new("A", "C", 5.0, 1.0, 0.0)?)?;
///
/// let paths = ShortestPaths::new(&network);
/// let by_distance = paths.find_path("A", "C", Criterion::Distance, 1.0)?;
/// assert_eq!(by_distance.path, vec!["A", "B", "C"]);
/// let by_time = paths.find_path("A", "C", Criterion::Time, 1.0)?;
/// assert_eq!(by_time.path, vec!["A", "C"]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ShortestPaths<G> {
    store: G,
}

impl<G: GraphStore> ShortestPaths<G> {
    /// Create a search over `store`.
    #[must_use]
    pub const fn new(store: G) -> Self {
        Self { store }
    }

    /// Find the cheapest path from hub `origin` to `destination`.
    ///
    /// A client destination is reached through whichever serving branch is
    /// cheapest, followed by a zero-weight hop to the client. An unreachable
    /// destination yields an empty path with an infinite total.
    ///
    /// # Errors
    /// [`RoutingError::UnknownNode`] when `origin` is not a hub, when
    /// `destination` is neither hub nor client, or when no branch serves a
    /// client destination. [`RoutingError::InvalidTollFactor`] when
    /// `toll_factor` is negative or not finite.
    pub fn find_path(
        &self,
        origin: &str,
        destination: &str,
        criterion: Criterion,
        toll_factor: f64,
    ) -> Result<WeightedPath, RoutingError> {
        RoutingError::check_toll_factor(toll_factor)?;
        self.require_hub(origin)?;
        if self.store.hub_exists(destination)? {
            return self.between_hubs(origin, destination, criterion, toll_factor);
        }
        if self.store.client_exists(destination)? {
            return self.to_client(origin, destination, criterion, toll_factor);
        }
        Err(RoutingError::unknown(destination, UnknownNodeReason::Missing))
    }

    /// Cheapest hub-to-hub path without endpoint validation.
    #[expect(
        clippy::float_arithmetic,
        reason = "path costs accumulate floating-point edge weights"
    )]
    pub(crate) fn between_hubs(
        &self,
        origin: &str,
        destination: &str,
        criterion: Criterion,
        toll_factor: f64,
    ) -> Result<WeightedPath, RoutingError> {
        let mut best: HashMap<String, f64> = HashMap::from([(origin.to_owned(), 0.0)]);
        let mut taken: HashMap<String, RouteEdge> = HashMap::new();

        if origin != destination {
            let mut heap = BinaryHeap::from([Frontier {
                cost: 0.0,
                node: origin.to_owned(),
            }]);
            let mut settled = HashSet::new();
            while let Some(Frontier { cost, node }) = heap.pop() {
                if !settled.insert(node.clone()) {
                    continue;
                }
                if node == destination {
                    break;
                }
                for edge in self.store.outgoing_routes(&node)? {
                    if settled.contains(&edge.to) {
                        continue;
                    }
                    let candidate = cost + criterion.weight(&edge, toll_factor);
                    let known = best.get(&edge.to).copied().unwrap_or(f64::INFINITY);
                    if candidate < known {
                        best.insert(edge.to.clone(), candidate);
                        heap.push(Frontier {
                            cost: candidate,
                            node: edge.to.clone(),
                        });
                        taken.insert(edge.to.clone(), edge);
                    }
                }
            }
            log::debug!(
                "dijkstra {origin} -> {destination} by {criterion}: settled {} hubs",
                settled.len()
            );
        }

        let edges = walk_back(&taken, origin, destination);
        let path: Vec<String> = match edges.as_deref() {
            None => Vec::new(),
            Some(edges) => std::iter::once(origin.to_owned())
                .chain(edges.iter().map(|edge| edge.to.clone()))
                .collect(),
        };
        let total = if path.is_empty() {
            f64::INFINITY
        } else {
            best.get(destination).copied().unwrap_or(f64::INFINITY)
        };
        Ok(WeightedPath {
            origin: origin.to_owned(),
            destination: destination.to_owned(),
            names: self.store.names_of(&path)?,
            path,
            edges: edges.unwrap_or_default(),
            total,
            criterion,
            cumulative: best.into_iter().collect::<BTreeMap<_, _>>(),
        })
    }

    fn to_client(
        &self,
        origin: &str,
        client: &str,
        criterion: Criterion,
        toll_factor: f64,
    ) -> Result<WeightedPath, RoutingError> {
        let branches = self.store.serving_branches(client)?;
        let mut winner: Option<WeightedPath> = None;
        for branch in &branches {
            let candidate = self.between_hubs(origin, branch, criterion, toll_factor)?;
            if winner.as_ref().is_none_or(|best| candidate.total < best.total) {
                winner = Some(candidate);
            }
        }
        let Some(mut best) = winner else {
            return Err(RoutingError::unknown(client, UnknownNodeReason::NotServed));
        };
        best.destination = client.to_owned();
        let Some(branch) = best.path.last().cloned() else {
            log::debug!("dijkstra {origin} -> {client}: no serving branch reachable");
            return Ok(best);
        };
        log::debug!("dijkstra {origin} -> {client}: served via {branch}");
        best.edges.push(RouteEdge::serving_hop(branch, client));
        best.path.push(client.to_owned());
        let name = self.store.name_of(client)?;
        best.names.push(name.unwrap_or_else(|| client.to_owned()));
        Ok(best)
    }

    fn require_hub(&self, id: &str) -> Result<(), RoutingError> {
        if self.store.hub_exists(id)? {
            return Ok(());
        }
        let reason = if self.store.client_exists(id)? {
            UnknownNodeReason::NotAHub
        } else {
            UnknownNodeReason::Missing
        };
        Err(RoutingError::unknown(id, reason))
    }
}

/// Edges from `origin` to `destination` following the predecessor edges;
/// `None` when the destination was never reached.
fn walk_back(
    taken: &HashMap<String, RouteEdge>,
    origin: &str,
    destination: &str,
) -> Option<Vec<RouteEdge>> {
    let mut edges = Vec::new();
    let mut current = destination;
    while current != origin {
        let edge = taken.get(current)?;
        edges.push(edge.clone());
        current = edge.from.as_str();
    }
    edges.reverse();
    Some(edges)
}
