//! Prim minimum spanning trees over a zone of hubs.

use std::cmp::Ordering;
use std::collections::{BTreeSet, BinaryHeap};

use hubroute_core::{
    Criterion, GraphStore, RouteEdge, RoutingError, SpanningTree, UnknownNodeReason,
};

/// Candidate tree edge; the heap pops the lightest, then the lowest
/// endpoint id, then the lowest source id.
#[derive(Debug, Clone)]
struct Candidate {
    weight: f64,
    edge: RouteEdge,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .weight
            .total_cmp(&self.weight)
            .then_with(|| other.edge.to.cmp(&self.edge.to))
            .then_with(|| other.edge.from.cmp(&self.edge.from))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Prim's algorithm over the outgoing routes of a [`GraphStore`].
///
/// Only routes leaving a tree hub towards a zone hub outside the tree are
/// considered, so the tree is grown along route direction.
///
/// # Examples
/// ```
/// use hubroute_core::{Criterion, MemoryNetwork, Node, RouteEdge};
/// use hubroute_search::SpanningTrees;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut network = MemoryNetwork::new();
/// for id in ["A", "B", "C"] {
///     network.add_node(Node::branch(id, id, "Test"))?;
/// }
/// network.add_route(RouteEdge::new("A", "B", 2.0, 1.0, 0.0)?)?;
/// network.add_route(RouteEdge::new("A", "C", 5.0, 1.0, 0.0)?)?;
/// network.add_route(RouteEdge::new("B", "C", 1.0, 1.0, 0.0)?)?;
///
/// let tree = SpanningTrees::new(&network).build("A", &[], Criterion::Distance, 1.0)?;
/// assert_eq!(tree.edges.len(), 2);
/// assert_eq!(tree.total, 3.0);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SpanningTrees<G> {
    store: G,
}

impl<G: GraphStore> SpanningTrees<G> {
    /// Create a builder over `store`.
    #[must_use]
    pub const fn new(store: G) -> Self {
        Self { store }
    }

    /// Grow a minimum spanning tree from `start` over `zone`.
    ///
    /// An empty `zone` means every hub. Zone ids that are not hubs are
    /// ignored. A disconnected zone yields the tree of the component
    /// reachable from `start`.
    ///
    /// # Errors
    /// [`RoutingError::UnknownNode`] when `start` is not a hub or lies
    /// outside `zone`. [`RoutingError::InvalidTollFactor`] when
    /// `toll_factor` is negative or not finite.
    #[expect(
        clippy::float_arithmetic,
        reason = "tree weight sums floating-point edge weights"
    )]
    pub fn build(
        &self,
        start: &str,
        zone: &[String],
        criterion: Criterion,
        toll_factor: f64,
    ) -> Result<SpanningTree, RoutingError> {
        RoutingError::check_toll_factor(toll_factor)?;
        if !self.store.hub_exists(start)? {
            let reason = if self.store.client_exists(start)? {
                UnknownNodeReason::NotAHub
            } else {
                UnknownNodeReason::Missing
            };
            return Err(RoutingError::unknown(start, reason));
        }
        let members = self.resolve_zone(zone)?;
        if !members.contains(start) {
            return Err(RoutingError::unknown(start, UnknownNodeReason::OutsideZone));
        }

        let mut included = BTreeSet::from([start.to_owned()]);
        let mut edges = Vec::new();
        let mut total = 0.0;
        let mut frontier = BinaryHeap::new();
        self.expand(start, &members, &included, criterion, toll_factor, &mut frontier)?;

        while included.len() < members.len() {
            let Some(Candidate { weight, edge }) = frontier.pop() else {
                break;
            };
            if included.contains(&edge.to) {
                continue;
            }
            included.insert(edge.to.clone());
            total += weight;
            let admitted = edge.to.clone();
            edges.push(edge);
            self.expand(&admitted, &members, &included, criterion, toll_factor, &mut frontier)?;
        }
        log::debug!(
            "prim from {start} by {criterion}: {} of {} zone hubs spanned",
            included.len(),
            members.len()
        );
        Ok(SpanningTree {
            start: start.to_owned(),
            edges,
            total,
            nodes: included.into_iter().collect(),
            criterion,
        })
    }

    fn resolve_zone(&self, zone: &[String]) -> Result<BTreeSet<String>, RoutingError> {
        if zone.is_empty() {
            return Ok(self.store.all_hubs()?.into_iter().collect());
        }
        let mut resolved = BTreeSet::new();
        for id in zone {
            if self.store.hub_exists(id)? {
                resolved.insert(id.clone());
            } else {
                log::warn!("ignoring zone member {id}: not a hub");
            }
        }
        Ok(resolved)
    }

    fn expand(
        &self,
        from: &str,
        zone: &BTreeSet<String>,
        included: &BTreeSet<String>,
        criterion: Criterion,
        toll_factor: f64,
        frontier: &mut BinaryHeap<Candidate>,
    ) -> Result<(), RoutingError> {
        for edge in self.store.outgoing_routes(from)? {
            if zone.contains(&edge.to) && !included.contains(&edge.to) {
                frontier.push(Candidate {
                    weight: criterion.weight(&edge, toll_factor),
                    edge,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
