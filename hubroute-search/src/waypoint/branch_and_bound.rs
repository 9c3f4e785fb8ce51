//! Best-first branch-and-bound over stop orderings.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use hubroute_core::{GraphStore, RoutingError, WaypointRequest, WaypointRoute, WaypointSolver};

use super::{LegCache, Tour, route};

/// Waypoint router that expands partial orderings cheapest-estimate first.
///
/// The estimate of a partial ordering is its accumulated distance plus the
/// shortest single leg from its last stop to any stop still to visit or to
/// the end hub. Orderings whose accumulated distance reaches the best
/// complete route are discarded.
#[derive(Debug, Clone)]
pub struct BranchAndBoundRouter<G> {
    store: G,
}

impl<G: GraphStore> BranchAndBoundRouter<G> {
    /// Construct a router over `store`.
    #[must_use]
    pub const fn new(store: G) -> Self {
        Self { store }
    }
}

impl<G: GraphStore> WaypointSolver for BranchAndBoundRouter<G> {
    fn solve(&self, request: &WaypointRequest) -> Result<Option<WaypointRoute>, RoutingError> {
        route(&self.store, request, search)
    }
}

/// Partial ordering on the frontier. Lower estimates pop first, then older
/// states.
#[derive(Debug)]
struct Partial {
    estimate: f64,
    sequence: u64,
    cost: f64,
    at: String,
    order: Vec<String>,
    remaining: Vec<String>,
}

impl PartialEq for Partial {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Partial {}

impl Ord for Partial {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .estimate
            .total_cmp(&self.estimate)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for Partial {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "route costs accumulate floating-point leg distances"
)]
fn search<G: GraphStore>(
    legs: &mut LegCache<'_, G>,
    origin: &str,
    stops: &[String],
    end: &str,
) -> Result<Option<Tour>, RoutingError> {
    let mut best: Option<Tour> = None;
    let mut sequence = 0_u64;
    let mut pruned = 0_usize;
    let mut frontier = BinaryHeap::from([Partial {
        estimate: lower_bound(legs, origin, stops, end)?,
        sequence,
        cost: 0.0,
        at: origin.to_owned(),
        order: Vec::new(),
        remaining: stops.to_vec(),
    }]);

    while let Some(state) = frontier.pop() {
        if best.as_ref().is_some_and(|tour| state.cost >= tour.cost) {
            pruned = pruned.saturating_add(1);
            continue;
        }
        if state.remaining.is_empty() {
            if let Some(last) = legs.cost(&state.at, end)? {
                let total = state.cost + last;
                if best.as_ref().is_none_or(|tour| total < tour.cost) {
                    best = Some(Tour {
                        cost: total,
                        order: state.order,
                    });
                }
            }
            continue;
        }
        for (index, next) in state.remaining.iter().enumerate() {
            let Some(step) = legs.cost(&state.at, next)? else {
                continue;
            };
            let cost = state.cost + step;
            if best.as_ref().is_some_and(|tour| cost >= tour.cost) {
                pruned = pruned.saturating_add(1);
                continue;
            }
            let mut remaining = state.remaining.clone();
            remaining.remove(index);
            let mut order = state.order.clone();
            order.push(next.clone());
            sequence = sequence.saturating_add(1);
            frontier.push(Partial {
                estimate: cost + lower_bound(legs, next, &remaining, end)?,
                sequence,
                cost,
                at: next.clone(),
                order,
                remaining,
            });
        }
    }
    log::debug!("branch-and-bound {origin} -> {end}: pruned {pruned} states");
    Ok(best)
}

/// Shortest single leg from `at` to any of `remaining` or `end`; zero when
/// none is reachable.
fn lower_bound<G: GraphStore>(
    legs: &mut LegCache<'_, G>,
    at: &str,
    remaining: &[String],
    end: &str,
) -> Result<f64, RoutingError> {
    let mut bound: Option<f64> = None;
    for target in remaining.iter().map(String::as_str).chain(std::iter::once(end)) {
        if let Some(cost) = legs.cost(at, target)? {
            bound = Some(bound.map_or(cost, |current| current.min(cost)));
        }
    }
    Ok(bound.unwrap_or(0.0))
}
