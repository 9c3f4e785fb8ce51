//! Exhaustive backtracking over stop orderings.

use hubroute_core::{GraphStore, RoutingError, WaypointRequest, WaypointRoute, WaypointSolver};

use super::{LegCache, RouterConfig, Tour, route};

/// Waypoint router that tries every ordering of the mandatory stops.
///
/// A partial ordering is abandoned as soon as its accumulated distance
/// reaches the best complete route found so far. Requests with more stops
/// than [`RouterConfig::max_depth`] report no route.
///
/// # Examples
/// ```
/// use hubroute_core::test_support::symmetric_network;
/// use hubroute_core::{WaypointRequest, WaypointSolver};
/// use hubroute_search::BacktrackingRouter;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let network = symmetric_network(&[("A", "B", 1.0), ("B", "C", 1.0), ("A", "C", 5.0)]);
/// let router = BacktrackingRouter::new(&network);
/// let route = router
///     .solve(&WaypointRequest::new("A", "C", ["B"]))?
///     .ok_or("no route")?;
/// assert_eq!(route.path, vec!["A", "B", "C"]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct BacktrackingRouter<G> {
    store: G,
    config: RouterConfig,
}

impl<G: GraphStore> BacktrackingRouter<G> {
    /// Construct a router using default configuration.
    #[must_use]
    pub fn new(store: G) -> Self {
        Self::with_config(store, RouterConfig::default())
    }

    /// Construct a router with explicit configuration.
    #[must_use]
    pub const fn with_config(store: G, config: RouterConfig) -> Self {
        Self { store, config }
    }
}

impl<G: GraphStore> WaypointSolver for BacktrackingRouter<G> {
    fn solve(&self, request: &WaypointRequest) -> Result<Option<WaypointRoute>, RoutingError> {
        let max_depth = self.config.max_depth;
        route(&self.store, request, |legs, origin, stops, end| {
            search(legs, origin, stops, end, max_depth)
        })
    }
}

fn search<G: GraphStore>(
    legs: &mut LegCache<'_, G>,
    origin: &str,
    stops: &[String],
    end: &str,
    max_depth: usize,
) -> Result<Option<Tour>, RoutingError> {
    if stops.len() > max_depth {
        log::warn!(
            "backtracking {origin} -> {end}: {} stops exceed depth cap {max_depth}",
            stops.len()
        );
        return Ok(None);
    }
    let mut walk = Walk {
        legs,
        end,
        best: None,
        pruned: 0_usize,
    };
    let mut remaining = stops.to_vec();
    let mut order = Vec::with_capacity(stops.len());
    walk.descend(origin, &mut remaining, &mut order, 0.0)?;
    log::debug!(
        "backtracking {origin} -> {end}: pruned {} partial orderings",
        walk.pruned
    );
    Ok(walk.best)
}

struct Walk<'w, 'a, G> {
    legs: &'w mut LegCache<'a, G>,
    end: &'w str,
    best: Option<Tour>,
    pruned: usize,
}

impl<G: GraphStore> Walk<'_, '_, G> {
    #[expect(
        clippy::float_arithmetic,
        reason = "route costs accumulate floating-point leg distances"
    )]
    fn descend(
        &mut self,
        at: &str,
        remaining: &mut Vec<String>,
        order: &mut Vec<String>,
        cost: f64,
    ) -> Result<(), RoutingError> {
        if self.best.as_ref().is_some_and(|best| cost >= best.cost) {
            self.pruned = self.pruned.saturating_add(1);
            return Ok(());
        }
        if remaining.is_empty() {
            if let Some(last) = self.legs.cost(at, self.end)? {
                let total = cost + last;
                if self.best.as_ref().is_none_or(|best| total < best.cost) {
                    self.best = Some(Tour {
                        cost: total,
                        order: order.clone(),
                    });
                }
            }
            return Ok(());
        }
        for index in 0..remaining.len() {
            let next = remaining.remove(index);
            if let Some(step) = self.legs.cost(at, &next)? {
                order.push(next.clone());
                self.descend(&next, remaining, order, cost + step)?;
                order.pop();
            }
            remaining.insert(index, next);
        }
        Ok(())
    }
}
