//! Multi-waypoint routing request, response and solver trait.

use crate::RoutingError;

/// Parameters for a multi-waypoint route.
///
/// Stops are normalised on construction: blank ids are dropped, the rest
/// trimmed, and repeated ids collapsed to their first occurrence.
///
/// # Examples
/// ```
/// use hubroute_core::WaypointRequest;
///
/// let request = WaypointRequest::new("DEP_1", "CLI_1", [" SUC_2", "", "SUC_1", "SUC_2"]);
/// assert_eq!(request.stops, vec!["SUC_2".to_owned(), "SUC_1".to_owned()]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaypointRequest {
    /// Hub the route starts from.
    pub origin: String,
    /// Final hub or client.
    pub destination: String,
    /// Hubs that must be visited, in any order.
    pub stops: Vec<String>,
}

impl WaypointRequest {
    /// Build a request, normalising the stop list.
    pub fn new<I, S>(origin: impl Into<String>, destination: impl Into<String>, stops: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalised: Vec<String> = Vec::new();
        for stop in stops {
            let id = stop.as_ref().trim();
            if id.is_empty() || normalised.iter().any(|seen| seen == id) {
                continue;
            }
            normalised.push(id.to_owned());
        }
        Self {
            origin: origin.into(),
            destination: destination.into(),
            stops: normalised,
        }
    }
}

/// Cheapest route found for a [`WaypointRequest`].
///
/// `path` concatenates the distance-criterion legs between consecutive
/// waypoints. A client destination adds a final serving hop at no cost.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct WaypointRoute {
    /// Starting hub.
    pub origin: String,
    /// Final hub or client.
    pub destination: String,
    /// Mandatory stops as requested.
    pub stops: Vec<String>,
    /// Mandatory stops in visiting order.
    pub stop_order: Vec<String>,
    /// Node ids from origin to destination.
    ///
    /// This is the concatenation of the shortest legs between consecutive
    /// stops, so a hub may appear more than once when a stop can only be
    /// left the way it was entered.
    pub path: Vec<String>,
    /// Display names aligned with `path`.
    pub names: Vec<String>,
    /// Total distance in kilometres.
    pub cost: f64,
}

/// Find the cheapest route visiting every mandatory stop.
///
/// `Ok(None)` means the request was valid but no ordering reaches the
/// destination. Invalid ids yield [`RoutingError`]. Solvers must be
/// `Send + Sync`.
pub trait WaypointSolver: Send + Sync {
    /// Solve a request.
    fn solve(&self, request: &WaypointRequest) -> Result<Option<WaypointRoute>, RoutingError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    struct StraightLine;

    impl WaypointSolver for StraightLine {
        fn solve(
            &self,
            request: &WaypointRequest,
        ) -> Result<Option<WaypointRoute>, RoutingError> {
            if request.origin.is_empty() {
                return Err(RoutingError::InvalidOrigin {
                    id: request.origin.clone(),
                });
            }
            let mut path = vec![request.origin.clone()];
            path.extend(request.stops.iter().cloned());
            path.push(request.destination.clone());
            Ok(Some(WaypointRoute {
                origin: request.origin.clone(),
                destination: request.destination.clone(),
                stops: request.stops.clone(),
                stop_order: request.stops.clone(),
                names: path.clone(),
                path,
                cost: 0.0,
            }))
        }
    }

    #[rstest]
    fn normalises_stops() {
        let request = WaypointRequest::new("A", "D", ["  ", "C ", "B", "C"]);
        assert_eq!(request.stops, vec!["C".to_owned(), "B".to_owned()]);
    }

    #[rstest]
    fn solver_trait_is_object_safe() {
        let solver: Box<dyn WaypointSolver> = Box::new(StraightLine);
        let request = WaypointRequest::new("A", "D", ["B"]);
        let route = solver
            .solve(&request)
            .expect("valid request")
            .expect("route found");
        assert_eq!(route.path, vec!["A", "B", "D"]);
    }

    #[rstest]
    fn solver_reports_invalid_origin() {
        let request = WaypointRequest::new("", "D", Vec::<String>::new());
        let err = StraightLine.solve(&request).expect_err("empty origin");
        assert!(matches!(err, RoutingError::InvalidOrigin { .. }));
    }
}
