//! Errors raised by routing operations.

use std::fmt;

use thiserror::Error;

use crate::StoreError;

/// Why a node id was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(rename_all = "snake_case")
)]
pub enum UnknownNodeReason {
    /// No node has this id.
    Missing,
    /// The node exists but the operation requires a hub.
    NotAHub,
    /// The client exists but no branch serves it.
    NotServed,
    /// The hub exists but lies outside the requested zone.
    OutsideZone,
}

impl fmt::Display for UnknownNodeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Missing => "does not exist",
            Self::NotAHub => "is not a hub",
            Self::NotServed => "is not served by any branch",
            Self::OutsideZone => "is outside the zone",
        })
    }
}

/// Errors returned by the search operations.
///
/// "No path" is never an error; these variants describe rejected requests
/// and store faults.
#[derive(Debug, Error)]
pub enum RoutingError {
    /// A node id could not be used for the request.
    #[error("node {id} {reason}")]
    UnknownNode {
        /// Offending node id.
        id: String,
        /// Why the node was rejected.
        reason: UnknownNodeReason,
    },
    /// The waypoint origin is not a hub.
    #[error("origin {id} must be a hub")]
    InvalidOrigin {
        /// Offending origin id.
        id: String,
    },
    /// A mandatory stop is not a hub.
    #[error("mandatory stop {id} does not exist or is not a hub")]
    InvalidStop {
        /// Offending stop id.
        id: String,
    },
    /// The toll factor is negative or not finite.
    #[error("toll factor {factor} must be finite and not negative")]
    InvalidTollFactor {
        /// Rejected factor.
        factor: f64,
    },
    /// The store failed while answering a query.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl RoutingError {
    /// Shorthand for [`RoutingError::UnknownNode`].
    pub fn unknown(id: impl Into<String>, reason: UnknownNodeReason) -> Self {
        Self::UnknownNode {
            id: id.into(),
            reason,
        }
    }

    /// Accept `factor` when it is finite and not negative.
    ///
    /// # Errors
    /// [`RoutingError::InvalidTollFactor`] otherwise.
    pub const fn check_toll_factor(factor: f64) -> Result<f64, Self> {
        if factor.is_finite() && factor >= 0.0 {
            Ok(factor)
        } else {
            Err(Self::InvalidTollFactor { factor })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(UnknownNodeReason::Missing, "node X does not exist")]
    #[case(UnknownNodeReason::NotServed, "node X is not served by any branch")]
    fn unknown_node_message_names_reason(
        #[case] reason: UnknownNodeReason,
        #[case] expected: &str,
    ) {
        assert_eq!(RoutingError::unknown("X", reason).to_string(), expected);
    }

    #[rstest]
    #[case(-1.0)]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    fn rejects_unusable_toll_factors(#[case] factor: f64) {
        assert!(matches!(
            RoutingError::check_toll_factor(factor),
            Err(RoutingError::InvalidTollFactor { .. })
        ));
    }

    #[rstest]
    #[case(0.0)]
    #[case(2.5)]
    fn accepts_usable_toll_factors(#[case] factor: f64) {
        let accepted = RoutingError::check_toll_factor(factor).expect("usable factor");
        assert!(accepted.total_cmp(&factor).is_eq());
    }

    #[rstest]
    fn store_errors_convert() {
        let err: RoutingError = StoreError::Unavailable.into();
        assert!(matches!(err, RoutingError::Store(StoreError::Unavailable)));
    }
}
