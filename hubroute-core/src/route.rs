//! Directed route edges between hubs and the criteria used to weigh them.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A directed, weighted connection between two hubs.
///
/// All three weight attributes are independent, finite and non-negative.
/// Use [`RouteEdge::new`] to enforce that invariant.
///
/// # Examples
/// ```
/// use hubroute_core::RouteEdge;
///
/// # fn main() -> Result<(), hubroute_core::RouteEdgeError> {
/// let edge = RouteEdge::new("DEP_1", "SUC_1", 4.0, 9.0, 1.5)?;
/// assert_eq!(edge.to, "SUC_1");
/// assert!(RouteEdge::new("DEP_1", "SUC_1", -1.0, 9.0, 1.5).is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteEdge {
    /// Source hub.
    pub from: String,
    /// Target hub.
    pub to: String,
    /// Length of the route in kilometres.
    pub distance_km: f64,
    /// Travel time in minutes.
    pub time_min: f64,
    /// Toll charged for the route.
    pub toll: f64,
}

/// Errors returned by [`RouteEdge::new`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RouteEdgeError {
    /// A weight attribute was negative, NaN or infinite.
    #[error("route {from} -> {to} has invalid {attribute}: {value}")]
    InvalidWeight {
        /// Source hub of the rejected edge.
        from: String,
        /// Target hub of the rejected edge.
        to: String,
        /// Name of the offending attribute.
        attribute: &'static str,
        /// Rejected value.
        value: f64,
    },
}

impl RouteEdge {
    /// Validate and construct a [`RouteEdge`].
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        distance_km: f64,
        time_min: f64,
        toll: f64,
    ) -> Result<Self, RouteEdgeError> {
        let edge = Self {
            from: from.into(),
            to: to.into(),
            distance_km,
            time_min,
            toll,
        };
        edge.validate()?;
        Ok(edge)
    }

    /// Construct the zero-weight hop used to attach a client to the branch
    /// that serves it.
    pub fn serving_hop(branch: impl Into<String>, client: impl Into<String>) -> Self {
        Self {
            from: branch.into(),
            to: client.into(),
            distance_km: 0.0,
            time_min: 0.0,
            toll: 0.0,
        }
    }

    /// Check the non-negativity invariant on an existing edge.
    ///
    /// Deserialised edges bypass [`RouteEdge::new`], so stores call this
    /// before accepting them.
    pub fn validate(&self) -> Result<(), RouteEdgeError> {
        for (attribute, value) in [
            ("distance_km", self.distance_km),
            ("time_min", self.time_min),
            ("toll", self.toll),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(RouteEdgeError::InvalidWeight {
                    from: self.from.clone(),
                    to: self.to.clone(),
                    attribute,
                    value,
                });
            }
        }
        Ok(())
    }
}

/// Scalar basis used to compare edges and paths.
///
/// # Examples
/// ```
/// use hubroute_core::{Criterion, RouteEdge};
///
/// let edge = RouteEdge::serving_hop("A", "B");
/// assert_eq!(Criterion::Distance.weight(&edge, 1.0), 0.0);
/// assert_eq!("time".parse::<Criterion>(), Ok(Criterion::Time));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Criterion {
    /// Kilometres travelled.
    #[default]
    Distance,
    /// Minutes travelled.
    Time,
    /// Toll multiplied by a caller-supplied factor.
    Cost,
}

impl Criterion {
    /// Weight of `edge` under this criterion.
    ///
    /// `toll_factor` only affects [`Criterion::Cost`].
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "toll-adjusted cost is a scaled floating-point weight"
    )]
    pub fn weight(self, edge: &RouteEdge, toll_factor: f64) -> f64 {
        match self {
            Self::Distance => edge.distance_km,
            Self::Time => edge.time_min,
            Self::Cost => edge.toll * toll_factor,
        }
    }

    /// Return the criterion as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Distance => "distance",
            Self::Time => "time",
            Self::Cost => "cost",
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown [`Criterion`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown criterion '{0}' (expected distance, time or cost)")]
pub struct ParseCriterionError(pub String);

impl FromStr for Criterion {
    type Err = ParseCriterionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "distance" => Ok(Self::Distance),
            "time" => Ok(Self::Time),
            "cost" | "toll" => Ok(Self::Cost),
            _ => Err(ParseCriterionError(s.to_owned())),
        }
    }
}
