//! Packages awaiting transport and the vehicles that carry them.

use std::fmt;

use thiserror::Error;

/// Delivery priority of a package, from `High` (1) to `Low` (3).
///
/// # Examples
/// ```
/// use hubroute_core::Priority;
///
/// assert_eq!(Priority::try_from(1_u8), Ok(Priority::High));
/// assert_eq!(u8::from(Priority::Low), 3);
/// assert!(Priority::try_from(4_u8).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "u8", into = "u8")
)]
pub enum Priority {
    /// Priority 1.
    High = 1,
    /// Priority 2.
    Medium = 2,
    /// Priority 3.
    Low = 3,
}

/// Error returned when a numeric priority falls outside `1..=3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("priority must be between 1 and 3, got {0}")]
pub struct PriorityError(pub u8);

impl TryFrom<u8> for Priority {
    type Error = PriorityError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::High),
            2 => Ok(Self::Medium),
            3 => Ok(Self::Low),
            other => Err(PriorityError(other)),
        }
    }
}

impl From<Priority> for u8 {
    fn from(priority: Priority) -> Self {
        priority as Self
    }
}

/// Lifecycle state of a package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum PackageState {
    /// Waiting at its depot.
    #[default]
    Pending,
    /// Loaded by the greedy planner.
    Assigned,
    /// Loaded by the knapsack planner.
    AssignedDp,
    /// Handed over to the client.
    Delivered,
}

impl PackageState {
    /// Return the state as a `snake_case` `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Assigned => "assigned",
            Self::AssignedDp => "assigned_dp",
            Self::Delivered => "delivered",
        }
    }
}

impl fmt::Display for PackageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A package owned by a depot.
///
/// # Examples
/// ```
/// use hubroute_core::{Package, PackageState, Priority};
///
/// let pkg = Package::new("PKG_1", 4.0, 0.2).with_priority(Priority::High);
/// assert_eq!(pkg.state, PackageState::Pending);
/// assert_eq!(pkg.priority, Some(Priority::High));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Package {
    /// Unique identifier.
    pub id: String,
    /// Weight in kilograms.
    pub weight_kg: f64,
    /// Volume in cubic metres.
    pub volume_m3: f64,
    /// Delivery priority, if one was assigned.
    #[cfg_attr(feature = "serde", serde(default))]
    pub priority: Option<Priority>,
    /// Current lifecycle state.
    #[cfg_attr(feature = "serde", serde(default))]
    pub state: PackageState,
    /// Destination tag set when the package is loaded.
    #[cfg_attr(feature = "serde", serde(default))]
    pub destination: Option<String>,
}

impl Package {
    /// Construct a pending package without priority or destination.
    pub fn new(id: impl Into<String>, weight_kg: f64, volume_m3: f64) -> Self {
        Self {
            id: id.into(),
            weight_kg,
            volume_m3,
            priority: None,
            state: PackageState::Pending,
            destination: None,
        }
    }

    /// Set the delivery priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }
}

/// A vehicle stationed at a depot.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vehicle {
    /// Unique identifier.
    pub id: String,
    /// Licence plate, when registered.
    #[cfg_attr(feature = "serde", serde(default))]
    pub plate: Option<String>,
    /// Weight capacity in kilograms.
    pub capacity_kg: f64,
    /// Volume capacity in cubic metres.
    pub capacity_m3: f64,
    /// Running cost per kilometre.
    #[cfg_attr(feature = "serde", serde(default))]
    pub cost_per_km: f64,
    /// Free-form vehicle class, e.g. `"van"`.
    #[cfg_attr(feature = "serde", serde(rename = "type", default))]
    pub vehicle_type: String,
}

impl Vehicle {
    /// Construct a vehicle with the given capacities.
    pub fn new(id: impl Into<String>, capacity_kg: f64, capacity_m3: f64) -> Self {
        Self {
            id: id.into(),
            plate: None,
            capacity_kg,
            capacity_m3,
            cost_per_km: 0.0,
            vehicle_type: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0)]
    #[case(4)]
    #[case(u8::MAX)]
    fn rejects_out_of_range_priority(#[case] raw: u8) {
        assert_eq!(Priority::try_from(raw), Err(PriorityError(raw)));
    }

    #[rstest]
    fn priorities_order_from_high_to_low() {
        assert!(Priority::High < Priority::Medium);
        assert!(Priority::Medium < Priority::Low);
    }

    #[rstest]
    #[case(PackageState::Pending, "pending")]
    #[case(PackageState::AssignedDp, "assigned_dp")]
    fn state_names_are_snake_case(#[case] state: PackageState, #[case] expected: &str) {
        assert_eq!(state.to_string(), expected);
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn priority_serialises_as_integer() {
        let pkg = Package::new("P", 1.0, 1.0).with_priority(Priority::Medium);
        let json = serde_json::to_value(&pkg).expect("serialise package");
        assert_eq!(json["priority"], 2);
        assert_eq!(json["state"], "pending");
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn vehicle_type_uses_short_key() {
        let json = r#"{"id":"V","capacity_kg":10.0,"capacity_m3":1.0,"type":"van"}"#;
        let vehicle: Vehicle = serde_json::from_str(json).expect("parse vehicle");
        assert_eq!(vehicle.vehicle_type, "van");
        assert!(vehicle.plate.is_none());
    }
}
