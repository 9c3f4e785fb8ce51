//! Load planning against a [`FleetStore`].

use hubroute_core::{FleetStore, Package, PackageState, Vehicle};

use crate::LoadError;
use crate::selection::{select_greedy, select_knapsack, sort_for_loading};

/// Which depot and vehicle to plan for, and where the load is headed.
///
/// Blank vehicle and destination ids are treated as absent.
///
/// # Examples
/// ```
/// use hubroute_load::LoadRequest;
///
/// let request = LoadRequest::new("DEP_1").with_vehicle("  ").with_destination("CLI_1");
/// assert_eq!(request.vehicle, None);
/// assert_eq!(request.destination.as_deref(), Some("CLI_1"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    /// Depot whose pending packages are considered.
    pub depot: String,
    /// Vehicle to load; the depot's first vehicle when absent.
    pub vehicle: Option<String>,
    /// Destination tag applied to loaded packages.
    pub destination: Option<String>,
}

impl LoadRequest {
    /// Plan for `depot` with its first vehicle and no destination.
    #[must_use]
    pub fn new(depot: impl Into<String>) -> Self {
        Self {
            depot: depot.into(),
            vehicle: None,
            destination: None,
        }
    }

    /// Load a specific vehicle.
    #[must_use]
    pub fn with_vehicle(mut self, vehicle: impl Into<String>) -> Self {
        self.vehicle = non_blank(vehicle.into());
        self
    }

    /// Tag loaded packages with `destination`.
    #[must_use]
    pub fn with_destination(mut self, destination: impl Into<String>) -> Self {
        self.destination = non_blank(destination.into());
        self
    }
}

fn non_blank(raw: String) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else if trimmed.len() == raw.len() {
        Some(raw)
    } else {
        Some(trimmed.to_owned())
    }
}

/// Result of a greedy load plan.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GreedyPlan {
    /// Depot planned for.
    pub depot: String,
    /// Vehicle loaded.
    pub vehicle: String,
    /// Destination tag, if any.
    pub destination: Option<String>,
    /// Loaded weight in kilograms.
    pub total_weight_kg: f64,
    /// Loaded volume in cubic metres.
    pub total_volume_m3: f64,
    /// Packages loaded, in loading order, with their updated state.
    pub assigned: Vec<Package>,
    /// Packages left at the depot, in loading order.
    pub unassigned: Vec<Package>,
}

/// Result of a knapsack load plan.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct KnapsackPlan {
    /// Depot planned for.
    pub depot: String,
    /// Vehicle loaded.
    pub vehicle: String,
    /// Destination tag, if any.
    pub destination: Option<String>,
    /// Loaded weight in whole kilograms.
    pub total_weight_kg: u64,
    /// Total priority value loaded.
    pub total_value: u64,
    /// Packages loaded, in pending order.
    pub selected: Vec<Package>,
    /// Packages left at the depot, in pending order.
    pub unselected: Vec<Package>,
}

/// Plans vehicle loads for a depot and records them in the store.
///
/// Selection runs first on a snapshot of the pending packages; the chosen
/// packages are then written back one at a time. A store failure part way
/// through leaves earlier writes in place.
#[derive(Debug, Clone)]
pub struct LoadPlanner<F> {
    store: F,
}

impl<F: FleetStore> LoadPlanner<F> {
    /// Create a planner over `store`.
    #[must_use]
    pub const fn new(store: F) -> Self {
        Self { store }
    }

    /// Load the vehicle greedily by priority then weight, within both its
    /// weight and volume capacity. Loaded packages become
    /// [`PackageState::Assigned`].
    ///
    /// # Errors
    /// [`LoadError::NoVehicles`] or [`LoadError::VehicleNotInDepot`] when no
    /// vehicle can be chosen, [`LoadError::Store`] when the store fails.
    pub fn plan_greedy(&self, request: &LoadRequest) -> Result<GreedyPlan, LoadError> {
        let vehicle = self.choose_vehicle(request)?;
        let pending = self.store.pending_packages(&request.depot)?;
        let mut selection = select_greedy(pending, vehicle.capacity_kg, vehicle.capacity_m3);
        self.commit(&vehicle, &mut selection.admitted, PackageState::Assigned, request)?;
        log::info!(
            "greedy load of {} at {}: {} packages, {} kg, {} m3, {} left",
            vehicle.id,
            request.depot,
            selection.admitted.len(),
            selection.weight_kg,
            selection.volume_m3,
            selection.rejected.len()
        );
        Ok(GreedyPlan {
            depot: request.depot.clone(),
            vehicle: vehicle.id,
            destination: request.destination.clone(),
            total_weight_kg: selection.weight_kg,
            total_volume_m3: selection.volume_m3,
            assigned: selection.admitted,
            unassigned: selection.rejected,
        })
    }

    /// Load the most valuable set of packages that fits the vehicle's
    /// weight capacity. Volume is not checked. Loaded packages become
    /// [`PackageState::AssignedDp`].
    ///
    /// # Errors
    /// [`LoadError::NoVehicles`] or [`LoadError::VehicleNotInDepot`] when no
    /// vehicle can be chosen, [`LoadError::Store`] when the store fails.
    pub fn plan_knapsack(&self, request: &LoadRequest) -> Result<KnapsackPlan, LoadError> {
        let vehicle = self.choose_vehicle(request)?;
        let pending = self.store.pending_packages(&request.depot)?;
        let mut selection = select_knapsack(pending, vehicle.capacity_kg);
        self.commit(&vehicle, &mut selection.selected, PackageState::AssignedDp, request)?;
        log::info!(
            "knapsack load of {} at {}: {} packages, {} kg, value {}",
            vehicle.id,
            request.depot,
            selection.selected.len(),
            selection.weight_kg,
            selection.value
        );
        Ok(KnapsackPlan {
            depot: request.depot.clone(),
            vehicle: vehicle.id,
            destination: request.destination.clone(),
            total_weight_kg: selection.weight_kg,
            total_value: selection.value,
            selected: selection.selected,
            unselected: selection.unselected,
        })
    }

    /// Pending packages of `depot` in loading order: priority first (unset
    /// last), then weight.
    ///
    /// # Errors
    /// [`LoadError::Store`] when the store fails.
    pub fn ordered_packages(&self, depot: &str) -> Result<Vec<Package>, LoadError> {
        let mut packages = self.store.pending_packages(depot)?;
        sort_for_loading(&mut packages);
        Ok(packages)
    }

    fn choose_vehicle(&self, request: &LoadRequest) -> Result<Vehicle, LoadError> {
        let no_vehicles = || LoadError::NoVehicles {
            depot: request.depot.clone(),
        };
        let vehicles = self.store.vehicles_of(&request.depot)?;
        if vehicles.is_empty() {
            return Err(no_vehicles());
        }
        match request.vehicle.as_deref() {
            None => vehicles.into_iter().next().ok_or_else(no_vehicles),
            Some(id) => vehicles
                .into_iter()
                .find(|vehicle| vehicle.id == id)
                .ok_or_else(|| LoadError::VehicleNotInDepot {
                    vehicle: id.to_owned(),
                    depot: request.depot.clone(),
                }),
        }
    }

    fn commit(
        &self,
        vehicle: &Vehicle,
        packages: &mut [Package],
        state: PackageState,
        request: &LoadRequest,
    ) -> Result<(), LoadError> {
        let destination = request.destination.as_deref();
        for package in packages {
            self.store.set_package_state(&package.id, state)?;
            package.state = state;
            if let Some(destination) = destination {
                self.store.set_package_destination(&package.id, destination)?;
                package.destination = Some(destination.to_owned());
            }
            self.store
                .record_transport(&vehicle.id, &package.id, destination)?;
        }
        Ok(())
    }
}
