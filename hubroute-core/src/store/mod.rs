//! Store boundaries consumed by the algorithms.
//!
//! [`GraphStore`] answers read-only topology queries. [`FleetStore`] lists a
//! depot's packages and vehicles and accepts the state transitions requested
//! by the load planner. Both are synchronous; timeout and retry policy belong
//! to the implementation.

use std::error::Error as StdError;

use thiserror::Error;

use crate::{Package, PackageState, RouteEdge, Vehicle};

mod memory;
#[cfg(feature = "serde")]
mod snapshot;

pub use memory::{MemoryNetwork, NetworkError};
#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
pub use snapshot::{DepotPackage, DepotVehicle, NetworkSnapshot, ServesEntry, SnapshotError};

/// Faults raised by a store implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing service could not be reached.
    #[error("store is unavailable")]
    Unavailable,
    /// A state transition referenced a package the store does not hold.
    #[error("package {id} is not known to the store")]
    UnknownPackage {
        /// Requested package id.
        id: String,
    },
    /// A lock guarding store state was poisoned by a panicking writer.
    #[error("store state lock was poisoned")]
    Poisoned,
    /// Any other backend failure.
    #[error("store backend failed: {0}")]
    Backend(#[source] Box<dyn StdError + Send + Sync>),
}

/// Result alias for store queries.
pub type StoreResult<T> = Result<T, StoreError>;

/// A transport link recorded when a package is loaded onto a vehicle.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransportRecord {
    /// Vehicle carrying the package.
    pub vehicle: String,
    /// Package loaded.
    pub package: String,
    /// Destination tag, if one was given.
    pub destination: Option<String>,
}

/// Read-only access to the network topology.
///
/// Route edges are directed. [`GraphStore::neighbours`] exposes their
/// symmetric closure for unweighted traversal, while
/// [`GraphStore::outgoing_routes`] exposes the directed relation for
/// weighted search.
///
/// # Examples
/// ```
/// use hubroute_core::{GraphStore, MemoryNetwork, Node, RouteEdge};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut network = MemoryNetwork::new();
/// network.add_node(Node::depot("A", "Alpha", "North"))?;
/// network.add_node(Node::branch("B", "Bravo", "South"))?;
/// network.add_route(RouteEdge::new("A", "B", 1.0, 1.0, 0.0)?)?;
///
/// assert_eq!(network.neighbours("B", false)?, vec!["A".to_owned()]);
/// assert!(network.outgoing_routes("B")?.is_empty());
/// # Ok(())
/// # }
/// ```
pub trait GraphStore: Send + Sync {
    /// Return `true` when `id` names a depot or branch.
    fn hub_exists(&self, id: &str) -> StoreResult<bool>;

    /// Return `true` when `id` names a client.
    fn client_exists(&self, id: &str) -> StoreResult<bool>;

    /// Return `true` when `id` names a hub, or a client if `include_clients`.
    fn node_exists(&self, id: &str, include_clients: bool) -> StoreResult<bool> {
        if self.hub_exists(id)? {
            return Ok(true);
        }
        if include_clients {
            return self.client_exists(id);
        }
        Ok(false)
    }

    /// Unweighted neighbours of `id`, ascending by id.
    ///
    /// Hubs connected by a route in either direction are neighbours. When
    /// `include_clients` is set, a branch also lists the clients it serves.
    /// Clients have no neighbours.
    fn neighbours(&self, id: &str, include_clients: bool) -> StoreResult<Vec<String>>;

    /// Route edges leaving hub `id`.
    fn outgoing_routes(&self, id: &str) -> StoreResult<Vec<RouteEdge>>;

    /// Display name of `id`, if the node exists and has one.
    fn name_of(&self, id: &str) -> StoreResult<Option<String>>;

    /// Display names aligned with `ids`, falling back to the id itself.
    fn names_of(&self, ids: &[String]) -> StoreResult<Vec<String>> {
        ids.iter()
            .map(|id| Ok(self.name_of(id)?.unwrap_or_else(|| id.clone())))
            .collect()
    }

    /// Branches serving `client`, ascending by id.
    fn serving_branches(&self, client: &str) -> StoreResult<Vec<String>>;

    /// Every hub id, ascending.
    fn all_hubs(&self) -> StoreResult<Vec<String>>;
}

/// Access to a depot's packages and vehicles.
pub trait FleetStore: Send + Sync {
    /// Packages at `depot` still in [`PackageState::Pending`].
    fn pending_packages(&self, depot: &str) -> StoreResult<Vec<Package>>;

    /// Vehicles stationed at `depot`, in store order.
    fn vehicles_of(&self, depot: &str) -> StoreResult<Vec<Vehicle>>;

    /// Move `package` to `state`.
    fn set_package_state(&self, package: &str, state: PackageState) -> StoreResult<()>;

    /// Tag `package` with a destination.
    fn set_package_destination(&self, package: &str, destination: &str) -> StoreResult<()>;

    /// Link `package` to the `vehicle` carrying it.
    fn record_transport(
        &self,
        vehicle: &str,
        package: &str,
        destination: Option<&str>,
    ) -> StoreResult<()>;
}

impl<T: GraphStore + ?Sized> GraphStore for &T {
    fn hub_exists(&self, id: &str) -> StoreResult<bool> {
        (**self).hub_exists(id)
    }

    fn client_exists(&self, id: &str) -> StoreResult<bool> {
        (**self).client_exists(id)
    }

    fn node_exists(&self, id: &str, include_clients: bool) -> StoreResult<bool> {
        (**self).node_exists(id, include_clients)
    }

    fn neighbours(&self, id: &str, include_clients: bool) -> StoreResult<Vec<String>> {
        (**self).neighbours(id, include_clients)
    }

    fn outgoing_routes(&self, id: &str) -> StoreResult<Vec<RouteEdge>> {
        (**self).outgoing_routes(id)
    }

    fn name_of(&self, id: &str) -> StoreResult<Option<String>> {
        (**self).name_of(id)
    }

    fn names_of(&self, ids: &[String]) -> StoreResult<Vec<String>> {
        (**self).names_of(ids)
    }

    fn serving_branches(&self, client: &str) -> StoreResult<Vec<String>> {
        (**self).serving_branches(client)
    }

    fn all_hubs(&self) -> StoreResult<Vec<String>> {
        (**self).all_hubs()
    }
}

impl<T: FleetStore + ?Sized> FleetStore for &T {
    fn pending_packages(&self, depot: &str) -> StoreResult<Vec<Package>> {
        (**self).pending_packages(depot)
    }

    fn vehicles_of(&self, depot: &str) -> StoreResult<Vec<Vehicle>> {
        (**self).vehicles_of(depot)
    }

    fn set_package_state(&self, package: &str, state: PackageState) -> StoreResult<()> {
        (**self).set_package_state(package, state)
    }

    fn set_package_destination(&self, package: &str, destination: &str) -> StoreResult<()> {
        (**self).set_package_destination(package, destination)
    }

    fn record_transport(
        &self,
        vehicle: &str,
        package: &str,
        destination: Option<&str>,
    ) -> StoreResult<()> {
        (**self).record_transport(vehicle, package, destination)
    }
}
