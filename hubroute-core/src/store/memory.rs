//! In-memory implementation of both store traits.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use thiserror::Error;

use super::{FleetStore, GraphStore, StoreError, StoreResult, TransportRecord};
use crate::{Node, NodeKind, Package, PackageState, RouteEdge, RouteEdgeError, Vehicle};

/// Structural problems detected while assembling a [`MemoryNetwork`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NetworkError {
    /// Two nodes share an id.
    #[error("node id {id} is used more than once")]
    DuplicateNode {
        /// Repeated id.
        id: String,
    },
    /// A record referenced an id with no node.
    #[error("node {id} is not defined")]
    UndefinedNode {
        /// Missing id.
        id: String,
    },
    /// A route endpoint is not a hub.
    #[error("route endpoint {id} is not a hub")]
    RouteEndpoint {
        /// Offending endpoint.
        id: String,
    },
    /// A serves link does not run from a branch to a client.
    #[error("serves link {branch} -> {client} must run from a branch to a client")]
    InvalidServes {
        /// Serving side of the link.
        branch: String,
        /// Served side of the link.
        client: String,
    },
    /// Vehicles and packages may only be attached to depots.
    #[error("{id} is not a depot")]
    NotADepot {
        /// Offending id.
        id: String,
    },
    /// Two packages share an id.
    #[error("package id {id} is used more than once")]
    DuplicatePackage {
        /// Repeated id.
        id: String,
    },
    /// A route carried invalid weights.
    #[error(transparent)]
    Route(#[from] RouteEdgeError),
}

#[derive(Debug, Default)]
struct DepotFleet {
    packages: Vec<Package>,
    vehicles: Vec<Vehicle>,
}

#[derive(Debug, Default)]
struct FleetState {
    depots: BTreeMap<String, DepotFleet>,
    transports: Vec<TransportRecord>,
}

impl FleetState {
    fn package_mut(&mut self, id: &str) -> StoreResult<&mut Package> {
        self.depots
            .values_mut()
            .flat_map(|fleet| fleet.packages.iter_mut())
            .find(|pkg| pkg.id == id)
            .ok_or_else(|| StoreError::UnknownPackage { id: id.to_owned() })
    }
}

/// Network and fleet held entirely in memory.
///
/// Nodes, routes and serves links are immutable once added. Fleet state sits
/// behind a lock so that [`FleetStore`] mutations work through `&self`.
///
/// # Examples
/// ```
/// use hubroute_core::{FleetStore, MemoryNetwork, Node, Package, Vehicle};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut network = MemoryNetwork::new();
/// network.add_node(Node::depot("DEP_1", "Central", "Centro"))?;
/// network.add_vehicle("DEP_1", Vehicle::new("VEH_1", 10.0, 1.0))?;
/// network.add_package("DEP_1", Package::new("PKG_1", 4.0, 0.2))?;
///
/// assert_eq!(network.pending_packages("DEP_1")?.len(), 1);
/// assert_eq!(network.vehicles_of("DEP_1")?[0].id, "VEH_1");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct MemoryNetwork {
    nodes: BTreeMap<String, Node>,
    routes: BTreeMap<String, Vec<RouteEdge>>,
    adjacency: BTreeMap<String, BTreeSet<String>>,
    serves: BTreeMap<String, BTreeSet<String>>,
    served_by: BTreeMap<String, BTreeSet<String>>,
    fleet: RwLock<FleetState>,
}

impl MemoryNetwork {
    /// Create an empty network.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node.
    pub fn add_node(&mut self, node: Node) -> Result<(), NetworkError> {
        if self.nodes.contains_key(&node.id) {
            return Err(NetworkError::DuplicateNode { id: node.id });
        }
        self.nodes.insert(node.id.clone(), node);
        Ok(())
    }

    /// Add a directed route between two existing hubs.
    pub fn add_route(&mut self, edge: RouteEdge) -> Result<(), NetworkError> {
        edge.validate()?;
        for id in [&edge.from, &edge.to] {
            match self.nodes.get(id) {
                None => return Err(NetworkError::UndefinedNode { id: id.clone() }),
                Some(node) if !node.is_hub() => {
                    return Err(NetworkError::RouteEndpoint { id: id.clone() });
                }
                Some(_) => {}
            }
        }
        self.adjacency
            .entry(edge.from.clone())
            .or_default()
            .insert(edge.to.clone());
        self.adjacency
            .entry(edge.to.clone())
            .or_default()
            .insert(edge.from.clone());
        self.routes.entry(edge.from.clone()).or_default().push(edge);
        Ok(())
    }

    /// Record that `branch` serves `client`.
    pub fn add_serves(&mut self, branch: &str, client: &str) -> Result<(), NetworkError> {
        let kinds = (self.kind_of(branch)?, self.kind_of(client)?);
        if kinds != (NodeKind::Branch, NodeKind::Client) {
            return Err(NetworkError::InvalidServes {
                branch: branch.to_owned(),
                client: client.to_owned(),
            });
        }
        self.serves
            .entry(branch.to_owned())
            .or_default()
            .insert(client.to_owned());
        self.served_by
            .entry(client.to_owned())
            .or_default()
            .insert(branch.to_owned());
        Ok(())
    }

    /// Station a vehicle at `depot`.
    pub fn add_vehicle(&mut self, depot: &str, vehicle: Vehicle) -> Result<(), NetworkError> {
        self.require_depot(depot)?;
        self.fleet_mut()
            .depots
            .entry(depot.to_owned())
            .or_default()
            .vehicles
            .push(vehicle);
        Ok(())
    }

    /// Place a package at `depot`.
    pub fn add_package(&mut self, depot: &str, package: Package) -> Result<(), NetworkError> {
        self.require_depot(depot)?;
        let fleet = self.fleet_mut();
        let duplicate = fleet
            .depots
            .values()
            .flat_map(|d| d.packages.iter())
            .any(|pkg| pkg.id == package.id);
        if duplicate {
            return Err(NetworkError::DuplicatePackage { id: package.id });
        }
        fleet
            .depots
            .entry(depot.to_owned())
            .or_default()
            .packages
            .push(package);
        Ok(())
    }

    /// Look up a node by id.
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Iterate over all nodes in id order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Current record for package `id`.
    pub fn package(&self, id: &str) -> StoreResult<Option<Package>> {
        let fleet = self.fleet_read()?;
        Ok(fleet
            .depots
            .values()
            .flat_map(|d| d.packages.iter())
            .find(|pkg| pkg.id == id)
            .cloned())
    }

    /// Transport links recorded so far, oldest first.
    pub fn transports(&self) -> StoreResult<Vec<TransportRecord>> {
        Ok(self.fleet_read()?.transports.clone())
    }

    fn kind_of(&self, id: &str) -> Result<NodeKind, NetworkError> {
        self.nodes
            .get(id)
            .map(|node| node.kind)
            .ok_or_else(|| NetworkError::UndefinedNode { id: id.to_owned() })
    }

    fn require_depot(&self, id: &str) -> Result<(), NetworkError> {
        if self.kind_of(id)? == NodeKind::Depot {
            Ok(())
        } else {
            Err(NetworkError::NotADepot { id: id.to_owned() })
        }
    }

    fn fleet_mut(&mut self) -> &mut FleetState {
        self.fleet.get_mut().unwrap_or_else(PoisonError::into_inner)
    }

    fn fleet_read(&self) -> StoreResult<RwLockReadGuard<'_, FleetState>> {
        self.fleet.read().map_err(|_| StoreError::Poisoned)
    }

    fn fleet_write(&self) -> StoreResult<RwLockWriteGuard<'_, FleetState>> {
        self.fleet.write().map_err(|_| StoreError::Poisoned)
    }

    fn is_kind(&self, id: &str, predicate: impl Fn(NodeKind) -> bool) -> bool {
        self.nodes.get(id).is_some_and(|node| predicate(node.kind))
    }
}

impl GraphStore for MemoryNetwork {
    fn hub_exists(&self, id: &str) -> StoreResult<bool> {
        Ok(self.is_kind(id, NodeKind::is_hub))
    }

    fn client_exists(&self, id: &str) -> StoreResult<bool> {
        Ok(self.is_kind(id, |kind| kind == NodeKind::Client))
    }

    fn neighbours(&self, id: &str, include_clients: bool) -> StoreResult<Vec<String>> {
        if !self.is_kind(id, NodeKind::is_hub) {
            return Ok(Vec::new());
        }
        let mut out: BTreeSet<&String> = self.adjacency.get(id).into_iter().flatten().collect();
        if include_clients {
            out.extend(self.serves.get(id).into_iter().flatten());
        }
        Ok(out.into_iter().cloned().collect())
    }

    fn outgoing_routes(&self, id: &str) -> StoreResult<Vec<RouteEdge>> {
        Ok(self.routes.get(id).cloned().unwrap_or_default())
    }

    fn name_of(&self, id: &str) -> StoreResult<Option<String>> {
        Ok(self.nodes.get(id).map(|node| node.name.clone()))
    }

    fn serving_branches(&self, client: &str) -> StoreResult<Vec<String>> {
        Ok(self
            .served_by
            .get(client)
            .map(|branches| branches.iter().cloned().collect())
            .unwrap_or_default())
    }

    fn all_hubs(&self) -> StoreResult<Vec<String>> {
        Ok(self
            .nodes
            .values()
            .filter(|node| node.is_hub())
            .map(|node| node.id.clone())
            .collect())
    }
}

impl FleetStore for MemoryNetwork {
    fn pending_packages(&self, depot: &str) -> StoreResult<Vec<Package>> {
        let fleet = self.fleet_read()?;
        Ok(fleet
            .depots
            .get(depot)
            .map(|d| {
                d.packages
                    .iter()
                    .filter(|pkg| pkg.state == PackageState::Pending)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    fn vehicles_of(&self, depot: &str) -> StoreResult<Vec<Vehicle>> {
        let fleet = self.fleet_read()?;
        Ok(fleet
            .depots
            .get(depot)
            .map(|d| d.vehicles.clone())
            .unwrap_or_default())
    }

    fn set_package_state(&self, package: &str, state: PackageState) -> StoreResult<()> {
        self.fleet_write()?.package_mut(package)?.state = state;
        Ok(())
    }

    fn set_package_destination(&self, package: &str, destination: &str) -> StoreResult<()> {
        self.fleet_write()?.package_mut(package)?.destination = Some(destination.to_owned());
        Ok(())
    }

    fn record_transport(
        &self,
        vehicle: &str,
        package: &str,
        destination: Option<&str>,
    ) -> StoreResult<()> {
        let mut fleet = self.fleet_write()?;
        fleet.package_mut(package)?;
        fleet.transports.push(TransportRecord {
            vehicle: vehicle.to_owned(),
            package: package.to_owned(),
            destination: destination.map(str::to_owned),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn network() -> MemoryNetwork {
        let mut network = MemoryNetwork::new();
        for node in [
            Node::depot("DEP_1", "Central", "Centro"),
            Node::branch("SUC_1", "North", "Norte"),
            Node::branch("SUC_2", "South", "Sur"),
            Node::client("CLI_1", "Shop"),
        ] {
            network.add_node(node).expect("unique node");
        }
        network
            .add_route(RouteEdge::new("DEP_1", "SUC_1", 1.0, 1.0, 0.0).expect("edge"))
            .expect("hub route");
        network
            .add_route(RouteEdge::new("SUC_2", "DEP_1", 1.0, 1.0, 0.0).expect("edge"))
            .expect("hub route");
        network.add_serves("SUC_1", "CLI_1").expect("branch serves client");
        network
            .add_vehicle("DEP_1", Vehicle::new("VEH_1", 10.0, 1.0))
            .expect("depot vehicle");
        network
            .add_package("DEP_1", Package::new("PKG_1", 4.0, 0.1))
            .expect("depot package");
        network
    }

    #[rstest]
    fn neighbours_are_symmetric_and_sorted(network: MemoryNetwork) {
        assert_eq!(
            network.neighbours("DEP_1", false).expect("query"),
            vec!["SUC_1".to_owned(), "SUC_2".to_owned()]
        );
        assert_eq!(
            network.neighbours("SUC_2", false).expect("query"),
            vec!["DEP_1".to_owned()]
        );
    }

    #[rstest]
    fn clients_join_branch_neighbours_on_request(network: MemoryNetwork) {
        assert_eq!(
            network.neighbours("SUC_1", true).expect("query"),
            vec!["CLI_1".to_owned(), "DEP_1".to_owned()]
        );
        assert!(network.neighbours("CLI_1", true).expect("query").is_empty());
    }

    #[rstest]
    fn outgoing_routes_follow_direction(network: MemoryNetwork) {
        let out = network.outgoing_routes("DEP_1").expect("query");
        assert_eq!(out.len(), 1);
        assert_eq!(out.first().map(|e| e.to.as_str()), Some("SUC_1"));
        assert!(network.outgoing_routes("SUC_1").expect("query").is_empty());
    }

    #[rstest]
    fn names_fall_back_to_ids(network: MemoryNetwork) {
        let names = network
            .names_of(&["DEP_1".to_owned(), "GHOST".to_owned()])
            .expect("query");
        assert_eq!(names, vec!["Central".to_owned(), "GHOST".to_owned()]);
    }

    #[rstest]
    fn node_existence_respects_client_flag(network: MemoryNetwork) {
        assert!(network.node_exists("SUC_2", false).expect("query"));
        assert!(!network.node_exists("CLI_1", false).expect("query"));
        assert!(network.node_exists("CLI_1", true).expect("query"));
    }

    #[rstest]
    fn rejects_duplicate_nodes(mut network: MemoryNetwork) {
        let err = network
            .add_node(Node::branch("SUC_1", "Again", "Norte"))
            .expect_err("duplicate");
        assert_eq!(err, NetworkError::DuplicateNode { id: "SUC_1".into() });
    }

    #[rstest]
    fn rejects_routes_touching_clients(mut network: MemoryNetwork) {
        let edge = RouteEdge::new("SUC_1", "CLI_1", 1.0, 1.0, 1.0).expect("edge");
        let err = network.add_route(edge).expect_err("client endpoint");
        assert_eq!(err, NetworkError::RouteEndpoint { id: "CLI_1".into() });
    }

    #[rstest]
    fn rejects_serves_from_depot(mut network: MemoryNetwork) {
        assert!(matches!(
            network.add_serves("DEP_1", "CLI_1"),
            Err(NetworkError::InvalidServes { .. })
        ));
    }

    #[rstest]
    fn fleet_only_attaches_to_depots(mut network: MemoryNetwork) {
        let err = network
            .add_vehicle("SUC_1", Vehicle::new("VEH_2", 1.0, 1.0))
            .expect_err("branch");
        assert_eq!(err, NetworkError::NotADepot { id: "SUC_1".into() });
    }

    #[rstest]
    fn state_changes_hide_package_from_pending(network: MemoryNetwork) {
        network
            .set_package_state("PKG_1", PackageState::Assigned)
            .expect("known package");
        network
            .set_package_destination("PKG_1", "CLI_1")
            .expect("known package");
        assert!(network.pending_packages("DEP_1").expect("query").is_empty());
        let pkg = network.package("PKG_1").expect("query").expect("present");
        assert_eq!(pkg.state, PackageState::Assigned);
        assert_eq!(pkg.destination.as_deref(), Some("CLI_1"));
    }

    #[rstest]
    fn records_transports(network: MemoryNetwork) {
        network
            .record_transport("VEH_1", "PKG_1", None)
            .expect("known package");
        assert_eq!(
            network.transports().expect("query"),
            vec![TransportRecord {
                vehicle: "VEH_1".into(),
                package: "PKG_1".into(),
                destination: None,
            }]
        );
    }

    #[rstest]
    fn unknown_packages_are_reported(network: MemoryNetwork) {
        let err = network
            .set_package_state("PKG_9", PackageState::Delivered)
            .expect_err("unknown");
        assert!(matches!(err, StoreError::UnknownPackage { id } if id == "PKG_9"));
    }
}
