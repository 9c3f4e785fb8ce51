//! JSON interchange format for a whole network and its fleet.

use std::io::Read;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{MemoryNetwork, NetworkError};
use crate::{Node, Package, RouteEdge, Vehicle};

/// Errors raised while loading a [`NetworkSnapshot`].
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The document was not valid snapshot JSON.
    #[error("failed to parse network snapshot: {0}")]
    Parse(#[from] serde_json::Error),
    /// The document parsed but describes an inconsistent network.
    #[error("invalid network snapshot: {0}")]
    Invalid(#[from] NetworkError),
}

/// A `branch -> client` serves link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServesEntry {
    /// Serving branch.
    pub branch: String,
    /// Served client.
    pub client: String,
}

/// A vehicle together with the depot it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepotVehicle {
    /// Owning depot.
    pub depot: String,
    /// Vehicle record.
    #[serde(flatten)]
    pub vehicle: Vehicle,
}

/// A package together with the depot holding it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepotPackage {
    /// Holding depot.
    pub depot: String,
    /// Package record.
    #[serde(flatten)]
    pub package: Package,
}

/// Serialisable description of a network and its fleet.
///
/// # Examples
/// ```
/// use hubroute_core::{GraphStore, NetworkSnapshot};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let json = r#"{
///     "nodes": [
///         {"id": "DEP_1", "kind": "depot", "name": "Central", "district": "Centro"},
///         {"id": "SUC_1", "kind": "branch", "name": "North", "district": "Norte"}
///     ],
///     "routes": [
///         {"from": "DEP_1", "to": "SUC_1", "distance_km": 4.0, "time_min": 9.0, "toll": 1.5}
///     ]
/// }"#;
/// let network = NetworkSnapshot::from_json_str(json)?.into_network()?;
/// assert_eq!(network.all_hubs()?, vec!["DEP_1".to_owned(), "SUC_1".to_owned()]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkSnapshot {
    /// Hubs and clients.
    #[serde(default)]
    pub nodes: Vec<Node>,
    /// Directed routes between hubs.
    #[serde(default)]
    pub routes: Vec<RouteEdge>,
    /// Branch to client serves links.
    #[serde(default)]
    pub serves: Vec<ServesEntry>,
    /// Vehicles by depot.
    #[serde(default)]
    pub vehicles: Vec<DepotVehicle>,
    /// Packages by depot.
    #[serde(default)]
    pub packages: Vec<DepotPackage>,
}

impl NetworkSnapshot {
    /// Parse a snapshot from a JSON reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Parse a snapshot from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validate the snapshot and build a [`MemoryNetwork`] from it.
    ///
    /// Nodes are added first, then routes, serves links, vehicles and
    /// packages, so records may appear in any order within each list.
    pub fn into_network(self) -> Result<MemoryNetwork, SnapshotError> {
        let mut network = MemoryNetwork::new();
        for node in self.nodes {
            network.add_node(node)?;
        }
        for route in self.routes {
            network.add_route(route)?;
        }
        for ServesEntry { branch, client } in &self.serves {
            network.add_serves(branch, client)?;
        }
        for DepotVehicle { depot, vehicle } in self.vehicles {
            network.add_vehicle(&depot, vehicle)?;
        }
        for DepotPackage { depot, package } in self.packages {
            network.add_package(&depot, package)?;
        }
        log::debug!(
            "loaded network snapshot with {} nodes",
            network.nodes().count()
        );
        Ok(network)
    }
}
