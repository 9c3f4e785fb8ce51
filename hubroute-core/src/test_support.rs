//! Network fixtures shared by unit, behaviour and property tests.
//!
//! The sample network has three branches around a central depot, an
//! isolated second depot, and three clients, one of which no branch serves:
//!
//! ```text
//! DEP_1 -> SUC_1   4 km  10 min  toll 2
//! SUC_1 -> SUC_2   3 km   5 min  toll 0
//! DEP_1 -> SUC_2  10 km   8 min  toll 1
//! SUC_2 -> SUC_3   2 km   4 min  toll 3
//! SUC_1 -> SUC_3   8 km   6 min  toll 0
//! SUC_3 -> DEP_1   7 km   9 min  toll 1
//!
//! SUC_2 serves CLI_1, SUC_3 serves CLI_1, SUC_1 serves CLI_2
//! ```

use crate::{MemoryNetwork, Node, Package, Priority, RouteEdge, Vehicle};

const SAMPLE_ROUTES: [(&str, &str, f64, f64, f64); 6] = [
    ("DEP_1", "SUC_1", 4.0, 10.0, 2.0),
    ("SUC_1", "SUC_2", 3.0, 5.0, 0.0),
    ("DEP_1", "SUC_2", 10.0, 8.0, 1.0),
    ("SUC_2", "SUC_3", 2.0, 4.0, 3.0),
    ("SUC_1", "SUC_3", 8.0, 6.0, 0.0),
    ("SUC_3", "DEP_1", 7.0, 9.0, 1.0),
];

/// Build the sample network described in the module docs.
///
/// `DEP_1` owns two vehicles (`VEH_1`: 10 kg / 1 m³, `VEH_2`: 500 kg /
/// 8 m³) and three pending packages: `PKG_1` (4 kg, priority 1), `PKG_2`
/// (7 kg, priority 1) and `PKG_3` (3 kg, priority 2). `DEP_2` owns no
/// vehicles.
///
/// # Panics
/// Panics only if the static fixture data were inconsistent.
#[must_use]
#[expect(clippy::expect_used, reason = "fixture data is static and consistent")]
pub fn sample_network() -> MemoryNetwork {
    let mut network = MemoryNetwork::new();
    for node in [
        Node::depot("DEP_1", "Central Depot", "Centro"),
        Node::depot("DEP_2", "South Depot", "Sur"),
        Node::branch("SUC_1", "North Branch", "Norte"),
        Node::branch("SUC_2", "West Branch", "Oeste"),
        Node::branch("SUC_3", "East Branch", "Este"),
        Node::client("CLI_1", "Acme Foods"),
        Node::client("CLI_2", "Bolt Hardware"),
        Node::client("CLI_3", "Corner Cafe"),
    ] {
        network.add_node(node).expect("unique sample node");
    }
    for (from, to, distance, time, toll) in SAMPLE_ROUTES {
        let edge = RouteEdge::new(from, to, distance, time, toll).expect("valid sample route");
        network.add_route(edge).expect("sample route joins hubs");
    }
    for (branch, client) in [("SUC_2", "CLI_1"), ("SUC_3", "CLI_1"), ("SUC_1", "CLI_2")] {
        network
            .add_serves(branch, client)
            .expect("sample branch serves client");
    }
    let mut van = Vehicle::new("VEH_1", 10.0, 1.0);
    van.plate = Some("AB 123 CD".to_owned());
    van.cost_per_km = 1.5;
    van.vehicle_type = "van".to_owned();
    let mut truck = Vehicle::new("VEH_2", 500.0, 8.0);
    truck.cost_per_km = 2.5;
    truck.vehicle_type = "truck".to_owned();
    for vehicle in [van, truck] {
        network
            .add_vehicle("DEP_1", vehicle)
            .expect("sample vehicle at depot");
    }
    for package in [
        Package::new("PKG_1", 4.0, 0.2).with_priority(Priority::High),
        Package::new("PKG_2", 7.0, 0.3).with_priority(Priority::High),
        Package::new("PKG_3", 3.0, 0.1).with_priority(Priority::Medium),
    ] {
        network
            .add_package("DEP_1", package)
            .expect("sample package at depot");
    }
    network
}

/// Build a hub-only network whose routes run both ways with the same
/// weight for distance, time and toll.
///
/// Every endpoint becomes a branch named after its id.
///
/// # Panics
/// Panics if a weight is negative or not finite.
#[must_use]
#[expect(clippy::expect_used, reason = "fixtures fail fast on invalid weights")]
pub fn symmetric_network(edges: &[(&str, &str, f64)]) -> MemoryNetwork {
    let mut network = MemoryNetwork::new();
    for &(from, to, weight) in edges {
        for id in [from, to] {
            if network.node(id).is_none() {
                network
                    .add_node(Node::branch(id, id, "Test"))
                    .expect("fresh node");
            }
        }
        for (a, b) in [(from, to), (to, from)] {
            let edge = RouteEdge::new(a, b, weight, weight, weight).expect("valid fixture weight");
            network.add_route(edge).expect("route joins hubs");
        }
    }
    network
}

/// Build a network with one depot `DEP_1`, one vehicle `VEH_1` of the given
/// capacities, and the listed `(id, weight_kg, volume_m3, priority)`
/// packages.
///
/// # Panics
/// Panics if two packages share an id.
#[must_use]
#[expect(clippy::expect_used, reason = "fixtures fail fast on duplicate ids")]
pub fn fleet_network(
    capacity_kg: f64,
    capacity_m3: f64,
    packages: &[(&str, f64, f64, Option<Priority>)],
) -> MemoryNetwork {
    let mut network = MemoryNetwork::new();
    network
        .add_node(Node::depot("DEP_1", "Central Depot", "Centro"))
        .expect("fresh depot");
    network
        .add_vehicle("DEP_1", Vehicle::new("VEH_1", capacity_kg, capacity_m3))
        .expect("vehicle at depot");
    for &(id, weight_kg, volume_m3, priority) in packages {
        let mut package = Package::new(id, weight_kg, volume_m3);
        package.priority = priority;
        network
            .add_package("DEP_1", package)
            .expect("unique package id");
    }
    network
}
