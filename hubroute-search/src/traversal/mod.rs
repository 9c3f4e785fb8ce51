//! Unweighted traversal over the symmetric closure of the route relation.

use std::collections::HashMap;

use hubroute_core::{GraphStore, RoutingError, UnknownNodeReason};

mod bfs;
mod dfs;

pub use bfs::BreadthFirst;
pub use dfs::DepthFirst;

/// Reject `id` unless it names a hub, or a client when `include_clients`.
fn require_node<G: GraphStore>(
    store: &G,
    id: &str,
    include_clients: bool,
) -> Result<(), RoutingError> {
    if store.node_exists(id, include_clients)? {
        return Ok(());
    }
    let reason = if store.client_exists(id)? {
        UnknownNodeReason::NotAHub
    } else {
        UnknownNodeReason::Missing
    };
    Err(RoutingError::unknown(id, reason))
}

/// Walk `parents` back from `destination`; empty when the chain never
/// reaches `origin`.
fn reconstruct(parents: &HashMap<String, String>, origin: &str, destination: &str) -> Vec<String> {
    let mut path = vec![destination.to_owned()];
    let mut current = destination;
    while current != origin {
        match parents.get(current) {
            Some(parent) => {
                path.push(parent.clone());
                current = parent.as_str();
            }
            None => return Vec::new(),
        }
    }
    path.reverse();
    path
}
