//! Breadth-first search.

use std::collections::{HashMap, HashSet, VecDeque};

use hubroute_core::{DepthLimit, GraphStore, HopPath, RoutingError, Traversal, UnknownNodeReason};

use super::{reconstruct, require_node};

/// Breadth-first search over a [`GraphStore`].
///
/// Finds paths with the fewest hops. Neighbours are expanded in ascending id
/// order, so ties resolve towards lower ids.
///
/// # Examples
/// ```
/// use hubroute_core::{DepthLimit, MemoryNetwork, Node, RouteEdge};
/// use hubroute_search::BreadthFirst;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut network = MemoryNetwork::new();
/// network.add_node(Node::depot("A", "Alpha", "North"))?;
/// network.add_node(Node::branch("B", "Bravo", "South"))?;
/// network.add_route(RouteEdge::new("B", "A", 1.0, 1.0, 0.0)?)?;
///
/// let bfs = BreadthFirst::new(&network);
/// let found = bfs.find_path("A", "B", DepthLimit::Unbounded, false)?;
/// assert_eq!(found.path, vec!["A".to_owned(), "B".to_owned()]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct BreadthFirst<G> {
    store: G,
}

impl<G: GraphStore> BreadthFirst<G> {
    /// Create a search over `store`.
    #[must_use]
    pub const fn new(store: G) -> Self {
        Self { store }
    }

    /// Find the path with the fewest hops from `origin` to `destination`.
    ///
    /// Returns an empty path when `destination` is unreachable within
    /// `depth`.
    ///
    /// # Errors
    /// [`RoutingError::UnknownNode`] when either endpoint does not exist,
    /// counting clients only if `include_clients` is set.
    pub fn find_path(
        &self,
        origin: &str,
        destination: &str,
        depth: DepthLimit,
        include_clients: bool,
    ) -> Result<HopPath, RoutingError> {
        require_node(&self.store, origin, include_clients)?;
        require_node(&self.store, destination, include_clients)?;
        if origin == destination {
            return self.hop_path(origin, destination, vec![origin.to_owned()]);
        }

        let mut queue = VecDeque::from([(origin.to_owned(), 0_u32)]);
        let mut seen = HashSet::from([origin.to_owned()]);
        let mut parents: HashMap<String, String> = HashMap::new();

        while let Some((current, level)) = queue.pop_front() {
            if !depth.allows_expansion(level) {
                continue;
            }
            for next in self.store.neighbours(&current, include_clients)? {
                if !seen.insert(next.clone()) {
                    continue;
                }
                parents.insert(next.clone(), current.clone());
                if next == destination {
                    let path = reconstruct(&parents, origin, destination);
                    log::debug!(
                        "bfs {origin} -> {destination}: {} hops",
                        path.len().saturating_sub(1)
                    );
                    return self.hop_path(origin, destination, path);
                }
                queue.push_back((next, level.saturating_add(1)));
            }
        }
        log::debug!("bfs {origin} -> {destination}: unreachable");
        self.hop_path(origin, destination, Vec::new())
    }

    /// List every node reachable from `origin` in dequeue order.
    ///
    /// # Errors
    /// [`RoutingError::UnknownNode`] when `origin` does not exist.
    pub fn traverse(
        &self,
        origin: &str,
        depth: DepthLimit,
        include_clients: bool,
    ) -> Result<Traversal, RoutingError> {
        require_node(&self.store, origin, include_clients)?;
        let mut queue = VecDeque::from([(origin.to_owned(), 0_u32)]);
        let mut seen = HashSet::from([origin.to_owned()]);
        let mut order = Vec::new();

        while let Some((current, level)) = queue.pop_front() {
            order.push(current.clone());
            if !depth.allows_expansion(level) {
                continue;
            }
            for next in self.store.neighbours(&current, include_clients)? {
                if seen.insert(next.clone()) {
                    queue.push_back((next, level.saturating_add(1)));
                }
            }
        }
        let names = self.store.names_of(&order)?;
        Ok(Traversal {
            origin: origin.to_owned(),
            order,
            names,
        })
    }

    /// Reach `client` through the first branch that serves it.
    ///
    /// The hub-only path to the branch is extended with the client as a
    /// final hop. An unreachable branch yields an empty path.
    ///
    /// # Errors
    /// [`RoutingError::UnknownNode`] when `client` does not exist or no
    /// branch serves it, or when `origin` is not a hub.
    pub fn find_path_to_client(
        &self,
        origin: &str,
        client: &str,
        depth: DepthLimit,
    ) -> Result<HopPath, RoutingError> {
        if !self.store.client_exists(client)? {
            return Err(RoutingError::unknown(client, UnknownNodeReason::Missing));
        }
        let branch = self
            .store
            .serving_branches(client)?
            .into_iter()
            .next()
            .ok_or_else(|| RoutingError::unknown(client, UnknownNodeReason::NotServed))?;
        let to_branch = self.find_path(origin, &branch, depth, false)?;
        if to_branch.is_empty() {
            return self.hop_path(origin, client, Vec::new());
        }
        let mut path = to_branch.path;
        path.push(client.to_owned());
        self.hop_path(origin, client, path)
    }

    fn hop_path(
        &self,
        origin: &str,
        destination: &str,
        path: Vec<String>,
    ) -> Result<HopPath, RoutingError> {
        let names = self.store.names_of(&path)?;
        Ok(HopPath {
            origin: origin.to_owned(),
            destination: destination.to_owned(),
            path,
            names,
        })
    }
}
