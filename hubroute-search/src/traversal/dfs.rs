//! Depth-first search.

use std::collections::{HashMap, HashSet};

use hubroute_core::{DepthFirstPath, DepthLimit, GraphStore, RoutingError, Traversal};

use super::{reconstruct, require_node};

/// Outcome of one stack walk.
struct Exploration {
    order: Vec<String>,
    parents: HashMap<String, String>,
    reached: bool,
}

/// Depth-first search over a [`GraphStore`].
///
/// Neighbours are pushed in descending id order so the lowest id is popped
/// first. A node's parent and depth are fixed when it is first pushed.
#[derive(Debug, Clone)]
pub struct DepthFirst<G> {
    store: G,
}

impl<G: GraphStore> DepthFirst<G> {
    /// Create a search over `store`.
    #[must_use]
    pub const fn new(store: G) -> Self {
        Self { store }
    }

    /// Find a path from `origin` to `destination`, reporting every node
    /// popped on the way.
    ///
    /// The visited list is kept even when no path is found.
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
    ) -> Result<DepthFirstPath, RoutingError> {
        require_node(&self.store, origin, include_clients)?;
        require_node(&self.store, destination, include_clients)?;
        if origin == destination {
            let path = vec![origin.to_owned()];
            return Ok(DepthFirstPath {
                origin: origin.to_owned(),
                destination: destination.to_owned(),
                names: self.store.names_of(&path)?,
                path,
                visited: Vec::new(),
                visited_names: Vec::new(),
            });
        }

        let walk = self.explore(origin, Some(destination), depth, include_clients)?;
        let path = if walk.reached {
            reconstruct(&walk.parents, origin, destination)
        } else {
            Vec::new()
        };
        log::debug!(
            "dfs {origin} -> {destination}: {} nodes popped, reached={}",
            walk.order.len(),
            walk.reached
        );
        Ok(DepthFirstPath {
            origin: origin.to_owned(),
            destination: destination.to_owned(),
            names: self.store.names_of(&path)?,
            path,
            visited_names: self.store.names_of(&walk.order)?,
            visited: walk.order,
        })
    }

    /// List every node reachable from `origin` in pre-order.
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
        let walk = self.explore(origin, None, depth, include_clients)?;
        Ok(Traversal {
            origin: origin.to_owned(),
            names: self.store.names_of(&walk.order)?,
            order: walk.order,
        })
    }

    fn explore(
        &self,
        origin: &str,
        target: Option<&str>,
        depth: DepthLimit,
        include_clients: bool,
    ) -> Result<Exploration, RoutingError> {
        let mut stack = vec![origin.to_owned()];
        let mut levels = HashMap::from([(origin.to_owned(), 0_u32)]);
        let mut parents: HashMap<String, String> = HashMap::new();
        let mut visited = HashSet::new();
        let mut order = Vec::new();

        while let Some(current) = stack.pop() {
            if !visited.insert(current.clone()) {
                continue;
            }
            order.push(current.clone());
            if target == Some(current.as_str()) {
                return Ok(Exploration {
                    order,
                    parents,
                    reached: true,
                });
            }
            let level = levels.get(&current).copied().unwrap_or_default();
            if !depth.allows_expansion(level) {
                continue;
            }
            let neighbours = self.store.neighbours(&current, include_clients)?;
            for next in neighbours.into_iter().rev() {
                if visited.contains(&next) {
                    continue;
                }
                levels
                    .entry(next.clone())
                    .or_insert_with(|| level.saturating_add(1));
                parents
                    .entry(next.clone())
                    .or_insert_with(|| current.clone());
                stack.push(next);
            }
        }
        Ok(Exploration {
            order,
            parents,
            reached: false,
        })
    }
}
