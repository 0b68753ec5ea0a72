//! Separation in undirected graphs.
//!
//! `X` and `Y` are u-separated by `Z` if, once the nodes of `Z` and all their edges
//! are deleted, no path connects a node of `X` to a node of `Y`.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use log::debug;

use crate::graph::UndirectedGraph;
use crate::types::NodeId;

impl UndirectedGraph {
    /// Returns a copy of the graph without the named nodes.
    ///
    /// Edges incident to a removed node are cleared on both endpoints, so the result
    /// stays symmetric. Unknown names are ignored.
    pub fn without<S: AsRef<str>>(&self, names: impl IntoIterator<Item = S>) -> UndirectedGraph {
        let removed = self.ids_of(names);
        let mut nodes = self.as_map().clone();
        for id in &removed {
            if let Some(node) = nodes.remove(id) {
                debug!("removed {} '{}' with {} edges", node.id, node.name, node.degree());
                for other in &node.paths {
                    if let Some(other) = nodes.get_mut(other) {
                        other.paths.remove(id);
                    }
                }
            }
        }
        let moral: Vec<_> = self
            .moral_edges()
            .filter(|(a, b)| !removed.contains(a) && !removed.contains(b))
            .collect();
        UndirectedGraph::from_map(nodes).with_moral_edges(moral)
    }

    /// Returns the ids reachable from the named nodes along one or more edges.
    ///
    /// The closure starts from the neighbours of the start nodes and expands over an
    /// explicit frontier until no new node is found. A start node belongs to the
    /// result only if some path leads back to it.
    pub fn reachable_from<S: AsRef<str>>(&self, names: impl IntoIterator<Item = S>) -> BTreeSet<NodeId> {
        let nodes = self.as_map();
        let mut visited = BTreeSet::new();
        let mut queue: VecDeque<NodeId> = self
            .ids_of(names)
            .iter()
            .filter_map(|id| nodes.get(id))
            .flat_map(|n| n.paths.iter().copied())
            .collect();

        while let Some(id) = queue.pop_front() {
            if visited.insert(id) {
                if let Some(node) = nodes.get(&id) {
                    queue.extend(node.paths.iter().copied().filter(|m| !visited.contains(m)));
                }
            }
        }

        visited
    }

    /// Tests whether `x` and `y` are separated by `z`.
    ///
    /// With `x` or `y` empty the answer is vacuously `true`. An empty `z` is an
    /// ordinary conditioning set: the test becomes plain reachability.
    pub fn is_u_separated(&self, x: &BTreeSet<String>, z: &BTreeSet<String>, y: &BTreeSet<String>) -> bool {
        debug!("is_u_separated(x = {:?}, z = {:?}, y = {:?})", x, z, y);

        let rest = self.without(z);
        let reached = rest.reachable_from(x);
        debug!("reachable from X after removing Z: {:?}", reached);

        let nodes: &BTreeMap<NodeId, _> = rest.as_map();
        let hit = reached
            .iter()
            .filter_map(|id| nodes.get(id))
            .find(|n| y.contains(&n.name));

        match hit {
            Some(node) => {
                debug!("not separated: '{}' is reachable from X", node.name);
                false
            }
            None => true,
        }
    }
}

/// Tests whether `x` and `y` are separated by `z` in an undirected graph.
pub fn is_u_separated(
    graph: &UndirectedGraph,
    x: &BTreeSet<String>,
    z: &BTreeSet<String>,
    y: &BTreeSet<String>,
) -> bool {
    graph.is_u_separated(x, z, y)
}
