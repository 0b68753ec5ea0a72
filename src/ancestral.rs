//! Ancestral subgraph extraction.
//!
//! The ancestral subgraph of a vertex set `W` is the smallest subgraph containing `W`
//! and every node with a directed path into `W`. It is obtained by peeling the DAG
//! from its leaves: a node with no remaining children that is not itself in `W`
//! cannot lead to `W`, so it is removed, which may turn its parents into new leaves.
//!
//! The peel is driven by a work queue rather than by editing a collection while
//! iterating over it. Removal order does not affect the result.

use std::collections::{BTreeSet, VecDeque};

use log::debug;

use crate::graph::DirectedGraph;
use crate::types::NodeId;

impl DirectedGraph {
    /// Returns the ancestral subgraph of `targets`.
    ///
    /// Target ids that are not in the graph are ignored. An empty target set yields
    /// the empty graph. The input graph is left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::BTreeSet;
    /// use dsep_rs::graph::DagBuilder;
    /// use dsep_rs::types::NodeId;
    ///
    /// // A -> B -> C, B -> D
    /// let dag = DagBuilder::new()
    ///     .node(1, "A")
    ///     .node(2, "B")
    ///     .node(3, "C")
    ///     .node(4, "D")
    ///     .edge(1, 2)
    ///     .edge(2, 3)
    ///     .edge(2, 4)
    ///     .build()
    ///     .unwrap();
    ///
    /// let ag = dag.ancestral_subgraph(&BTreeSet::from([NodeId::new(3)]));
    /// assert_eq!(ag.len(), 3);
    /// assert!(ag.find("D").is_none());
    /// assert_eq!(dag.len(), 4);
    /// ```
    pub fn ancestral_subgraph(&self, targets: &BTreeSet<NodeId>) -> DirectedGraph {
        debug!("ancestral_subgraph(|V| = {}, targets = {:?})", self.len(), targets);

        let mut work = self.as_map().clone();

        let mut queue: VecDeque<NodeId> = work
            .values()
            .filter(|n| n.children.is_empty() && !targets.contains(&n.id))
            .map(|n| n.id)
            .collect();

        while let Some(id) = queue.pop_front() {
            let Some(node) = work.remove(&id) else {
                continue;
            };
            debug!("pruned {} '{}'", node.id, node.name);

            for parent_id in &node.parents {
                if let Some(parent) = work.get_mut(parent_id) {
                    parent.children.remove(&id);
                    if parent.children.is_empty() && !targets.contains(parent_id) {
                        queue.push_back(*parent_id);
                    }
                }
            }
        }

        debug!("ancestral_subgraph: kept {} of {} nodes", work.len(), self.len());
        DirectedGraph::from_map(work)
    }
}

/// Returns the smallest subgraph of `graph` containing `targets` and all their ancestors.
pub fn extract_ancestors(graph: &DirectedGraph, targets: &BTreeSet<NodeId>) -> DirectedGraph {
    graph.ancestral_subgraph(targets)
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::graph::DagBuilder;

    fn ids(raw: impl IntoIterator<Item = u32>) -> BTreeSet<NodeId> {
        raw.into_iter().map(NodeId::new).collect()
    }

    /// ```text
    ///   1   2
    ///    \ / \
    ///     3   4
    ///     |   |
    ///     5   6
    /// ```
    fn sample() -> DirectedGraph {
        DagBuilder::new()
            .node(1, "A")
            .node(2, "B")
            .node(3, "C")
            .node(4, "D")
            .node(5, "E")
            .node(6, "F")
            .edge(1, 3)
            .edge(2, 3)
            .edge(2, 4)
            .edge(3, 5)
            .edge(4, 6)
            .build()
            .unwrap()
    }

    #[test]
    fn test_keeps_targets_and_ancestors() {
        let dag = sample();
        let ag = dag.ancestral_subgraph(&ids([3]));
        assert_eq!(ag.ids().collect::<BTreeSet<_>>(), ids([1, 2, 3]));
    }

    #[test]
    fn test_children_sets_are_pruned() {
        let dag = sample();
        let ag = dag.ancestral_subgraph(&ids([3]));
        let b = ag.node(NodeId::new(2)).unwrap();
        assert_eq!(b.children, ids([3]));
        let c = ag.node(NodeId::new(3)).unwrap();
        assert!(c.children.is_empty());
    }

    #[test]
    fn test_input_untouched() {
        let dag = sample();
        let before = dag.clone();
        let _ = dag.ancestral_subgraph(&ids([5]));
        assert_eq!(dag, before);
    }

    #[test]
    fn test_empty_targets() {
        let dag = sample();
        let ag = dag.ancestral_subgraph(&BTreeSet::new());
        assert!(ag.is_empty());
    }

    #[test]
    fn test_unknown_target_ignored() {
        let dag = sample();
        let ag = dag.ancestral_subgraph(&ids([6, 99]));
        assert_eq!(ag.ids().collect::<BTreeSet<_>>(), ids([2, 4, 6]));
    }

    #[test]
    fn test_leaf_targets_keep_everything() {
        let dag = sample();
        let ag = dag.ancestral_subgraph(&ids([5, 6]));
        assert_eq!(ag.len(), dag.len());
        assert_eq!(ag, dag);
    }

    #[test]
    fn test_target_with_kept_descendant() {
        // Target 2 is kept even though it only matters as a root.
        let dag = sample();
        let ag = dag.ancestral_subgraph(&ids([2, 5]));
        assert_eq!(ag.ids().collect::<BTreeSet<_>>(), ids([1, 2, 3, 5]));
        let b = ag.node(NodeId::new(2)).unwrap();
        assert_eq!(b.children, ids([3]));
    }

    #[test]
    fn test_idempotent() {
        let dag = sample();
        let targets = ids([4, 5]);
        let once = dag.ancestral_subgraph(&targets);
        let twice = once.ancestral_subgraph(&targets);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_free_function() {
        let dag = sample();
        assert_eq!(extract_ancestors(&dag, &ids([4])), dag.ancestral_subgraph(&ids([4])));
    }
}
