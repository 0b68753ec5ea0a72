//! Moralization: DAG to undirected graph.
//!
//! The moral graph of a DAG has the same nodes and an undirected edge between
//! every parent and child, plus an edge between every pair of parents that share
//! a child ("marrying" the co-parents).

use std::collections::BTreeMap;

use log::debug;

use crate::graph::{DirectedGraph, UndirectedGraph};
use crate::node::UNode;
use crate::types::NodeId;

impl DirectedGraph {
    /// Builds the moral graph of this DAG.
    ///
    /// Every pair of distinct parents of every node is linked, so a node with `k`
    /// parents contributes `k * (k - 1) / 2` moral edges. The output is symmetric and
    /// has exactly the nodes of the input.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsep_rs::graph::DagBuilder;
    /// use dsep_rs::types::NodeId;
    ///
    /// // Collider: A -> C <- B
    /// let dag = DagBuilder::new()
    ///     .node(1, "A")
    ///     .node(2, "B")
    ///     .node(3, "C")
    ///     .edge(1, 3)
    ///     .edge(2, 3)
    ///     .build()
    ///     .unwrap();
    ///
    /// let moral = dag.moralize();
    /// assert!(moral.has_edge(NodeId::new(1), NodeId::new(2)));
    /// assert_eq!(moral.edge_count(), 3);
    /// ```
    pub fn moralize(&self) -> UndirectedGraph {
        debug!("moralize(|V| = {}, |E| = {})", self.len(), self.edge_count());

        let mut moral: BTreeMap<NodeId, UNode> = self.nodes().map(|n| (n.id, UNode::from(n))).collect();
        let mut married = Vec::new();

        for node in self.nodes() {
            let parents: Vec<NodeId> = node.parents.iter().copied().collect();
            for (i, &p1) in parents.iter().enumerate() {
                for &p2 in &parents[i + 1..] {
                    debug!("moral edge {} -- {} (co-parents of {})", p1, p2, node.id);
                    if link(&mut moral, p1, p2) {
                        married.push((p1, p2));
                    }
                }
            }
        }

        UndirectedGraph::from_map(moral).with_moral_edges(married)
    }
}

/// Adds the edge `a -- b`; returns `true` if it was not present before.
fn link(graph: &mut BTreeMap<NodeId, UNode>, a: NodeId, b: NodeId) -> bool {
    let mut added = false;
    if let Some(node) = graph.get_mut(&a) {
        added |= node.paths.insert(b);
    }
    if let Some(node) = graph.get_mut(&b) {
        added |= node.paths.insert(a);
    }
    added
}

/// Converts a DAG into its moral graph.
pub fn moralize(graph: &DirectedGraph) -> UndirectedGraph {
    graph.moralize()
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::graph::DagBuilder;

    fn id(raw: u32) -> NodeId {
        NodeId::new(raw)
    }

    #[test]
    fn test_chain_has_no_moral_edges() {
        let dag = DagBuilder::new()
            .node(1, "A")
            .node(2, "B")
            .node(3, "C")
            .edge(1, 2)
            .edge(2, 3)
            .build()
            .unwrap();
        let moral = dag.moralize();
        assert_eq!(moral.edge_count(), 2);
        assert_eq!(moral.moral_edges().count(), 0);
        assert!(moral.has_edge(id(1), id(2)));
        assert!(moral.has_edge(id(3), id(2)));
        assert!(!moral.has_edge(id(1), id(3)));
    }

    #[test]
    fn test_three_parents_all_pairs() {
        let dag = DagBuilder::new()
            .node(10, "P1")
            .node(20, "P2")
            .node(30, "P3")
            .node(40, "C")
            .edge(10, 40)
            .edge(20, 40)
            .edge(30, 40)
            .build()
            .unwrap();
        let moral = dag.moralize();
        assert!(moral.has_edge(id(10), id(20)));
        assert!(moral.has_edge(id(10), id(30)));
        assert!(moral.has_edge(id(20), id(30)));
        assert_eq!(moral.edge_count(), 6);
        assert!(moral.is_symmetric());
        assert_eq!(moral.moral_edges().collect::<Vec<_>>(), vec![(id(10), id(20)), (id(10), id(30)), (id(20), id(30))]);
        assert!(moral.is_moral_edge(id(30), id(10)));
        assert!(!moral.is_moral_edge(id(10), id(40)));
    }

    #[test]
    fn test_same_nodes() {
        let dag = DagBuilder::new()
            .node(5, "A")
            .node(9, "B")
            .node(11, "Lonely")
            .edge(5, 9)
            .build()
            .unwrap();
        let moral = dag.moralize();
        assert_eq!(moral.len(), 3);
        let lonely = moral.find("Lonely").unwrap();
        assert_eq!(lonely.id, id(11));
        assert_eq!(lonely.degree(), 0);
    }

    #[test]
    fn test_symmetric_on_diamond() {
        // 1 -> 2, 1 -> 3, 2 -> 4, 3 -> 4
        let dag = DagBuilder::new()
            .node(1, "A")
            .node(2, "B")
            .node(3, "C")
            .node(4, "D")
            .edge(1, 2)
            .edge(1, 3)
            .edge(2, 4)
            .edge(3, 4)
            .build()
            .unwrap();
        let moral = dag.moralize();
        assert!(moral.is_symmetric());
        assert!(moral.has_edge(id(2), id(3)));
        assert!(moral.has_edge(id(3), id(2)));
        assert_eq!(moral.edge_count(), 5);
    }

    #[test]
    fn test_linked_parents_are_not_moral_edges() {
        // 1 -> 2, 1 -> 3, 2 -> 3: the parents of 3 are already adjacent.
        let dag = DagBuilder::new()
            .node(1, "A")
            .node(2, "B")
            .node(3, "C")
            .edge(1, 2)
            .edge(1, 3)
            .edge(2, 3)
            .build()
            .unwrap();
        let moral = dag.moralize();
        assert_eq!(moral.edge_count(), 3);
        assert!(!moral.is_moral_edge(id(1), id(2)));
    }

    #[test]
    fn test_empty() {
        let moral = moralize(&DirectedGraph::default());
        assert!(moral.is_empty());
    }
}
