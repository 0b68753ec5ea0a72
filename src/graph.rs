//! Directed and undirected graphs keyed by [`NodeId`].
//!
//! Both graphs store their nodes in an id-ordered map, so iteration order is
//! deterministic and ids never stand for positions.
//!
//! A [`DirectedGraph`] is built once from caller data and then only read. Every
//! algorithm in this crate returns a fresh graph instead of editing its input, so
//! one loaded network can answer any number of independent queries.
//!
//! # Examples
//!
//! ```
//! use dsep_rs::graph::DagBuilder;
//!
//! let dag = DagBuilder::new()
//!     .node(10, "A")
//!     .node(20, "B")
//!     .node(30, "C")
//!     .edge(10, 30)
//!     .edge(20, 30)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(dag.len(), 3);
//! assert_eq!(dag.find("C").unwrap().parents.len(), 2);
//! ```

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

use crate::error::GraphError;
use crate::node::{DagNode, UNode};
use crate::types::NodeId;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DirectedGraph {
    nodes: BTreeMap<NodeId, DagNode>,
    by_name: HashMap<String, NodeId>,
}

impl DirectedGraph {
    /// Builds a graph from fully populated nodes.
    ///
    /// Every parent and child reference must name an existing node, and every edge
    /// must be recorded on both of its endpoints. Acyclicity is the caller's
    /// responsibility and is not checked.
    pub fn new(nodes: impl IntoIterator<Item = DagNode>) -> Result<Self, GraphError> {
        let mut map = BTreeMap::new();
        let mut by_name = HashMap::new();
        for node in nodes {
            if by_name.insert(node.name.clone(), node.id).is_some() {
                return Err(GraphError::DuplicateName(node.name));
            }
            if let Some(dup) = map.insert(node.id, node) {
                return Err(GraphError::DuplicateId(dup.id));
            }
        }

        for node in map.values() {
            for &parent in &node.parents {
                let p = map.get(&parent).ok_or(GraphError::DanglingParent { node: node.id, parent })?;
                if !p.children.contains(&node.id) {
                    return Err(GraphError::InconsistentEdge { parent, child: node.id });
                }
            }
            for &child in &node.children {
                let c = map.get(&child).ok_or(GraphError::DanglingChild { node: node.id, child })?;
                if !c.parents.contains(&node.id) {
                    return Err(GraphError::InconsistentEdge { parent: node.id, child });
                }
            }
        }

        Ok(Self { nodes: map, by_name })
    }

    /// Wraps nodes already known to be consistent (derived from a valid graph).
    pub(crate) fn from_map(nodes: BTreeMap<NodeId, DagNode>) -> Self {
        let by_name = nodes.values().map(|n| (n.name.clone(), n.id)).collect();
        Self { nodes, by_name }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn node(&self, id: NodeId) -> Option<&DagNode> {
        self.nodes.get(&id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &DagNode> {
        self.nodes.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    pub(crate) fn as_map(&self) -> &BTreeMap<NodeId, DagNode> {
        &self.nodes
    }

    /// Looks a node up by its variable name.
    pub fn find(&self, name: &str) -> Option<&DagNode> {
        self.by_name.get(name).and_then(|id| self.nodes.get(id))
    }

    /// Returns the ids of the nodes with the given names. Unknown names are skipped.
    pub fn ids_of<S: AsRef<str>>(&self, names: impl IntoIterator<Item = S>) -> BTreeSet<NodeId> {
        names
            .into_iter()
            .filter_map(|name| self.by_name.get(name.as_ref()).copied())
            .collect()
    }

    /// Total number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.nodes.values().map(|n| n.children.len()).sum()
    }
}

impl fmt::Display for DirectedGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for node in self.nodes.values() {
            writeln!(f, "{}", node)?;
        }
        Ok(())
    }
}

/// Incremental construction of a [`DirectedGraph`] from nodes and edges.
///
/// Edges are recorded on both endpoints, so the built graph is consistent by
/// construction. References to unknown ids are reported by [`DagBuilder::build`].
#[derive(Debug, Default)]
pub struct DagBuilder {
    nodes: Vec<DagNode>,
    edges: Vec<(NodeId, NodeId)>,
}

impl DagBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(mut self, id: impl Into<NodeId>, name: impl Into<String>) -> Self {
        self.nodes.push(DagNode::new(id, name));
        self
    }

    /// Adds a node carrying its domain and probability table.
    pub fn with_node(mut self, node: DagNode) -> Self {
        self.nodes.push(node);
        self
    }

    pub fn edge(mut self, parent: impl Into<NodeId>, child: impl Into<NodeId>) -> Self {
        self.edges.push((parent.into(), child.into()));
        self
    }

    pub fn build(mut self) -> Result<DirectedGraph, GraphError> {
        let index: HashMap<NodeId, usize> = self.nodes.iter().enumerate().map(|(i, n)| (n.id, i)).collect();
        for &(parent, child) in &self.edges {
            let &p = index.get(&parent).ok_or(GraphError::DanglingParent { node: child, parent })?;
            let &c = index.get(&child).ok_or(GraphError::DanglingChild { node: parent, child })?;
            self.nodes[p].children.insert(child);
            self.nodes[c].parents.insert(parent);
        }
        DirectedGraph::new(self.nodes)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UndirectedGraph {
    nodes: BTreeMap<NodeId, UNode>,
    /// Edges added by marrying co-parents, stored as `(a, b)` with `a < b`.
    moral: BTreeSet<(NodeId, NodeId)>,
}

fn edge_key(a: NodeId, b: NodeId) -> (NodeId, NodeId) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

impl UndirectedGraph {
    pub(crate) fn from_map(nodes: BTreeMap<NodeId, UNode>) -> Self {
        Self {
            nodes,
            moral: BTreeSet::new(),
        }
    }

    pub(crate) fn with_moral_edges(mut self, edges: impl IntoIterator<Item = (NodeId, NodeId)>) -> Self {
        self.moral = edges
            .into_iter()
            .map(|(a, b)| edge_key(a, b))
            .filter(|(a, b)| self.has_edge(*a, *b))
            .collect();
        self
    }

    /// Whether the edge `a -- b` exists only because `a` and `b` share a child.
    pub fn is_moral_edge(&self, a: NodeId, b: NodeId) -> bool {
        self.moral.contains(&edge_key(a, b))
    }

    /// Iterates over the marriage edges as `(a, b)` pairs with `a < b`.
    pub fn moral_edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.moral.iter().copied()
    }

    pub(crate) fn as_map(&self) -> &BTreeMap<NodeId, UNode> {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn node(&self, id: NodeId) -> Option<&UNode> {
        self.nodes.get(&id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &UNode> {
        self.nodes.values()
    }

    pub fn find(&self, name: &str) -> Option<&UNode> {
        self.nodes.values().find(|n| n.name == name)
    }

    /// Returns the ids of the nodes with the given names. Unknown names are skipped.
    pub fn ids_of<S: AsRef<str>>(&self, names: impl IntoIterator<Item = S>) -> BTreeSet<NodeId> {
        let names: BTreeSet<String> = names.into_iter().map(|s| s.as_ref().to_owned()).collect();
        self.nodes
            .values()
            .filter(|n| names.contains(&n.name))
            .map(|n| n.id)
            .collect()
    }

    pub fn has_edge(&self, a: NodeId, b: NodeId) -> bool {
        self.nodes.get(&a).is_some_and(|n| n.paths.contains(&b))
    }

    /// Number of undirected edges, each pair counted once.
    pub fn edge_count(&self) -> usize {
        self.edges().count()
    }

    /// Iterates over edges as `(a, b)` pairs with `a < b`.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.nodes
            .values()
            .flat_map(|n| n.paths.iter().filter(move |&&m| n.id < m).map(move |&m| (n.id, m)))
    }

    /// Checks that every edge is recorded on both endpoints and points to an existing node.
    pub fn is_symmetric(&self) -> bool {
        self.nodes.values().all(|n| {
            n.paths
                .iter()
                .all(|m| self.nodes.get(m).is_some_and(|other| other.paths.contains(&n.id)))
        })
    }
}

impl fmt::Display for UndirectedGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for node in self.nodes.values() {
            writeln!(f, "{}", node)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[test]
    fn test_builder_links_both_directions() {
        let dag = DagBuilder::new().node(1, "A").node(2, "B").edge(1, 2).build().unwrap();
        let a = dag.find("A").unwrap();
        let b = dag.find("B").unwrap();
        assert!(a.children.contains(&b.id));
        assert!(b.parents.contains(&a.id));
        assert_eq!(dag.edge_count(), 1);
    }

    #[test]
    fn test_sparse_ids() {
        let dag = DagBuilder::new()
            .node(1000, "A")
            .node(7, "B")
            .node(42, "C")
            .edge(1000, 42)
            .edge(7, 42)
            .build()
            .unwrap();
        assert_eq!(dag.ids().collect::<Vec<_>>(), vec![NodeId::new(7), NodeId::new(42), NodeId::new(1000)]);
        assert!(dag.contains(NodeId::new(1000)));
        assert!(!dag.contains(NodeId::new(0)));
    }

    #[test]
    fn test_duplicate_id() {
        let res = DirectedGraph::new([DagNode::new(1, "A"), DagNode::new(1, "B")]);
        assert_eq!(res, Err(GraphError::DuplicateId(NodeId::new(1))));
    }

    #[test]
    fn test_duplicate_name() {
        let res = DirectedGraph::new([DagNode::new(1, "A"), DagNode::new(2, "A")]);
        assert_eq!(res, Err(GraphError::DuplicateName("A".into())));
    }

    #[test]
    fn test_dangling_parent() {
        let res = DirectedGraph::new([DagNode::new(1, "A").with_parents([5])]);
        assert_eq!(
            res,
            Err(GraphError::DanglingParent {
                node: NodeId::new(1),
                parent: NodeId::new(5)
            })
        );
    }

    #[test]
    fn test_dangling_child() {
        let res = DagBuilder::new().node(1, "A").edge(1, 3).build();
        assert_eq!(
            res,
            Err(GraphError::DanglingChild {
                node: NodeId::new(1),
                child: NodeId::new(3)
            })
        );
    }

    #[test]
    fn test_one_sided_edge() {
        let res = DirectedGraph::new([DagNode::new(1, "A").with_children([2]), DagNode::new(2, "B")]);
        assert_eq!(
            res,
            Err(GraphError::InconsistentEdge {
                parent: NodeId::new(1),
                child: NodeId::new(2)
            })
        );
    }

    #[test]
    fn test_ids_of_skips_unknown() {
        let dag = DagBuilder::new().node(3, "A").node(4, "B").build().unwrap();
        let ids = dag.ids_of(["B", "Nope"]);
        assert_eq!(ids, BTreeSet::from([NodeId::new(4)]));
    }

    #[test]
    fn test_undirected_edges() {
        let mut a = UNode::new(1, "A");
        let mut b = UNode::new(2, "B");
        a.paths.insert(b.id);
        b.paths.insert(a.id);
        let g = UndirectedGraph::from_map(BTreeMap::from([(a.id, a), (b.id, b)]));
        assert!(g.is_symmetric());
        assert_eq!(g.edge_count(), 1);
        assert!(g.has_edge(NodeId::new(2), NodeId::new(1)));
        assert_eq!(g.ids_of(["A"]), BTreeSet::from([NodeId::new(1)]));
    }

    #[test]
    fn test_undirected_one_sided_is_not_symmetric() {
        let mut a = UNode::new(1, "A");
        let b = UNode::new(2, "B");
        a.paths.insert(b.id);
        let g = UndirectedGraph::from_map(BTreeMap::from([(a.id, a), (b.id, b)]));
        assert!(!g.is_symmetric());
    }
}
