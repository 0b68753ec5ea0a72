//! Network nodes.
//!
//! [`DagNode`] is a vertex of the directed network: it carries the variable's name,
//! its value domain and probability table, and the ids of its parents and children.
//! [`UNode`] is a vertex of an undirected graph, with a symmetric neighbour set.
//!
//! Domains and probabilities travel with the nodes so that a loaded network can be
//! printed back, but none of the separation algorithms look at them.

use std::collections::BTreeSet;
use std::fmt;

use crate::types::NodeId;

#[derive(Debug, Clone, PartialEq)]
pub struct DagNode {
    pub id: NodeId,
    pub name: String,
    pub domain: Vec<String>,
    pub parents: BTreeSet<NodeId>,
    pub children: BTreeSet<NodeId>,
    pub probs: Vec<f64>,
}

impl DagNode {
    pub fn new(id: impl Into<NodeId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            domain: Vec::new(),
            parents: BTreeSet::new(),
            children: BTreeSet::new(),
            probs: Vec::new(),
        }
    }

    pub fn with_domain<S: Into<String>>(mut self, domain: impl IntoIterator<Item = S>) -> Self {
        self.domain = domain.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_probs(mut self, probs: impl IntoIterator<Item = f64>) -> Self {
        self.probs = probs.into_iter().collect();
        self
    }

    pub fn with_parents<I: Into<NodeId>>(mut self, parents: impl IntoIterator<Item = I>) -> Self {
        self.parents = parents.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_children<I: Into<NodeId>>(mut self, children: impl IntoIterator<Item = I>) -> Self {
        self.children = children.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: impl IntoIterator<Item = T>) -> fmt::Result {
    for item in items {
        write!(f, "{} ", item)?;
    }
    writeln!(f)
}

impl fmt::Display for DagNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "NodeId: {}", self.id.get())?;
        writeln!(f, "NodeName: {}", self.name)?;
        writeln!(f, "DomainSize: {}", self.domain.len())?;
        write!(f, "Domain: ")?;
        write_list(f, &self.domain)?;
        writeln!(f, "Parents Size: {}", self.parents.len())?;
        write!(f, "Parents: ")?;
        write_list(f, self.parents.iter().map(|p| p.get()))?;
        writeln!(f, "Children Size: {}", self.children.len())?;
        write!(f, "Children: ")?;
        write_list(f, self.children.iter().map(|c| c.get()))?;
        writeln!(f, "Probs Size: {}", self.probs.len())?;
        write!(f, "Probs: ")?;
        write_list(f, &self.probs)
    }
}

/// Undirected graph node.
///
/// `paths` holds the ids of all neighbours. In a well-formed [`UndirectedGraph`][crate::graph::UndirectedGraph]
/// the relation is symmetric.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UNode {
    pub id: NodeId,
    pub name: String,
    pub paths: BTreeSet<NodeId>,
}

impl UNode {
    pub fn new(id: impl Into<NodeId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            paths: BTreeSet::new(),
        }
    }

    pub fn degree(&self) -> usize {
        self.paths.len()
    }
}

/// Drops edge direction: the neighbours are the parents and the children.
impl From<&DagNode> for UNode {
    fn from(node: &DagNode) -> Self {
        Self {
            id: node.id,
            name: node.name.clone(),
            paths: node.parents.union(&node.children).copied().collect(),
        }
    }
}

impl fmt::Display for UNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "NodeId: {}", self.id.get())?;
        writeln!(f, "NodeName: {}", self.name)?;
        writeln!(f, "Paths Size: {}", self.paths.len())?;
        write!(f, "Paths: ")?;
        write_list(f, self.paths.iter().map(|p| p.get()))
    }
}
