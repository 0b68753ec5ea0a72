//! Graph to DOT (Graphviz) conversion.
//!
//! Renders networks and their derived graphs for inspection with Graphviz tools
//! like `dot` or `neato`.
//!
//! # DOT Format
//!
//! - A [`DirectedGraph`] becomes a `digraph` with one `parent -> child` edge per link.
//! - An [`UndirectedGraph`] becomes a `graph` with every edge written once. Edges
//!   added by moralization carry the configured `style` attribute.
//! - Nodes are labelled with their variable names and keyed by their ids.
//! - When a [`Query`] is given, the nodes of `X`, `Y` and `Z` are filled with the
//!   configured colors.
//!
//! # Examples
//!
//! ```
//! use dsep_rs::dsep::Query;
//! use dsep_rs::graph::DagBuilder;
//!
//! let dag = DagBuilder::new()
//!     .node(1, "A")
//!     .node(2, "B")
//!     .edge(1, 2)
//!     .build()
//!     .unwrap();
//! let query = Query::new(["A"], ["B"], Vec::<String>::new()).unwrap();
//!
//! let dot = dag.to_dot(Some(&query)).unwrap();
//! // Write to file and render with: dot -Tpng output.dot -o output.png
//! assert!(dot.contains("1 -> 2;"));
//! ```

use std::fmt::Write as _;

use crate::dsep::Query;
use crate::graph::{DirectedGraph, UndirectedGraph};
use crate::types::NodeId;

/// Configuration options for DOT output generation.
///
/// Use `DotConfig::default()` for standard settings, and struct update syntax to
/// change individual fields.
#[derive(Debug, Clone)]
pub struct DotConfig {
    /// Shape for variable nodes (default: "ellipse")
    pub node_shape: &'static str,
    /// Fill color for nodes in X (default: "lightblue")
    pub x_color: &'static str,
    /// Fill color for nodes in Y (default: "lightgreen")
    pub y_color: &'static str,
    /// Fill color for nodes in Z (default: "lightgray")
    pub z_color: &'static str,
    /// Whether to append the node id to each label (default: false)
    pub show_ids: bool,
    /// Line style for edges between married co-parents (default: "dashed")
    pub moral_edge_style: &'static str,
}

impl Default for DotConfig {
    fn default() -> Self {
        Self {
            node_shape: "ellipse",
            x_color: "lightblue",
            y_color: "lightgreen",
            z_color: "lightgray",
            show_ids: false,
            moral_edge_style: "dashed",
        }
    }
}

impl DotConfig {
    fn fill(&self, name: &str, query: Option<&Query>) -> Option<&'static str> {
        let query = query?;
        if query.x.contains(name) {
            Some(self.x_color)
        } else if query.y.contains(name) {
            Some(self.y_color)
        } else if query.z.contains(name) {
            Some(self.z_color)
        } else {
            None
        }
    }

    fn write_node(&self, dot: &mut String, id: NodeId, name: &str, query: Option<&Query>) -> std::fmt::Result {
        let label = if self.show_ids {
            format!("{} ({})", escape(name), id.get())
        } else {
            escape(name)
        };
        match self.fill(name, query) {
            Some(color) => writeln!(dot, "{} [label=\"{}\", style=filled, fillcolor={}];", id.get(), label, color),
            None => writeln!(dot, "{} [label=\"{}\"];", id.get(), label),
        }
    }
}

fn escape(name: &str) -> String {
    name.replace('\\', "\\\\").replace('"', "\\\"")
}

impl DirectedGraph {
    /// Converts the network to DOT format, highlighting the query sets if given.
    pub fn to_dot(&self, query: Option<&Query>) -> Result<String, std::fmt::Error> {
        self.to_dot_with_config(query, &DotConfig::default())
    }

    pub fn to_dot_with_config(&self, query: Option<&Query>, config: &DotConfig) -> Result<String, std::fmt::Error> {
        let mut dot = String::new();
        writeln!(dot, "digraph {{")?;
        writeln!(dot, "node [shape={}];", config.node_shape)?;

        for node in self.nodes() {
            config.write_node(&mut dot, node.id, &node.name, query)?;
        }
        for node in self.nodes() {
            for child in &node.children {
                writeln!(dot, "{} -> {};", node.id.get(), child.get())?;
            }
        }

        writeln!(dot, "}}")?;
        Ok(dot)
    }
}

impl UndirectedGraph {
    /// Converts the graph to DOT format, highlighting the query sets if given.
    pub fn to_dot(&self, query: Option<&Query>) -> Result<String, std::fmt::Error> {
        self.to_dot_with_config(query, &DotConfig::default())
    }

    pub fn to_dot_with_config(&self, query: Option<&Query>, config: &DotConfig) -> Result<String, std::fmt::Error> {
        let mut dot = String::new();
        writeln!(dot, "graph {{")?;
        writeln!(dot, "node [shape={}];", config.node_shape)?;

        for node in self.nodes() {
            config.write_node(&mut dot, node.id, &node.name, query)?;
        }
        for (a, b) in self.edges() {
            if self.is_moral_edge(a, b) {
                writeln!(dot, "{} -- {} [style={}];", a.get(), b.get(), config.moral_edge_style)?;
            } else {
                writeln!(dot, "{} -- {};", a.get(), b.get())?;
            }
        }

        writeln!(dot, "}}")?;
        Ok(dot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::DagBuilder;

    fn collider() -> DirectedGraph {
        DagBuilder::new()
            .node(1, "A")
            .node(2, "B")
            .node(3, "C")
            .edge(1, 3)
            .edge(2, 3)
            .build()
            .unwrap()
    }

    #[test]
    fn test_to_dot_directed() {
        let dot = collider().to_dot(None).unwrap();
        assert!(dot.starts_with("digraph {"));
        assert!(dot.ends_with("}\n"));
        assert!(dot.contains("1 [label=\"A\"];"));
        assert!(dot.contains("1 -> 3;"));
        assert!(dot.contains("2 -> 3;"));
    }

    #[test]
    fn test_to_dot_moral_edges_once() {
        let dot = collider().moralize().to_dot(None).unwrap();
        assert!(dot.starts_with("graph {"));
        assert!(dot.contains("1 -- 2 [style=dashed];"));
        assert!(dot.contains("1 -- 3;"));
        assert!(dot.contains("2 -- 3;"));
        assert!(!dot.contains("2 -- 1"));
        assert_eq!(dot.matches(" -- ").count(), 3);
    }

    #[test]
    fn test_to_dot_moral_edge_style() {
        let config = DotConfig {
            moral_edge_style: "bold",
            ..DotConfig::default()
        };
        let moral = collider().moralize();
        let dot = moral.to_dot_with_config(None, &config).unwrap();
        assert!(dot.contains("1 -- 2 [style=bold];"));
        assert_eq!(dot.matches("style=bold").count(), 1);

        // Removing the child keeps the marriage edge between its parents.
        let dot = moral.without(["C"]).to_dot(None).unwrap();
        assert_eq!(dot.matches(" -- ").count(), 1);
        assert!(dot.contains("1 -- 2 [style=dashed];"));

        // Removing a parent drops it.
        let dot = moral.without(["A"]).to_dot(None).unwrap();
        assert!(!dot.contains("style=dashed"));
    }

    #[test]
    fn test_to_dot_highlights_query() {
        let query = Query::new(["A"], ["B"], ["C"]).unwrap();
        let dot = collider().to_dot(Some(&query)).unwrap();
        assert!(dot.contains("1 [label=\"A\", style=filled, fillcolor=lightblue];"));
        assert!(dot.contains("2 [label=\"B\", style=filled, fillcolor=lightgreen];"));
        assert!(dot.contains("3 [label=\"C\", style=filled, fillcolor=lightgray];"));
    }

    #[test]
    fn test_to_dot_with_config() {
        let config = DotConfig {
            node_shape: "box",
            show_ids: true,
            ..DotConfig::default()
        };
        let dot = collider().to_dot_with_config(None, &config).unwrap();
        assert!(dot.contains("node [shape=box];"));
        assert!(dot.contains("3 [label=\"C (3)\"];"));
    }

    #[test]
    fn test_escape_quotes() {
        let dag = DagBuilder::new().node(1, "say \"hi\"").build().unwrap();
        let dot = dag.to_dot(None).unwrap();
        assert!(dot.contains("label=\"say \\\"hi\\\"\""));
    }
}
