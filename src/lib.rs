//! # dsep-rs: d-separation in Bayesian networks
//!
//! **`dsep-rs`** decides whether two groups of variables `X` and `Y` are
//! **d-separated** by a third group `Z` in the DAG of a Bayesian network, which
//! tells whether `X` and `Y` are conditionally independent given `Z` in every
//! distribution the network can represent.
//!
//! ## How it works
//!
//! The test uses the classic reduction to undirected separation:
//!
//! 1. Keep only the **ancestral subgraph** of `X ∪ Y ∪ Z` (the query variables and
//!    everything with a directed path into them).
//! 2. **Moralize** it: marry every pair of parents that share a child and drop
//!    edge directions.
//! 3. Delete `Z` and check whether any node of `Y` is still **reachable** from `X`.
//!
//! `X` and `Y` are d-separated by `Z` exactly when step 3 finds no path.
//!
//! ## Key Features
//!
//! - **Id-keyed graphs**: nodes are addressed by caller-assigned [`NodeId`][crate::types::NodeId]s, which need not be contiguous.
//! - **Pure queries**: every step builds a fresh graph, so one loaded network answers any number of queries.
//! - **Diagnostics**: [`DirectedGraph::d_separation`][crate::graph::DirectedGraph::d_separation] returns the intermediate graphs, and [`dot`] renders them.
//!
//! ## Basic Usage
//!
//! ```rust
//! use dsep_rs::dsep::Query;
//! use dsep_rs::graph::DagBuilder;
//!
//! // Collider: A -> C <- B
//! let dag = DagBuilder::new()
//!     .node(1, "A")
//!     .node(2, "B")
//!     .node(3, "C")
//!     .edge(1, 3)
//!     .edge(2, 3)
//!     .build()
//!     .unwrap();
//!
//! // A and B are marginally independent...
//! let q = Query::new(["A"], ["B"], Vec::<String>::new()).unwrap();
//! assert!(dag.d_separated(&q));
//!
//! // ...but dependent once the common effect is observed.
//! let q = Query::new(["A"], ["B"], ["C"]).unwrap();
//! assert!(!dag.d_separated(&q));
//! ```
//!
//! ## Core Components
//!
//! - **[`graph`]**: [`DirectedGraph`][crate::graph::DirectedGraph], [`UndirectedGraph`][crate::graph::UndirectedGraph] and the [`DagBuilder`][crate::graph::DagBuilder].
//! - **[`ancestral`]**, **[`moral`]**, **[`usep`]**: the three steps of the test.
//! - **[`dsep`]**: [`Query`][crate::dsep::Query] and the combined d-separation test.
//! - **[`io`]**: reading networks and queries from text files.

pub mod ancestral;
pub mod dot;
pub mod dsep;
pub mod error;
pub mod graph;
pub mod io;
pub mod moral;
pub mod node;
pub mod types;
pub mod usep;
