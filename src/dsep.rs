//! d-separation queries.
//!
//! `X` and `Y` are d-separated by `Z` in a DAG `G` exactly when they are u-separated
//! by `Z` in the moral graph of the ancestral subgraph of `X ∪ Y ∪ Z`. The test
//! therefore runs in three steps:
//!
//! 1. [`DirectedGraph::ancestral_subgraph`] restricted to the query variables,
//! 2. [`DirectedGraph::moralize`],
//! 3. [`UndirectedGraph::is_u_separated`].
//!
//! Each step builds a fresh graph, so one network can serve many queries.

use std::collections::BTreeSet;
use std::fmt;

use log::{debug, info, warn};

use crate::error::{QueryError, QuerySet};
use crate::graph::{DirectedGraph, UndirectedGraph};

/// A separation query `<X|Z|Y>` over variable names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub x: BTreeSet<String>,
    pub y: BTreeSet<String>,
    pub z: BTreeSet<String>,
}

fn collect<S: Into<String>>(names: impl IntoIterator<Item = S>) -> BTreeSet<String> {
    names.into_iter().map(Into::into).collect()
}

impl Query {
    /// Creates a query, rejecting a name that occurs in more than one set.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsep_rs::dsep::Query;
    ///
    /// let q = Query::new(["A"], ["C"], ["B"]).unwrap();
    /// assert_eq!(q.to_string(), "<A|B|C>");
    ///
    /// assert!(Query::new(["A"], ["A"], Vec::<String>::new()).is_err());
    /// ```
    pub fn new<X, Y, Z>(
        x: impl IntoIterator<Item = X>,
        y: impl IntoIterator<Item = Y>,
        z: impl IntoIterator<Item = Z>,
    ) -> Result<Self, QueryError>
    where
        X: Into<String>,
        Y: Into<String>,
        Z: Into<String>,
    {
        let query = Self::unchecked(x, y, z);
        query.check_disjoint()?;
        Ok(query)
    }

    /// Creates a query without checking that the sets are disjoint.
    ///
    /// The verdict of a non-disjoint query is not meaningful.
    pub fn unchecked<X, Y, Z>(
        x: impl IntoIterator<Item = X>,
        y: impl IntoIterator<Item = Y>,
        z: impl IntoIterator<Item = Z>,
    ) -> Self
    where
        X: Into<String>,
        Y: Into<String>,
        Z: Into<String>,
    {
        Self {
            x: collect(x),
            y: collect(y),
            z: collect(z),
        }
    }

    fn check_disjoint(&self) -> Result<(), QueryError> {
        let pairs = [
            (&self.x, QuerySet::X, &self.y, QuerySet::Y),
            (&self.x, QuerySet::X, &self.z, QuerySet::Z),
            (&self.y, QuerySet::Y, &self.z, QuerySet::Z),
        ];
        for (a, first, b, second) in pairs {
            if let Some(name) = a.intersection(b).next() {
                return Err(QueryError::Overlap {
                    name: name.clone(),
                    first,
                    second,
                });
            }
        }
        Ok(())
    }

    /// All names mentioned by the query.
    pub fn variables(&self) -> BTreeSet<&str> {
        self.x.iter().chain(&self.y).chain(&self.z).map(String::as_str).collect()
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let join = |set: &BTreeSet<String>| set.iter().map(String::as_str).collect::<Vec<_>>().join(",");
        write!(f, "<{}|{}|{}>", join(&self.x), join(&self.z), join(&self.y))
    }
}

/// The outcome of a d-separation test together with its intermediate graphs.
#[derive(Debug, Clone)]
pub struct DSeparation {
    /// Ancestral subgraph of the query variables.
    pub ancestral: DirectedGraph,
    /// Moral graph of [`DSeparation::ancestral`].
    pub moral: UndirectedGraph,
    pub separated: bool,
}

impl DirectedGraph {
    /// Tests whether `query.x` and `query.y` are d-separated by `query.z`.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsep_rs::dsep::Query;
    /// use dsep_rs::graph::DagBuilder;
    ///
    /// // Chain: A -> B -> C
    /// let dag = DagBuilder::new()
    ///     .node(1, "A")
    ///     .node(2, "B")
    ///     .node(3, "C")
    ///     .edge(1, 2)
    ///     .edge(2, 3)
    ///     .build()
    ///     .unwrap();
    ///
    /// assert!(dag.d_separated(&Query::new(["A"], ["C"], ["B"]).unwrap()));
    /// assert!(!dag.d_separated(&Query::new(["A"], ["C"], Vec::<String>::new()).unwrap()));
    /// ```
    pub fn d_separated(&self, query: &Query) -> bool {
        self.d_separation(query).separated
    }

    /// Runs the d-separation test and keeps the intermediate graphs for inspection.
    pub fn d_separation(&self, query: &Query) -> DSeparation {
        info!("Checking d-separation {}", query);

        let variables = query.variables();
        let targets = self.ids_of(&variables);
        debug!("query variables resolve to {:?}", targets);
        if targets.len() < variables.len() {
            warn!("query variables not in the network: {:?}", self.unknown_names(&variables));
        }

        info!("Generating ancestral subgraph...");
        let ancestral = self.ancestral_subgraph(&targets);

        info!("Generating moral graph...");
        let moral = ancestral.moralize();

        info!("Checking u-separation...");
        let separated = moral.is_u_separated(&query.x, &query.z, &query.y);
        info!("{}G : {}", query, separated);

        DSeparation {
            ancestral,
            moral,
            separated,
        }
    }

    /// Names from `names` that match no node; they are ignored by the separation test.
    fn unknown_names<'a>(&self, names: &BTreeSet<&'a str>) -> Vec<&'a str> {
        names.iter().copied().filter(|name| self.find(name).is_none()).collect()
    }
}

/// Tests whether `x` and `y` are d-separated by `z` in `graph`.
///
/// The sets are taken as given; use [`Query::new`] to have them checked for overlap.
pub fn d_separated(graph: &DirectedGraph, x: &BTreeSet<String>, z: &BTreeSet<String>, y: &BTreeSet<String>) -> bool {
    let query = Query {
        x: x.clone(),
        y: y.clone(),
        z: z.clone(),
    };
    graph.d_separated(&query)
}
