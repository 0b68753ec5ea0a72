//! Error types.
//!
//! The separation algorithms themselves cannot fail. Errors arise only when a graph
//! or a query is constructed from caller data, or when text input is parsed.

use std::fmt;
use std::io;

use crate::types::NodeId;

/// A structural defect found while building a [`DirectedGraph`][crate::graph::DirectedGraph].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// Two nodes share an id.
    DuplicateId(NodeId),
    /// Two nodes share a name.
    DuplicateName(String),
    /// A node lists a parent that does not exist.
    DanglingParent { node: NodeId, parent: NodeId },
    /// A node lists a child that does not exist.
    DanglingChild { node: NodeId, child: NodeId },
    /// `parent` and `child` disagree about the edge between them.
    InconsistentEdge { parent: NodeId, child: NodeId },
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphError::DuplicateId(id) => write!(f, "duplicate node id {}", id),
            GraphError::DuplicateName(name) => write!(f, "duplicate node name '{}'", name),
            GraphError::DanglingParent { node, parent } => {
                write!(f, "node {} refers to missing parent {}", node, parent)
            }
            GraphError::DanglingChild { node, child } => {
                write!(f, "node {} refers to missing child {}", node, child)
            }
            GraphError::InconsistentEdge { parent, child } => {
                write!(f, "edge {} -> {} is recorded on one side only", parent, child)
            }
        }
    }
}

impl std::error::Error for GraphError {}

/// Which of the three query sets a name belongs to.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum QuerySet {
    X,
    Y,
    Z,
}

impl fmt::Display for QuerySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuerySet::X => write!(f, "X"),
            QuerySet::Y => write!(f, "Y"),
            QuerySet::Z => write!(f, "Z"),
        }
    }
}

/// An invalid separation query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// `name` occurs in two of the sets, which must be pairwise disjoint.
    Overlap { name: String, first: QuerySet, second: QuerySet },
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryError::Overlap { name, first, second } => {
                write!(f, "variable '{}' occurs in both {} and {}", name, first, second)
            }
        }
    }
}

impl std::error::Error for QueryError {}

/// Error type for reading networks and queries.
#[derive(Debug)]
pub enum ParseError {
    /// File I/O error.
    Io(io::Error),
    /// Malformed input at the given (1-based) line.
    Syntax { line: usize, message: String },
    /// The parsed nodes do not form a valid graph.
    Graph(GraphError),
    /// The parsed sets do not form a valid query.
    Query(QueryError),
}

impl ParseError {
    pub(crate) fn syntax(line: usize, message: impl Into<String>) -> Self {
        ParseError::Syntax {
            line,
            message: message.into(),
        }
    }
}

impl From<io::Error> for ParseError {
    fn from(e: io::Error) -> Self {
        ParseError::Io(e)
    }
}

impl From<GraphError> for ParseError {
    fn from(e: GraphError) -> Self {
        ParseError::Graph(e)
    }
}

impl From<QueryError> for ParseError {
    fn from(e: QueryError) -> Self {
        ParseError::Query(e)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Io(e) => write!(f, "I/O error: {}", e),
            ParseError::Syntax { line, message } => write!(f, "Parse error at line {}: {}", line, message),
            ParseError::Graph(e) => write!(f, "Invalid network: {}", e),
            ParseError::Query(e) => write!(f, "Invalid query: {}", e),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Io(e) => Some(e),
            ParseError::Graph(e) => Some(e),
            ParseError::Query(e) => Some(e),
            ParseError::Syntax { .. } => None,
        }
    }
}
