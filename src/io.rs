//! Reading networks and queries from text.
//!
//! # Network format
//!
//! ```text
//! <node count>
//!
//! <domain size> <label>       # the last '_'-separated segment of <label> is the node id
//! <name>
//! <value>                     # one line per domain value
//! <k> <child id>*k
//! <k> <parent id>*k
//! <x> <y>                     # layout coordinates, ignored
//! <probability count>
//! <p> <p> ...                 # probability rows, up to the next blank line
//!
//! <next node> ...
//! ```
//!
//! Tokens are separated by any amount of whitespace. Only the first token of the
//! name and domain lines is used.
//!
//! # Query format
//!
//! Three lines holding the names of `X`, `Y` and `Z`, in that order. The token `{}`
//! stands for the empty set, and missing lines are empty sets as well.

use std::fs;
use std::iter::Peekable;
use std::path::Path;
use std::str::FromStr;

use log::{debug, warn};

use crate::dsep::Query;
use crate::error::ParseError;
use crate::graph::DirectedGraph;
use crate::node::DagNode;
use crate::types::NodeId;

/// Marker for an empty name set in query files.
pub const EMPTY_SET: &str = "{}";

struct Lines<'a> {
    inner: Peekable<std::iter::Enumerate<std::str::Lines<'a>>>,
    last: usize,
}

impl<'a> Lines<'a> {
    fn new(content: &'a str) -> Self {
        Self {
            inner: content.lines().enumerate().peekable(),
            last: 0,
        }
    }

    fn skip_blank(&mut self) {
        while let Some((_, line)) = self.inner.peek() {
            if !line.trim().is_empty() {
                break;
            }
            self.inner.next();
        }
    }

    fn at_blank_or_end(&mut self) -> bool {
        self.inner.peek().map_or(true, |(_, line)| line.trim().is_empty())
    }

    /// Next line as `(line number, tokens)`.
    fn expect(&mut self, what: &str) -> Result<(usize, Vec<&'a str>), ParseError> {
        match self.inner.next() {
            Some((i, line)) => {
                self.last = i + 1;
                Ok((i + 1, line.split_whitespace().collect()))
            }
            None => Err(ParseError::syntax(self.last + 1, format!("unexpected end of input, expected {}", what))),
        }
    }
}

fn number<T: FromStr>(line: usize, token: Option<&&str>, what: &str) -> Result<T, ParseError> {
    let token = token.ok_or_else(|| ParseError::syntax(line, format!("missing {}", what)))?;
    token
        .parse()
        .map_err(|_| ParseError::syntax(line, format!("invalid {} '{}'", what, token)))
}

fn node_id(line: usize, label: Option<&&str>) -> Result<NodeId, ParseError> {
    let label = *label.ok_or_else(|| ParseError::syntax(line, "missing node label"))?;
    let raw = label.rsplit('_').next().unwrap_or(label);
    raw.parse::<u32>()
        .map(NodeId::new)
        .map_err(|_| ParseError::syntax(line, format!("node label '{}' does not end in a numeric id", label)))
}

fn id_list(lines: &mut Lines<'_>, what: &str) -> Result<Vec<NodeId>, ParseError> {
    let (line, toks) = lines.expect(what)?;
    let count: usize = number(line, toks.first(), &format!("{} count", what))?;
    if toks.len() - 1 != count {
        return Err(ParseError::syntax(
            line,
            format!("{} count is {} but {} ids follow", what, count, toks.len().saturating_sub(1)),
        ));
    }
    toks[1..]
        .iter()
        .map(|t| number(line, Some(t), &format!("{} id", what)).map(NodeId::new))
        .collect()
}

fn parse_node(lines: &mut Lines<'_>) -> Result<DagNode, ParseError> {
    lines.skip_blank();

    let (line, toks) = lines.expect("node header")?;
    let domain_size: usize = number(line, toks.first(), "domain size")?;
    let id = node_id(line, toks.get(1))?;

    let (line, toks) = lines.expect("node name")?;
    let name = *toks.first().ok_or_else(|| ParseError::syntax(line, "missing node name"))?;

    let mut domain = Vec::new();
    for _ in 0..domain_size {
        let (line, toks) = lines.expect("domain value")?;
        let value = toks.first().ok_or_else(|| ParseError::syntax(line, "missing domain value"))?;
        domain.push(value.to_string());
    }

    let children = id_list(lines, "child")?;
    let parents = id_list(lines, "parent")?;

    lines.expect("coordinates")?;

    let (line, toks) = lines.expect("probability count")?;
    let num_probs: usize = number(line, toks.first(), "probability count")?;

    let mut probs = Vec::new();
    while !lines.at_blank_or_end() {
        let (line, toks) = lines.expect("probabilities")?;
        for t in &toks {
            probs.push(number::<f64>(line, Some(t), "probability")?);
        }
    }
    if probs.len() != num_probs {
        warn!(
            "node {} '{}' declares {} probabilities but lists {}",
            id,
            name,
            num_probs,
            probs.len()
        );
    }

    debug!(
        "parsed node {} '{}' ({} parents, {} children)",
        id,
        name,
        parents.len(),
        children.len()
    );
    Ok(DagNode::new(id, name)
        .with_domain(domain)
        .with_parents(parents)
        .with_children(children)
        .with_probs(probs))
}

/// Parses a network description.
///
/// # Examples
///
/// ```
/// use dsep_rs::io::parse_network;
///
/// let text = "\
/// 2
///
/// 2 node_0_0_0_7
/// Rain
/// yes
/// no
/// 1 9
/// 0
/// 0 0
/// 2
/// 0.2 0.8
///
/// 2 node_0_0_0_9
/// Wet
/// yes
/// no
/// 0
/// 1 7
/// 0 0
/// 4
/// 0.9 0.1
/// 0.1 0.9
/// ";
/// let dag = parse_network(text).unwrap();
/// assert_eq!(dag.len(), 2);
/// assert_eq!(dag.find("Wet").unwrap().parents.len(), 1);
/// ```
pub fn parse_network(content: &str) -> Result<DirectedGraph, ParseError> {
    let mut lines = Lines::new(content);
    lines.skip_blank();

    let (line, toks) = lines.expect("node count")?;
    let count: usize = number(line, toks.first(), "node count")?;
    debug!("parsing network with {} nodes", count);

    let nodes = (0..count).map(|_| parse_node(&mut lines)).collect::<Result<Vec<_>, _>>()?;

    lines.skip_blank();
    if let Some((i, _)) = lines.inner.peek() {
        warn!("ignoring trailing input from line {}", i + 1);
    }

    Ok(DirectedGraph::new(nodes)?)
}

/// Reads a network description from a file.
pub fn read_network<P: AsRef<Path>>(path: P) -> Result<DirectedGraph, ParseError> {
    let content = fs::read_to_string(path)?;
    parse_network(&content)
}

fn name_set(line: Option<&str>) -> Vec<&str> {
    line.map(|l| l.split_whitespace().filter(|t| *t != EMPTY_SET).collect())
        .unwrap_or_default()
}

/// Parses a query: the names of `X`, `Y` and `Z` on three lines.
///
/// The sets must be pairwise disjoint.
///
/// # Examples
///
/// ```
/// use dsep_rs::io::parse_query;
///
/// let q = parse_query("A\nC\n{}\n").unwrap();
/// assert!(q.x.contains("A"));
/// assert!(q.z.is_empty());
/// ```
pub fn parse_query(content: &str) -> Result<Query, ParseError> {
    let mut lines = content.lines();
    let x = name_set(lines.next());
    let y = name_set(lines.next());
    let z = name_set(lines.next());
    Ok(Query::new(x, y, z)?)
}

/// Reads a query from a file.
pub fn read_query<P: AsRef<Path>>(path: P) -> Result<Query, ParseError> {
    let content = fs::read_to_string(path)?;
    parse_query(&content)
}
