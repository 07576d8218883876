//! The view dependency graph.
//!
//! A directed graph over fully-qualified names where an edge `u -> v` means
//! "building `v` reads from `u`": `u` is upstream, `v` depends on it. Built
//! incrementally by [`DependencyGraph::add_view`] and read-only for the rest
//! of the session.
//!
//! Edge direction reminder:
//! - `out_degree(v)` = number of views that depend on `v` (its dependents)
//! - `in_degree(v)` = number of tables/views `v` reads from
//!
//! Cycles are permitted; real schemas occasionally contain them and nothing
//! here assumes acyclicity. Parallel edges between the same ordered pair are
//! collapsed.

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use tracing::debug;

use crate::error::Result;
use crate::parser::SqlParser;

/// Directed dependency graph over view and table names.
pub struct DependencyGraph {
    graph: DiGraph<String, ()>,
    nodes: HashMap<String, NodeIndex>,
    parser: SqlParser,
}

impl DependencyGraph {
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            nodes: HashMap::new(),
            parser: SqlParser::new(),
        }
    }

    /// Add a view and its dependencies to the graph.
    ///
    /// Parses the SQL, extracts external references, and inserts one edge
    /// `dependency -> view` per distinct reference. Vertices are created on
    /// demand for both the view and anything it reads from; re-adding an
    /// existing edge is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Parse`] if the SQL does not parse. The view's
    /// own vertex is still registered in that case, so callers that skip
    /// misparsing views keep a consistent vertex set.
    pub fn add_view(&mut self, view_name: &str, sql: &str) -> Result<()> {
        let view_node = self.ensure_vertex(view_name);
        let dependencies = self.parser.extract_dependencies(sql)?;

        for dependency in dependencies {
            let dep_node = self.ensure_vertex(dependency.fully_qualified_name());
            if self.graph.find_edge(dep_node, view_node).is_none() {
                self.graph.add_edge(dep_node, view_node, ());
            }
        }
        debug!(view = view_name, "view added to dependency graph");
        Ok(())
    }

    fn ensure_vertex(&mut self, name: &str) -> NodeIndex {
        if let Some(&node) = self.nodes.get(name) {
            return node;
        }
        let node = self.graph.add_node(name.to_string());
        self.nodes.insert(name.to_string(), node);
        node
    }

    /// Whether a name is a vertex in the graph.
    #[must_use]
    pub fn contains_view(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    /// Total number of vertices (views plus referenced tables).
    #[must_use]
    pub fn view_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of views that directly depend on `name`. Zero for unknown names.
    #[must_use]
    pub fn dependent_count(&self, name: &str) -> usize {
        self.nodes
            .get(name)
            .map_or(0, |&n| self.graph.edges_directed(n, Direction::Outgoing).count())
    }

    /// Number of tables/views `name` directly reads from. Zero for unknown names.
    #[must_use]
    pub fn dependency_count(&self, name: &str) -> usize {
        self.nodes
            .get(name)
            .map_or(0, |&n| self.graph.edges_directed(n, Direction::Incoming).count())
    }

    /// Names of the views that directly depend on `name` (outgoing neighbours).
    #[must_use]
    pub fn dependents_of(&self, name: &str) -> Vec<String> {
        self.neighbours(name, Direction::Outgoing)
    }

    /// Names `name` directly reads from (incoming neighbours).
    #[must_use]
    pub fn dependencies_of(&self, name: &str) -> Vec<String> {
        self.neighbours(name, Direction::Incoming)
    }

    fn neighbours(&self, name: &str, direction: Direction) -> Vec<String> {
        let Some(&node) = self.nodes.get(name) else {
            return Vec::new();
        };
        self.graph
            .neighbors_directed(node, direction)
            .map(|n| self.graph[n].clone())
            .collect()
    }

    /// Whether the graph has an edge `from -> to`.
    #[must_use]
    pub fn has_edge(&self, from: &str, to: &str) -> bool {
        match (self.nodes.get(from), self.nodes.get(to)) {
            (Some(&f), Some(&t)) => self.graph.find_edge(f, t).is_some(),
            _ => false,
        }
    }

    /// All vertex names, in arbitrary order.
    pub fn vertices(&self) -> impl Iterator<Item = &str> {
        self.graph.node_weights().map(String::as_str)
    }

    /// All edges as `(dependency, dependent)` name pairs, in arbitrary order.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.graph.edge_references().map(|edge| {
            (
                self.graph[edge.source()].as_str(),
                self.graph[edge.target()].as_str(),
            )
        })
    }

    pub(crate) fn node_index(&self, name: &str) -> Option<NodeIndex> {
        self.nodes.get(name).copied()
    }

    pub(crate) fn inner(&self) -> &DiGraph<String, ()> {
        &self.graph
    }
}

impl Default for DependencyGraph {
    fn default() -> Self {
        Self::new()
    }
}
