//! Graph analysis algorithms.
//!
//! Four read-only algorithms over the dependency graph:
//! - high-impact ranking (out-degree)
//! - leaf enumeration (zero out-degree, sorted)
//! - central-hub ranking (Brandes betweenness centrality)
//! - bounded bidirectional BFS for subgraph extraction
//!
//! Rankings order descending by score. Score ties break lexicographically by
//! name so results are deterministic for a given vertex set, regardless of
//! insertion order.

use std::collections::{BTreeSet, HashMap, VecDeque};

use petgraph::graph::NodeIndex;
use petgraph::Direction;

use crate::graph::DependencyGraph;

impl DependencyGraph {
    /// Rank views by number of dependents (out-degree), descending.
    ///
    /// High-impact views are the ones many other views read from; they are
    /// typically the foundational views of the schema.
    #[must_use]
    pub fn find_high_impact_views(&self, limit: usize) -> Vec<(String, usize)> {
        let mut ranked: Vec<(String, usize)> = self
            .vertices()
            .map(|name| (name.to_string(), self.dependent_count(name)))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(limit);
        ranked
    }

    /// Views with no dependents, sorted ascending.
    ///
    /// Leaf views are likely final outputs, reports, or end-user facing
    /// views; nothing in the loaded schema reads from them.
    #[must_use]
    pub fn find_leaf_views(&self) -> Vec<String> {
        let mut leaves: Vec<String> = self
            .vertices()
            .filter(|name| self.dependent_count(name) == 0)
            .map(str::to_string)
            .collect();
        leaves.sort_unstable();
        leaves
    }

    /// Rank views by betweenness centrality, descending.
    ///
    /// Betweenness measures how often a vertex sits on shortest paths between
    /// other vertices. A high score marks a hub that connects upstream
    /// sources to downstream consumers. Scores are absolute (unnormalized)
    /// Brandes sums over ordered vertex pairs with unit edge weights.
    #[must_use]
    pub fn find_central_hubs(&self, limit: usize) -> Vec<(String, f64)> {
        let graph = self.inner();
        let node_count = graph.node_count();
        let mut centrality = vec![0.0f64; node_count];

        for source in graph.node_indices() {
            // Forward phase: BFS from `source`, counting shortest paths.
            let mut stack: Vec<NodeIndex> = Vec::new();
            let mut predecessors: Vec<Vec<NodeIndex>> = vec![Vec::new(); node_count];
            let mut sigma = vec![0.0f64; node_count];
            let mut distance: Vec<Option<usize>> = vec![None; node_count];
            sigma[source.index()] = 1.0;
            distance[source.index()] = Some(0);

            let mut queue = VecDeque::from([source]);
            while let Some(vertex) = queue.pop_front() {
                stack.push(vertex);
                let Some(vertex_distance) = distance[vertex.index()] else {
                    continue;
                };
                for neighbour in graph.neighbors_directed(vertex, Direction::Outgoing) {
                    if distance[neighbour.index()].is_none() {
                        distance[neighbour.index()] = Some(vertex_distance + 1);
                        queue.push_back(neighbour);
                    }
                    if distance[neighbour.index()] == Some(vertex_distance + 1) {
                        sigma[neighbour.index()] += sigma[vertex.index()];
                        predecessors[neighbour.index()].push(vertex);
                    }
                }
            }

            // Backward phase: accumulate pair dependencies in reverse
            // BFS order.
            let mut delta = vec![0.0f64; node_count];
            while let Some(vertex) = stack.pop() {
                for &predecessor in &predecessors[vertex.index()] {
                    delta[predecessor.index()] += sigma[predecessor.index()]
                        / sigma[vertex.index()]
                        * (1.0 + delta[vertex.index()]);
                }
                if vertex != source {
                    centrality[vertex.index()] += delta[vertex.index()];
                }
            }
        }

        let mut ranked: Vec<(String, f64)> = graph
            .node_indices()
            .map(|node| (graph[node].clone(), centrality[node.index()]))
            .collect();
        ranked.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        ranked.truncate(limit);
        ranked
    }

    /// Extract the set of views within the given depths of a focus view.
    ///
    /// Traverses incoming edges up to `depth_upstream` levels and outgoing
    /// edges up to `depth_downstream` levels, each vertex recorded at its
    /// first (shallowest) discovery. If `max_nodes > 0` and the result
    /// exceeds it, the focus is retained and the remaining slots go to the
    /// members with the highest combined degree in the full graph.
    ///
    /// Returns the empty set when `focus` is not a vertex.
    #[must_use]
    pub fn find_subgraph(
        &self,
        focus: &str,
        depth_upstream: usize,
        depth_downstream: usize,
        max_nodes: usize,
    ) -> BTreeSet<String> {
        let Some(focus_node) = self.node_index(focus) else {
            return BTreeSet::new();
        };

        let mut members = BTreeSet::from([focus.to_string()]);
        if depth_upstream > 0 {
            for node in self.bounded_bfs(focus_node, depth_upstream, Direction::Incoming) {
                members.insert(self.inner()[node].clone());
            }
        }
        if depth_downstream > 0 {
            for node in self.bounded_bfs(focus_node, depth_downstream, Direction::Outgoing) {
                members.insert(self.inner()[node].clone());
            }
        }

        if max_nodes > 0 && members.len() > max_nodes {
            let mut others: Vec<String> = members
                .iter()
                .filter(|name| name.as_str() != focus)
                .cloned()
                .collect();
            others.sort_by(|a, b| {
                self.combined_degree(b)
                    .cmp(&self.combined_degree(a))
                    .then_with(|| a.cmp(b))
            });
            others.truncate(max_nodes.saturating_sub(1));

            let mut limited: BTreeSet<String> = others.into_iter().collect();
            limited.insert(focus.to_string());
            return limited;
        }

        members
    }

    /// BFS following edges in one direction, recording each vertex at its
    /// first discovery, without expanding past `max_depth` levels.
    fn bounded_bfs(
        &self,
        start: NodeIndex,
        max_depth: usize,
        direction: Direction,
    ) -> Vec<NodeIndex> {
        let graph = self.inner();
        let mut depths: HashMap<NodeIndex, usize> = HashMap::from([(start, 0)]);
        let mut queue = VecDeque::from([start]);
        let mut discovered = Vec::new();

        while let Some(current) = queue.pop_front() {
            let Some(&depth) = depths.get(&current) else {
                continue;
            };
            if depth >= max_depth {
                continue;
            }
            for neighbour in graph.neighbors_directed(current, direction) {
                if !depths.contains_key(&neighbour) {
                    depths.insert(neighbour, depth + 1);
                    discovered.push(neighbour);
                    queue.push_back(neighbour);
                }
            }
        }
        discovered
    }

    fn combined_degree(&self, name: &str) -> usize {
        self.dependency_count(name) + self.dependent_count(name)
    }
}
