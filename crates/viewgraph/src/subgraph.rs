//! Focused subgraph extraction.
//!
//! Wraps the bounded BFS behind the operation the dispatch layer exposes:
//! checks that the focus view exists, applies the default node cap, and
//! reports whether the cap was reached.

use crate::error::{Error, Result};
use crate::graph::DependencyGraph;
use crate::types::SubgraphResult;

/// Default node cap; 50 keeps the resulting diagram readable.
pub const DEFAULT_MAX_NODES: usize = 50;

/// Extract a focused subgraph around a specific view.
///
/// `max_nodes` of zero means unlimited; when absent it defaults to
/// [`DEFAULT_MAX_NODES`]. The `truncated` flag on the result is set when the
/// cap was reached.
///
/// # Errors
///
/// Returns [`Error::ViewNotFound`] when `focus` is not a vertex of the graph.
pub fn extract_subgraph(
    graph: &DependencyGraph,
    focus: &str,
    depth_upstream: usize,
    depth_downstream: usize,
    max_nodes: Option<usize>,
) -> Result<SubgraphResult> {
    if !graph.contains_view(focus) {
        return Err(Error::ViewNotFound(focus.to_string()));
    }

    let max_nodes = max_nodes.unwrap_or(DEFAULT_MAX_NODES);
    let views = graph.find_subgraph(focus, depth_upstream, depth_downstream, max_nodes);
    let truncated = max_nodes > 0 && views.len() >= max_nodes;

    Ok(SubgraphResult {
        views,
        focus_view: focus.to_string(),
        depth_upstream,
        depth_downstream,
        truncated,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(length: usize) -> DependencyGraph {
        let mut graph = DependencyGraph::new();
        for i in 1..length {
            graph
                .add_view(&format!("v{}", i + 1), &format!("SELECT * FROM v{i}"))
                .unwrap();
        }
        graph
    }

    #[test]
    fn missing_focus_is_view_not_found() {
        let graph = chain(3);
        let err = extract_subgraph(&graph, "ghost", 1, 1, None).unwrap_err();
        assert!(matches!(err, Error::ViewNotFound(name) if name == "ghost"));
    }

    #[test]
    fn zero_depths_yield_a_singleton() {
        let graph = chain(3);
        let result = extract_subgraph(&graph, "v2", 0, 0, None).unwrap();
        assert_eq!(result.view_count(), 1);
        assert!(result.contains("v2"));
        assert!(!result.truncated);
    }

    #[test]
    fn cap_sets_the_truncated_flag() {
        let graph = chain(5);
        let result = extract_subgraph(&graph, "v3", 2, 2, Some(3)).unwrap();
        assert_eq!(result.view_count(), 3);
        assert!(result.contains("v3"));
        assert!(result.truncated);
    }

    #[test]
    fn unlimited_cap_never_truncates() {
        let graph = chain(5);
        let result = extract_subgraph(&graph, "v3", 4, 4, Some(0)).unwrap();
        assert_eq!(result.view_count(), 5);
        assert!(!result.truncated);
    }

    #[test]
    fn depths_are_recorded_on_the_result() {
        let graph = chain(4);
        let result = extract_subgraph(&graph, "v2", 1, 2, None).unwrap();
        assert_eq!(result.depth_upstream, 1);
        assert_eq!(result.depth_downstream, 2);
    }
}
