//! Mermaid diagram rendering.
//!
//! Converts a subgraph (or the whole schema) into Mermaid `graph TB` syntax.
//! Node identifiers are synthetic (`node1`, `node2`, ...) and assigned in
//! sorted member order so equal inputs always render identical output.
//!
//! Styling in subgraph renders:
//! - focus view: red with a bold border
//! - direct upstream dependencies: blue
//! - direct downstream dependents: green

use std::collections::BTreeMap;

use crate::graph::DependencyGraph;
use crate::types::SubgraphResult;

/// Largest member set worth rendering; past this the diagram is unreadable.
const MAX_RENDERABLE_NODES: usize = 100;

const FOCUS_STYLE: &str = "fill:#FF6B6B,stroke:#D32F2F,stroke-width:3px";
const UPSTREAM_STYLE: &str = "fill:#90CAF9,stroke:#1976D2";
const DOWNSTREAM_STYLE: &str = "fill:#A5D6A7,stroke:#388E3C";

/// Render a subgraph as a Mermaid diagram with focus/upstream/downstream
/// styling.
///
/// Empty subgraphs render a placeholder; oversize subgraphs render an error
/// node naming the actual size rather than an unreadable diagram.
#[must_use]
pub fn render_subgraph(graph: &DependencyGraph, subgraph: &SubgraphResult) -> String {
    if subgraph.views.is_empty() {
        return "graph TB\n    empty[No views in subgraph]".to_string();
    }
    if subgraph.view_count() > MAX_RENDERABLE_NODES {
        return format!(
            "graph TB\n    error[Subgraph too large: {} views. Maximum {MAX_RENDERABLE_NODES} for readability.]",
            subgraph.view_count()
        );
    }

    let members: Vec<&str> = subgraph.views.iter().map(String::as_str).collect();
    let node_ids = assign_node_ids(&members);

    let mut mermaid = String::from("```mermaid\ngraph TB\n");
    declare_nodes(&mut mermaid, &members, &node_ids);
    mermaid.push('\n');

    // Edges restricted to the member set, in sorted order for stable output.
    for view in &subgraph.views {
        let mut targets = graph.dependents_of(view);
        targets.sort_unstable();
        for target in targets {
            if let (Some(source_id), Some(target_id)) =
                (node_ids.get(view.as_str()), node_ids.get(target.as_str()))
            {
                mermaid.push_str(&format!("    {source_id} --> {target_id}\n"));
            }
        }
    }
    mermaid.push('\n');

    if let Some(focus_id) = node_ids.get(subgraph.focus_view.as_str()) {
        mermaid.push_str(&format!("    style {focus_id} {FOCUS_STYLE}\n"));
    }
    for (role, style) in [
        (graph.dependencies_of(&subgraph.focus_view), UPSTREAM_STYLE),
        (graph.dependents_of(&subgraph.focus_view), DOWNSTREAM_STYLE),
    ] {
        let mut in_members: Vec<String> = role
            .into_iter()
            .filter(|name| subgraph.contains(name))
            .collect();
        in_members.sort_unstable();
        for name in in_members {
            if let Some(node_id) = node_ids.get(name.as_str()) {
                mermaid.push_str(&format!("    style {node_id} {style}\n"));
            }
        }
    }
    mermaid.push_str("```\n");

    mermaid
}

/// Render the entire schema as a Mermaid diagram, without per-node styling.
///
/// Feasible only for small schemas; past 100 vertices the output is an error
/// node directing the caller to extract a subgraph first.
#[must_use]
pub fn render_full_schema(graph: &DependencyGraph) -> String {
    if graph.view_count() == 0 {
        return "graph TB\n    empty[No views in schema]".to_string();
    }
    if graph.view_count() > MAX_RENDERABLE_NODES {
        return format!(
            "graph TB\n    error[Schema too large: {} views. Use extractSubgraph instead.]",
            graph.view_count()
        );
    }

    let mut views: Vec<&str> = graph.vertices().collect();
    views.sort_unstable();
    let node_ids = assign_node_ids(&views);

    let mut mermaid = String::from("```mermaid\ngraph TB\n");
    declare_nodes(&mut mermaid, &views, &node_ids);
    mermaid.push('\n');

    let mut edges: Vec<(&str, &str)> = graph.edges().collect();
    edges.sort_unstable();
    for (source, target) in edges {
        if let (Some(source_id), Some(target_id)) = (node_ids.get(source), node_ids.get(target)) {
            mermaid.push_str(&format!("    {source_id} --> {target_id}\n"));
        }
    }
    mermaid.push_str("```\n");

    mermaid
}

/// Assign `node1..nodeN` identifiers in the (sorted) order given.
fn assign_node_ids<'a>(views: &[&'a str]) -> BTreeMap<&'a str, String> {
    views
        .iter()
        .enumerate()
        .map(|(i, view)| (*view, format!("node{}", i + 1)))
        .collect()
}

fn declare_nodes(mermaid: &mut String, views: &[&str], node_ids: &BTreeMap<&str, String>) {
    for view in views {
        if let Some(id) = node_ids.get(view) {
            mermaid.push_str(&format!("    {id}[\"{}\"]\n", format_label(view)));
        }
    }
}

/// Shorten a fully qualified name for display: the last two parts are enough
/// to identify a view inside one schema.
fn format_label(view_name: &str) -> String {
    let parts: Vec<&str> = view_name.split('.').collect();
    match parts.as_slice() {
        [_, schema, table] => format!("{schema}.{table}"),
        _ => view_name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subgraph::extract_subgraph;
    use std::collections::BTreeSet;

    fn sample() -> DependencyGraph {
        let mut graph = DependencyGraph::new();
        graph.add_view("mid", "SELECT * FROM src").unwrap();
        graph.add_view("out", "SELECT * FROM mid").unwrap();
        graph
    }

    #[test]
    fn empty_subgraph_renders_placeholder() {
        let graph = DependencyGraph::new();
        let subgraph = SubgraphResult {
            views: BTreeSet::new(),
            focus_view: "x".to_string(),
            depth_upstream: 0,
            depth_downstream: 0,
            truncated: false,
        };
        assert_eq!(
            render_subgraph(&graph, &subgraph),
            "graph TB\n    empty[No views in subgraph]"
        );
    }

    #[test]
    fn oversize_subgraph_reports_its_size() {
        let graph = DependencyGraph::new();
        let subgraph = SubgraphResult {
            views: (0..101).map(|i| format!("v{i:03}")).collect(),
            focus_view: "v000".to_string(),
            depth_upstream: 1,
            depth_downstream: 1,
            truncated: false,
        };
        let rendered = render_subgraph(&graph, &subgraph);
        assert!(rendered.contains("101 views"));
        assert!(!rendered.contains("```mermaid"));
    }

    #[test]
    fn subgraph_render_declares_nodes_edges_and_styles() {
        let graph = sample();
        let subgraph = extract_subgraph(&graph, "mid", 1, 1, None).unwrap();
        let rendered = render_subgraph(&graph, &subgraph);

        assert!(rendered.starts_with("```mermaid\ngraph TB\n"));
        assert!(rendered.ends_with("```\n"));
        // Sorted member order: mid=node1, out=node2, src=node3.
        assert!(rendered.contains("node1[\"mid\"]"));
        assert!(rendered.contains("node3 --> node1"));
        assert!(rendered.contains("node1 --> node2"));
        assert!(rendered.contains(&format!("style node1 {FOCUS_STYLE}")));
        assert!(rendered.contains(&format!("style node3 {UPSTREAM_STYLE}")));
        assert!(rendered.contains(&format!("style node2 {DOWNSTREAM_STYLE}")));
    }

    #[test]
    fn rendering_is_deterministic() {
        let graph = sample();
        let subgraph = extract_subgraph(&graph, "mid", 1, 1, None).unwrap();
        assert_eq!(
            render_subgraph(&graph, &subgraph),
            render_subgraph(&graph, &subgraph)
        );
    }

    #[test]
    fn labels_shorten_three_part_names() {
        assert_eq!(format_label("hive.sales.orders"), "sales.orders");
        assert_eq!(format_label("sales.orders"), "sales.orders");
        assert_eq!(format_label("orders"), "orders");
    }

    #[test]
    fn full_schema_render_has_no_styles() {
        let graph = sample();
        let rendered = render_full_schema(&graph);
        assert!(rendered.starts_with("```mermaid\ngraph TB\n"));
        assert!(!rendered.contains("style "));
        assert!(rendered.contains(" --> "));
    }

    #[test]
    fn empty_schema_renders_placeholder() {
        let graph = DependencyGraph::new();
        assert_eq!(
            render_full_schema(&graph),
            "graph TB\n    empty[No views in schema]"
        );
    }
}
