//! `viewgraph diagram` - render Mermaid output.

use viewgraph::{extract_subgraph, render_full_schema, render_subgraph, Result};

use crate::cli::{load_graph, require_connection};

pub fn run(
    connection: Option<&str>,
    focus: Option<&str>,
    up: usize,
    down: usize,
    max_nodes: Option<usize>,
) -> Result<()> {
    let connection = require_connection(connection)?;
    let (graph, _stats, _label) = load_graph(&connection)?;

    let diagram = match focus {
        Some(focus) => {
            let subgraph = extract_subgraph(&graph, focus, up, down, max_nodes)?;
            render_subgraph(&graph, &subgraph)
        }
        None => render_full_schema(&graph),
    };

    println!("{diagram}");
    Ok(())
}
