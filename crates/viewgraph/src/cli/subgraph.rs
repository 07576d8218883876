//! `viewgraph subgraph` - extract a focused subgraph.

use viewgraph::{extract_subgraph, Result};

use crate::cli::{display, load_graph, require_connection};

pub fn run(
    connection: Option<&str>,
    focus: &str,
    up: usize,
    down: usize,
    max_nodes: Option<usize>,
    json: bool,
) -> Result<()> {
    let connection = require_connection(connection)?;
    let (graph, _stats, _label) = load_graph(&connection)?;

    let subgraph = extract_subgraph(&graph, focus, up, down, max_nodes)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&subgraph)?);
    } else {
        display::print_subgraph(&subgraph);
    }
    Ok(())
}
