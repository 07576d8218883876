//! `viewgraph entry-points` - suggest where to start exploring.

use viewgraph::{suggest_entry_points, Result};

use crate::cli::{display, load_graph, require_connection};

pub fn run(
    connection: Option<&str>,
    strategy: &str,
    limit: Option<usize>,
    json: bool,
) -> Result<()> {
    let connection = require_connection(connection)?;
    let (graph, _stats, _label) = load_graph(&connection)?;

    let suggestions = suggest_entry_points(&graph, strategy, limit)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&suggestions)?);
    } else {
        display::print_suggestions(&suggestions);
    }
    Ok(())
}
