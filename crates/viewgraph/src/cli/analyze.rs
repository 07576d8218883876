//! `viewgraph analyze` - schema complexity assessment.

use tracing::info;
use viewgraph::{Result, SchemaComplexity};

use crate::cli::{display, load_graph, require_connection};

pub fn run(connection: Option<&str>, schema_name: Option<&str>, json: bool) -> Result<()> {
    let connection = require_connection(connection)?;
    let (graph, stats, label) = load_graph(&connection)?;
    info!(
        loaded = stats.views_loaded,
        skipped = stats.views_skipped,
        "schema loaded"
    );

    let schema_name = schema_name.unwrap_or(&label);
    let complexity = SchemaComplexity::from_view_count(schema_name, graph.view_count());

    if json {
        println!("{}", serde_json::to_string_pretty(&complexity)?);
    } else {
        display::print_complexity(&complexity);
    }
    Ok(())
}
