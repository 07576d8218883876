//! `viewgraph tools` - print the tool catalog for reasoning agents.

use viewgraph::{Result, ToolSchema};

pub fn run() -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&ToolSchema::all())?);
    Ok(())
}
