//! Shared output formatting for CLI commands.

use colored::Colorize;
use viewgraph::{EntryPointKind, EntryPointSuggestion, SchemaComplexity, SubgraphResult};

pub fn print_complexity(complexity: &SchemaComplexity) {
    println!("{} {}", "Schema:".bold(), complexity.schema_name);
    println!("{} {}", "Views:".bold(), complexity.view_count);
    println!("{} {:?}", "Complexity:".bold(), complexity.level);
    println!("{} {}", "Guidance:".bold(), complexity.guidance());
    if complexity.requires_entry_point() {
        println!(
            "\n{}",
            "Pick an entry point before visualizing (see 'entry-points').".yellow()
        );
    }
}

pub fn print_suggestions(suggestions: &[EntryPointSuggestion]) {
    if suggestions.is_empty() {
        println!("{}", "No entry points found (empty schema?)".yellow());
        return;
    }
    for (index, suggestion) in suggestions.iter().enumerate() {
        let kind = match suggestion.kind {
            EntryPointKind::HighImpact => "high-impact".red(),
            EntryPointKind::LeafView => "leaf-view".green(),
            EntryPointKind::CentralHub => "central-hub".blue(),
        };
        println!(
            "{:>2}. {} [{kind}]\n    {}",
            index + 1,
            suggestion.view_name.bold(),
            suggestion.reason.dimmed()
        );
    }
}

pub fn print_subgraph(subgraph: &SubgraphResult) {
    println!(
        "{} {} ({} views, up {}, down {}{})",
        "Subgraph around".bold(),
        subgraph.focus_view.bold(),
        subgraph.view_count(),
        subgraph.depth_upstream,
        subgraph.depth_downstream,
        if subgraph.truncated {
            ", truncated".yellow().to_string()
        } else {
            String::new()
        }
    );
    for view in &subgraph.views {
        if view == &subgraph.focus_view {
            println!("  {} {}", "*".red().bold(), view.bold());
        } else {
            println!("    {view}");
        }
    }
    if !subgraph.visualizable() {
        println!(
            "\n{}",
            "Too large to diagram; narrow the depths or lower --max-nodes.".yellow()
        );
    }
}
