//! # Viewgraph: dependency mapping for warehouse views
//!
//! Viewgraph parses every view definition in a Trino schema, builds a
//! directed dependency graph, and exposes graph-analytic operations to a
//! reasoning agent: complexity assessment, entry-point suggestion, focused
//! subgraph extraction, and Mermaid rendering. It is designed for
//! programmatic use by CLI tools, MCP servers, and AI agents.
//!
//! ## Design Philosophy
//!
//! - **Parse, don't scan** - a real SQL parser keeps CTEs, string literals,
//!   and comments from polluting the graph; regex cannot
//! - **Engine, not agent** - the LLM loop, warehouse transport, and session
//!   memory live in the host; this crate is the deterministic core they call
//! - **Best-effort loading** - one misparsing view is logged and skipped,
//!   not a reason to abandon the schema
//! - **Deterministic results** - equal inputs produce equal rankings,
//!   subgraphs, and diagrams, regardless of insertion order
//!
//! ## Quick Start
//!
//! ```
//! use viewgraph::{extract_subgraph, DependencyGraph, SchemaComplexity};
//!
//! let mut graph = DependencyGraph::new();
//! graph.add_view("orders_enriched", "SELECT * FROM orders JOIN customers ON orders.customer_id = customers.id")?;
//! graph.add_view("daily_report", "SELECT * FROM orders_enriched")?;
//!
//! let complexity = SchemaComplexity::from_view_count("sales", graph.view_count());
//! assert!(complexity.full_diagram_feasible());
//!
//! let subgraph = extract_subgraph(&graph, "orders_enriched", 1, 1, None)?;
//! assert_eq!(subgraph.view_count(), 4);
//! # Ok::<(), viewgraph::Error>(())
//! ```

mod analyzer;
mod config;
mod dataset;
mod discovery;
mod entry_points;
mod error;
mod extractor;
mod graph;
mod mermaid;
mod parser;
mod subgraph;
mod tools;
mod types;

pub use config::{AgentConfig, DEFAULT_MODEL, DEFAULT_TIMEOUT};
pub use dataset::{
    embedded_names, load_embedded, load_path, Dataset, ViewRecord,
    INFORMATION_SCHEMA_VIEWS_QUERY,
};
pub use discovery::{DiscoveryProvider, TestDatasetProvider, TEST_CATALOG};
pub use entry_points::{suggest_entry_points, Strategy, DEFAULT_LIMIT};
pub use error::{Error, Result};
pub use extractor::DependencyExtractor;
pub use graph::DependencyGraph;
pub use mermaid::{render_full_schema, render_subgraph};
pub use parser::SqlParser;
pub use subgraph::{extract_subgraph, DEFAULT_MAX_NODES};
pub use tools::{ToolDispatcher, ToolSchema};
pub use types::{
    ComplexityLevel, EntryPointKind, EntryPointSuggestion, LoadStats, SchemaComplexity,
    SubgraphResult, TableReference,
};
