//! Viewgraph CLI - view dependency mapping from the command line.
//!
//! Loads a schema's view definitions (packaged dataset or JSON file), builds
//! the dependency graph, and runs the analysis operations an embedding agent
//! would call through the tool catalog.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

mod cli;

/// Viewgraph: dependency mapping and guided exploration for warehouse views.
#[derive(Parser)]
#[command(name = "viewgraph")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Connection string: 'test://<dataset>', 'file://<path>', or a path to
    /// a dataset JSON document
    #[arg(short, long, global = true)]
    connection: Option<String>,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assess schema complexity and recommended exploration strategy
    Analyze {
        /// Schema name to echo in the result (defaults to the connection's)
        #[arg(long)]
        schema_name: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Suggest entry points for exploration
    EntryPoints {
        /// Strategy: 'high-impact', 'leaf-views', or 'central-hubs'
        #[arg(short, long)]
        strategy: String,

        /// Maximum number of suggestions (default: 5)
        #[arg(short, long)]
        limit: Option<usize>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Extract a focused subgraph around a view
    Subgraph {
        /// Fully-qualified view to focus on
        focus: String,

        /// Levels of dependencies (incoming edges) to include
        #[arg(short, long, default_value = "1")]
        up: usize,

        /// Levels of dependents (outgoing edges) to include
        #[arg(short, long, default_value = "1")]
        down: usize,

        /// Maximum nodes in the result; 0 = unlimited (default: 50)
        #[arg(long)]
        max_nodes: Option<usize>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Render a Mermaid diagram of the schema or of a focused subgraph
    Diagram {
        /// Focus view; when absent the full schema is rendered
        #[arg(long)]
        focus: Option<String>,

        /// Levels of dependencies to include around the focus
        #[arg(short, long, default_value = "1")]
        up: usize,

        /// Levels of dependents to include around the focus
        #[arg(short, long, default_value = "1")]
        down: usize,

        /// Maximum nodes in a focused subgraph; 0 = unlimited (default: 50)
        #[arg(long)]
        max_nodes: Option<usize>,
    },

    /// List catalogs available on this connection
    Catalogs,

    /// List schemas in a catalog
    Schemas {
        /// Catalog to list (required for multi-catalog connections)
        catalog: Option<String>,
    },

    /// Print the tool catalog exposed to reasoning agents
    Tools,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let connection = cli.connection.as_deref();
    let result = match cli.command {
        Commands::Analyze { schema_name, json } => {
            cli::analyze::run(connection, schema_name.as_deref(), json)
        }
        Commands::EntryPoints {
            strategy,
            limit,
            json,
        } => cli::entry_points::run(connection, &strategy, limit, json),
        Commands::Subgraph {
            focus,
            up,
            down,
            max_nodes,
            json,
        } => cli::subgraph::run(connection, &focus, up, down, max_nodes, json),
        Commands::Diagram {
            focus,
            up,
            down,
            max_nodes,
        } => cli::diagram::run(connection, focus.as_deref(), up, down, max_nodes),
        Commands::Catalogs => cli::discover::run_catalogs(connection),
        Commands::Schemas { catalog } => cli::discover::run_schemas(connection, catalog.as_deref()),
        Commands::Tools => cli::tools::run(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {e}", "error".red().bold());
            // Show cause chain for nested errors
            let mut source = std::error::Error::source(&e);
            while let Some(cause) = source {
                eprintln!("  {}: {cause}", "caused by".dimmed());
                source = std::error::Error::source(cause);
            }
            ExitCode::FAILURE
        }
    }
}
