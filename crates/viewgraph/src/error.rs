//! Error types for viewgraph operations.
//!
//! Errors are split along one line:
//!
//! - **User-facing kinds** (`Parse`, `InvalidArgument`, `ViewNotFound`,
//!   `NoViewsFound`, `Config`) describe contract violations the caller can
//!   act on. The dispatch layer surfaces these verbatim.
//! - **Infrastructure kinds** (`Io`, `Json`) wrap failures outside the
//!   engine's control and are fatal to the current session.
//!
//! ## Error Philosophy
//!
//! Schema loading is best effort: a single view whose SQL fails to parse is
//! skipped and logged rather than aborting the load, because the graph is
//! still useful without it. Analysis operations, by contrast, fail loudly on
//! bad arguments so the reasoning loop gets a correctable signal.

use thiserror::Error;

/// Result type for viewgraph operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for viewgraph operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The SQL parser rejected a statement.
    #[error("SQL parse error: {0}")]
    Parse(String),

    /// An operation received a value outside its contract.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A subgraph extraction named a focus view that is not in the graph.
    #[error("view '{0}' not found in schema")]
    ViewNotFound(String),

    /// Warehouse loading returned zero view rows.
    #[error("no views found in {catalog}.{schema}")]
    NoViewsFound {
        /// Catalog the load was scoped to.
        catalog: String,
        /// Schema the load was scoped to.
        schema: String,
    },

    /// Invalid configuration or environment.
    #[error("configuration error: {0}")]
    Config(String),

    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON document could not be read or written.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
