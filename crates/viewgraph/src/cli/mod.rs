//! CLI command implementations.

mod display;

pub mod analyze;
pub mod diagram;
pub mod discover;
pub mod entry_points;
pub mod subgraph;
pub mod tools;

use std::path::PathBuf;

use viewgraph::{
    load_embedded, load_path, Dataset, DependencyGraph, Error, LoadStats, Result, TEST_CATALOG,
};

/// Where to load view definitions from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Connection {
    /// A packaged dataset, addressed as `test://<name>`.
    Dataset(String),
    /// A dataset JSON document on disk.
    File(PathBuf),
}

/// Parse a connection string.
///
/// Accepted forms: `test://<dataset>`, `file://<path>`, or a bare path to a
/// JSON document. Warehouse URLs are rejected here; live connections are the
/// hosting agent's concern, and it feeds the same loader through the
/// `information_schema` query.
pub fn parse_connection(raw: &str) -> Result<Connection> {
    if let Some(dataset) = raw.strip_prefix("test://") {
        if dataset.is_empty() {
            return Err(Error::InvalidArgument(
                "missing dataset name after 'test://'".to_string(),
            ));
        }
        return Ok(Connection::Dataset(dataset.to_string()));
    }
    if let Some(path) = raw.strip_prefix("file://") {
        return Ok(Connection::File(PathBuf::from(path)));
    }
    if raw.contains("://") {
        return Err(Error::InvalidArgument(format!(
            "unsupported connection '{raw}'\n\
             Use 'test://<dataset>' for a packaged dataset or 'file://<path>' for a JSON document.\n\
             Warehouse connections are made by the hosting agent, not this CLI."
        )));
    }
    Ok(Connection::File(PathBuf::from(raw)))
}

/// Resolve the `--connection` flag, which data commands require.
pub fn require_connection(raw: Option<&str>) -> Result<Connection> {
    let raw = raw.ok_or_else(|| {
        Error::InvalidArgument(
            "--connection is required (try --connection test://simple_ecommerce)".to_string(),
        )
    })?;
    parse_connection(raw)
}

/// Load the dependency graph for a connection.
///
/// Returns the populated graph, its load statistics, and a schema label for
/// display ("test.<dataset>" or the file stem).
pub fn load_graph(connection: &Connection) -> Result<(DependencyGraph, LoadStats, String)> {
    let (dataset, label): (Dataset, String) = match connection {
        Connection::Dataset(name) => (
            load_embedded(name)?,
            format!("{TEST_CATALOG}.{name}"),
        ),
        Connection::File(path) => {
            let label = path
                .file_stem()
                .map_or_else(|| path.display().to_string(), |s| s.to_string_lossy().into_owned());
            (load_path(path)?, label)
        }
    };

    let mut graph = DependencyGraph::new();
    let stats = dataset.populate(&mut graph);

    if stats.views_loaded == 0 {
        let (catalog, schema) = match connection {
            Connection::Dataset(name) => (TEST_CATALOG.to_string(), name.clone()),
            Connection::File(_) => ("file".to_string(), label.clone()),
        };
        return Err(Error::NoViewsFound { catalog, schema });
    }

    Ok((graph, stats, label))
}
