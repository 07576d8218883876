//! Dataset loading.
//!
//! A dataset is a JSON document of view definitions:
//!
//! ```json
//! {
//!   "description": "optional",
//!   "views": [{ "name": "orders_enriched", "sql": "SELECT ..." }]
//! }
//! ```
//!
//! Four datasets ship embedded in the binary so exploration works without a
//! warehouse. Loading is best effort: a view whose SQL fails to parse is
//! skipped with a warning naming it, because the rest of the graph is still
//! useful, and the returned [`LoadStats`] reports what happened.
//!
//! Warehouse-backed loading is a collaborator concern; the query it must
//! issue is published as [`INFORMATION_SCHEMA_VIEWS_QUERY`] and a zero-row
//! result surfaces [`Error::NoViewsFound`].

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::graph::DependencyGraph;
use crate::types::LoadStats;

/// Query a warehouse-backed loader issues to fetch a schema's views, with
/// `table_catalog` and `table_schema` bound as parameters. When the
/// connection is not bound to a catalog, `information_schema` must be
/// qualified with the catalog name.
pub const INFORMATION_SCHEMA_VIEWS_QUERY: &str = "SELECT table_name, view_definition \
     FROM information_schema.views \
     WHERE table_catalog = ? AND table_schema = ? \
     ORDER BY table_name";

/// Names of the datasets embedded in the binary.
const EMBEDDED: &[(&str, &str)] = &[
    (
        "simple_ecommerce",
        include_str!("../datasets/simple_ecommerce.json"),
    ),
    (
        "moderate_analytics",
        include_str!("../datasets/moderate_analytics.json"),
    ),
    (
        "complex_enterprise",
        include_str!("../datasets/complex_enterprise.json"),
    ),
    (
        "realistic_bi_warehouse",
        include_str!("../datasets/realistic_bi_warehouse.json"),
    ),
];

/// A loadable collection of view definitions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    /// Optional human description of the dataset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// View definitions, loaded in order.
    pub views: Vec<ViewRecord>,
}

/// One view definition: a fully-qualified name and its SQL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewRecord {
    /// Name the view is registered under.
    pub name: String,
    /// The view's defining SQL statement.
    pub sql: String,
}

/// Names of the embedded datasets, in discovery order.
#[must_use]
pub fn embedded_names() -> &'static [&'static str] {
    const NAMES: [&str; 4] = [
        "simple_ecommerce",
        "moderate_analytics",
        "complex_enterprise",
        "realistic_bi_warehouse",
    ];
    &NAMES
}

/// Load an embedded dataset by name.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] for an unknown dataset name, or
/// [`Error::Json`] if an embedded document is malformed.
pub fn load_embedded(name: &str) -> Result<Dataset> {
    let Some((_, source)) = EMBEDDED.iter().find(|(n, _)| *n == name) else {
        return Err(Error::InvalidArgument(format!(
            "dataset not found: '{name}' (available: {})",
            embedded_names().join(", ")
        )));
    };
    Ok(serde_json::from_str(source)?)
}

/// Load a dataset from a JSON file on disk.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read or [`Error::Json`] if it
/// is not a valid dataset document.
pub fn load_path(path: &Path) -> Result<Dataset> {
    let source = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&source)?)
}

impl Dataset {
    /// Feed every view into the graph, in document order.
    ///
    /// Views whose SQL fails to parse are skipped and logged; everything else
    /// is inserted.
    pub fn populate(&self, graph: &mut DependencyGraph) -> LoadStats {
        let mut stats = LoadStats::default();
        for view in &self.views {
            match graph.add_view(&view.name, &view.sql) {
                Ok(()) => stats.views_loaded += 1,
                Err(error) => {
                    warn!(view = %view.name, %error, "skipping view with unparseable SQL");
                    stats.views_skipped += 1;
                }
            }
        }
        debug!(
            loaded = stats.views_loaded,
            skipped = stats.views_skipped,
            "dataset loaded"
        );
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_embedded_dataset_is_invalid_argument() {
        let err = load_embedded("no_such_dataset").unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert!(err.to_string().contains("no_such_dataset"));
        assert!(err.to_string().contains("simple_ecommerce"));
    }

    #[test]
    fn embedded_names_match_embedded_documents() {
        for name in embedded_names() {
            assert!(load_embedded(name).is_ok(), "dataset {name} should load");
        }
    }

    #[test]
    fn populate_skips_unparseable_views() {
        let dataset = Dataset {
            description: None,
            views: vec![
                ViewRecord {
                    name: "good".to_string(),
                    sql: "SELECT * FROM base".to_string(),
                },
                ViewRecord {
                    name: "bad".to_string(),
                    sql: "SELECT WHERE FROM".to_string(),
                },
            ],
        };

        let mut graph = DependencyGraph::new();
        let stats = dataset.populate(&mut graph);
        assert_eq!(stats.views_loaded, 1);
        assert_eq!(stats.views_skipped, 1);
        assert!(graph.has_edge("base", "good"));
    }

    #[test]
    fn information_schema_query_is_schema_scoped() {
        assert!(INFORMATION_SCHEMA_VIEWS_QUERY.contains("information_schema.views"));
        assert!(INFORMATION_SCHEMA_VIEWS_QUERY.contains("table_catalog = ?"));
        assert!(INFORMATION_SCHEMA_VIEWS_QUERY.contains("ORDER BY table_name"));
    }
}
