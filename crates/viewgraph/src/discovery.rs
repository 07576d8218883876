//! Catalog and schema discovery.
//!
//! Discovery lets the reasoning loop orient itself before analysis: list the
//! catalogs, list a catalog's schemas, then pick one to load. The trait is
//! the seam; a warehouse-backed provider answers with `SHOW CATALOGS` /
//! `SHOW SCHEMAS FROM <catalog>`, while the packaged-dataset provider
//! answers from a synthetic catalog so the exploration workflow is identical
//! with or without a live connection.

use crate::dataset;
use crate::error::{Error, Result};

/// Read-only catalog/schema discovery.
pub trait DiscoveryProvider: Send + Sync {
    /// List the catalogs available on this connection.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying source cannot be queried.
    fn list_catalogs(&self) -> Result<Vec<String>>;

    /// List the schemas in a catalog.
    ///
    /// A provider bound to a single catalog may accept `None` and use the
    /// bound catalog; unbound providers fail with
    /// [`Error::InvalidArgument`] when no catalog is given.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for a missing or unknown catalog.
    fn list_schemas(&self, catalog: Option<&str>) -> Result<Vec<String>>;
}

/// Synthetic catalog name the packaged datasets live under.
pub const TEST_CATALOG: &str = "test";

/// Discovery over the packaged datasets.
///
/// Presents one catalog, `test`, whose schemas are the dataset names. This
/// keeps dataset exploration identical to warehouse discovery, so demos and
/// tests exercise the same workflow as production connections.
#[derive(Debug, Default)]
pub struct TestDatasetProvider;

impl DiscoveryProvider for TestDatasetProvider {
    fn list_catalogs(&self) -> Result<Vec<String>> {
        Ok(vec![TEST_CATALOG.to_string()])
    }

    fn list_schemas(&self, catalog: Option<&str>) -> Result<Vec<String>> {
        match catalog {
            None => Err(Error::InvalidArgument(format!(
                "catalog parameter required; packaged datasets use catalog '{TEST_CATALOG}'"
            ))),
            Some(TEST_CATALOG) => Ok(dataset::embedded_names()
                .iter()
                .map(|s| (*s).to_string())
                .collect()),
            Some(other) => Err(Error::InvalidArgument(format!(
                "unknown catalog '{other}'; packaged datasets use catalog '{TEST_CATALOG}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_the_synthetic_catalog() {
        let provider = TestDatasetProvider;
        assert_eq!(provider.list_catalogs().unwrap(), ["test"]);
    }

    #[test]
    fn lists_dataset_names_as_schemas() {
        let provider = TestDatasetProvider;
        let schemas = provider.list_schemas(Some("test")).unwrap();
        assert!(schemas.contains(&"simple_ecommerce".to_string()));
        assert_eq!(schemas.len(), 4);
    }

    #[test]
    fn missing_catalog_is_invalid_argument() {
        let provider = TestDatasetProvider;
        assert!(matches!(
            provider.list_schemas(None),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn unknown_catalog_is_invalid_argument() {
        let provider = TestDatasetProvider;
        let err = provider.list_schemas(Some("prod")).unwrap_err();
        assert!(err.to_string().contains("prod"));
    }
}
