//! `viewgraph catalogs` / `viewgraph schemas` - discovery commands.
//!
//! Only packaged datasets are discoverable from the CLI; a hosting agent
//! with a live connection supplies its own provider.

use colored::Colorize;
use viewgraph::{DiscoveryProvider, Result, TestDatasetProvider};

use crate::cli::{parse_connection, Connection};

/// Discovery provider for a connection string, if discovery makes sense
/// for it. File connections have nothing to discover.
fn provider_for(connection: Option<&str>) -> Result<Option<TestDatasetProvider>> {
    match connection {
        // Discovery without a connection defaults to the packaged datasets.
        None => Ok(Some(TestDatasetProvider)),
        Some(raw) => match parse_connection(raw)? {
            Connection::Dataset(_) => Ok(Some(TestDatasetProvider)),
            Connection::File(_) => Ok(None),
        },
    }
}

pub fn run_catalogs(connection: Option<&str>) -> Result<()> {
    match provider_for(connection)? {
        Some(provider) => {
            for catalog in provider.list_catalogs()? {
                println!("{catalog}");
            }
        }
        None => println!("{}", "File connections have no catalogs to discover.".yellow()),
    }
    Ok(())
}

pub fn run_schemas(connection: Option<&str>, catalog: Option<&str>) -> Result<()> {
    match provider_for(connection)? {
        Some(provider) => {
            for schema in provider.list_schemas(catalog)? {
                println!("{schema}");
            }
        }
        None => println!("{}", "File connections have no schemas to discover.".yellow()),
    }
    Ok(())
}
