//! Synchronous tool dispatch.
//!
//! Owns the loaded graph (and optionally a discovery provider) and executes
//! catalog operations against it: decode the JSON arguments, invoke the
//! service, encode the typed result back to JSON. Every operation is
//! read-only.

use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::discovery::DiscoveryProvider;
use crate::entry_points::suggest_entry_points;
use crate::error::{Error, Result};
use crate::graph::DependencyGraph;
use crate::mermaid;
use crate::subgraph::extract_subgraph;
use crate::tools::ToolSchema;
use crate::types::{SchemaComplexity, SubgraphResult};

/// Executes catalog operations against a loaded graph.
pub struct ToolDispatcher {
    graph: DependencyGraph,
    discovery: Option<Box<dyn DiscoveryProvider>>,
}

impl ToolDispatcher {
    /// Create a dispatcher over a loaded graph, without discovery.
    #[must_use]
    pub fn new(graph: DependencyGraph) -> Self {
        Self {
            graph,
            discovery: None,
        }
    }

    /// Enable the discovery operations.
    #[must_use]
    pub fn with_discovery(mut self, provider: Box<dyn DiscoveryProvider>) -> Self {
        self.discovery = Some(provider);
        self
    }

    /// The graph this dispatcher operates on.
    #[must_use]
    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }

    /// The operations this dispatcher can execute: the core catalog, plus
    /// discovery when a provider is configured.
    #[must_use]
    pub fn catalog(&self) -> Vec<ToolSchema> {
        if self.discovery.is_some() {
            ToolSchema::all()
        } else {
            ToolSchema::core()
        }
    }

    /// Execute one operation by name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for unknown tool names or
    /// undecodable arguments, and whatever the underlying operation fails
    /// with ([`Error::ViewNotFound`], ...).
    pub fn dispatch(&self, tool: &str, arguments: &JsonValue) -> Result<JsonValue> {
        match tool {
            "analyzeSchema" => {
                let input: AnalyzeSchemaInput = decode(tool, arguments)?;
                let complexity =
                    SchemaComplexity::from_view_count(&input.schema_name, self.graph.view_count());
                Ok(serde_json::to_value(complexity)?)
            }
            "suggestEntryPoints" => {
                let input: SuggestEntryPointsInput = decode(tool, arguments)?;
                let suggestions =
                    suggest_entry_points(&self.graph, &input.strategy, input.limit)?;
                Ok(serde_json::to_value(suggestions)?)
            }
            "extractSubgraph" => {
                let input: ExtractSubgraphInput = decode(tool, arguments)?;
                let result = extract_subgraph(
                    &self.graph,
                    &input.focus_view,
                    input.depth_upstream,
                    input.depth_downstream,
                    input.max_nodes,
                )?;
                Ok(serde_json::to_value(result)?)
            }
            "renderSubgraph" => {
                let subgraph: SubgraphResult = decode(tool, arguments)?;
                Ok(JsonValue::String(mermaid::render_subgraph(
                    &self.graph,
                    &subgraph,
                )))
            }
            "renderFullSchema" => Ok(JsonValue::String(mermaid::render_full_schema(&self.graph))),
            "listCatalogs" => {
                let provider = self.discovery_provider()?;
                Ok(serde_json::to_value(provider.list_catalogs()?)?)
            }
            "listSchemas" => {
                let provider = self.discovery_provider()?;
                let input: ListSchemasInput = decode(tool, arguments)?;
                Ok(serde_json::to_value(
                    provider.list_schemas(input.catalog.as_deref())?,
                )?)
            }
            other => Err(Error::InvalidArgument(format!("unknown tool '{other}'"))),
        }
    }

    fn discovery_provider(&self) -> Result<&dyn DiscoveryProvider> {
        self.discovery.as_deref().ok_or_else(|| {
            Error::InvalidArgument(
                "discovery is not available: no discovery provider configured".to_string(),
            )
        })
    }
}

fn decode<'a, T: Deserialize<'a>>(tool: &str, arguments: &'a JsonValue) -> Result<T> {
    T::deserialize(arguments)
        .map_err(|e| Error::InvalidArgument(format!("invalid arguments for {tool}: {e}")))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeSchemaInput {
    schema_name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SuggestEntryPointsInput {
    strategy: String,
    #[serde(default)]
    limit: Option<usize>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExtractSubgraphInput {
    focus_view: String,
    depth_upstream: usize,
    depth_downstream: usize,
    #[serde(default)]
    max_nodes: Option<usize>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListSchemasInput {
    #[serde(default)]
    catalog: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::TestDatasetProvider;
    use serde_json::json;

    fn dispatcher() -> ToolDispatcher {
        let mut graph = DependencyGraph::new();
        graph.add_view("b", "SELECT * FROM a").unwrap();
        graph.add_view("c", "SELECT * FROM b").unwrap();
        ToolDispatcher::new(graph)
    }

    #[test]
    fn analyze_schema_echoes_the_name() {
        let result = dispatcher()
            .dispatch("analyzeSchema", &json!({"schemaName": "sales"}))
            .unwrap();
        assert_eq!(result["schemaName"], "sales");
        assert_eq!(result["viewCount"], 3);
        assert_eq!(result["level"], "Simple");
    }

    #[test]
    fn unknown_tool_is_invalid_argument() {
        let err = dispatcher().dispatch("dropSchema", &json!({})).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert!(err.to_string().contains("dropSchema"));
    }

    #[test]
    fn missing_arguments_are_invalid_argument() {
        let err = dispatcher().dispatch("analyzeSchema", &json!({})).unwrap_err();
        assert!(err.to_string().contains("analyzeSchema"));
    }

    #[test]
    fn catalog_grows_when_discovery_is_configured() {
        let bare = dispatcher();
        assert_eq!(bare.catalog().len(), 5);

        let with_discovery = dispatcher().with_discovery(Box::new(TestDatasetProvider));
        assert_eq!(with_discovery.catalog().len(), 7);
    }

    #[test]
    fn discovery_without_provider_fails_cleanly() {
        let err = dispatcher().dispatch("listCatalogs", &json!({})).unwrap_err();
        assert!(err.to_string().contains("discovery"));
    }
}
