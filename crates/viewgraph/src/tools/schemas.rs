//! Tool schemas for LLM function calling.
//!
//! The description strings are user-visible contract: they are what the
//! model reads when deciding which operation to call, so changing them
//! changes agent behavior.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};

/// Declaration of one callable operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSchema {
    /// Operation name, as dispatched.
    pub name: String,
    /// Natural-language description for the model.
    pub description: String,
    /// JSON schema of the input object.
    pub parameters: JsonValue,
}

impl ToolSchema {
    /// The core analysis operations, in workflow order.
    #[must_use]
    pub fn core() -> Vec<ToolSchema> {
        vec![
            Self::analyze_schema(),
            Self::suggest_entry_points(),
            Self::extract_subgraph(),
            Self::render_subgraph(),
            Self::render_full_schema(),
        ]
    }

    /// The optional discovery operations.
    #[must_use]
    pub fn discovery() -> Vec<ToolSchema> {
        vec![Self::list_catalogs(), Self::list_schemas()]
    }

    /// Every operation, discovery included.
    #[must_use]
    pub fn all() -> Vec<ToolSchema> {
        let mut schemas = Self::discovery();
        schemas.extend(Self::core());
        schemas
    }

    /// Look up a schema by operation name.
    #[must_use]
    pub fn get_by_name(name: &str) -> Option<ToolSchema> {
        Self::all().into_iter().find(|schema| schema.name == name)
    }

    /// Names of every operation.
    #[must_use]
    pub fn tool_names() -> Vec<String> {
        Self::all().into_iter().map(|schema| schema.name).collect()
    }

    fn analyze_schema() -> ToolSchema {
        ToolSchema {
            name: "analyzeSchema".to_string(),
            description: "Analyzes schema to count views and assess complexity level. \
                Use this FIRST to understand schema size before suggesting exploration strategies."
                .to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "schemaName": {
                        "type": "string",
                        "description": "Name of the schema being analyzed; echoed back in the result"
                    }
                },
                "required": ["schemaName"]
            }),
        }
    }

    fn suggest_entry_points() -> ToolSchema {
        ToolSchema {
            name: "suggestEntryPoints".to_string(),
            description: "Suggests entry points for schema exploration. Strategies: \
                'high-impact' (foundational views many others depend on), \
                'leaf-views' (final outputs/reports), \
                'central-hubs' (integration points connecting sources to consumers). \
                Use when the schema is too large for a full diagram."
                .to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "strategy": {
                        "type": "string",
                        "description": "How to rank candidate entry points",
                        "enum": ["high-impact", "leaf-views", "central-hubs"]
                    },
                    "limit": {
                        "type": "integer",
                        "description": "Maximum number of suggestions (defaults to 5)",
                        "minimum": 0,
                        "default": 5
                    }
                },
                "required": ["strategy"]
            }),
        }
    }

    fn extract_subgraph() -> ToolSchema {
        ToolSchema {
            name: "extractSubgraph".to_string(),
            description: "Extracts a focused subgraph around a view. Returns the views within \
                the specified upstream/downstream depths. Use after the user selects an entry \
                point to get a visualizable subset of the schema."
                .to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "focusView": {
                        "type": "string",
                        "description": "Fully-qualified view to centre the subgraph on"
                    },
                    "depthUpstream": {
                        "type": "integer",
                        "description": "Levels of dependencies (incoming edges) to include",
                        "minimum": 0
                    },
                    "depthDownstream": {
                        "type": "integer",
                        "description": "Levels of dependents (outgoing edges) to include",
                        "minimum": 0
                    },
                    "maxNodes": {
                        "type": "integer",
                        "description": "Maximum nodes in the result; 0 = unlimited (defaults to 50 for readability)",
                        "minimum": 0,
                        "default": 50
                    }
                },
                "required": ["focusView", "depthUpstream", "depthDownstream"]
            }),
        }
    }

    fn render_subgraph() -> ToolSchema {
        ToolSchema {
            name: "renderSubgraph".to_string(),
            description: "Generates a Mermaid diagram from an extracted subgraph, highlighting \
                the focus view and its direct upstream and downstream neighbours. Use after \
                extractSubgraph to visualize MODERATE or larger schemas."
                .to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "views": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Views in the subgraph, as returned by extractSubgraph"
                    },
                    "focusView": { "type": "string" },
                    "depthUpstream": { "type": "integer", "minimum": 0 },
                    "depthDownstream": { "type": "integer", "minimum": 0 },
                    "truncated": { "type": "boolean" }
                },
                "required": ["views", "focusView", "depthUpstream", "depthDownstream", "truncated"]
            }),
        }
    }

    fn render_full_schema() -> ToolSchema {
        ToolSchema {
            name: "renderFullSchema".to_string(),
            description: "Generates a Mermaid diagram for the entire schema. Use for Simple \
                schemas (fewer than 20 views) where the full dependency graph is readable."
                .to_string(),
            parameters: json!({
                "type": "object",
                "properties": {}
            }),
        }
    }

    fn list_catalogs() -> ToolSchema {
        ToolSchema {
            name: "listCatalogs".to_string(),
            description: "Lists all available catalogs. Use when the user asks what catalogs \
                exist or wants to explore the warehouse from the top."
                .to_string(),
            parameters: json!({
                "type": "object",
                "properties": {}
            }),
        }
    }

    fn list_schemas() -> ToolSchema {
        ToolSchema {
            name: "listSchemas".to_string(),
            description: "Lists all schemas in a catalog. Use when the user wants to know what \
                schemas are available before picking one to analyze."
                .to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "catalog": {
                        "type": "string",
                        "description": "Catalog to list; required unless the connection is bound to a catalog"
                    }
                },
                "required": []
            }),
        }
    }
}
