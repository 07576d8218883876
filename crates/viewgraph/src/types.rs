//! Domain types for view dependency analysis.
//!
//! These types represent the core domain model:
//! - **Names**: `TableReference` (a 1-to-3 part warehouse name)
//! - **Assessments**: `ComplexityLevel`, `SchemaComplexity`
//! - **Suggestions**: `EntryPointKind`, `EntryPointSuggestion`
//! - **Extractions**: `SubgraphResult`
//! - **Loading**: `LoadStats`
//!
//! ## Design Decisions
//!
//! | Decision | Choice | Rationale |
//! |----------|--------|-----------|
//! | Reference equality | Canonical joined string | Dedup happens on `catalog.schema.table` text |
//! | Complexity | Enum not thresholds-in-code | Level carries its own guidance and flags |
//! | Subgraph members | `BTreeSet` | Deterministic iteration for rendering and JSON |
//! | Serialization | camelCase | Matches the tool-dispatch wire contract |

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A reference to a table or view extracted from a SQL statement.
///
/// Holds up to three name parts. The `table` part is always present; `schema`
/// and `catalog` appear only when the SQL qualified them. Parts are stored as
/// they appear in the AST: the parser has already lower-cased unquoted
/// identifiers, and quoted identifiers keep their original spelling.
///
/// Equality and hashing are based on the canonical joined form
/// `[catalog.][schema.]table`, which is also what becomes a graph vertex.
#[derive(Debug, Clone)]
pub struct TableReference {
    catalog: Option<String>,
    schema: Option<String>,
    table: String,
    canonical: String,
}

impl TableReference {
    /// Create a reference from explicit components.
    #[must_use]
    pub fn new(catalog: Option<String>, schema: Option<String>, table: String) -> Self {
        let canonical = match (&catalog, &schema) {
            (Some(c), Some(s)) => format!("{c}.{s}.{table}"),
            (None, Some(s)) => format!("{s}.{table}"),
            _ => table.clone(),
        };
        Self {
            catalog,
            schema,
            table,
            canonical,
        }
    }

    /// Create a reference from the parts of a qualified name.
    ///
    /// Returns `None` for an empty slice or more than three parts; warehouse
    /// names have at most `catalog.schema.table`.
    #[must_use]
    pub fn from_parts(parts: &[String]) -> Option<Self> {
        match parts {
            [table] => Some(Self::new(None, None, table.clone())),
            [schema, table] => Some(Self::new(None, Some(schema.clone()), table.clone())),
            [catalog, schema, table] => Some(Self::new(
                Some(catalog.clone()),
                Some(schema.clone()),
                table.clone(),
            )),
            _ => None,
        }
    }

    /// Catalog part, if the reference was catalog-qualified.
    #[must_use]
    pub fn catalog(&self) -> Option<&str> {
        self.catalog.as_deref()
    }

    /// Schema part, if the reference was schema-qualified.
    #[must_use]
    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    /// Unqualified table name.
    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Canonical `[catalog.][schema.]table` form used as a vertex label.
    #[must_use]
    pub fn fully_qualified_name(&self) -> &str {
        &self.canonical
    }
}

impl PartialEq for TableReference {
    fn eq(&self, other: &Self) -> bool {
        self.canonical == other.canonical
    }
}

impl Eq for TableReference {}

impl std::hash::Hash for TableReference {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.canonical.hash(state);
    }
}

impl std::fmt::Display for TableReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.canonical)
    }
}

/// Complexity of a schema, derived purely from its view count.
///
/// The level drives the exploration strategy: small schemas get a full
/// diagram, large ones require picking an entry point first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ComplexityLevel {
    /// Fewer than 20 views; the full dependency graph fits in one diagram.
    Simple,
    /// 20-99 views.
    Moderate,
    /// 100-499 views.
    Complex,
    /// 500 or more views.
    VeryComplex,
}

impl ComplexityLevel {
    /// Determine the level for a view count.
    #[must_use]
    pub fn from_view_count(view_count: usize) -> Self {
        match view_count {
            0..=19 => Self::Simple,
            20..=99 => Self::Moderate,
            100..=499 => Self::Complex,
            _ => Self::VeryComplex,
        }
    }

    /// Recommended exploration strategy for this level.
    #[must_use]
    pub fn guidance(&self) -> &'static str {
        match self {
            Self::Simple => "Full diagram feasible.",
            Self::Moderate => "Suggest grouping by domain or iterative exploration.",
            Self::Complex => "Require focused exploration with an entry point.",
            Self::VeryComplex => "Guided step-by-step exploration required.",
        }
    }

    /// Whether rendering the entire schema in one diagram is feasible.
    #[must_use]
    pub fn full_diagram_feasible(&self) -> bool {
        matches!(self, Self::Simple)
    }

    /// Whether the caller must pick an entry point before visualizing.
    #[must_use]
    pub fn requires_entry_point(&self) -> bool {
        matches!(self, Self::Complex | Self::VeryComplex)
    }
}

/// Result of schema complexity analysis.
///
/// The schema name is echoed from the request; the loaded graph is
/// process-global and the count always reflects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaComplexity {
    /// Name the caller asked about, echoed back.
    pub schema_name: String,
    /// Number of vertices in the loaded graph (views plus referenced tables).
    pub view_count: usize,
    /// Level derived from `view_count`.
    pub level: ComplexityLevel,
}

impl SchemaComplexity {
    /// Assess a schema from its view count.
    #[must_use]
    pub fn from_view_count(schema_name: &str, view_count: usize) -> Self {
        Self {
            schema_name: schema_name.to_string(),
            view_count,
            level: ComplexityLevel::from_view_count(view_count),
        }
    }

    /// Recommended exploration strategy.
    #[must_use]
    pub fn guidance(&self) -> &'static str {
        self.level.guidance()
    }

    /// Whether a full-schema diagram is feasible.
    #[must_use]
    pub fn full_diagram_feasible(&self) -> bool {
        self.level.full_diagram_feasible()
    }

    /// Whether an entry point must be chosen before visualizing.
    #[must_use]
    pub fn requires_entry_point(&self) -> bool {
        self.level.requires_entry_point()
    }
}

/// Why a view was suggested as an exploration entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryPointKind {
    /// Many views depend on this one; a foundational view.
    HighImpact,
    /// Nothing depends on this one; a final output or report.
    LeafView,
    /// Sits on many shortest paths; connects sources to consumers.
    CentralHub,
}

/// A suggested starting point for schema exploration.
///
/// Suggestions order descending by score; the reason sentence embeds the
/// score and is written for an LLM (or a human) choosing where to start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryPointSuggestion {
    /// Fully-qualified view name.
    pub view_name: String,
    /// Strategy-specific score; higher is a stronger suggestion.
    pub score: f64,
    /// Human-readable justification embedding the score.
    pub reason: String,
    /// Which strategy produced this suggestion.
    pub kind: EntryPointKind,
}

impl EntryPointSuggestion {
    /// Suggestion for a view many others depend on.
    #[must_use]
    pub fn high_impact(view_name: &str, dependent_count: usize) -> Self {
        Self {
            view_name: view_name.to_string(),
            score: dependent_count as f64,
            reason: format!("{dependent_count} views depend on this (foundational/core view)"),
            kind: EntryPointKind::HighImpact,
        }
    }

    /// Suggestion for a view with no dependents.
    #[must_use]
    pub fn leaf_view(view_name: &str) -> Self {
        Self {
            view_name: view_name.to_string(),
            score: 0.0,
            reason: "Final output/report with no dependents".to_string(),
            kind: EntryPointKind::LeafView,
        }
    }

    /// Suggestion for a view with high betweenness centrality.
    #[must_use]
    pub fn central_hub(view_name: &str, centrality: f64) -> Self {
        Self {
            view_name: view_name.to_string(),
            score: centrality,
            reason: format!(
                "Central hub (centrality: {centrality:.2}) connecting sources to consumers"
            ),
            kind: EntryPointKind::CentralHub,
        }
    }
}

/// Result of subgraph extraction around a focus view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubgraphResult {
    /// Views in the subgraph, including the focus view.
    pub views: BTreeSet<String>,
    /// The view the extraction was centred on.
    pub focus_view: String,
    /// Levels of dependencies (incoming edges) that were followed.
    pub depth_upstream: usize,
    /// Levels of dependents (outgoing edges) that were followed.
    pub depth_downstream: usize,
    /// Whether the node cap was reached.
    pub truncated: bool,
}

impl SubgraphResult {
    /// Number of views in the subgraph.
    #[must_use]
    pub fn view_count(&self) -> usize {
        self.views.len()
    }

    /// Whether the subgraph contains the given view.
    #[must_use]
    pub fn contains(&self, view_name: &str) -> bool {
        self.views.contains(view_name)
    }

    /// Whether the subgraph is small enough to diagram legibly.
    ///
    /// Threshold: 50 nodes.
    #[must_use]
    pub fn visualizable(&self) -> bool {
        self.views.len() <= 50
    }
}

/// Outcome of feeding a dataset into the dependency graph.
///
/// Loading is best effort: views whose SQL fails to parse are skipped and
/// logged, and the counts here report what happened.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadStats {
    /// Views successfully parsed and inserted.
    pub views_loaded: usize,
    /// Views skipped because their SQL failed to parse.
    pub views_skipped: usize,
}
