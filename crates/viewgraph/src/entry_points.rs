//! Entry-point suggestion for schema exploration.
//!
//! Wraps the three ranking algorithms behind a single strategy-selected
//! operation. Used when a schema is too large for a full diagram and the
//! caller needs guidance on where to start.

use std::str::FromStr;

use crate::error::{Error, Result};
use crate::graph::DependencyGraph;
use crate::types::EntryPointSuggestion;

/// Default number of suggestions when the caller does not specify a limit.
pub const DEFAULT_LIMIT: usize = 5;

/// Strategy for choosing entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Foundational views with the most dependents.
    HighImpact,
    /// Final outputs with no dependents.
    LeafViews,
    /// Views with high betweenness centrality.
    CentralHubs,
}

impl FromStr for Strategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "high-impact" => Ok(Self::HighImpact),
            "leaf-views" => Ok(Self::LeafViews),
            "central-hubs" => Ok(Self::CentralHubs),
            other => Err(Error::InvalidArgument(format!(
                "unknown strategy '{other}': use 'high-impact', 'leaf-views', or 'central-hubs'"
            ))),
        }
    }
}

/// Suggest entry points for schema exploration.
///
/// The output keeps the source order of the underlying algorithm: descending
/// by score for `high-impact` and `central-hubs`, alphabetical for
/// `leaf-views`.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] for an unknown strategy string.
pub fn suggest_entry_points(
    graph: &DependencyGraph,
    strategy: &str,
    limit: Option<usize>,
) -> Result<Vec<EntryPointSuggestion>> {
    let strategy = Strategy::from_str(strategy)?;
    let limit = limit.unwrap_or(DEFAULT_LIMIT);

    let suggestions = match strategy {
        Strategy::HighImpact => graph
            .find_high_impact_views(limit)
            .iter()
            .map(|(name, count)| EntryPointSuggestion::high_impact(name, *count))
            .collect(),
        Strategy::LeafViews => graph
            .find_leaf_views()
            .iter()
            .take(limit)
            .map(|name| EntryPointSuggestion::leaf_view(name))
            .collect(),
        Strategy::CentralHubs => graph
            .find_central_hubs(limit)
            .iter()
            .map(|(name, score)| EntryPointSuggestion::central_hub(name, *score))
            .collect(),
    };
    Ok(suggestions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EntryPointKind;

    fn sample_graph() -> DependencyGraph {
        let mut graph = DependencyGraph::new();
        graph.add_view("b", "SELECT * FROM a").unwrap();
        graph.add_view("c", "SELECT * FROM a").unwrap();
        graph
            .add_view("d", "SELECT * FROM b JOIN c ON b.id = c.id")
            .unwrap();
        graph
    }

    #[test]
    fn strategy_parsing_is_case_insensitive() {
        assert_eq!("HIGH-IMPACT".parse::<Strategy>().unwrap(), Strategy::HighImpact);
        assert_eq!("Leaf-Views".parse::<Strategy>().unwrap(), Strategy::LeafViews);
        assert_eq!(
            "central-hubs".parse::<Strategy>().unwrap(),
            Strategy::CentralHubs
        );
    }

    #[test]
    fn unknown_strategy_is_invalid_argument() {
        let graph = sample_graph();
        let err = suggest_entry_points(&graph, "popularity", None).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert!(err.to_string().contains("popularity"));
    }

    #[test]
    fn high_impact_tops_with_the_most_depended_on_view() {
        let graph = sample_graph();
        let suggestions = suggest_entry_points(&graph, "high-impact", Some(2)).unwrap();
        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[0].view_name, "a");
        assert_eq!(suggestions[0].score, 2.0);
        assert_eq!(suggestions[0].kind, EntryPointKind::HighImpact);
        assert!(suggestions[0].reason.starts_with("2 views depend on this"));
    }

    #[test]
    fn leaf_views_come_back_alphabetical_with_zero_scores() {
        let graph = sample_graph();
        let suggestions = suggest_entry_points(&graph, "leaf-views", None).unwrap();
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].view_name, "d");
        assert_eq!(suggestions[0].score, 0.0);
        assert_eq!(suggestions[0].kind, EntryPointKind::LeafView);
    }

    #[test]
    fn default_limit_is_five() {
        let mut graph = DependencyGraph::new();
        for i in 0..8 {
            graph
                .add_view(&format!("v{i}"), "SELECT * FROM base")
                .unwrap();
        }
        let suggestions = suggest_entry_points(&graph, "high-impact", None).unwrap();
        assert_eq!(suggestions.len(), DEFAULT_LIMIT);
    }

    #[test]
    fn central_hub_reasons_embed_the_score() {
        let mut graph = DependencyGraph::new();
        graph.add_view("mid", "SELECT * FROM src").unwrap();
        graph.add_view("out", "SELECT * FROM mid").unwrap();

        let suggestions = suggest_entry_points(&graph, "central-hubs", Some(1)).unwrap();
        assert_eq!(suggestions[0].view_name, "mid");
        assert_eq!(suggestions[0].kind, EntryPointKind::CentralHub);
        assert!(suggestions[0].reason.contains("centrality: 1.00"));
    }
}
