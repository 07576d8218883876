//! Packaged dataset integrity and file loading.
//!
//! Every embedded dataset must load without skips and classify to its
//! advertised complexity band; the classification counts graph vertices,
//! which include the base tables the views read from.

use std::io::Write;

use viewgraph::{
    embedded_names, load_embedded, load_path, ComplexityLevel, DependencyGraph, DiscoveryProvider,
    Error, SchemaComplexity, TestDatasetProvider,
};

fn load_into_graph(name: &str) -> (DependencyGraph, usize) {
    let dataset = load_embedded(name).expect("embedded dataset should load");
    let mut graph = DependencyGraph::new();
    let stats = dataset.populate(&mut graph);
    assert_eq!(
        stats.views_skipped, 0,
        "dataset {name} has views that fail to parse"
    );
    (graph, stats.views_loaded)
}

#[test]
fn simple_ecommerce_is_simple() {
    let (graph, loaded) = load_into_graph("simple_ecommerce");
    assert_eq!(loaded, 11);
    let complexity = SchemaComplexity::from_view_count("test.simple_ecommerce", graph.view_count());
    assert_eq!(complexity.level, ComplexityLevel::Simple);
    assert!(complexity.full_diagram_feasible());
}

#[test]
fn moderate_analytics_is_moderate() {
    let (graph, loaded) = load_into_graph("moderate_analytics");
    assert_eq!(loaded, 35);
    assert_eq!(
        ComplexityLevel::from_view_count(graph.view_count()),
        ComplexityLevel::Moderate
    );
}

#[test]
fn realistic_bi_warehouse_is_complex() {
    let (graph, loaded) = load_into_graph("realistic_bi_warehouse");
    assert_eq!(loaded, 86);
    assert_eq!(
        ComplexityLevel::from_view_count(graph.view_count()),
        ComplexityLevel::Complex
    );
}

#[test]
fn complex_enterprise_is_complex() {
    let (graph, loaded) = load_into_graph("complex_enterprise");
    assert_eq!(loaded, 154);
    assert_eq!(
        ComplexityLevel::from_view_count(graph.view_count()),
        ComplexityLevel::Complex
    );
}

#[test]
fn datasets_have_structure_worth_exploring() {
    let (graph, _) = load_into_graph("simple_ecommerce");

    // The storefront tables feed views.
    assert!(graph.dependent_count("orders") >= 2);
    // At least one view builds on another view.
    assert!(graph
        .vertices()
        .any(|v| graph.dependency_count(v) > 0 && graph.dependent_count(v) > 0));
    // And there are final outputs.
    assert!(!graph.find_leaf_views().is_empty());
}

#[test]
fn cte_views_in_datasets_do_not_leak_cte_vertices() {
    let (graph, _) = load_into_graph("simple_ecommerce");
    // daily_revenue binds a CTE named "settled".
    assert!(!graph.contains_view("settled"));
    assert!(graph.has_edge("payments", "daily_revenue"));
}

#[test]
fn discovery_names_match_loadable_datasets() {
    let provider = TestDatasetProvider;
    for schema in provider.list_schemas(Some("test")).unwrap() {
        assert!(load_embedded(&schema).is_ok(), "{schema} should load");
    }
    assert_eq!(embedded_names().len(), 4);
}

#[test]
fn loading_from_a_json_file_works() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"views": [{{"name": "v", "sql": "SELECT * FROM t"}}]}}"#
    )
    .unwrap();

    let dataset = load_path(file.path()).unwrap();
    assert_eq!(dataset.views.len(), 1);

    let mut graph = DependencyGraph::new();
    let stats = dataset.populate(&mut graph);
    assert_eq!(stats.views_loaded, 1);
    assert!(graph.has_edge("t", "v"));
}

#[test]
fn missing_file_is_an_io_error() {
    let err = load_path(std::path::Path::new("/nonexistent/views.json")).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn malformed_document_is_a_json_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{{\"views\": 42}}").unwrap();
    assert!(matches!(load_path(file.path()), Err(Error::Json(_))));
}
