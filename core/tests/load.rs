//! Loader tests against real files.

use std::io::Write;

use route_graph_core::load::{load_file, LoadOptions};
use route_graph_core::{Graph, GraphError, LoadError, Navigator};

const CAMPUS: &str = r#"digraph campus {
    "Union South" -> "Computer Sciences and Statistics" [seconds=176.0];
    "Computer Sciences and Statistics" -> "Union South" [seconds=176.0];
    "Computer Sciences and Statistics" -> "Atmospheric, Oceanic and Space Sciences" [seconds=127.2];
    "Atmospheric, Oceanic and Space Sciences" -> "Computer Sciences and Statistics" [seconds=127.2];
    "Union South" -> "Memorial Union" [seconds=950.4];
    "Memorial Union" -> "Union South" [seconds=950.4];
    "Atmospheric, Oceanic and Space Sciences" -> "Memorial Union" [seconds=800.0];
}
"#;

fn write_temp(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn s(label: &str) -> String {
    label.to_string()
}

#[test]
fn test_load_file_and_query() {
    let file = write_temp(CAMPUS);
    let mut graph: Graph<String> = Graph::new();
    let summary = load_file(file.path(), &mut graph, &LoadOptions::default()).unwrap();
    assert_eq!(summary.edges_loaded, 7);
    assert_eq!(graph.node_count(), 4);

    let nav = Navigator::new(graph);
    assert_eq!(
        nav.find_shortest_path(&s("Union South"), &s("Memorial Union")).unwrap(),
        vec![s("Union South"), s("Memorial Union")]
    );
    assert_eq!(
        nav.find_shortest_path(&s("Memorial Union"), &s("Atmospheric, Oceanic and Space Sciences"))
            .unwrap(),
        vec![
            s("Memorial Union"),
            s("Union South"),
            s("Computer Sciences and Statistics"),
            s("Atmospheric, Oceanic and Space Sciences"),
        ]
    );
    assert_eq!(
        nav.travel_times_on_path(&s("Union South"), &s("Atmospheric, Oceanic and Space Sciences"))
            .unwrap(),
        vec![176.0, 127.2]
    );
    assert_eq!(
        nav.most_distant_location(&s("Computer Sciences and Statistics")).unwrap(),
        s("Memorial Union")
    );
}

#[test]
fn test_missing_file_is_empty_source() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("campus.dot");
    let mut graph: Graph<String> = Graph::new();
    let err = load_file(&missing, &mut graph, &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, LoadError::EmptySource(_)));
}

#[test]
fn test_zero_length_file_is_empty_source() {
    let file = write_temp("");
    let mut graph: Graph<String> = Graph::new();
    let err = load_file(file.path(), &mut graph, &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, LoadError::EmptySource(_)));
}

#[test]
fn test_directory_is_empty_source() {
    let dir = tempfile::tempdir().unwrap();
    let mut graph: Graph<String> = Graph::new();
    let err = load_file(dir.path(), &mut graph, &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, LoadError::EmptySource(_)));
}

#[test]
fn test_invalid_weight_reports_line() {
    let file = write_temp("digraph {\n  \"A\" -> \"B\" [seconds=twelve];\n}\n");
    let mut graph: Graph<String> = Graph::new();
    let err = load_file(file.path(), &mut graph, &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, LoadError::InvalidInput { line: 2, .. }));
    assert_eq!(graph.node_count(), 0);
}

#[test]
fn test_loaded_graph_keeps_directions() {
    let file = write_temp("\"A\" -> \"B\" [seconds=3];\n");
    let mut graph: Graph<String> = Graph::new();
    load_file(file.path(), &mut graph, &LoadOptions::default()).unwrap();
    let nav = Navigator::new(graph);
    assert!(matches!(
        nav.find_shortest_path(&s("B"), &s("A")),
        Err(GraphError::PathNotFound { .. })
    ));
}
