use tabgraph::report::ArrayKind;
use tabgraph::{ColumnarTable, GraphBuilder, IngestConfig, ReportGenerator};

/// Nodes a:user, b:user|admin, c:untyped; three edges, two edge types
fn heterogeneous(directed: bool) -> tabgraph::Graph {
    let nodes = ColumnarTable::new()
        .with_column("name", vec!["a", "b", "c"])
        .unwrap()
        .with_column("type", vec![Some("user"), Some("user|admin"), None])
        .unwrap();
    let edges = ColumnarTable::new()
        .with_column("source", vec!["a", "b", "c"])
        .unwrap()
        .with_column("destination", vec!["b", "c", "a"])
        .unwrap()
        .with_column("rel", vec![Some("follows"), Some("follows"), Some("blocks")])
        .unwrap()
        .with_column("weight", vec![Some(1.0), None, Some(3.0)])
        .unwrap();

    let config = IngestConfig::new("hetero")
        .with_directed(directed)
        .with_node_type_column("type")
        .with_node_type_separator("|")
        .with_edge_type_column("rel")
        .with_edge_weight_column("weight");
    GraphBuilder::new(config).build(&nodes, &edges).unwrap()
}

#[test]
fn test_singleton_types_with_owners() {
    let graph = heterogeneous(true);
    let report = graph.render_report();

    // "user" is carried by two nodes, so only "admin" is a singleton
    let user = report.node_types.types.iter().find(|t| t.name == "user").unwrap();
    assert_eq!(user.count, 2);
    assert_eq!(report.node_types.untyped, 1);

    assert_eq!(report.singleton_node_types.len(), 1);
    let admin = &report.singleton_node_types[0];
    assert_eq!(admin.type_name, "admin");
    assert_eq!(admin.node_name, "b");

    assert_eq!(report.singleton_edge_types.len(), 1);
    let blocks = &report.singleton_edge_types[0];
    assert_eq!(blocks.type_name, "blocks");
    assert_eq!(blocks.edge.as_u32(), 2);
    assert_eq!(blocks.source, "c");
    assert_eq!(blocks.destination, "a");
}

#[test]
fn test_undirected_edge_type_counts_per_edge() {
    let graph = heterogeneous(false);
    let report = graph.render_report();

    let counts: Vec<(String, usize)> = report
        .edge_types
        .types
        .iter()
        .map(|t| (t.name.clone(), t.count))
        .collect();
    assert_eq!(counts, vec![("follows".to_string(), 2), ("blocks".to_string(), 1)]);

    let blocks = &report.singleton_edge_types[0];
    assert_eq!(blocks.edge.as_u32(), 2);
    // The owning slot met first in node order is in a's segment
    assert_eq!(blocks.source, "a");
    assert_eq!(blocks.destination, "c");
}

#[test]
fn test_degree_sum_matches_edges() {
    let directed = heterogeneous(true);
    let total: usize = directed.nodes().map(|n| directed.degree(n)).sum();
    assert_eq!(total, directed.edge_count());

    let undirected = heterogeneous(false);
    let total: usize = undirected.nodes().map(|n| undirected.degree(n)).sum();
    assert_eq!(total, 2 * undirected.edge_count());
}

#[test]
fn test_memory_footprint() {
    let graph = heterogeneous(false);
    let report = graph.render_report();
    let memory = &report.memory;

    let destinations = memory.get(ArrayKind::Destinations).unwrap();
    assert_eq!(destinations.elements, 6);
    assert_eq!(destinations.bytes, 6 * 4);

    let weights = memory.get(ArrayKind::Weights).unwrap();
    assert_eq!(weights.elements, 6);
    assert_eq!(weights.bytes, 6 * 8);

    let offsets = memory.get(ArrayKind::Offsets).unwrap();
    assert_eq!(offsets.elements, 4);

    let node_types = memory.get(ArrayKind::NodeTypeIds).unwrap();
    assert_eq!(node_types.elements, 3);

    let sum: usize = memory.arrays.iter().map(|a| a.bytes).sum();
    assert_eq!(memory.array_bytes, sum);
    // "a" "b" "c" + "user" "admin" + "follows" "blocks"
    assert_eq!(memory.vocabulary_bytes, 3 + 9 + 13);
}

#[test]
fn test_untracked_arrays_are_not_reported() {
    let edges = ColumnarTable::new()
        .with_column("source", vec!["a"])
        .unwrap()
        .with_column("destination", vec!["b"])
        .unwrap();
    let graph = GraphBuilder::new(IngestConfig::default())
        .build_from_edges(&edges)
        .unwrap();
    let report = graph.render_report();

    assert!(report.memory.get(ArrayKind::Weights).is_none());
    assert!(report.memory.get(ArrayKind::EdgeTypes).is_none());
    assert!(report.node_types.types.is_empty());
    assert!(report.singleton_edge_types.is_empty());
}

#[test]
fn test_degree_distribution_and_top_k() {
    let edges = ColumnarTable::new()
        .with_column("source", vec!["hub", "hub", "hub", "x", "y"])
        .unwrap()
        .with_column("destination", vec!["x", "y", "z", "y", "z"])
        .unwrap();
    let graph = GraphBuilder::new(IngestConfig::default())
        .build_from_edges(&edges)
        .unwrap();
    let report = ReportGenerator::new(&graph).with_top_k(3).generate();

    // hub 3, x 2, y 3, z 2
    let degree = report.degree.as_ref().unwrap();
    assert_eq!(degree.min, 2);
    assert_eq!(degree.max, 3);
    assert_eq!(degree.mode, 2);
    assert_eq!(degree.mean, 2.5);
    assert_eq!(degree.median, 2.5);

    let top: Vec<(&str, usize)> = report
        .top_nodes
        .iter()
        .map(|n| (n.name.as_str(), n.degree))
        .collect();
    assert_eq!(top, vec![("hub", 3), ("y", 3), ("x", 2)]);
}

#[test]
fn test_report_text_mentions_singletons() {
    let graph = heterogeneous(true);
    let text = graph.render_report().to_string();
    assert!(text.contains("singleton node type 'admin' on node 'b'"));
    assert!(text.contains("singleton edge type 'blocks' on edge 2 (c -> a)"));
    assert!(text.contains("node types: user (2), admin (1)"));
}
