use std::io::Write;
use tabgraph::{
    ColumnarTable, CsvTable, DuplicateEdgePolicy, GraphBuilder, IngestConfig, IngestError,
    NodeId, NodePolicy, TableKind,
};

fn edge_table(src: Vec<&str>, dst: Vec<&str>) -> ColumnarTable {
    ColumnarTable::new()
        .with_column("source", src)
        .unwrap()
        .with_column("destination", dst)
        .unwrap()
}

fn typed_nodes() -> ColumnarTable {
    ColumnarTable::new()
        .with_column("name", vec!["a", "b", "c"])
        .unwrap()
        .with_column("type", vec![Some("user"), Some("user|admin"), None])
        .unwrap()
}

fn typed_config() -> IngestConfig {
    IngestConfig::new("people")
        .with_directed(true)
        .with_node_type_column("type")
        .with_node_type_separator("|")
}

#[test]
fn test_directed_chain_from_edges_only() {
    let edges = edge_table(vec!["a", "b"], vec!["b", "c"]);
    let graph = GraphBuilder::new(IngestConfig::default().with_directed(true))
        .build_from_edges(&edges)
        .unwrap();

    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.edge_count(), 2);
    assert!(graph.is_directed());

    let a = graph.node_id("a").unwrap();
    let b = graph.node_id("b").unwrap();
    let c = graph.node_id("c").unwrap();
    assert_eq!(graph.neighbors(a), &[b]);
    assert!(graph.neighbors(c).is_empty());
    // Restartable: reading twice gives the same sequence
    assert_eq!(graph.neighbors(a), graph.neighbors(a));
}

#[test]
fn test_node_type_sets() {
    let edges = edge_table(vec!["a", "b"], vec!["b", "c"]);
    let graph = GraphBuilder::new(typed_config()).build(&typed_nodes(), &edges).unwrap();

    let names = |node: &str| -> Vec<String> {
        let id = graph.node_id(node).unwrap();
        graph.node_type_names(id).map(str::to_string).collect()
    };
    assert_eq!(names("a"), vec!["user"]);
    assert_eq!(names("b"), vec!["user", "admin"]);
    assert!(names("c").is_empty());

    let vocabulary: Vec<_> = graph
        .node_type_vocabulary()
        .entries()
        .map(|(_, name)| name.to_string())
        .collect();
    assert_eq!(vocabulary, vec!["user", "admin"]);
}

#[test]
fn test_sentinel_literal_is_a_real_type() {
    let nodes = ColumnarTable::new()
        .with_column("name", vec!["a", "b"])
        .unwrap()
        .with_column("type", vec![Some("None"), None])
        .unwrap();
    let edges = edge_table(vec!["a"], vec!["b"]);
    let graph = GraphBuilder::new(typed_config()).build(&nodes, &edges).unwrap();

    assert_eq!(graph.node_type_vocabulary().size(), 1);
    assert_eq!(graph.node_type_names(NodeId(0)).collect::<Vec<_>>(), vec!["None"]);
    assert!(graph.node_type_ids(NodeId(1)).is_empty());
}

#[test]
fn test_omitted_weight_defaults_to_one() {
    let edges = edge_table(vec!["a", "b"], vec!["b", "c"])
        .with_column("weight", vec![None, Some(0.25)])
        .unwrap();
    let config = IngestConfig::default()
        .with_directed(true)
        .with_edge_weight_column("weight");
    let graph = GraphBuilder::new(config).build_from_edges(&edges).unwrap();

    assert!(graph.has_edge_weights());
    let a_slot = graph.edge_slots(graph.node_id("a").unwrap()).start;
    let b_slot = graph.edge_slots(graph.node_id("b").unwrap()).start;
    assert_eq!(graph.edge_weight(a_slot), 1.0);
    assert_eq!(graph.edge_weight(b_slot), 0.25);
}

#[test]
fn test_weight_parse_error_carries_row() {
    let edges = ColumnarTable::new()
        .with_column("source", vec!["a", "b", "c"])
        .unwrap()
        .with_column("destination", vec!["b", "c", "a"])
        .unwrap()
        .with_column("weight", vec![Some("1"), Some("2"), Some("x")])
        .unwrap();
    let config = IngestConfig::default().with_edge_weight_column("weight");
    let err = GraphBuilder::new(config).build_from_edges(&edges).unwrap_err();

    assert_eq!(
        err,
        IngestError::WeightParse {
            row: 2,
            value: "x".to_string()
        }
    );
}

#[test]
fn test_strict_mode_rejects_unknown_node() {
    let edges = edge_table(vec!["a", "a"], vec!["b", "zed"]);
    let err = GraphBuilder::new(typed_config())
        .build(&typed_nodes(), &edges)
        .unwrap_err();

    assert_eq!(
        err,
        IngestError::UnknownNode {
            row: 1,
            name: "zed".to_string()
        }
    );
    assert_eq!(err.row(), Some(1));
}

#[test]
fn test_permissive_mode_appends_node() {
    let edges = edge_table(vec!["a", "a"], vec!["b", "zed"]);
    let config = typed_config().with_node_policy(NodePolicy::Permissive);
    let graph = GraphBuilder::new(config).build(&typed_nodes(), &edges).unwrap();

    assert_eq!(graph.node_count(), 4);
    let zed = graph.node_id("zed").unwrap();
    assert_eq!(zed, NodeId(3));
    assert!(graph.node_type_ids(zed).is_empty());
    assert_eq!(graph.neighbors_by_name("a"), Some(vec!["b", "zed"]));
}

#[test]
fn test_explicit_node_table_matches_discovery_order() {
    let edges = edge_table(vec!["x", "y", "z"], vec!["y", "w", "x"]);
    let discovered = GraphBuilder::new(IngestConfig::default())
        .build_from_edges(&edges)
        .unwrap();

    let order: Vec<&str> = discovered.node_names().entries().map(|(_, n)| n).collect();
    assert_eq!(order, vec!["x", "y", "w", "z"]);

    let nodes = ColumnarTable::new().with_column("name", order.clone()).unwrap();
    let declared = GraphBuilder::new(IngestConfig::default())
        .build(&nodes, &edges)
        .unwrap();

    for name in order {
        assert_eq!(declared.node_id(name), discovered.node_id(name));
    }
    assert_eq!(declared.offsets(), discovered.offsets());
    assert_eq!(declared.destinations(), discovered.destinations());
}

#[test]
fn test_duplicate_node_rejected() {
    let nodes = ColumnarTable::new()
        .with_column("name", vec!["a", "b", "a"])
        .unwrap();
    let edges = edge_table(vec!["a"], vec!["b"]);
    let err = GraphBuilder::new(IngestConfig::default())
        .build(&nodes, &edges)
        .unwrap_err();

    assert_eq!(
        err,
        IngestError::DuplicateNode {
            row: 2,
            first_row: 0,
            name: "a".to_string()
        }
    );
}

#[test]
fn test_missing_column_is_configuration_error() {
    let edges = edge_table(vec!["a"], vec!["b"]);
    let config = IngestConfig::default().with_edge_columns("from", "to");
    let err = GraphBuilder::new(config).build_from_edges(&edges).unwrap_err();
    assert!(matches!(
        err,
        IngestError::Configuration { table: TableKind::Edges, ref column, .. } if column == "from"
    ));
}

#[test]
fn test_edge_types_resolved() {
    let edges = edge_table(vec!["a", "b", "c"], vec!["b", "c", "a"])
        .with_column("rel", vec![Some("KNOWS"), None, Some("KNOWS")])
        .unwrap();
    let config = IngestConfig::default()
        .with_directed(true)
        .with_edge_type_column("rel");
    let graph = GraphBuilder::new(config).build_from_edges(&edges).unwrap();

    assert_eq!(graph.edge_type_vocabulary().size(), 1);
    let b = graph.node_id("b").unwrap();
    let slot = graph.edge_slots(b).start;
    assert_eq!(graph.edge_type_id(slot), None);
    let a_slot = graph.edge_slots(graph.node_id("a").unwrap()).start;
    assert_eq!(graph.edge_type_name(a_slot), Some("KNOWS"));
}

#[test]
fn test_merge_policy_collapses_typed_duplicates() {
    let edges = edge_table(vec!["a", "a", "a"], vec!["b", "b", "b"])
        .with_column("rel", vec!["R", "R", "S"])
        .unwrap()
        .with_column("weight", vec![1.0, 2.0, 4.0])
        .unwrap();
    let config = IngestConfig::default()
        .with_directed(true)
        .with_edge_type_column("rel")
        .with_edge_weight_column("weight")
        .with_duplicate_edges(DuplicateEdgePolicy::Merge);
    let graph = GraphBuilder::new(config).build_from_edges(&edges).unwrap();

    assert_eq!(graph.edge_count(), 2);
    assert_eq!(graph.edge_weight(0), 3.0);
    assert_eq!(graph.edge_weight(1), 4.0);
}

#[test]
fn test_csv_end_to_end() {
    let dir = tempfile::tempdir().unwrap();

    let nodes_path = dir.path().join("nodes.csv");
    let mut nodes = std::fs::File::create(&nodes_path).unwrap();
    writeln!(nodes, "name,type").unwrap();
    writeln!(nodes, "a,user").unwrap();
    writeln!(nodes, "b,user|admin").unwrap();
    writeln!(nodes, "c,").unwrap();

    let edges_path = dir.path().join("edges.csv");
    let mut edges = std::fs::File::create(&edges_path).unwrap();
    writeln!(edges, "source,destination,weight,rel").unwrap();
    writeln!(edges, "a,b,,follows").unwrap();
    writeln!(edges, "b,c,2.5,").unwrap();

    let nodes = CsvTable::from_path(&nodes_path).unwrap();
    let edges = CsvTable::from_path(&edges_path).unwrap();
    let config = typed_config()
        .with_edge_weight_column("weight")
        .with_edge_type_column("rel");
    let graph = GraphBuilder::new(config).build(&nodes, &edges).unwrap();

    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.edge_weight(0), 1.0);
    assert_eq!(graph.edge_weight(1), 2.5);
    assert_eq!(graph.edge_type_name(0), Some("follows"));
    assert_eq!(graph.edge_type_name(1), None);
    assert!(graph.node_type_ids(NodeId(2)).is_empty());
}

#[test]
fn test_short_csv_row_is_row_format_error() {
    let edges = CsvTable::from_reader("source,destination\na,b\nb\n".as_bytes()).unwrap();
    let err = GraphBuilder::new(IngestConfig::default())
        .build_from_edges(&edges)
        .unwrap_err();
    assert!(matches!(
        err,
        IngestError::RowFormat { table: TableKind::Edges, row: 1, .. }
    ));
}

#[test]
fn test_long_csv_row_is_row_format_error() {
    let edges =
        CsvTable::from_reader("source,destination\na,b\nb,c,oops,extra\n".as_bytes()).unwrap();
    let err = GraphBuilder::new(IngestConfig::default())
        .build_from_edges(&edges)
        .unwrap_err();
    assert_eq!(
        err,
        IngestError::RowFormat {
            table: TableKind::Edges,
            row: 1,
            reason: "row has 4 field(s), header has 2".to_string(),
        }
    );
}

#[test]
fn test_independent_builds_do_not_share_vocabularies() {
    let first = edge_table(vec!["a"], vec!["b"]);
    let second = edge_table(vec!["q"], vec!["r"]);
    let builder = GraphBuilder::new(IngestConfig::default());

    let g1 = builder.build_from_edges(&first).unwrap();
    let g2 = builder.build_from_edges(&second).unwrap();
    assert_eq!(g1.node_id("a"), Some(NodeId(0)));
    assert_eq!(g2.node_id("q"), Some(NodeId(0)));
    assert_eq!(g2.node_id("a"), None);
}

#[test]
fn test_concurrent_readers() {
    let edges = edge_table(vec!["a", "b", "c"], vec!["b", "c", "a"]);
    let graph = GraphBuilder::new(IngestConfig::default())
        .build_from_edges(&edges)
        .unwrap();

    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                let total: usize = graph.nodes().map(|n| graph.degree(n)).sum();
                assert_eq!(total, 2 * graph.edge_count());
            });
        }
    });
}
