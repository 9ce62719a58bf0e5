//! Two-pass graph construction
//!
//! Pass 1 interns node names and types, resolves every edge to node IDs,
//! parses weights, and counts per-node degrees. Pass 2 lays out the CSR
//! arrays with a prefix sum over those degrees and scatters each edge into
//! its source segment through a per-node write cursor, which keeps input
//! order inside every segment. Both passes are O(V + E).
//!
//! Construction either returns a validated [`Graph`] or an error; partial
//! arrays are dropped on failure.

use super::csr::{Graph, GraphParts};
use super::error::{IngestError, IngestResult, TableKind};
use super::node_types::NodeTypeAssigner;
use super::types::{DenseId, EdgeId, EdgeTypeId, NodeId, NodeTypeId};
use super::validate::ConsistencyValidator;
use super::vocab::Vocabulary;
use crate::ingest::{
    DuplicateEdgePolicy, EdgeRecord, EdgeRecords, IngestConfig, NodePolicy, NodeRecords,
    TabularInputAdapter,
};
use crate::table::{Cell, TabularSource};
use rustc_hash::FxHashMap;
use tracing::{debug, info};

/// Largest index a `u32` node or edge ID can take
const MAX_ID_INDEX: usize = u32::MAX as usize;

/// An edge resolved to dense IDs, waiting for layout
#[derive(Debug, Clone, Copy)]
struct PendingEdge {
    src: NodeId,
    dst: NodeId,
    weight: f64,
    edge_type: Option<EdgeTypeId>,
}

/// Builds graphs from node and edge tables according to an [`IngestConfig`]
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    config: IngestConfig,
}

impl GraphBuilder {
    pub fn new(config: IngestConfig) -> Self {
        GraphBuilder { config }
    }

    pub fn config(&self) -> &IngestConfig {
        &self.config
    }

    /// Build from an explicit node table plus an edge table
    pub fn build(&self, nodes: &dyn TabularSource, edges: &dyn TabularSource) -> IngestResult<Graph> {
        let node_records = TabularInputAdapter::nodes(nodes, &self.config)?;
        let edge_records = TabularInputAdapter::edges(edges, &self.config)?;
        self.build_from_records(Some(node_records), edge_records)
    }

    /// Build from an edge table alone; nodes are discovered in edge order
    pub fn build_from_edges(&self, edges: &dyn TabularSource) -> IngestResult<Graph> {
        let edge_records = TabularInputAdapter::edges(edges, &self.config)?;
        self.build_from_records(None, edge_records)
    }

    /// Build from already opened record streams
    pub fn build_from_records(
        &self,
        nodes: Option<NodeRecords<'_>>,
        edges: EdgeRecords<'_>,
    ) -> IngestResult<Graph> {
        info!(
            "Building graph '{}' ({}, node table: {})",
            self.config.name,
            if self.config.directed { "directed" } else { "undirected" },
            nodes.is_some()
        );

        let mut construction = Construction::new(&self.config, edges.has_weights(), edges.has_edge_types());
        if let Some(nodes) = nodes {
            construction.declare_nodes(nodes)?;
        }
        construction.resolve_edges(edges)?;

        let graph = construction.layout();
        ConsistencyValidator::new(&graph).check()?;

        info!(
            "Built graph '{}': {} nodes, {} edges, {} node types, {} edge types",
            graph.name(),
            graph.node_count(),
            graph.edge_count(),
            graph.node_type_vocabulary().size(),
            graph.edge_type_vocabulary().size()
        );
        Ok(graph)
    }
}

/// State owned by one build. Never shared between builds.
struct Construction<'c> {
    config: &'c IngestConfig,
    track_weights: bool,
    track_edge_types: bool,

    node_names: Vocabulary<NodeId>,
    node_types: NodeTypeAssigner,
    edge_types: Vocabulary<EdgeTypeId>,

    /// Set when a node table was read; enables the unknown-node policy
    declared: bool,
    /// Node table row of each declared node, for duplicate reporting
    declared_rows: Vec<usize>,
    node_type_offsets: Vec<usize>,
    node_type_ids: Vec<NodeTypeId>,

    edges: Vec<PendingEdge>,
    merged: Option<FxHashMap<(NodeId, NodeId, Option<EdgeTypeId>), usize>>,
    degrees: Vec<usize>,
    max_index: usize,
}

impl<'c> Construction<'c> {
    fn new(config: &'c IngestConfig, track_weights: bool, track_edge_types: bool) -> Self {
        let node_types = NodeTypeAssigner::new(config.node_type_separator.clone())
            .with_trim(config.trim_node_types);
        let merged = match config.duplicate_edges {
            DuplicateEdgePolicy::Merge => Some(FxHashMap::default()),
            DuplicateEdgePolicy::Keep => None,
        };

        Construction {
            config,
            track_weights,
            track_edge_types,
            node_names: Vocabulary::new(),
            node_types,
            edge_types: Vocabulary::new(),
            declared: false,
            declared_rows: Vec::new(),
            node_type_offsets: vec![0],
            node_type_ids: Vec::new(),
            edges: Vec::new(),
            merged,
            degrees: Vec::new(),
            max_index: MAX_ID_INDEX,
        }
    }

    /// Pass 1, node table
    fn declare_nodes(&mut self, records: NodeRecords<'_>) -> IngestResult<()> {
        self.declared = true;
        self.node_names = Vocabulary::with_capacity(records.remaining());
        self.declared_rows.reserve(records.remaining());

        for record in records {
            let record = record?;
            if self.node_names.get(&record.name).is_none() {
                self.check_capacity(self.node_names.size(), TableKind::Nodes, record.row, "nodes")?;
            }
            let (id, is_new) = self.node_names.insert_new(&record.name);
            if !is_new {
                return Err(IngestError::DuplicateNode {
                    row: record.row,
                    first_row: self.declared_rows[id.index()],
                    name: record.name.into_owned(),
                });
            }
            self.declared_rows.push(record.row);

            let types = self.node_types.assign(record.node_type.as_deref());
            self.node_type_ids.extend_from_slice(&types);
            self.node_type_offsets.push(self.node_type_ids.len());
        }
        self.degrees.resize(self.node_names.size(), 0);

        debug!(
            "Declared {} nodes with {} node types",
            self.node_names.size(),
            self.node_types.vocabulary().size()
        );
        Ok(())
    }

    /// Pass 1, edge table
    fn resolve_edges(&mut self, records: EdgeRecords<'_>) -> IngestResult<()> {
        self.edges.reserve(records.remaining());

        for record in records {
            let record = record?;
            let src = self.resolve_node(&record, &record.source)?;
            let dst = self.resolve_node(&record, &record.destination)?;
            let weight = parse_weight(record.row, record.weight)?;
            let edge_type = record
                .edge_type
                .as_deref()
                .map(|name| self.edge_types.insert(name));

            self.push_edge(
                record.row,
                PendingEdge {
                    src,
                    dst,
                    weight,
                    edge_type,
                },
            )?;
        }

        debug!(
            "Resolved {} edges over {} nodes",
            self.edges.len(),
            self.node_names.size()
        );
        Ok(())
    }

    fn resolve_node(&mut self, record: &EdgeRecord<'_>, name: &str) -> IngestResult<NodeId> {
        if let Some(id) = self.node_names.get(name) {
            return Ok(id);
        }
        if self.declared && self.config.node_policy == NodePolicy::Strict {
            return Err(IngestError::UnknownNode {
                row: record.row,
                name: name.to_string(),
            });
        }

        self.check_capacity(self.node_names.size(), TableKind::Edges, record.row, "nodes")?;
        let id = self.node_names.insert(name);
        if self.declared {
            debug!("Edge row {} adds undeclared node '{}'", record.row, name);
            self.node_type_offsets.push(self.node_type_ids.len());
        }
        self.degrees.push(0);
        Ok(id)
    }

    /// Fails when the next ID, `len`, would not fit in a `u32`
    fn check_capacity(&self, len: usize, table: TableKind, row: usize, what: &str) -> IngestResult<()> {
        if len > self.max_index {
            return Err(IngestError::RowFormat {
                table,
                row,
                reason: format!("graph already holds {} {}, the most a u32 ID can address", len, what),
            });
        }
        Ok(())
    }

    fn push_edge(&mut self, row: usize, edge: PendingEdge) -> IngestResult<()> {
        if let Some(merged) = self.merged.as_mut() {
            let key = merge_key(self.config.directed, &edge);
            if let Some(&existing) = merged.get(&key) {
                debug!("Merging duplicate edge {} -> {}", edge.src, edge.dst);
                self.edges[existing].weight += edge.weight;
                return Ok(());
            }
        }
        self.check_capacity(self.edges.len(), TableKind::Edges, row, "edges")?;
        if let Some(merged) = self.merged.as_mut() {
            let key = merge_key(self.config.directed, &edge);
            merged.insert(key, self.edges.len());
        }

        self.degrees[edge.src.index()] += 1;
        if !self.config.directed {
            self.degrees[edge.dst.index()] += 1;
        }
        self.edges.push(edge);
        Ok(())
    }

    /// Pass 2: prefix sum and scatter
    fn layout(self) -> Graph {
        let node_count = self.node_names.size();

        let mut offsets = Vec::with_capacity(node_count + 1);
        let mut total = 0usize;
        offsets.push(0);
        for degree in &self.degrees {
            total += degree;
            offsets.push(total);
        }

        let mut cursor: Vec<usize> = offsets[..node_count].to_vec();
        let mut destinations = vec![NodeId(0); total];
        let mut edge_ids = vec![EdgeId(0); total];
        let mut weights = self.track_weights.then(|| vec![0.0; total]);
        let mut edge_types = self.track_edge_types.then(|| vec![None; total]);

        let mut place = |from: NodeId, to: NodeId, id: EdgeId, edge: &PendingEdge| {
            let slot = cursor[from.index()];
            cursor[from.index()] += 1;
            destinations[slot] = to;
            edge_ids[slot] = id;
            if let Some(weights) = weights.as_mut() {
                weights[slot] = edge.weight;
            }
            if let Some(edge_types) = edge_types.as_mut() {
                edge_types[slot] = edge.edge_type;
            }
        };

        for (idx, edge) in self.edges.iter().enumerate() {
            let id = EdgeId::from_index(idx);
            place(edge.src, edge.dst, id, edge);
            if !self.config.directed {
                place(edge.dst, edge.src, id, edge);
            }
        }

        let has_node_types = self.declared && self.config.node_type_column.is_some();
        let node_type_offsets = has_node_types.then_some(self.node_type_offsets);

        Graph::from_parts(GraphParts {
            name: self.config.name.clone(),
            directed: self.config.directed,
            edge_count: self.edges.len(),
            offsets,
            destinations,
            edge_ids,
            weights,
            edge_types,
            node_names: self.node_names,
            node_type_vocabulary: self.node_types.into_vocabulary(),
            edge_type_vocabulary: self.edge_types,
            node_type_offsets,
            node_type_ids: self.node_type_ids,
        })
    }
}

/// Undirected duplicates match on the unordered endpoint pair
fn merge_key(directed: bool, edge: &PendingEdge) -> (NodeId, NodeId, Option<EdgeTypeId>) {
    if directed || edge.src <= edge.dst {
        (edge.src, edge.dst, edge.edge_type)
    } else {
        (edge.dst, edge.src, edge.edge_type)
    }
}

/// Absent weights default to `1.0`; anything not a finite number fails
fn parse_weight(row: usize, value: Option<Cell<'_>>) -> IngestResult<f64> {
    let weight = match value {
        None => return Ok(1.0),
        Some(Cell::Float(x)) => x,
        Some(Cell::Int(i)) => i as f64,
        Some(Cell::Text(s)) => s.trim().parse::<f64>().map_err(|_| IngestError::WeightParse {
            row,
            value: s.to_string(),
        })?,
        Some(other @ Cell::Bool(_)) => {
            return Err(IngestError::WeightParse {
                row,
                value: other.to_text(),
            })
        }
    };

    if weight.is_finite() {
        Ok(weight)
    } else {
        Err(IngestError::WeightParse {
            row,
            value: weight.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::ColumnarTable;

    fn edges(src: Vec<&str>, dst: Vec<&str>) -> ColumnarTable {
        ColumnarTable::new()
            .with_column("source", src)
            .unwrap()
            .with_column("destination", dst)
            .unwrap()
    }

    #[test]
    fn test_directed_chain() {
        let table = edges(vec!["a", "b"], vec!["b", "c"]);
        let graph = GraphBuilder::new(IngestConfig::default().with_directed(true))
            .build_from_edges(&table)
            .unwrap();

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.neighbors_by_name("a"), Some(vec!["b"]));
        assert_eq!(graph.neighbors_by_name("c"), Some(vec![]));
        assert_eq!(graph.edge_weight(0), 1.0);
        assert!(!graph.has_edge_weights());
    }

    #[test]
    fn test_undirected_mirrors_edges() {
        let table = edges(vec!["a", "b"], vec!["b", "c"]);
        let graph = GraphBuilder::new(IngestConfig::default())
            .build_from_edges(&table)
            .unwrap();

        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.slot_count(), 4);
        assert_eq!(graph.neighbors_by_name("b"), Some(vec!["a", "c"]));
        assert_eq!(graph.neighbors_by_name("c"), Some(vec!["b"]));
    }

    #[test]
    fn test_segment_keeps_input_order() {
        let table = edges(vec!["a", "b", "a", "a"], vec!["d", "a", "c", "b"]);
        let graph = GraphBuilder::new(IngestConfig::default().with_directed(true))
            .build_from_edges(&table)
            .unwrap();

        assert_eq!(graph.neighbors_by_name("a"), Some(vec!["d", "c", "b"]));
        let slots = graph.edge_slots(NodeId(0));
        let ids: Vec<_> = slots.map(|s| graph.edge_id(s).as_u32()).collect();
        assert_eq!(ids, vec![0, 2, 3]);
    }

    #[test]
    fn test_self_loop_undirected_counts_twice() {
        let table = edges(vec!["a"], vec!["a"]);
        let graph = GraphBuilder::new(IngestConfig::default())
            .build_from_edges(&table)
            .unwrap();
        assert_eq!(graph.degree(NodeId(0)), 2);
        assert_eq!(graph.neighbors(NodeId(0)), &[NodeId(0), NodeId(0)]);
    }

    #[test]
    fn test_merge_duplicates_sums_weights() {
        let table = edges(vec!["a", "a", "b"], vec!["b", "b", "a"])
            .with_column("w", vec![1.0, 2.0, 4.0])
            .unwrap();
        let config = IngestConfig::default()
            .with_edge_weight_column("w")
            .with_duplicate_edges(DuplicateEdgePolicy::Merge);

        let undirected = GraphBuilder::new(config.clone()).build_from_edges(&table).unwrap();
        assert_eq!(undirected.edge_count(), 1);
        assert_eq!(undirected.edge_weight(0), 7.0);

        let directed = GraphBuilder::new(config.with_directed(true))
            .build_from_edges(&table)
            .unwrap();
        assert_eq!(directed.edge_count(), 2);
        assert_eq!(directed.neighbor_weights(NodeId(0)), Some(&[3.0][..]));
    }

    #[test]
    fn test_keep_duplicates_by_default() {
        let table = edges(vec!["a", "a"], vec!["b", "b"]);
        let graph = GraphBuilder::new(IngestConfig::default().with_directed(true))
            .build_from_edges(&table)
            .unwrap();
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.neighbors(NodeId(0)), &[NodeId(1), NodeId(1)]);
    }

    fn capped(config: &IngestConfig, max_index: usize) -> Construction<'_> {
        let mut construction = Construction::new(config, false, false);
        construction.max_index = max_index;
        construction
    }

    #[test]
    fn test_node_ids_beyond_limit_rejected() {
        let table = edges(vec!["a", "b"], vec!["b", "c"]);
        let config = IngestConfig::default();
        let records = TabularInputAdapter::edges(&table, &config).unwrap();

        let err = capped(&config, 1).resolve_edges(records).unwrap_err();
        assert!(matches!(
            err,
            IngestError::RowFormat { table: TableKind::Edges, row: 1, .. }
        ));
    }

    #[test]
    fn test_declared_nodes_beyond_limit_rejected() {
        let nodes = ColumnarTable::new()
            .with_column("name", vec!["a", "b", "c"])
            .unwrap();
        let config = IngestConfig::default();
        let records = TabularInputAdapter::nodes(&nodes, &config).unwrap();

        let err = capped(&config, 1).declare_nodes(records).unwrap_err();
        assert!(matches!(
            err,
            IngestError::RowFormat { table: TableKind::Nodes, row: 2, .. }
        ));
    }

    #[test]
    fn test_edge_ids_beyond_limit_rejected() {
        let table = edges(vec!["a", "a", "b"], vec!["b", "b", "a"]);
        let config = IngestConfig::default().with_directed(true);
        let records = TabularInputAdapter::edges(&table, &config).unwrap();

        let err = capped(&config, 1).resolve_edges(records).unwrap_err();
        assert_eq!(err.row(), Some(2));

        // Merged duplicates take no new ID
        let merging = config.with_duplicate_edges(DuplicateEdgePolicy::Merge);
        let records = TabularInputAdapter::edges(&table, &merging).unwrap();
        let mut construction = capped(&merging, 1);
        construction.resolve_edges(records).unwrap();
        assert_eq!(construction.edges.len(), 2);
    }

    #[test]
    fn test_parse_weight() {
        assert_eq!(parse_weight(0, None).unwrap(), 1.0);
        assert_eq!(parse_weight(0, Some(Cell::Text(" 2.5 "))).unwrap(), 2.5);
        assert_eq!(parse_weight(0, Some(Cell::Int(3))).unwrap(), 3.0);
        assert!(matches!(
            parse_weight(5, Some(Cell::Text("heavy"))),
            Err(IngestError::WeightParse { row: 5, .. })
        ));
        assert!(parse_weight(0, Some(Cell::Text("NaN"))).is_err());
        assert!(parse_weight(0, Some(Cell::Float(f64::INFINITY))).is_err());
        assert!(parse_weight(0, Some(Cell::Bool(true))).is_err());
    }
}
