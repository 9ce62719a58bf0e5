//! Immutable compact graph
//!
//! Adjacency is stored in Compressed Sparse Row (CSR) form:
//! - `offsets` has `node_count + 1` entries, node `n` owns slots
//!   `offsets[n]..offsets[n + 1]`
//! - `destinations`, `edge_ids`, `weights` and `edge_types` are parallel
//!   arrays over those slots
//!
//! Undirected graphs store every edge in both endpoints' segments, so they
//! hold `2 * edge_count` slots. Within a segment slots keep input order.

use super::types::{EdgeId, EdgeTypeId, NodeId, NodeTypeId};
use super::vocab::Vocabulary;
use crate::report::{GraphReport, ReportGenerator};
use std::ops::Range;

/// Everything the builder hands over to a graph
#[derive(Debug)]
pub(crate) struct GraphParts {
    pub name: String,
    pub directed: bool,
    pub edge_count: usize,
    pub offsets: Vec<usize>,
    pub destinations: Vec<NodeId>,
    pub edge_ids: Vec<EdgeId>,
    pub weights: Option<Vec<f64>>,
    pub edge_types: Option<Vec<Option<EdgeTypeId>>>,
    pub node_names: Vocabulary<NodeId>,
    pub node_type_vocabulary: Vocabulary<NodeTypeId>,
    pub edge_type_vocabulary: Vocabulary<EdgeTypeId>,
    pub node_type_offsets: Option<Vec<usize>>,
    pub node_type_ids: Vec<NodeTypeId>,
}

/// A frozen heterogeneous graph.
///
/// Built once by [`GraphBuilder`](super::GraphBuilder) and read-only
/// afterwards, so it can be shared across threads without locking.
/// Methods taking a [`NodeId`] or a slot index panic when it is out of range,
/// like slice indexing.
#[derive(Debug, Clone)]
pub struct Graph {
    name: String,
    directed: bool,
    edge_count: usize,

    offsets: Vec<usize>,
    destinations: Vec<NodeId>,
    edge_ids: Vec<EdgeId>,
    /// Present only when a weight column was configured
    weights: Option<Vec<f64>>,
    /// Present only when an edge type column was configured
    edge_types: Option<Vec<Option<EdgeTypeId>>>,

    node_names: Vocabulary<NodeId>,
    node_type_vocabulary: Vocabulary<NodeTypeId>,
    edge_type_vocabulary: Vocabulary<EdgeTypeId>,

    /// Per-node type sets, CSR style. Present only when a node type column was configured.
    node_type_offsets: Option<Vec<usize>>,
    node_type_ids: Vec<NodeTypeId>,
}

impl Graph {
    pub(crate) fn from_parts(parts: GraphParts) -> Self {
        Graph {
            name: parts.name,
            directed: parts.directed,
            edge_count: parts.edge_count,
            offsets: parts.offsets,
            destinations: parts.destinations,
            edge_ids: parts.edge_ids,
            weights: parts.weights,
            edge_types: parts.edge_types,
            node_names: parts.node_names,
            node_type_vocabulary: parts.node_type_vocabulary,
            edge_type_vocabulary: parts.edge_type_vocabulary,
            node_type_offsets: parts.node_type_offsets,
            node_type_ids: parts.node_type_ids,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn node_count(&self) -> usize {
        self.offsets.len().saturating_sub(1)
    }

    /// Number of input edges (after duplicate merging, if enabled)
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Number of adjacency slots: `edge_count` if directed, twice that otherwise
    pub fn slot_count(&self) -> usize {
        self.destinations.len()
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn has_edge_weights(&self) -> bool {
        self.weights.is_some()
    }

    pub fn has_edge_types(&self) -> bool {
        self.edge_types.is_some()
    }

    pub fn has_node_types(&self) -> bool {
        self.node_type_offsets.is_some()
    }

    /// All node IDs in ascending order
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = NodeId> + '_ {
        self.node_names.iter()
    }

    /// Slot range owned by `node`
    pub fn edge_slots(&self, node: NodeId) -> Range<usize> {
        let idx = node.0 as usize;
        self.offsets[idx]..self.offsets[idx + 1]
    }

    /// Neighbors of `node` in input order
    pub fn neighbors(&self, node: NodeId) -> &[NodeId] {
        &self.destinations[self.edge_slots(node)]
    }

    pub fn degree(&self, node: NodeId) -> usize {
        let idx = node.0 as usize;
        self.offsets[idx + 1] - self.offsets[idx]
    }

    /// Weights aligned with [`neighbors`](Self::neighbors), if tracked
    pub fn neighbor_weights(&self, node: NodeId) -> Option<&[f64]> {
        let slots = self.edge_slots(node);
        self.weights.as_ref().map(|w| &w[slots])
    }

    /// Weight stored in `slot`; `1.0` when weights are not tracked
    pub fn edge_weight(&self, slot: usize) -> f64 {
        match &self.weights {
            Some(weights) => weights[slot],
            None => {
                assert!(slot < self.destinations.len(), "edge slot {slot} out of range");
                1.0
            }
        }
    }

    pub fn edge_type_id(&self, slot: usize) -> Option<EdgeTypeId> {
        self.edge_types.as_ref().and_then(|types| types[slot])
    }

    pub fn edge_type_name(&self, slot: usize) -> Option<&str> {
        self.edge_type_id(slot)
            .and_then(|id| self.edge_type_vocabulary.name(id))
    }

    /// Construction-order ID of the edge stored in `slot`
    pub fn edge_id(&self, slot: usize) -> EdgeId {
        self.edge_ids[slot]
    }

    /// Destination node stored in `slot`
    pub fn edge_destination(&self, slot: usize) -> NodeId {
        self.destinations[slot]
    }

    /// Sorted type IDs of `node`; empty when untyped
    pub fn node_type_ids(&self, node: NodeId) -> &[NodeTypeId] {
        match &self.node_type_offsets {
            Some(offsets) => {
                let idx = node.0 as usize;
                &self.node_type_ids[offsets[idx]..offsets[idx + 1]]
            }
            None => {
                assert!((node.0 as usize) < self.node_count(), "node {node} out of range");
                &[]
            }
        }
    }

    pub fn node_type_names(&self, node: NodeId) -> impl Iterator<Item = &str> + '_ {
        self.node_type_ids(node)
            .iter()
            .filter_map(|id| self.node_type_vocabulary.name(*id))
    }

    pub fn name_of(&self, node: NodeId) -> Option<&str> {
        self.node_names.name(node)
    }

    pub fn node_id(&self, name: &str) -> Option<NodeId> {
        self.node_names.get(name)
    }

    /// Neighbors of the node called `name`
    pub fn neighbors_by_name(&self, name: &str) -> Option<Vec<&str>> {
        let node = self.node_id(name)?;
        Some(
            self.neighbors(node)
                .iter()
                .filter_map(|n| self.name_of(*n))
                .collect(),
        )
    }

    pub fn node_names(&self) -> &Vocabulary<NodeId> {
        &self.node_names
    }

    pub fn node_type_vocabulary(&self) -> &Vocabulary<NodeTypeId> {
        &self.node_type_vocabulary
    }

    pub fn edge_type_vocabulary(&self) -> &Vocabulary<EdgeTypeId> {
        &self.edge_type_vocabulary
    }

    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    pub fn destinations(&self) -> &[NodeId] {
        &self.destinations
    }

    pub fn edge_ids(&self) -> &[EdgeId] {
        &self.edge_ids
    }

    pub fn weights(&self) -> Option<&[f64]> {
        self.weights.as_deref()
    }

    pub fn edge_types(&self) -> Option<&[Option<EdgeTypeId>]> {
        self.edge_types.as_deref()
    }

    pub fn node_type_offsets(&self) -> Option<&[usize]> {
        self.node_type_offsets.as_deref()
    }

    pub fn flat_node_type_ids(&self) -> &[NodeTypeId] {
        &self.node_type_ids
    }

    /// Statistics report with the default top-k size
    pub fn render_report(&self) -> GraphReport {
        ReportGenerator::new(self).generate()
    }
}
