//! Closed-form memory estimates for the graph arrays

use crate::graph::{EdgeId, EdgeTypeId, Graph, NodeId, NodeTypeId};
use serde::Serialize;
use std::mem::size_of;

/// The arrays a graph may hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrayKind {
    Offsets,
    Destinations,
    EdgeIds,
    Weights,
    EdgeTypes,
    NodeTypeOffsets,
    NodeTypeIds,
}

impl ArrayKind {
    /// Bytes per element
    pub const fn byte_width(self) -> usize {
        match self {
            ArrayKind::Offsets | ArrayKind::NodeTypeOffsets => size_of::<usize>(),
            ArrayKind::Destinations => size_of::<NodeId>(),
            ArrayKind::EdgeIds => size_of::<EdgeId>(),
            ArrayKind::Weights => size_of::<f64>(),
            ArrayKind::EdgeTypes => size_of::<Option<EdgeTypeId>>(),
            ArrayKind::NodeTypeIds => size_of::<NodeTypeId>(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ArrayKind::Offsets => "offsets",
            ArrayKind::Destinations => "destinations",
            ArrayKind::EdgeIds => "edge_ids",
            ArrayKind::Weights => "weights",
            ArrayKind::EdgeTypes => "edge_types",
            ArrayKind::NodeTypeOffsets => "node_type_offsets",
            ArrayKind::NodeTypeIds => "node_type_ids",
        }
    }
}

/// Estimated size of one array: `elements * byte_width`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrayFootprint {
    pub array: ArrayKind,
    pub elements: usize,
    pub byte_width: usize,
    pub bytes: usize,
}

impl ArrayFootprint {
    pub fn new(array: ArrayKind, elements: usize) -> Self {
        let byte_width = array.byte_width();
        ArrayFootprint {
            array,
            elements,
            byte_width,
            bytes: elements * byte_width,
        }
    }
}

/// Per-array estimates plus the string payload of the vocabularies
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemoryFootprint {
    pub arrays: Vec<ArrayFootprint>,
    /// Bytes of interned name and type strings, excluding table overhead
    pub vocabulary_bytes: usize,
    /// Sum of the array estimates
    pub array_bytes: usize,
}

impl MemoryFootprint {
    pub fn of(graph: &Graph) -> Self {
        let mut arrays = vec![
            ArrayFootprint::new(ArrayKind::Offsets, graph.offsets().len()),
            ArrayFootprint::new(ArrayKind::Destinations, graph.destinations().len()),
            ArrayFootprint::new(ArrayKind::EdgeIds, graph.edge_ids().len()),
        ];
        if let Some(weights) = graph.weights() {
            arrays.push(ArrayFootprint::new(ArrayKind::Weights, weights.len()));
        }
        if let Some(types) = graph.edge_types() {
            arrays.push(ArrayFootprint::new(ArrayKind::EdgeTypes, types.len()));
        }
        if let Some(offsets) = graph.node_type_offsets() {
            arrays.push(ArrayFootprint::new(ArrayKind::NodeTypeOffsets, offsets.len()));
            arrays.push(ArrayFootprint::new(
                ArrayKind::NodeTypeIds,
                graph.flat_node_type_ids().len(),
            ));
        }

        let array_bytes = arrays.iter().map(|a| a.bytes).sum();
        let vocabulary_bytes = graph.node_names().string_bytes()
            + graph.node_type_vocabulary().string_bytes()
            + graph.edge_type_vocabulary().string_bytes();

        MemoryFootprint {
            arrays,
            vocabulary_bytes,
            array_bytes,
        }
    }

    pub fn get(&self, array: ArrayKind) -> Option<&ArrayFootprint> {
        self.arrays.iter().find(|a| a.array == array)
    }
}
