//! Node and edge type catalogs and singleton detection

use crate::graph::{EdgeId, EdgeTypeId, Graph, NodeId, NodeTypeId};
use serde::Serialize;

/// Occurrences of one type
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeCount {
    pub id: u32,
    pub name: String,
    pub count: usize,
}

/// Every type of one kind, in vocabulary order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeCatalog {
    pub types: Vec<TypeCount>,
    /// Nodes with an empty type set, or edges without a type
    pub untyped: usize,
}

/// A node type carried by exactly one node
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SingletonNodeType {
    pub type_id: NodeTypeId,
    pub type_name: String,
    pub node: NodeId,
    pub node_name: String,
}

/// An edge type carried by exactly one edge
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SingletonEdgeType {
    pub type_id: EdgeTypeId,
    pub type_name: String,
    pub edge: EdgeId,
    pub source: String,
    pub destination: String,
}

fn node_name(graph: &Graph, node: NodeId) -> String {
    graph.name_of(node).unwrap_or_default().to_string()
}

/// Counts node types and finds those owned by a single node
pub fn node_types(graph: &Graph) -> (TypeCatalog, Vec<SingletonNodeType>) {
    let vocabulary = graph.node_type_vocabulary();
    let mut counts = vec![0usize; vocabulary.size()];
    let mut first_owner: Vec<Option<NodeId>> = vec![None; vocabulary.size()];
    let mut untyped = 0;

    for node in graph.nodes() {
        let types = graph.node_type_ids(node);
        if types.is_empty() {
            untyped += 1;
        }
        for t in types {
            counts[t.0 as usize] += 1;
            first_owner[t.0 as usize].get_or_insert(node);
        }
    }

    let mut catalog = Vec::with_capacity(counts.len());
    let mut singletons = Vec::new();
    for (id, name) in vocabulary.entries() {
        let count = counts[id.0 as usize];
        if count == 1 {
            if let Some(node) = first_owner[id.0 as usize] {
                singletons.push(SingletonNodeType {
                    type_id: id,
                    type_name: name.to_string(),
                    node,
                    node_name: node_name(graph, node),
                });
            }
        }
        catalog.push(TypeCount {
            id: id.0,
            name: name.to_string(),
            count,
        });
    }

    (TypeCatalog { types: catalog, untyped }, singletons)
}

/// Counts edge types per input edge and finds those owned by a single edge.
///
/// Undirected graphs store each edge twice; the first slot met in node order
/// names the owner and counts are halved.
pub fn edge_types(graph: &Graph) -> (TypeCatalog, Vec<SingletonEdgeType>) {
    let vocabulary = graph.edge_type_vocabulary();
    let mut counts = vec![0usize; vocabulary.size()];
    let mut first_slot: Vec<Option<(NodeId, usize)>> = vec![None; vocabulary.size()];
    let mut untyped_slots = 0;

    for node in graph.nodes() {
        for slot in graph.edge_slots(node) {
            match graph.edge_type_id(slot) {
                Some(t) => {
                    counts[t.0 as usize] += 1;
                    first_slot[t.0 as usize].get_or_insert((node, slot));
                }
                None => untyped_slots += 1,
            }
        }
    }

    let copies = if graph.is_directed() { 1 } else { 2 };
    let mut catalog = Vec::with_capacity(counts.len());
    let mut singletons = Vec::new();
    for (id, name) in vocabulary.entries() {
        let count = counts[id.0 as usize] / copies;
        if count == 1 {
            if let Some((source, slot)) = first_slot[id.0 as usize] {
                singletons.push(SingletonEdgeType {
                    type_id: id,
                    type_name: name.to_string(),
                    edge: graph.edge_id(slot),
                    source: node_name(graph, source),
                    destination: node_name(graph, graph.edge_destination(slot)),
                });
            }
        }
        catalog.push(TypeCount {
            id: id.0,
            name: name.to_string(),
            count,
        });
    }

    (
        TypeCatalog {
            types: catalog,
            untyped: untyped_slots / copies,
        },
        singletons,
    )
}
