//! Read-only statistics over a built graph
//!
//! [`ReportGenerator`] computes counts, the degree distribution, the top-k
//! highest degree nodes, memory estimates, node and edge type catalogs and
//! singleton types. Everything is O(V + E) except the median and the top-k
//! ordering, which sort node degrees.

pub mod catalog;
pub mod degree;
pub mod memory;

pub use catalog::{SingletonEdgeType, SingletonNodeType, TypeCatalog, TypeCount};
pub use degree::{DegreeStats, NodeDegree};
pub use memory::{ArrayFootprint, ArrayKind, MemoryFootprint};

use crate::graph::Graph;
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// Default number of nodes listed in the top-degree table
pub const DEFAULT_TOP_K: usize = 10;

/// Structured statistics for one graph
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphReport {
    pub name: String,
    pub directed: bool,
    pub node_count: usize,
    pub edge_count: usize,
    pub self_loops: usize,
    /// Nodes whose adjacency segment is empty
    pub zero_degree_nodes: usize,
    pub density: f64,
    /// `None` for a graph without nodes
    pub degree: Option<DegreeStats>,
    pub top_nodes: Vec<NodeDegree>,
    pub memory: MemoryFootprint,
    pub node_types: TypeCatalog,
    pub edge_types: TypeCatalog,
    pub singleton_node_types: Vec<SingletonNodeType>,
    pub singleton_edge_types: Vec<SingletonEdgeType>,
}

/// Computes a [`GraphReport`] without touching the graph
pub struct ReportGenerator<'g> {
    graph: &'g Graph,
    top_k: usize,
}

impl<'g> ReportGenerator<'g> {
    pub fn new(graph: &'g Graph) -> Self {
        ReportGenerator {
            graph,
            top_k: DEFAULT_TOP_K,
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn generate(&self) -> GraphReport {
        let g = self.graph;
        let degrees = degree::degrees(g);
        let (node_types, singleton_node_types) = catalog::node_types(g);
        let (edge_types, singleton_edge_types) = catalog::edge_types(g);

        debug!(
            "Report for '{}': {} singleton node types, {} singleton edge types",
            g.name(),
            singleton_node_types.len(),
            singleton_edge_types.len()
        );

        GraphReport {
            name: g.name().to_string(),
            directed: g.is_directed(),
            node_count: g.node_count(),
            edge_count: g.edge_count(),
            self_loops: self_loops(g),
            zero_degree_nodes: degrees.iter().filter(|&&d| d == 0).count(),
            density: density(g),
            degree: degree::degree_stats(&degrees),
            top_nodes: degree::top_k(g, &degrees, self.top_k),
            memory: MemoryFootprint::of(g),
            node_types,
            edge_types,
            singleton_node_types,
            singleton_edge_types,
        }
    }
}

/// Self-loop edges; undirected loops occupy two slots of the same segment
fn self_loops(graph: &Graph) -> usize {
    let slots: usize = graph
        .nodes()
        .map(|node| graph.neighbors(node).iter().filter(|&&dst| dst == node).count())
        .sum();
    if graph.is_directed() {
        slots
    } else {
        slots / 2
    }
}

/// Edges over possible ordered (directed) or unordered pairs of distinct nodes
fn density(graph: &Graph) -> f64 {
    let n = graph.node_count() as f64;
    if graph.node_count() < 2 {
        return 0.0;
    }
    let pairs = if graph.is_directed() {
        n * (n - 1.0)
    } else {
        n * (n - 1.0) / 2.0
    };
    graph.edge_count() as f64 / pairs
}

impl GraphReport {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for GraphReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} graph '{}': {} nodes, {} edges",
            if self.directed { "Directed" } else { "Undirected" },
            self.name,
            self.node_count,
            self.edge_count
        )?;
        writeln!(
            f,
            "  density {:.6}, {} self-loop(s), {} zero-degree node(s)",
            self.density, self.self_loops, self.zero_degree_nodes
        )?;

        if let Some(d) = &self.degree {
            writeln!(
                f,
                "  degree: min {}, max {}, mode {}, mean {:.2}, median {:.1}",
                d.min, d.max, d.mode, d.mean, d.median
            )?;
        }

        if !self.top_nodes.is_empty() {
            writeln!(f, "  highest degree nodes:")?;
            for node in &self.top_nodes {
                writeln!(f, "    {} (id {}) degree {}", node.name, node.id.0, node.degree)?;
            }
        }

        writeln!(
            f,
            "  memory: {} bytes in arrays, {} bytes of strings",
            self.memory.array_bytes, self.memory.vocabulary_bytes
        )?;
        for array in &self.memory.arrays {
            writeln!(
                f,
                "    {}: {} x {} B = {} B",
                array.array.as_str(),
                array.elements,
                array.byte_width,
                array.bytes
            )?;
        }

        write_catalog(f, "node types", &self.node_types)?;
        write_catalog(f, "edge types", &self.edge_types)?;

        for s in &self.singleton_node_types {
            writeln!(f, "  singleton node type '{}' on node '{}'", s.type_name, s.node_name)?;
        }
        for s in &self.singleton_edge_types {
            writeln!(
                f,
                "  singleton edge type '{}' on edge {} ({} -> {})",
                s.type_name, s.edge.0, s.source, s.destination
            )?;
        }
        Ok(())
    }
}

fn write_catalog(f: &mut fmt::Formatter<'_>, label: &str, catalog: &TypeCatalog) -> fmt::Result {
    if catalog.types.is_empty() {
        return Ok(());
    }
    let listed: Vec<String> = catalog
        .types
        .iter()
        .map(|t| format!("{} ({})", t.name, t.count))
        .collect();
    writeln!(f, "  {}: {}", label, listed.join(", "))?;
    if catalog.untyped > 0 {
        writeln!(f, "    {} without a type", catalog.untyped)?;
    }
    Ok(())
}
