//! Degree distribution statistics

use crate::graph::{Graph, NodeId};
use rayon::prelude::*;
use serde::Serialize;
use std::cmp::Reverse;

/// Summary of the per-node degree distribution
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DegreeStats {
    pub min: usize,
    pub max: usize,
    /// Most frequent degree; the smallest one on ties
    pub mode: usize,
    pub mean: f64,
    pub median: f64,
}

/// A node with its degree, as listed in the top-k table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeDegree {
    pub id: NodeId,
    pub name: String,
    pub degree: usize,
}

/// Degree of every node, from offset differences
pub fn degrees(graph: &Graph) -> Vec<usize> {
    graph
        .offsets()
        .par_windows(2)
        .map(|w| w[1] - w[0])
        .collect()
}

/// Distribution summary; `None` for a graph without nodes
pub fn degree_stats(degrees: &[usize]) -> Option<DegreeStats> {
    let min = *degrees.iter().min()?;
    let max = *degrees.iter().max()?;
    let total: usize = degrees.iter().sum();

    // Histogram over [0, max]; max never exceeds the slot count
    let mut histogram = vec![0usize; max + 1];
    for &d in degrees {
        histogram[d] += 1;
    }
    let mut mode = 0;
    for (degree, &count) in histogram.iter().enumerate() {
        if count > histogram[mode] {
            mode = degree;
        }
    }

    Some(DegreeStats {
        min,
        max,
        mode,
        mean: total as f64 / degrees.len() as f64,
        median: median(degrees),
    })
}

/// Median via selection on a scratch copy; even lengths average the middle pair
fn median(degrees: &[usize]) -> f64 {
    let mut scratch = degrees.to_vec();
    let mid = scratch.len() / 2;
    let (lower, upper, _) = scratch.select_nth_unstable(mid);
    let upper = *upper;

    if degrees.len() % 2 == 1 {
        upper as f64
    } else {
        let below = lower.iter().copied().max().unwrap_or(upper);
        (below + upper) as f64 / 2.0
    }
}

/// The `k` highest-degree nodes, ties broken by ascending node ID
pub fn top_k(graph: &Graph, degrees: &[usize], k: usize) -> Vec<NodeDegree> {
    let mut order: Vec<usize> = (0..degrees.len()).collect();
    order.sort_unstable_by_key(|&idx| (Reverse(degrees[idx]), idx));
    order.truncate(k);

    order
        .into_iter()
        .map(|idx| {
            let id = NodeId(idx as u32);
            NodeDegree {
                id,
                name: graph.name_of(id).unwrap_or_default().to_string(),
                degree: degrees[idx],
            }
        })
        .collect()
}
