//! Post-construction structural checks
//!
//! Ingestion from in-memory tables does fewer user-facing checks than a text
//! loader, so the built arrays are verified before the graph is returned.
//! A failure here is a builder defect, never bad input, and is reported as
//! [`IngestError::Construction`].

use super::csr::Graph;
use super::error::{IngestError, IngestResult};
use rayon::prelude::*;
use tracing::debug;

/// Verifies the CSR invariants of a freshly built graph
pub struct ConsistencyValidator<'g> {
    graph: &'g Graph,
}

impl<'g> ConsistencyValidator<'g> {
    pub fn new(graph: &'g Graph) -> Self {
        ConsistencyValidator { graph }
    }

    /// Run every check, stopping at the first violation
    pub fn check(&self) -> IngestResult<()> {
        self.check_offsets()?;
        self.check_slot_arrays()?;
        self.check_destinations()?;
        self.check_edge_attributes()?;
        self.check_node_types()?;
        debug!("Graph '{}' passed consistency checks", self.graph.name());
        Ok(())
    }

    fn check_offsets(&self) -> IngestResult<()> {
        let g = self.graph;
        let offsets = g.offsets();
        let node_count = g.node_names().size();

        if offsets.len() != node_count + 1 {
            return fail(format!(
                "offsets has {} entries for {} nodes",
                offsets.len(),
                node_count
            ));
        }
        if offsets[0] != 0 {
            return fail(format!("offsets[0] is {}", offsets[0]));
        }
        if let Some(i) = offsets.windows(2).position(|w| w[0] > w[1]) {
            return fail(format!(
                "offsets decrease at {}: {} > {}",
                i,
                offsets[i],
                offsets[i + 1]
            ));
        }
        if offsets[node_count] != g.destinations().len() {
            return fail(format!(
                "last offset {} does not match {} destination slots",
                offsets[node_count],
                g.destinations().len()
            ));
        }
        Ok(())
    }

    fn check_slot_arrays(&self) -> IngestResult<()> {
        let g = self.graph;
        let slots = g.destinations().len();
        let expected = if g.is_directed() {
            g.edge_count()
        } else {
            2 * g.edge_count()
        };

        if slots != expected {
            return fail(format!(
                "{} slots for {} edges in a {} graph",
                slots,
                g.edge_count(),
                if g.is_directed() { "directed" } else { "undirected" }
            ));
        }
        if g.edge_ids().len() != slots {
            return fail(format!("edge id array has {} entries, expected {}", g.edge_ids().len(), slots));
        }
        if let Some(weights) = g.weights() {
            if weights.len() != slots {
                return fail(format!("weight array has {} entries, expected {}", weights.len(), slots));
            }
        }
        if let Some(types) = g.edge_types() {
            if types.len() != slots {
                return fail(format!("edge type array has {} entries, expected {}", types.len(), slots));
            }
        }
        Ok(())
    }

    fn check_destinations(&self) -> IngestResult<()> {
        let g = self.graph;
        let node_count = g.node_count();
        let bad = g
            .destinations()
            .par_iter()
            .position_any(|dst| dst.0 as usize >= node_count);

        match bad {
            Some(slot) => fail(format!(
                "slot {} points at {} but there are {} nodes",
                slot,
                g.destinations()[slot],
                node_count
            )),
            None => Ok(()),
        }
    }

    fn check_edge_attributes(&self) -> IngestResult<()> {
        let g = self.graph;
        let edge_count = g.edge_count();
        if let Some(slot) = g.edge_ids().par_iter().position_any(|id| id.0 as usize >= edge_count) {
            return fail(format!("slot {} carries {} beyond {} edges", slot, g.edge_ids()[slot], edge_count));
        }

        if let Some(types) = g.edge_types() {
            let vocabulary_size = g.edge_type_vocabulary().size();
            let bad = types
                .par_iter()
                .position_any(|t| matches!(t, Some(id) if id.0 as usize >= vocabulary_size));
            if let Some(slot) = bad {
                return fail(format!("slot {} has an edge type outside the vocabulary", slot));
            }
        }
        Ok(())
    }

    fn check_node_types(&self) -> IngestResult<()> {
        let g = self.graph;
        let Some(offsets) = g.node_type_offsets() else {
            if g.flat_node_type_ids().is_empty() {
                return Ok(());
            }
            return fail("node type ids stored without offsets".to_string());
        };

        if offsets.len() != g.node_count() + 1 {
            return fail(format!(
                "node type offsets has {} entries for {} nodes",
                offsets.len(),
                g.node_count()
            ));
        }
        if offsets.first() != Some(&0) || offsets.windows(2).any(|w| w[0] > w[1]) {
            return fail("node type offsets are not a non-decreasing sequence from 0".to_string());
        }
        if offsets[g.node_count()] != g.flat_node_type_ids().len() {
            return fail("last node type offset does not match stored type ids".to_string());
        }

        let vocabulary_size = g.node_type_vocabulary().size();
        for node in g.nodes() {
            let types = g.node_type_ids(node);
            if types.windows(2).any(|w| w[0] >= w[1]) {
                return fail(format!("type set of {} is not sorted and unique", node));
            }
            if types.iter().any(|t| t.0 as usize >= vocabulary_size) {
                return fail(format!("{} has a type outside the vocabulary", node));
            }
        }
        Ok(())
    }
}

fn fail(reason: String) -> IngestResult<()> {
    Err(IngestError::Construction(reason))
}
