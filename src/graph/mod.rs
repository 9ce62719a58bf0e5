//! Graph construction and the compact graph itself
//!
//! This module turns resolved table rows into an immutable CSR graph:
//! - Dense IDs and string interning ([`Vocabulary`])
//! - Multi-label node types ([`NodeTypeAssigner`])
//! - Two-pass adjacency layout ([`GraphBuilder`])
//! - Structural checks before the graph is handed out ([`ConsistencyValidator`])

pub mod builder;
pub mod csr;
pub mod error;
pub mod node_types;
pub mod types;
pub mod validate;
pub mod vocab;

// Re-export main types
pub use builder::GraphBuilder;
pub use csr::Graph;
pub use error::{IngestError, IngestResult, TableKind};
pub use node_types::NodeTypeAssigner;
pub use types::{DenseId, EdgeId, EdgeTypeId, NodeId, NodeTypeId};
pub use validate::ConsistencyValidator;
pub use vocab::Vocabulary;
