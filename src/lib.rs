//! Tabgraph
//!
//! Builds compact, immutable heterogeneous graphs from separate node and
//! edge tables, and summarizes them with a statistics report.
//!
//! # Architecture
//!
//! Data flows strictly downward:
//!
//! - `table`: the [`TabularSource`] capability and its backends
//!   ([`ColumnarTable`], [`CsvTable`])
//! - `ingest`: column mapping ([`IngestConfig`]) and lazy record streams
//!   ([`TabularInputAdapter`])
//! - `graph`: interning ([`Vocabulary`]), node type parsing
//!   ([`NodeTypeAssigner`]), two-pass CSR construction ([`GraphBuilder`]),
//!   post-build checks ([`ConsistencyValidator`]) and the frozen [`Graph`]
//! - `report`: read-only statistics ([`ReportGenerator`], [`GraphReport`])
//!
//! ## Example Usage
//!
//! ```rust
//! use tabgraph::{ColumnarTable, GraphBuilder, IngestConfig};
//!
//! let nodes = ColumnarTable::new()
//!     .with_column("name", vec!["a", "b", "c"]).unwrap()
//!     .with_column("type", vec![Some("user"), Some("user|admin"), None]).unwrap();
//! let edges = ColumnarTable::new()
//!     .with_column("source", vec!["a", "b"]).unwrap()
//!     .with_column("destination", vec!["b", "c"]).unwrap();
//!
//! let config = IngestConfig::new("people")
//!     .with_directed(true)
//!     .with_node_type_column("type")
//!     .with_node_type_separator("|");
//! let graph = GraphBuilder::new(config).build(&nodes, &edges).unwrap();
//!
//! assert_eq!(graph.node_count(), 3);
//! assert_eq!(graph.neighbors_by_name("a"), Some(vec!["b"]));
//!
//! let report = graph.render_report();
//! assert_eq!(report.singleton_node_types[0].type_name, "admin");
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod graph;
pub mod ingest;
pub mod report;
pub mod table;

// Re-export main types for convenience
pub use graph::{
    ConsistencyValidator, DenseId, EdgeId, EdgeTypeId, Graph, GraphBuilder, IngestError,
    IngestResult, NodeId, NodeTypeAssigner, NodeTypeId, TableKind, Vocabulary,
};

pub use ingest::{
    ConfigError, DuplicateEdgePolicy, EdgeRecord, IngestConfig, NodePolicy, NodeRecord,
    TabularInputAdapter,
};

pub use report::{GraphReport, ReportGenerator};

pub use table::{Cell, ColumnarTable, CsvTable, TableError, TabularSource};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
