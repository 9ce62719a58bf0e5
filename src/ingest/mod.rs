//! Ingestion front end: configuration and record streams
//!
//! [`IngestConfig`] maps table columns onto graph fields.
//! [`TabularInputAdapter`] turns any [`TabularSource`](crate::table::TabularSource)
//! into lazy node and edge record streams for the graph builder.

pub mod adapter;
pub mod config;

pub use adapter::{EdgeRecord, EdgeRecords, NodeRecord, NodeRecords, TabularInputAdapter};
pub use config::{ConfigError, DuplicateEdgePolicy, IngestConfig, NodePolicy};
