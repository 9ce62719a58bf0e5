//! Ingestion configuration
//!
//! Maps the columns of the node and edge tables onto graph fields and fixes
//! the construction policies. Any optional column left unset disables that
//! feature (weights, node types, edge types) for the build.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// What to do when an edge names a node absent from the node table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodePolicy {
    /// Fail the build with an unknown node error
    #[default]
    Strict,
    /// Append the node with an empty type set
    Permissive,
}

/// How repeated (source, destination, edge type) edges are stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateEdgePolicy {
    /// Every input row becomes its own edge
    #[default]
    Keep,
    /// Collapse repeats into the first occurrence, summing weights
    Merge,
}

/// Errors raised while loading a configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid YAML configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Column mapping and construction policies for one build
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Graph name, carried into the report
    pub name: String,
    pub directed: bool,

    pub node_name_column: String,
    pub node_type_column: Option<String>,
    /// Splits a node type value into several labels. `None` keeps it whole.
    pub node_type_separator: Option<String>,
    /// Trim whitespace around each node type label after splitting
    pub trim_node_types: bool,

    pub edge_src_column: String,
    pub edge_dst_column: String,
    pub edge_weight_column: Option<String>,
    pub edge_type_column: Option<String>,

    pub node_policy: NodePolicy,
    pub duplicate_edges: DuplicateEdgePolicy,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            name: "Graph".to_string(),
            directed: false,
            node_name_column: "name".to_string(),
            node_type_column: None,
            node_type_separator: None,
            trim_node_types: false,
            edge_src_column: "source".to_string(),
            edge_dst_column: "destination".to_string(),
            edge_weight_column: None,
            edge_type_column: None,
            node_policy: NodePolicy::Strict,
            duplicate_edges: DuplicateEdgePolicy::Keep,
        }
    }
}

impl IngestConfig {
    /// Create a configuration with default columns and the given graph name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load from a file, JSON when the extension is `.json`, YAML otherwise
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&text),
            _ => Self::from_yaml_str(&text),
        }
    }

    pub fn with_directed(mut self, directed: bool) -> Self {
        self.directed = directed;
        self
    }

    pub fn with_node_name_column(mut self, column: impl Into<String>) -> Self {
        self.node_name_column = column.into();
        self
    }

    pub fn with_node_type_column(mut self, column: impl Into<String>) -> Self {
        self.node_type_column = Some(column.into());
        self
    }

    pub fn with_node_type_separator(mut self, separator: impl Into<String>) -> Self {
        self.node_type_separator = Some(separator.into());
        self
    }

    pub fn with_trim_node_types(mut self, trim: bool) -> Self {
        self.trim_node_types = trim;
        self
    }

    pub fn with_edge_columns(mut self, source: impl Into<String>, destination: impl Into<String>) -> Self {
        self.edge_src_column = source.into();
        self.edge_dst_column = destination.into();
        self
    }

    pub fn with_edge_weight_column(mut self, column: impl Into<String>) -> Self {
        self.edge_weight_column = Some(column.into());
        self
    }

    pub fn with_edge_type_column(mut self, column: impl Into<String>) -> Self {
        self.edge_type_column = Some(column.into());
        self
    }

    pub fn with_node_policy(mut self, policy: NodePolicy) -> Self {
        self.node_policy = policy;
        self
    }

    pub fn with_duplicate_edges(mut self, policy: DuplicateEdgePolicy) -> Self {
        self.duplicate_edges = policy;
        self
    }
}
