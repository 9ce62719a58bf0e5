//! Errors raised while turning tabular input into a graph

use thiserror::Error;

/// Which input table a row-level error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Nodes,
    Edges,
}

impl TableKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TableKind::Nodes => "nodes",
            TableKind::Edges => "edges",
        }
    }
}

impl std::fmt::Display for TableKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that abort graph construction.
///
/// Row-level variants carry the zero-based row index within the offending
/// table. Construction stops at the first error and no graph is returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IngestError {
    /// The column mapping names a column the source does not have
    #[error("{table} table has no column '{column}' (available: {available})")]
    Configuration {
        table: TableKind,
        column: String,
        available: String,
    },

    /// Short row, or a required value is missing or has the wrong shape
    #[error("{table} row {row}: {reason}")]
    RowFormat {
        table: TableKind,
        row: usize,
        reason: String,
    },

    /// Edge endpoint absent from the node table under strict mode
    #[error("edges row {row}: node '{name}' is not declared in the node table")]
    UnknownNode { row: usize, name: String },

    /// Weight value is not a finite number
    #[error("edges row {row}: weight '{value}' is not a finite number")]
    WeightParse { row: usize, value: String },

    /// The node table lists the same name twice
    #[error("nodes row {row}: node '{name}' already declared at row {first_row}")]
    DuplicateNode {
        row: usize,
        first_row: usize,
        name: String,
    },

    /// Post-build structural check failed. Always a builder defect.
    #[error("internal construction error: {0}")]
    Construction(String),
}

impl IngestError {
    /// Row index the error refers to, when it is tied to a row
    pub fn row(&self) -> Option<usize> {
        match self {
            IngestError::RowFormat { row, .. }
            | IngestError::UnknownNode { row, .. }
            | IngestError::WeightParse { row, .. }
            | IngestError::DuplicateNode { row, .. } => Some(*row),
            IngestError::Configuration { .. } | IngestError::Construction(_) => None,
        }
    }
}

pub type IngestResult<T> = Result<T, IngestError>;
