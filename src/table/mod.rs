//! Tabular input capability
//!
//! The ingestion engine reads rows only through [`TabularSource`]. Each
//! backend (in-memory columns, CSV files, ...) implements that trait and the
//! engine never depends on a concrete tabular library.
//!
//! An absent value is `None` at this boundary. No string is reserved as a
//! "missing" marker.

pub mod columnar;
pub mod csv;

pub use self::columnar::{Column, ColumnarTable};
pub use self::csv::CsvTable;

use std::fmt;
use thiserror::Error;

/// Errors raised while materializing a tabular backend
#[derive(Error, Debug)]
pub enum TableError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("Column '{column}' has {actual} rows, expected {expected}")]
    ColumnLength {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("Duplicate column '{0}'")]
    DuplicateColumn(String),
}

pub type TableResult<T> = Result<T, TableError>;

/// A single raw value read from a tabular source
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell<'a> {
    Text(&'a str),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Cell<'_> {
    /// Text view of the value; numbers and booleans are formatted
    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Cell<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => f.write_str(s),
            Cell::Int(i) => write!(f, "{}", i),
            Cell::Float(x) => write!(f, "{}", x),
            Cell::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// Read-only access to an ordered set of rows with named columns
pub trait TabularSource {
    /// Column names in schema order
    fn columns(&self) -> &[String];

    fn row_count(&self) -> usize;

    /// Number of fields physically present in `row`.
    ///
    /// Row-oriented backends may carry short rows; columnar ones never do.
    fn row_len(&self, _row: usize) -> usize {
        self.columns().len()
    }

    /// Value at (`row`, `column`), `None` when absent
    fn cell(&self, row: usize, column: usize) -> Option<Cell<'_>>;

    fn column_index(&self, name: &str) -> Option<usize> {
        self.columns().iter().position(|c| c == name)
    }
}
