//! CSV tabular backend
//!
//! The first record is the header. Rows are read eagerly, so the table is
//! fully materialized before ingestion starts. An empty field is an absent
//! value. Rows are kept even when their field count differs from the
//! header; ingestion rejects them as row format errors.

use super::{Cell, TableResult, TabularSource};
use std::io::Read;
use std::path::Path;

/// Row-oriented table read from CSV text
#[derive(Debug, Clone)]
pub struct CsvTable {
    headers: Vec<String>,
    rows: Vec<::csv::StringRecord>,
}

impl CsvTable {
    /// Read a comma separated file
    pub fn from_path<P: AsRef<Path>>(path: P) -> TableResult<Self> {
        Self::from_path_with_delimiter(path, b',')
    }

    pub fn from_path_with_delimiter<P: AsRef<Path>>(path: P, delimiter: u8) -> TableResult<Self> {
        let reader = Self::builder(delimiter).from_path(path)?;
        Self::collect(reader)
    }

    /// Read comma separated text from any reader
    pub fn from_reader<R: Read>(reader: R) -> TableResult<Self> {
        Self::from_reader_with_delimiter(reader, b',')
    }

    pub fn from_reader_with_delimiter<R: Read>(reader: R, delimiter: u8) -> TableResult<Self> {
        let reader = Self::builder(delimiter).from_reader(reader);
        Self::collect(reader)
    }

    fn builder(delimiter: u8) -> ::csv::ReaderBuilder {
        let mut builder = ::csv::ReaderBuilder::new();
        builder.delimiter(delimiter).flexible(true).has_headers(true);
        builder
    }

    fn collect<R: Read>(mut reader: ::csv::Reader<R>) -> TableResult<Self> {
        let headers: Vec<String> = reader.headers()?.iter().map(|s| s.to_string()).collect();
        let rows = reader.records().collect::<Result<Vec<_>, _>>()?;
        Ok(CsvTable { headers, rows })
    }
}

impl TabularSource for CsvTable {
    fn columns(&self) -> &[String] {
        &self.headers
    }

    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn row_len(&self, row: usize) -> usize {
        self.rows.get(row).map_or(0, |record| record.len())
    }

    fn cell(&self, row: usize, column: usize) -> Option<Cell<'_>> {
        self.rows
            .get(row)
            .and_then(|record| record.get(column))
            .filter(|value| !value.is_empty())
            .map(Cell::Text)
    }
}
