//! Typed record streams over a tabular source
//!
//! The adapter resolves the configured column names once, then yields one
//! record per row, lazily and in row order. It extracts raw values only;
//! weights stay unparsed and type strings unsplit.

use super::config::IngestConfig;
use crate::graph::error::{IngestError, IngestResult, TableKind};
use crate::table::{Cell, TabularSource};
use std::borrow::Cow;

/// One row of the node table
#[derive(Debug, Clone, PartialEq)]
pub struct NodeRecord<'a> {
    pub row: usize,
    pub name: Cow<'a, str>,
    pub node_type: Option<Cow<'a, str>>,
}

/// One row of the edge table
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeRecord<'a> {
    pub row: usize,
    pub source: Cow<'a, str>,
    pub destination: Cow<'a, str>,
    pub weight: Option<Cell<'a>>,
    pub edge_type: Option<Cow<'a, str>>,
}

/// Resolved position of a configured column
#[derive(Debug, Clone, Copy)]
struct ColumnRef<'c> {
    name: &'c str,
    index: usize,
}

fn resolve<'c>(
    source: &dyn TabularSource,
    table: TableKind,
    column: &'c str,
) -> IngestResult<ColumnRef<'c>> {
    match source.column_index(column) {
        Some(index) => Ok(ColumnRef { name: column, index }),
        None => Err(IngestError::Configuration {
            table,
            column: column.to_string(),
            available: source.columns().join(", "),
        }),
    }
}

fn resolve_optional<'c>(
    source: &dyn TabularSource,
    table: TableKind,
    column: Option<&'c str>,
) -> IngestResult<Option<ColumnRef<'c>>> {
    column.map(|name| resolve(source, table, name)).transpose()
}

fn text(cell: Cell<'_>) -> Cow<'_, str> {
    match cell {
        Cell::Text(s) => Cow::Borrowed(s),
        other => Cow::Owned(other.to_text()),
    }
}

/// A row must carry exactly one field per header column
fn check_arity(source: &dyn TabularSource, table: TableKind, row: usize) -> IngestResult<()> {
    let len = source.row_len(row);
    let width = source.columns().len();
    if len != width {
        return Err(IngestError::RowFormat {
            table,
            row,
            reason: format!("row has {} field(s), header has {}", len, width),
        });
    }
    Ok(())
}

fn field<'a>(
    source: &'a dyn TabularSource,
    row: usize,
    column: ColumnRef<'_>,
) -> Option<Cell<'a>> {
    source.cell(row, column.index)
}

fn required<'a>(
    source: &'a dyn TabularSource,
    table: TableKind,
    row: usize,
    column: ColumnRef<'_>,
) -> IngestResult<Cow<'a, str>> {
    match field(source, row, column) {
        Some(cell) => Ok(text(cell)),
        None => Err(IngestError::RowFormat {
            table,
            row,
            reason: format!("missing value in column '{}'", column.name),
        }),
    }
}

/// Single-pass stream of node records
pub struct NodeRecords<'a> {
    source: &'a dyn TabularSource,
    name: ColumnRef<'a>,
    node_type: Option<ColumnRef<'a>>,
    next_row: usize,
}

impl<'a> NodeRecords<'a> {
    /// Number of rows not yet yielded
    pub fn remaining(&self) -> usize {
        self.source.row_count().saturating_sub(self.next_row)
    }

    fn read(&self, row: usize) -> IngestResult<NodeRecord<'a>> {
        check_arity(self.source, TableKind::Nodes, row)?;
        let name = required(self.source, TableKind::Nodes, row, self.name)?;
        let node_type = match self.node_type {
            Some(column) => field(self.source, row, column).map(text),
            None => None,
        };
        Ok(NodeRecord { row, name, node_type })
    }
}

impl<'a> Iterator for NodeRecords<'a> {
    type Item = IngestResult<NodeRecord<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_row >= self.source.row_count() {
            return None;
        }
        let row = self.next_row;
        self.next_row += 1;
        Some(self.read(row))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

/// Single-pass stream of edge records
pub struct EdgeRecords<'a> {
    source: &'a dyn TabularSource,
    src: ColumnRef<'a>,
    dst: ColumnRef<'a>,
    weight: Option<ColumnRef<'a>>,
    edge_type: Option<ColumnRef<'a>>,
    next_row: usize,
}

impl<'a> EdgeRecords<'a> {
    pub fn remaining(&self) -> usize {
        self.source.row_count().saturating_sub(self.next_row)
    }

    pub fn has_weights(&self) -> bool {
        self.weight.is_some()
    }

    pub fn has_edge_types(&self) -> bool {
        self.edge_type.is_some()
    }

    fn read(&self, row: usize) -> IngestResult<EdgeRecord<'a>> {
        check_arity(self.source, TableKind::Edges, row)?;
        let source = required(self.source, TableKind::Edges, row, self.src)?;
        let destination = required(self.source, TableKind::Edges, row, self.dst)?;
        let weight = match self.weight {
            Some(column) => field(self.source, row, column),
            None => None,
        };
        let edge_type = match self.edge_type {
            Some(column) => field(self.source, row, column).map(text),
            None => None,
        };
        Ok(EdgeRecord {
            row,
            source,
            destination,
            weight,
            edge_type,
        })
    }
}

impl<'a> Iterator for EdgeRecords<'a> {
    type Item = IngestResult<EdgeRecord<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_row >= self.source.row_count() {
            return None;
        }
        let row = self.next_row;
        self.next_row += 1;
        Some(self.read(row))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

/// Opens record streams over node and edge tables
pub struct TabularInputAdapter;

impl TabularInputAdapter {
    /// Stream the node table. Fails if a configured column is missing.
    pub fn nodes<'a>(
        source: &'a dyn TabularSource,
        config: &'a IngestConfig,
    ) -> IngestResult<NodeRecords<'a>> {
        let table = TableKind::Nodes;
        Ok(NodeRecords {
            source,
            name: resolve(source, table, &config.node_name_column)?,
            node_type: resolve_optional(source, table, config.node_type_column.as_deref())?,
            next_row: 0,
        })
    }

    /// Stream the edge table. Fails if a configured column is missing.
    pub fn edges<'a>(
        source: &'a dyn TabularSource,
        config: &'a IngestConfig,
    ) -> IngestResult<EdgeRecords<'a>> {
        let table = TableKind::Edges;
        Ok(EdgeRecords {
            source,
            src: resolve(source, table, &config.edge_src_column)?,
            dst: resolve(source, table, &config.edge_dst_column)?,
            weight: resolve_optional(source, table, config.edge_weight_column.as_deref())?,
            edge_type: resolve_optional(source, table, config.edge_type_column.as_deref())?,
            next_row: 0,
        })
    }
}
