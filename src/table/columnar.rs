//! In-memory columnar table.
//!
//! Values live in typed contiguous arrays, one per column, with `None`
//! marking an absent value.

use super::{Cell, TableError, TableResult, TabularSource};

/// A single typed column.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Int(Vec<Option<i64>>),
    Float(Vec<Option<f64>>),
    String(Vec<Option<String>>),
    Bool(Vec<Option<bool>>),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Column::Int(v) => v.len(),
            Column::Float(v) => v.len(),
            Column::String(v) => v.len(),
            Column::Bool(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, idx: usize) -> Option<Cell<'_>> {
        match self {
            Column::Int(v) => v.get(idx).copied().flatten().map(Cell::Int),
            Column::Float(v) => v.get(idx).copied().flatten().map(Cell::Float),
            Column::Bool(v) => v.get(idx).copied().flatten().map(Cell::Bool),
            Column::String(v) => v.get(idx).and_then(|o| o.as_deref()).map(Cell::Text),
        }
    }
}

impl From<Vec<&str>> for Column {
    fn from(values: Vec<&str>) -> Self {
        Column::String(values.into_iter().map(|s| Some(s.to_string())).collect())
    }
}

impl From<Vec<Option<&str>>> for Column {
    fn from(values: Vec<Option<&str>>) -> Self {
        Column::String(values.into_iter().map(|s| s.map(str::to_string)).collect())
    }
}

impl From<Vec<f64>> for Column {
    fn from(values: Vec<f64>) -> Self {
        Column::Float(values.into_iter().map(Some).collect())
    }
}

impl From<Vec<Option<f64>>> for Column {
    fn from(values: Vec<Option<f64>>) -> Self {
        Column::Float(values)
    }
}

impl From<Vec<i64>> for Column {
    fn from(values: Vec<i64>) -> Self {
        Column::Int(values.into_iter().map(Some).collect())
    }
}

/// Named columns of equal length
#[derive(Debug, Clone, Default)]
pub struct ColumnarTable {
    names: Vec<String>,
    columns: Vec<Column>,
    rows: usize,
}

impl ColumnarTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column. The first column fixes the row count.
    pub fn add_column(&mut self, name: impl Into<String>, column: impl Into<Column>) -> TableResult<()> {
        let name = name.into();
        let column = column.into();

        if self.names.contains(&name) {
            return Err(TableError::DuplicateColumn(name));
        }
        if self.columns.is_empty() {
            self.rows = column.len();
        } else if column.len() != self.rows {
            return Err(TableError::ColumnLength {
                column: name,
                expected: self.rows,
                actual: column.len(),
            });
        }

        self.names.push(name);
        self.columns.push(column);
        Ok(())
    }

    /// Builder-style [`add_column`](Self::add_column)
    pub fn with_column(mut self, name: impl Into<String>, column: impl Into<Column>) -> TableResult<Self> {
        self.add_column(name, column)?;
        Ok(self)
    }

    pub fn get_column(&self, name: &str) -> Option<&Column> {
        self.column_index(name).map(|idx| &self.columns[idx])
    }
}

impl TabularSource for ColumnarTable {
    fn columns(&self) -> &[String] {
        &self.names
    }

    fn row_count(&self) -> usize {
        self.rows
    }

    fn cell(&self, row: usize, column: usize) -> Option<Cell<'_>> {
        self.columns.get(column).and_then(|col| col.get(row))
    }
}
