//! Core data model types produced by the loader.
//!
//! The loader ingests an uploaded byte stream into an in-memory [`ParsedTable`]:
//! ordered header names plus row-major [`Cell`] values. There is no
//! user-provided schema; each cell is typed by inference at load time.

use std::fmt;

/// A single cell value in a [`ParsedTable`].
///
/// Cells are inferred per value: integers, floats and booleans parse into
/// their typed variants, sentinel missing-value tokens become
/// [`Cell::Missing`], and everything else stays text.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Missing/empty value.
    Missing,
    /// 64-bit signed integer.
    Int(i64),
    /// 64-bit float.
    Float(f64),
    /// Boolean.
    Bool(bool),
    /// UTF-8 text.
    Text(String),
}

impl Cell {
    /// Returns `true` for [`Cell::Missing`].
    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    /// Numeric view of the cell: `Int` and `Float` values, `None` otherwise.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Int(v) => Some(*v as f64),
            Cell::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Text view of the cell, for `Text` values only.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(v) => Some(v.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Missing => Ok(()),
            Cell::Int(v) => write!(f, "{v}"),
            Cell::Float(v) => write!(f, "{v}"),
            Cell::Bool(v) => write!(f, "{v}"),
            Cell::Text(v) => f.write_str(v),
        }
    }
}

/// In-memory tabular dataset produced by a successful load.
///
/// Rows are stored as `Vec<Vec<Cell>>`, each exactly as wide as `columns`.
/// The loader guarantees a returned table has at least 2 columns; tables
/// built by hand (tests, query previews) carry no such guarantee.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedTable {
    /// Ordered header names. Duplicate headers are kept as-is
    /// (tokenizer-default policy); [`ParsedTable::index_of`] finds the first.
    pub columns: Vec<String>,
    /// Row-major cell storage.
    pub rows: Vec<Vec<Cell>>,
}

impl ParsedTable {
    /// Create a table from headers and rows.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self { columns, rows }
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of data rows (header excluded).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns the index of a column by name, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Iterate the cells of one column, by index.
    pub fn column(&self, idx: usize) -> impl Iterator<Item = &Cell> {
        self.rows.iter().filter_map(move |row| row.get(idx))
    }

    /// Create a new table containing only rows that match `predicate`.
    ///
    /// The returned table preserves the original columns.
    pub fn filter_rows<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&[Cell]) -> bool,
    {
        let rows = self
            .rows
            .iter()
            .filter(|row| predicate(row.as_slice()))
            .cloned()
            .collect();
        Self {
            columns: self.columns.clone(),
            rows,
        }
    }
}
