//! Describe-style summaries of a [`ParsedTable`].
//!
//! [`summarize`] computes per-column counts and numeric statistics. The
//! [`std::fmt::Display`] rendering of a [`TableSummary`] is the compact text
//! block the prompt layer embeds under "Dataset Summary".

use std::collections::BTreeSet;
use std::fmt;

use crate::types::{Cell, ParsedTable};

/// Min/max/mean over the numeric cells of one column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

/// Summary of one column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnProfile {
    /// Column name.
    pub name: String,
    /// Number of non-missing cells.
    pub non_missing: usize,
    /// Number of missing cells.
    pub missing: usize,
    /// Number of distinct non-missing values.
    pub distinct: usize,
    /// Numeric statistics, when the column has at least one numeric cell.
    pub numeric: Option<NumericStats>,
}

/// Summary of a whole table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableSummary {
    /// Number of data rows.
    pub rows: usize,
    /// One profile per column, in table order.
    pub columns: Vec<ColumnProfile>,
}

/// Compute per-column profiles for `table`.
pub fn summarize(table: &ParsedTable) -> TableSummary {
    let columns = table
        .columns
        .iter()
        .enumerate()
        .map(|(idx, name)| profile_column(table, idx, name))
        .collect();
    TableSummary {
        rows: table.row_count(),
        columns,
    }
}

fn profile_column(table: &ParsedTable, idx: usize, name: &str) -> ColumnProfile {
    let mut non_missing = 0usize;
    let mut missing = 0usize;
    let mut distinct: BTreeSet<String> = BTreeSet::new();
    let mut values: Vec<f64> = Vec::new();

    for cell in table.column(idx) {
        if cell.is_missing() {
            missing += 1;
            continue;
        }
        non_missing += 1;
        distinct.insert(cell.to_string());
        if let Some(v) = cell.as_f64() {
            values.push(v);
        }
    }

    let numeric = if values.is_empty() {
        None
    } else {
        let sum: f64 = values.iter().sum();
        Some(NumericStats {
            min: values.iter().copied().fold(f64::INFINITY, f64::min),
            max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            mean: sum / values.len() as f64,
        })
    };

    ColumnProfile {
        name: name.to_string(),
        non_missing,
        missing,
        distinct: distinct.len(),
        numeric,
    }
}

impl fmt::Display for TableSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "rows: {}", self.rows)?;
        for col in &self.columns {
            write!(
                f,
                "column '{}': non-missing={} missing={} distinct={}",
                col.name, col.non_missing, col.missing, col.distinct
            )?;
            if let Some(stats) = &col.numeric {
                write!(f, " min={} max={} mean={}", stats.min, stats.max, stats.mean)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
