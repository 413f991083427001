//! Trusted interpreter for [`QueryPlan`]s.

use std::collections::BTreeSet;

use crate::error::{QueryError, QueryResult};
use crate::types::{Cell, ParsedTable};

use super::plan::{AggregateOp, PlanValue, Predicate, QueryPlan};

/// Result of interpreting a plan.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutput {
    /// A single value (counts and aggregates).
    Scalar(Cell),
    /// A row subset (previews). Preserves the source columns.
    Table(ParsedTable),
}

/// Validate and interpret `plan` against `table`.
///
/// Column references are checked up front so a bad plan fails before any row
/// is touched.
pub fn run(table: &ParsedTable, plan: &QueryPlan) -> QueryResult<QueryOutput> {
    let predicates = match plan {
        QueryPlan::Count { predicates }
        | QueryPlan::Aggregate { predicates, .. }
        | QueryPlan::Distinct { predicates, .. }
        | QueryPlan::Preview { predicates, .. } => predicates,
    };

    let bound: Vec<(usize, &Predicate)> = predicates
        .iter()
        .map(|p| resolve_column(table, p.column()).map(|idx| (idx, p)))
        .collect::<QueryResult<_>>()?;

    let matches = |row: &[Cell]| {
        bound
            .iter()
            .all(|(idx, p)| row.get(*idx).is_some_and(|cell| eval_predicate(p, cell)))
    };

    match plan {
        QueryPlan::Count { .. } => {
            let n = table.rows.iter().filter(|row| matches(row)).count();
            Ok(QueryOutput::Scalar(Cell::Int(n as i64)))
        }
        QueryPlan::Aggregate { column, agg, .. } => {
            let idx = resolve_column(table, column)?;
            aggregate(table, idx, column, *agg, &matches).map(QueryOutput::Scalar)
        }
        QueryPlan::Distinct { column, .. } => {
            let idx = resolve_column(table, column)?;
            let distinct: BTreeSet<String> = table
                .rows
                .iter()
                .filter(|row| matches(row))
                .filter_map(|row| row.get(idx))
                .filter(|cell| !cell.is_missing())
                .map(Cell::to_string)
                .collect();
            Ok(QueryOutput::Scalar(Cell::Int(distinct.len() as i64)))
        }
        QueryPlan::Preview { limit, .. } => {
            let rows: Vec<Vec<Cell>> = table
                .rows
                .iter()
                .filter(|row| matches(row))
                .take(*limit)
                .cloned()
                .collect();
            Ok(QueryOutput::Table(ParsedTable::new(
                table.columns.clone(),
                rows,
            )))
        }
    }
}

fn resolve_column(table: &ParsedTable, column: &str) -> QueryResult<usize> {
    table
        .index_of(column)
        .ok_or_else(|| QueryError::UnknownColumn {
            column: column.to_string(),
        })
}

fn aggregate<F>(
    table: &ParsedTable,
    idx: usize,
    column: &str,
    op: AggregateOp,
    matches: &F,
) -> QueryResult<Cell>
where
    F: Fn(&[Cell]) -> bool,
{
    let cells = || {
        table
            .rows
            .iter()
            .filter(|row| matches(row))
            .filter_map(move |row| row.get(idx))
    };

    if let AggregateOp::Count = op {
        let n = cells().filter(|cell| !cell.is_missing()).count();
        return Ok(Cell::Int(n as i64));
    }

    let mut present = 0usize;
    let mut values: Vec<f64> = Vec::new();
    for cell in cells() {
        if !cell.is_missing() {
            present += 1;
        }
        if let Some(v) = cell.as_f64() {
            values.push(v);
        }
    }

    if values.is_empty() {
        // Cells present but none numeric means the plan picked a text column.
        if present > 0 {
            return Err(QueryError::NotNumeric {
                column: column.to_string(),
            });
        }
        return Ok(Cell::Missing);
    }

    let out = match op {
        AggregateOp::Sum => values.iter().sum::<f64>(),
        AggregateOp::Min => values.iter().copied().fold(f64::INFINITY, f64::min),
        AggregateOp::Max => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        AggregateOp::Mean => values.iter().sum::<f64>() / values.len() as f64,
        AggregateOp::Count => unreachable!("count handled above"),
    };
    Ok(Cell::Float(out))
}

fn eval_predicate(predicate: &Predicate, cell: &Cell) -> bool {
    match predicate {
        Predicate::Eq { value, .. } => cell_equals(cell, value),
        Predicate::Ne { value, .. } => !cell.is_missing() && !cell_equals(cell, value),
        Predicate::Lt { value, .. } => cell.as_f64().is_some_and(|v| v < *value),
        Predicate::Le { value, .. } => cell.as_f64().is_some_and(|v| v <= *value),
        Predicate::Gt { value, .. } => cell.as_f64().is_some_and(|v| v > *value),
        Predicate::Ge { value, .. } => cell.as_f64().is_some_and(|v| v >= *value),
        Predicate::Contains { value, .. } => cell.as_text().is_some_and(|t| t.contains(value.as_str())),
        Predicate::IsMissing { .. } => cell.is_missing(),
        Predicate::NotMissing { .. } => !cell.is_missing(),
    }
}

fn cell_equals(cell: &Cell, value: &PlanValue) -> bool {
    match (cell, value) {
        (_, PlanValue::Number(n)) => cell.as_f64() == Some(*n),
        (Cell::Bool(b), PlanValue::Bool(v)) => b == v,
        (Cell::Text(t), PlanValue::Text(v)) => t == v,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::{QueryOutput, run};
    use crate::error::QueryError;
    use crate::query::plan::{AggregateOp, PlanValue, Predicate, QueryPlan};
    use crate::types::{Cell, ParsedTable};

    fn transactions() -> ParsedTable {
        ParsedTable::new(
            vec!["category".to_string(), "amount".to_string()],
            vec![
                vec![Cell::Text("food".to_string()), Cell::Int(10)],
                vec![Cell::Text("food".to_string()), Cell::Float(2.5)],
                vec![Cell::Text("travel".to_string()), Cell::Int(100)],
                vec![Cell::Text("food".to_string()), Cell::Missing],
            ],
        )
    }

    fn eq_food() -> Predicate {
        Predicate::Eq {
            column: "category".to_string(),
            value: PlanValue::Text("food".to_string()),
        }
    }

    #[test]
    fn count_applies_predicates() {
        let out = run(&transactions(), &QueryPlan::Count { predicates: vec![eq_food()] }).unwrap();
        assert_eq!(out, QueryOutput::Scalar(Cell::Int(3)));
    }

    #[test]
    fn sum_ignores_missing_cells() {
        let plan = QueryPlan::Aggregate {
            column: "amount".to_string(),
            agg: AggregateOp::Sum,
            predicates: vec![eq_food()],
        };
        assert_eq!(
            run(&transactions(), &plan).unwrap(),
            QueryOutput::Scalar(Cell::Float(12.5))
        );
    }

    #[test]
    fn mean_and_min_max() {
        let table = transactions();
        let agg = |op| QueryPlan::Aggregate {
            column: "amount".to_string(),
            agg: op,
            predicates: vec![],
        };
        assert_eq!(
            run(&table, &agg(AggregateOp::Mean)).unwrap(),
            QueryOutput::Scalar(Cell::Float(112.5 / 3.0))
        );
        assert_eq!(
            run(&table, &agg(AggregateOp::Min)).unwrap(),
            QueryOutput::Scalar(Cell::Float(2.5))
        );
        assert_eq!(
            run(&table, &agg(AggregateOp::Max)).unwrap(),
            QueryOutput::Scalar(Cell::Float(100.0))
        );
    }

    #[test]
    fn aggregate_count_counts_non_missing() {
        let plan = QueryPlan::Aggregate {
            column: "amount".to_string(),
            agg: AggregateOp::Count,
            predicates: vec![],
        };
        assert_eq!(
            run(&transactions(), &plan).unwrap(),
            QueryOutput::Scalar(Cell::Int(3))
        );
    }

    #[test]
    fn numeric_aggregate_over_text_column_errors() {
        let plan = QueryPlan::Aggregate {
            column: "category".to_string(),
            agg: AggregateOp::Sum,
            predicates: vec![],
        };
        let err = run(&transactions(), &plan).unwrap_err();
        assert!(matches!(err, QueryError::NotNumeric { column } if column == "category"));
    }

    #[test]
    fn aggregate_over_all_missing_is_missing() {
        let table = ParsedTable::new(
            vec!["a".to_string(), "b".to_string()],
            vec![vec![Cell::Int(1), Cell::Missing]],
        );
        let plan = QueryPlan::Aggregate {
            column: "b".to_string(),
            agg: AggregateOp::Sum,
            predicates: vec![],
        };
        assert_eq!(run(&table, &plan).unwrap(), QueryOutput::Scalar(Cell::Missing));
    }

    #[test]
    fn unknown_column_is_rejected_before_rows_are_read() {
        let plan = QueryPlan::Count {
            predicates: vec![Predicate::IsMissing {
                column: "nope".to_string(),
            }],
        };
        let err = run(&transactions(), &plan).unwrap_err();
        assert!(matches!(err, QueryError::UnknownColumn { column } if column == "nope"));
    }

    #[test]
    fn distinct_counts_unique_non_missing_values() {
        let plan = QueryPlan::Distinct {
            column: "category".to_string(),
            predicates: vec![],
        };
        assert_eq!(
            run(&transactions(), &plan).unwrap(),
            QueryOutput::Scalar(Cell::Int(2))
        );
    }

    #[test]
    fn preview_returns_matching_rows_up_to_limit() {
        let plan = QueryPlan::Preview {
            limit: 2,
            predicates: vec![eq_food()],
        };
        let QueryOutput::Table(out) = run(&transactions(), &plan).unwrap() else {
            panic!("expected a table");
        };
        assert_eq!(out.columns, transactions().columns);
        assert_eq!(out.row_count(), 2);
        assert_eq!(out.rows[1][1], Cell::Float(2.5));
    }

    #[test]
    fn missing_cells_fail_ordinary_comparisons() {
        let table = transactions();
        let ne = QueryPlan::Count {
            predicates: vec![Predicate::Ne {
                column: "amount".to_string(),
                value: PlanValue::Number(10.0),
            }],
        };
        // The missing amount is excluded from both eq and ne.
        assert_eq!(run(&table, &ne).unwrap(), QueryOutput::Scalar(Cell::Int(2)));

        let gt = QueryPlan::Count {
            predicates: vec![Predicate::Gt {
                column: "amount".to_string(),
                value: 5.0,
            }],
        };
        assert_eq!(run(&table, &gt).unwrap(), QueryOutput::Scalar(Cell::Int(2)));
    }
}
