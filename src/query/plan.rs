//! Wire shape of constrained query plans.
//!
//! A plan is a tagged-variant value a model (or any untrusted caller) can
//! emit as JSON. It is validated and interpreted by [`crate::query::run`];
//! nothing in a plan is ever executed as code.

use serde::{Deserialize, Serialize};

use crate::error::{QueryError, QueryResult};

/// A literal value a predicate can compare against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlanValue {
    /// Numeric literal; compared against numeric cells.
    Number(f64),
    /// Boolean literal.
    Bool(bool),
    /// Text literal.
    Text(String),
}

/// Row predicate over a single column.
///
/// Predicates on missing cells are false except for `is_missing`; ordering
/// comparisons apply to numeric cells only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmp", rename_all = "snake_case")]
pub enum Predicate {
    /// Cell equals the literal.
    Eq { column: String, value: PlanValue },
    /// Cell is present and does not equal the literal.
    Ne { column: String, value: PlanValue },
    /// Numeric cell is strictly less than the literal.
    Lt { column: String, value: f64 },
    /// Numeric cell is at most the literal.
    Le { column: String, value: f64 },
    /// Numeric cell is strictly greater than the literal.
    Gt { column: String, value: f64 },
    /// Numeric cell is at least the literal.
    Ge { column: String, value: f64 },
    /// Text cell contains the literal as a substring.
    Contains { column: String, value: String },
    /// Cell is missing.
    IsMissing { column: String },
    /// Cell is present.
    NotMissing { column: String },
}

impl Predicate {
    /// The column this predicate reads.
    pub fn column(&self) -> &str {
        match self {
            Predicate::Eq { column, .. }
            | Predicate::Ne { column, .. }
            | Predicate::Lt { column, .. }
            | Predicate::Le { column, .. }
            | Predicate::Gt { column, .. }
            | Predicate::Ge { column, .. }
            | Predicate::Contains { column, .. }
            | Predicate::IsMissing { column }
            | Predicate::NotMissing { column } => column,
        }
    }
}

/// Column aggregations available to [`QueryPlan::Aggregate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregateOp {
    /// Count non-missing values.
    Count,
    /// Sum numeric values, ignoring missing cells.
    Sum,
    /// Minimum numeric value, ignoring missing cells.
    Min,
    /// Maximum numeric value, ignoring missing cells.
    Max,
    /// Arithmetic mean of numeric values, ignoring missing cells.
    Mean,
}

/// The fixed vocabulary of operations an untrusted caller may request.
///
/// Every variant takes an optional conjunction of [`Predicate`]s in its
/// `where` field; rows must satisfy all of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum QueryPlan {
    /// Count matching rows.
    Count {
        #[serde(default, rename = "where")]
        predicates: Vec<Predicate>,
    },
    /// Aggregate one column over matching rows.
    Aggregate {
        column: String,
        agg: AggregateOp,
        #[serde(default, rename = "where")]
        predicates: Vec<Predicate>,
    },
    /// Count distinct non-missing values of one column over matching rows.
    Distinct {
        column: String,
        #[serde(default, rename = "where")]
        predicates: Vec<Predicate>,
    },
    /// Return the first `limit` matching rows as a table.
    Preview {
        #[serde(default = "default_preview_limit")]
        limit: usize,
        #[serde(default, rename = "where")]
        predicates: Vec<Predicate>,
    },
}

fn default_preview_limit() -> usize {
    5
}

impl QueryPlan {
    /// Deserialize a plan from JSON.
    pub fn from_json(json: &str) -> QueryResult<Self> {
        serde_json::from_str(json).map_err(QueryError::Plan)
    }
}
