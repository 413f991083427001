//! Constrained queries over a [`crate::types::ParsedTable`].
//!
//! This is the safe stand-in for "ask a model to compute an answer": instead
//! of executing model-authored source against live data, the model emits a
//! [`QueryPlan`] — a tagged-variant value drawn from a fixed vocabulary of
//! pre-vetted filter/aggregate operations — which trusted code validates and
//! interprets with [`run`].
//!
//! ```
//! use tabular_loader::loader::{load_from_bytes, LoadOptions};
//! use tabular_loader::query::{run, QueryOutput, QueryPlan};
//! use tabular_loader::types::Cell;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let table = load_from_bytes(b"category,amount\nfood,10\nfood,5\ntravel,100\n", &LoadOptions::default())?;
//!
//! let plan = QueryPlan::from_json(
//!     r#"{"op": "aggregate", "column": "amount", "agg": "sum",
//!         "where": [{"cmp": "eq", "column": "category", "value": "food"}]}"#,
//! )?;
//!
//! assert_eq!(run(&table, &plan)?, QueryOutput::Scalar(Cell::Float(15.0)));
//! # Ok(())
//! # }
//! ```

mod exec;
mod plan;

pub use exec::{QueryOutput, run};
pub use plan::{AggregateOp, PlanValue, Predicate, QueryPlan};
