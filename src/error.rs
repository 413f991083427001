use thiserror::Error;

/// Convenience result type for loader operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Error type returned by the flexible tabular loader.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The full candidate search space was exhausted without producing a table
    /// with at least 2 columns.
    ///
    /// Individual decode/tokenize failures are never surfaced; this is the
    /// single terminal error, and its message is intended for direct display
    /// to the end user.
    #[error("{message}")]
    Unparsable { message: String },
}

/// Convenience result type for query-plan operations.
pub type QueryResult<T> = Result<T, QueryError>;

/// Error type returned when validating or interpreting a [`crate::query::QueryPlan`].
#[derive(Debug, Error)]
pub enum QueryError {
    /// The plan names a column that does not exist in the table.
    #[error("unknown column '{column}'")]
    UnknownColumn { column: String },

    /// A numeric aggregate was requested over a column with no numeric values.
    #[error("column '{column}' has no numeric values to aggregate")]
    NotNumeric { column: String },

    /// The plan could not be deserialized from JSON.
    #[error("invalid query plan: {0}")]
    Plan(#[from] serde_json::Error),
}
