//! `tabular-loader` is a small library for ingesting delimited uploads of
//! unknown text encoding and unknown field delimiter into an in-memory
//! [`types::ParsedTable`], plus the pieces a conversational data-analysis
//! backend needs around it.
//!
//! The primary entrypoint is [`loader::load_from_bytes`] (or the
//! path-reading convenience [`loader::load_from_path`]). The loader tries a
//! fixed priority-ordered search space of 4 encodings × 4 delimiters and
//! accepts the first candidate that parses into a table with at least
//! 2 columns:
//!
//! - **Encodings, in order**: UTF-8, UTF-8 with BOM, ISO-8859-1, Windows-874
//! - **Delimiters, in order**: comma, semicolon, tab, pipe
//!
//! Sentinel tokens (`""`, `NA`, `N/A`, `-`, `--`, `null`, plus the defaults
//! in [`loader::DEFAULT_MISSING_TOKENS`]) normalize to
//! [`types::Cell::Missing`]; other cells are typed by inference
//! (int/float/bool/text). When every candidate fails, the single terminal
//! error is [`LoadError::Unparsable`], with a message fit for end users.
//!
//! ## Quick example
//!
//! ```
//! use tabular_loader::loader::{load_from_bytes, LoadOptions};
//! use tabular_loader::types::Cell;
//!
//! # fn main() -> Result<(), tabular_loader::LoadError> {
//! let upload = b"name,amount\nAda, 10\nGrace,NA\n";
//! let table = load_from_bytes(upload, &LoadOptions::default())?;
//! assert_eq!(table.columns, vec!["name", "amount"]);
//! assert_eq!(table.rows[0][1], Cell::Int(10));
//! assert_eq!(table.rows[1][1], Cell::Missing);
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`loader`]: the flexible tabular loader and its candidate search
//! - [`types`]: cell + table types
//! - [`profile`]: describe-style per-column summaries
//! - [`query`]: constrained, interpretable query plans over a table
//! - [`session`]: caller-owned conversation state with explicit expiry
//! - [`prompt`]: analysis-prompt string assembly
//! - [`error`]: error types used across the crate

pub mod error;
pub mod loader;
pub mod profile;
pub mod prompt;
pub mod query;
pub mod session;
pub mod types;

pub use error::{LoadError, LoadResult, QueryError, QueryResult};
