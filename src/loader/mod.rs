//! The flexible tabular loader.
//!
//! Given an uploaded byte buffer of unknown text encoding and unknown field
//! delimiter, [`load_from_bytes`] tries a fixed priority-ordered search space
//! of 4 encodings × 4 delimiters (see [`candidates`]) and returns the first
//! candidate that decodes, tokenizes, and yields a table with at least
//! 2 columns. The search stops at the first acceptable candidate even if a
//! later one might parse "better".
//!
//! Per-candidate failures are swallowed; exhausting all 16 candidates is the
//! only failure mode and maps to [`LoadError::Unparsable`]. The call is pure
//! and synchronous, with no state retained across uploads.
//!
//! ```
//! use tabular_loader::loader::{load_from_bytes, LoadOptions};
//!
//! # fn main() -> Result<(), tabular_loader::LoadError> {
//! let upload = b"name;amount\nAda; 10\nGrace;NA\n";
//! let table = load_from_bytes(upload, &LoadOptions::default())?;
//! assert_eq!(table.columns, vec!["name", "amount"]);
//! assert_eq!(table.row_count(), 2);
//! # Ok(())
//! # }
//! ```

pub mod candidates;
pub mod observability;
mod parse;

pub use candidates::{DELIMITERS, ENCODINGS, ParseCandidate, TextEncoding};
pub use observability::{
    CompositeObserver, FileObserver, LoadObserver, LoadStats, RejectReason, StdErrObserver,
};
pub use parse::{DEFAULT_MISSING_TOKENS, SENTINEL_MISSING_TOKENS};

use std::path::Path;
use std::sync::Arc;

use crate::error::{LoadError, LoadResult};
use crate::types::ParsedTable;

/// Options controlling a load attempt.
///
/// Use [`Default`] for common cases.
#[derive(Clone, Default)]
pub struct LoadOptions {
    /// Optional observer notified of every candidate outcome.
    pub observer: Option<Arc<dyn LoadObserver>>,
    /// Caller-supplied tokens treated as missing values, on top of
    /// [`SENTINEL_MISSING_TOKENS`] and [`DEFAULT_MISSING_TOKENS`].
    pub extra_missing_tokens: Vec<String>,
}

impl std::fmt::Debug for LoadOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadOptions")
            .field("observer_set", &self.observer.is_some())
            .field("extra_missing_tokens", &self.extra_missing_tokens)
            .finish()
    }
}

/// Load a fully-buffered upload into a [`ParsedTable`].
///
/// Returns [`LoadError::Unparsable`] when no candidate in the fixed search
/// space produces a table with at least 2 columns. The error message is
/// suitable for direct display to an end user.
pub fn load_from_bytes(bytes: &[u8], options: &LoadOptions) -> LoadResult<ParsedTable> {
    let mut attempt = 0;
    for encoding in ENCODINGS {
        // Decoding only depends on the encoding; reuse it across delimiters.
        let decoded = encoding.decode(bytes);
        for delimiter in DELIMITERS {
            let candidate = ParseCandidate { encoding, delimiter };
            let outcome = match decoded.as_deref() {
                None => Err(RejectReason::Decode),
                Some(text) => parse::parse_candidate(text, delimiter, &options.extra_missing_tokens),
            };
            match outcome {
                Ok(table) => {
                    if let Some(obs) = options.observer.as_ref() {
                        let stats = LoadStats {
                            rows: table.row_count(),
                            columns: table.column_count(),
                        };
                        obs.on_accepted(&candidate, attempt, stats);
                    }
                    return Ok(table);
                }
                Err(reason) => {
                    if let Some(obs) = options.observer.as_ref() {
                        obs.on_rejected(&candidate, attempt, &reason);
                    }
                }
            }
            attempt += 1;
        }
    }

    if let Some(obs) = options.observer.as_ref() {
        obs.on_exhausted(attempt);
    }
    Err(LoadError::Unparsable {
        message: exhaustion_message(),
    })
}

/// Convenience entrypoint: read a file and load it via [`load_from_bytes`].
///
/// I/O failures map to [`LoadError::Io`]; they are not part of the candidate
/// search.
pub fn load_from_path(path: impl AsRef<Path>, options: &LoadOptions) -> LoadResult<ParsedTable> {
    let bytes = std::fs::read(path)?;
    load_from_bytes(&bytes, options)
}

fn exhaustion_message() -> String {
    "could not read the upload as a delimited table: tried utf-8, utf-8 with BOM, \
     iso-8859-1 and windows-874 with ',', ';', tab and '|' separators, and none \
     produced a table with at least 2 columns"
        .to_string()
}
