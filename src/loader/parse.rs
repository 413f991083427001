//! Per-candidate tokenization of decoded text.
//!
//! One candidate attempt takes already-decoded text plus a delimiter and
//! either yields a [`ParsedTable`] with at least 2 columns or a
//! [`RejectReason`] telling the search to move on.

use crate::types::{Cell, ParsedTable};

use super::observability::RejectReason;

/// Sentinel tokens always normalized to [`Cell::Missing`].
pub const SENTINEL_MISSING_TOKENS: [&str; 6] = ["", "NA", "N/A", "-", "--", "null"];

/// Additional default missing tokens, matching what a typical tabular parser
/// would treat as absent on its own.
pub const DEFAULT_MISSING_TOKENS: [&str; 6] = ["NaN", "nan", "NULL", "None", "n/a", "#N/A"];

/// Attempt one candidate parse of `text` with `delimiter`.
///
/// - headers and fields have leading whitespace stripped
/// - rows may be ragged: short rows are padded with [`Cell::Missing`], long
///   rows are truncated to the header width
/// - any tokenizer error rejects the candidate; nothing propagates
pub(super) fn parse_candidate(
    text: &str,
    delimiter: u8,
    extra_missing_tokens: &[String],
) -> Result<ParsedTable, RejectReason> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = rdr.headers().map_err(|_| RejectReason::Tokenize)?;
    let columns: Vec<String> = headers.iter().map(|h| h.trim_start().to_owned()).collect();
    if columns.len() < 2 {
        // A single-column result is assumed to mean the delimiter missed.
        return Err(RejectReason::TooFewColumns(columns.len()));
    }

    let mut rows: Vec<Vec<Cell>> = Vec::new();
    for record in rdr.records() {
        let record = record.map_err(|_| RejectReason::Tokenize)?;
        let row = (0..columns.len())
            .map(|idx| parse_cell(record.get(idx).unwrap_or(""), extra_missing_tokens))
            .collect();
        rows.push(row);
    }

    Ok(ParsedTable::new(columns, rows))
}

fn parse_cell(raw: &str, extra_missing_tokens: &[String]) -> Cell {
    let value = raw.trim_start();
    if is_missing_token(value, extra_missing_tokens) {
        return Cell::Missing;
    }
    infer_cell(value)
}

fn is_missing_token(value: &str, extra: &[String]) -> bool {
    SENTINEL_MISSING_TOKENS.contains(&value)
        || DEFAULT_MISSING_TOKENS.contains(&value)
        || extra.iter().any(|t| t == value)
}

/// Infer a typed cell from a non-missing field.
///
/// Numeric and boolean inference ignores trailing whitespace, but text cells
/// keep it (only leading whitespace is stripped during tokenization).
fn infer_cell(value: &str) -> Cell {
    let trimmed = value.trim_end();
    if let Ok(v) = trimmed.parse::<i64>() {
        return Cell::Int(v);
    }
    if let Ok(v) = trimmed.parse::<f64>() {
        return Cell::Float(v);
    }
    if trimmed.eq_ignore_ascii_case("true") {
        return Cell::Bool(true);
    }
    if trimmed.eq_ignore_ascii_case("false") {
        return Cell::Bool(false);
    }
    Cell::Text(value.to_owned())
}

#[cfg(test)]
mod tests {
    use super::{parse_candidate, parse_cell};
    use crate::loader::observability::RejectReason;
    use crate::types::Cell;

    #[test]
    fn parses_headers_and_typed_cells() {
        let table = parse_candidate("id,name,score\n1, Ada,98.5\n2,Grace,NA\n", b',', &[]).unwrap();
        assert_eq!(table.columns, vec!["id", "name", "score"]);
        assert_eq!(
            table.rows[0],
            vec![Cell::Int(1), Cell::Text("Ada".to_string()), Cell::Float(98.5)]
        );
        assert_eq!(table.rows[1][2], Cell::Missing);
    }

    #[test]
    fn rejects_single_column_result() {
        let err = parse_candidate("id;name\n1;a\n", b',', &[]).unwrap_err();
        assert_eq!(err, RejectReason::TooFewColumns(1));
    }

    #[test]
    fn ragged_rows_are_padded_and_truncated() {
        let table = parse_candidate("a,b,c\n1,2\n1,2,3,4\n", b',', &[]).unwrap();
        assert_eq!(table.rows[0], vec![Cell::Int(1), Cell::Int(2), Cell::Missing]);
        assert_eq!(table.rows[1], vec![Cell::Int(1), Cell::Int(2), Cell::Int(3)]);
    }

    #[test]
    fn sentinel_tokens_normalize_to_missing() {
        for token in ["", "NA", "N/A", "-", "--", "null", "NaN", "None"] {
            assert_eq!(parse_cell(token, &[]), Cell::Missing, "token {token:?}");
        }
        // Leading whitespace is stripped before the sentinel check.
        assert_eq!(parse_cell("  NA", &[]), Cell::Missing);
    }

    #[test]
    fn caller_supplied_missing_tokens_extend_the_set() {
        let extra = vec!["missing".to_string()];
        assert_eq!(parse_cell("missing", &extra), Cell::Missing);
        assert_eq!(parse_cell("missing", &[]), Cell::Text("missing".to_string()));
    }

    #[test]
    fn cell_inference_covers_int_float_bool_text() {
        assert_eq!(parse_cell("42", &[]), Cell::Int(42));
        assert_eq!(parse_cell("-1.25", &[]), Cell::Float(-1.25));
        assert_eq!(parse_cell("True", &[]), Cell::Bool(true));
        assert_eq!(parse_cell("FALSE", &[]), Cell::Bool(false));
        assert_eq!(parse_cell("forty-two", &[]), Cell::Text("forty-two".to_string()));
        // Trailing whitespace does not block numeric inference.
        assert_eq!(parse_cell(" 7 ", &[]), Cell::Int(7));
    }

    #[test]
    fn quoted_delimiters_stay_inside_fields() {
        let table = parse_candidate("name,notes\nAda,\"a, b, c\"\n", b',', &[]).unwrap();
        assert_eq!(table.rows[0][1], Cell::Text("a, b, c".to_string()));
    }
}
