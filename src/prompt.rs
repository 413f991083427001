//! Analysis-prompt assembly.
//!
//! Builds the text block handed to whatever answers the user's question. The
//! caller decides what to do with the string; this module never talks to a
//! model API.

use crate::profile::TableSummary;
use crate::types::ParsedTable;

/// Render the analysis prompt for one user message.
///
/// The dataset summary and the data-dictionary table are each included only
/// when available; when neither is, a note tells the model the required files
/// are not loaded yet.
pub fn build_analysis_prompt(
    user_message: &str,
    summary: Option<&TableSummary>,
    data_dict: Option<&ParsedTable>,
) -> String {
    let mut prompt = format!("User: {user_message}\n");

    if let Some(summary) = summary {
        prompt.push_str("\nDataset Summary:\n");
        prompt.push_str(&summary.to_string());
    }

    if let Some(dict) = data_dict {
        prompt.push_str("\nMetadata:\n");
        prompt.push_str(&render_table(dict));
    }

    if summary.is_none() && data_dict.is_none() {
        prompt.push_str("\nNote: Required data files are not uploaded or fully loaded yet.\n");
    }

    prompt
}

/// Plain-text rendering of a table: header line, then one line per row,
/// cells joined by ", " (missing cells render empty).
fn render_table(table: &ParsedTable) -> String {
    let mut out = table.columns.join(", ");
    out.push('\n');
    for row in &table.rows {
        let line: Vec<String> = row.iter().map(ToString::to_string).collect();
        out.push_str(&line.join(", "));
        out.push('\n');
    }
    out
}
