//! End-to-end flow: load an upload into a session, profile it, build the
//! analysis prompt, and answer a question through a constrained query plan.

use std::time::Duration;

use tabular_loader::loader::{LoadOptions, load_from_path};
use tabular_loader::profile::summarize;
use tabular_loader::prompt::build_analysis_prompt;
use tabular_loader::query::{QueryOutput, QueryPlan, run};
use tabular_loader::session::Session;
use tabular_loader::types::Cell;

#[test]
fn upload_profile_prompt_and_query() {
    let mut session = Session::new(Duration::from_secs(3600));
    assert!(!session.is_expired());

    let table =
        load_from_path("tests/fixtures/transactions.csv", &LoadOptions::default()).unwrap();
    session.insert_table("transactions", table);

    session.push_user("how much did I spend on food?");
    let transactions = session.table("transactions").unwrap();

    let summary = summarize(transactions);
    let prompt = build_analysis_prompt(
        &session.transcript().last().unwrap().text,
        Some(&summary),
        None,
    );
    assert!(prompt.starts_with("User: how much did I spend on food?\n"));
    assert!(prompt.contains("Dataset Summary:\nrows: 3\n"));
    assert!(prompt.contains("column 'amount': non-missing=2 missing=1"));

    // The model's answer arrives as a plan, never as code.
    let plan = QueryPlan::from_json(
        r#"{"op": "aggregate", "column": "amount", "agg": "sum",
            "where": [{"cmp": "eq", "column": "category", "value": "food"}]}"#,
    )
    .unwrap();
    let out = run(transactions, &plan).unwrap();
    assert_eq!(out, QueryOutput::Scalar(Cell::Float(120.0)));

    session.push_assistant("You spent 120 on food.");
    assert_eq!(session.transcript().len(), 2);
}

#[test]
fn preview_plan_returns_rows_for_display() {
    let table =
        load_from_path("tests/fixtures/transactions.csv", &LoadOptions::default()).unwrap();

    let plan = QueryPlan::from_json(r#"{"op": "preview", "limit": 2}"#).unwrap();
    let QueryOutput::Table(preview) = run(&table, &plan).unwrap() else {
        panic!("expected a table");
    };
    assert_eq!(preview.columns, table.columns);
    assert_eq!(preview.row_count(), 2);
}

#[test]
fn count_with_missing_filter_matches_the_loaded_sentinels() {
    let table =
        load_from_path("tests/fixtures/transactions.csv", &LoadOptions::default()).unwrap();

    let plan = QueryPlan::from_json(
        r#"{"op": "count", "where": [{"cmp": "is_missing", "column": "amount"}]}"#,
    )
    .unwrap();
    assert_eq!(run(&table, &plan).unwrap(), QueryOutput::Scalar(Cell::Int(1)));
}
