//! Property-based tests for the conversion laws
//!
//! - Round trip: `parse(serialize(d)) == d` for notebooks already in normal form
//! - Idempotence: `serialize(parse(serialize(d))) == serialize(d)`
//! - Normalization: `parse(serialize(parse(raw))) == parse(raw)` for arbitrary text
//! - Elision: whitespace-only gaps between separators never produce cells

use dbnb_babel::formats::databricks::{parse, serialize, SourceDialect, DATABRICKS_TOKENS};
use dbnb_babel::{Cell, Notebook};
use proptest::prelude::*;

/// A line with no surrounding whitespace that can never be mistaken for a token
fn word_line() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z0-9(){}=+.;\"#*_-]{1,12}",
        "[a-z0-9(){}=+.;\"#*_-]{1,8} [a-z0-9(){}=+.;\"#*_ -]{0,12}[a-z0-9)]",
    ]
}

fn join_trimmed(lines: Vec<String>) -> String {
    lines.join("\n").trim().to_string()
}

fn code_content() -> impl Strategy<Value = String> {
    prop::collection::vec(prop_oneof![3 => word_line(), 1 => Just(String::new())], 1..6)
        .prop_map(join_trimmed)
        .prop_filter("content must not be empty", |c| !c.is_empty())
}

fn markdown_content() -> impl Strategy<Value = String> {
    let line = prop_oneof![
        3 => word_line(),
        1 => Just(String::new()),
        1 => word_line().prop_map(|l| format!("  - {l}")),
    ];
    prop::collection::vec(line, 1..6)
        .prop_map(join_trimmed)
        .prop_filter("content must not be empty", |c| !c.is_empty())
}

fn normal_cell(language: &'static str) -> impl Strategy<Value = Cell> {
    prop_oneof![
        code_content().prop_map(move |c| Cell::code(c, language)),
        markdown_content().prop_map(Cell::markdown),
    ]
}

fn normal_notebook() -> impl Strategy<Value = Notebook> {
    prop::collection::vec(normal_cell("scala"), 0..8).prop_map(Notebook::with_cells)
}

/// Raw lines mixing every token with noise
fn raw_line() -> impl Strategy<Value = String> {
    let tokens = DATABRICKS_TOKENS;
    prop_oneof![
        1 => Just(tokens.header.to_string()),
        2 => Just(tokens.separator.to_string()),
        2 => Just(tokens.markdown_header.to_string()),
        3 => "// MAGIC[ a-z#-]{0,12}",
        4 => "[ ]{0,3}[a-z=(){}]{0,10}[ ]{0,3}",
        2 => Just(String::new()),
    ]
}

fn raw_text() -> impl Strategy<Value = String> {
    prop::collection::vec(raw_line(), 0..30).prop_map(|lines| lines.join("\n"))
}

proptest! {
    #[test]
    fn round_trip_preserves_normal_notebooks(notebook in normal_notebook()) {
        let dialect = SourceDialect::v2();
        let reparsed = parse(&serialize(&notebook, &dialect), &dialect);
        prop_assert_eq!(reparsed, notebook);
    }

    #[test]
    fn v1_round_trip_preserves_normal_notebooks(notebook in normal_notebook()) {
        let dialect = SourceDialect::v1();
        let reparsed = parse(&serialize(&notebook, &dialect), &dialect);
        prop_assert_eq!(reparsed, notebook);
    }

    #[test]
    fn reserialization_is_stable(notebook in normal_notebook()) {
        let dialect = SourceDialect::v2();
        let first = serialize(&notebook, &dialect);
        let second = serialize(&parse(&first, &dialect), &dialect);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn parse_reaches_a_fixed_point(raw in raw_text()) {
        for dialect in [SourceDialect::v2(), SourceDialect::v1()] {
            let parsed = parse(&raw, &dialect);
            let reparsed = parse(&serialize(&parsed, &dialect), &dialect);
            prop_assert_eq!(reparsed, parsed);
        }
    }

    #[test]
    fn parsed_cells_are_never_empty(raw in raw_text()) {
        for dialect in [SourceDialect::v2(), SourceDialect::v1()] {
            let notebook = parse(&raw, &dialect);
            prop_assert!(notebook.iter().all(|cell| !cell.content.trim().is_empty()));
        }
    }

    #[test]
    fn whitespace_gaps_are_elided(gaps in prop::collection::vec("[ \t]{0,4}(\n[ \t]{0,4}){0,3}", 1..6)) {
        let separator = DATABRICKS_TOKENS.separator;
        let mut raw = String::from("// Databricks notebook source\n");
        for gap in &gaps {
            raw.push_str(separator);
            raw.push('\n');
            raw.push_str(gap);
            raw.push('\n');
        }
        prop_assert!(parse(&raw, &SourceDialect::v2()).is_empty());
    }
}
