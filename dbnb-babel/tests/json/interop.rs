//! Conversions between the JSON notebook and the paired-source format

use crate::common::read_fixture;
use dbnb_babel::{Cell, FormatRegistry, Notebook};

#[test]
fn test_source_to_json_to_source() {
    let registry = FormatRegistry::default();
    let raw = read_fixture("sales_report.scala");

    let notebook = registry.parse(&raw, "databricks").unwrap();
    let json = registry.serialize(&notebook, "json").unwrap();
    let from_json = registry.parse(&json, "json").unwrap();
    assert_eq!(from_json, notebook);

    let source = registry.serialize(&from_json, "databricks").unwrap();
    assert_eq!(registry.parse(&source, "databricks").unwrap(), notebook);
}

#[test]
fn test_json_keeps_code_language() {
    let registry = FormatRegistry::default();
    let notebook = Notebook::with_cells(vec![Cell::code("print(1)", "python")]);

    let json = registry.serialize(&notebook, "json").unwrap();
    assert_eq!(registry.parse(&json, "json").unwrap(), notebook);
}

#[test]
fn test_hand_written_json() {
    let registry = FormatRegistry::default();
    let json = r#"{
        "cells": [
            {"kind": "markdown", "language": "markdown", "content": "Intro"},
            {"kind": "code", "language": "scala", "content": "val a = 1"}
        ]
    }"#;

    let notebook = registry.parse(json, "json").unwrap();
    let source = registry.serialize(&notebook, "databricks").unwrap();
    assert_eq!(
        source,
        "// Databricks notebook source\n\n// COMMAND ----------\n\n// MAGIC %md\n// MAGIC Intro\n\n// COMMAND ----------\n\nval a = 1\n\n"
    );
}

#[test]
fn test_json_bytes_must_be_utf8() {
    let registry = FormatRegistry::default();
    let result = registry.parse_bytes(b"{\"cells\": [\xff]}", "json");
    assert!(matches!(
        result,
        Err(dbnb_babel::FormatError::TextDecode(_))
    ));
}
