//! Tests against realistic notebooks in tests/fixtures

use crate::common::read_fixture;
use dbnb_babel::formats::databricks::{parse, serialize, SourceDialect};
use dbnb_babel::transforms::{normalize_source, notebook_to_json, upgrade_source};
use dbnb_babel::CellKind;
use insta::assert_snapshot;

#[test]
fn test_sales_report_cells() {
    let raw = read_fixture("sales_report.scala");
    let notebook = parse(&raw, &SourceDialect::v2());

    let kinds: Vec<CellKind> = notebook.iter().map(|cell| cell.kind).collect();
    assert_eq!(
        kinds,
        vec![
            CellKind::Markdown,
            CellKind::Code,
            CellKind::Markdown,
            CellKind::Code,
            CellKind::Code,
        ]
    );

    assert_eq!(
        notebook.cells[0].content,
        "# Sales report\n\nLoads the raw orders table and aggregates revenue per region."
    );
    assert_eq!(
        notebook.cells[2].content,
        "## Revenue per region\n\n  - only completed orders\n  - amounts in EUR"
    );
    assert_eq!(
        notebook.cells[3].content,
        "val revenue = orders\n.filter($\"status\" === \"completed\")\n.groupBy(\"region\")\n.agg(sum(\"amount\").as(\"revenue\"))\n\ndisplay(revenue)"
    );
    // %sql is not a markdown header, so the cell stays code with its magic lines
    assert_eq!(
        notebook.cells[4].content,
        "// MAGIC %sql\n// MAGIC SELECT * FROM raw.orders LIMIT 10"
    );
}

#[test]
fn test_sales_report_normalizes_once() {
    let raw = read_fixture("sales_report.scala");
    let dialect = SourceDialect::v2();

    let normalized = normalize_source(&raw, &dialect);
    assert!(normalized.starts_with("// Databricks notebook source\n\n// COMMAND ----------\n\n// MAGIC %md\n"));
    assert_eq!(normalize_source(&normalized, &dialect), normalized);
    assert_eq!(parse(&normalized, &dialect), parse(&raw, &dialect));
}

#[test]
fn test_legacy_notebook_as_json() {
    let raw = read_fixture("legacy.scala");
    let notebook = parse(&raw, &SourceDialect::v1());
    let json = notebook_to_json(&notebook, true).unwrap();

    assert_snapshot!(json, @r###"
    {
      "cells": [
        {
          "kind": "markdown",
          "language": "markdown",
          "content": "# Legacy notebook\n\nWritten before notebooks carried a header."
        },
        {
          "kind": "code",
          "language": "scala",
          "content": "def square(x: Int): Int = {\n    x * x\n}"
        },
        {
          "kind": "code",
          "language": "scala",
          "content": "square(4)"
        }
      ]
    }
    "###);
}

#[test]
fn test_legacy_upgrade_keeps_cells() {
    let raw = read_fixture("legacy.scala");
    let upgraded = upgrade_source(&raw, "scala");

    assert!(upgraded.starts_with("// Databricks notebook source\n"));
    assert!(upgraded.contains("// MAGIC %md\n// MAGIC # Legacy notebook\n"));

    let before = parse(&raw, &SourceDialect::v1());
    let after = parse(&upgraded, &SourceDialect::v2());
    assert_eq!(after.len(), before.len());
    assert_eq!(after.cells[0], before.cells[0]);
    // V2 trims code lines, V1 does not
    assert_eq!(after.cells[1].content, "def square(x: Int): Int = {\nx * x\n}");
}

#[test]
fn test_v1_reserialization_of_legacy_fixture() {
    let raw = read_fixture("legacy.scala");
    let dialect = SourceDialect::v1();
    let notebook = parse(&raw, &dialect);
    assert_eq!(parse(&serialize(&notebook, &dialect), &dialect), notebook);
}
