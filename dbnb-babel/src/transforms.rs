//! Transform-style helpers over the formats
//!
//! Small functional interfaces for pipelines that do not want to go through the registry:
//! normalizing a source file, upgrading a V1 file to V2, rendering a notebook as JSON.

use crate::error::FormatError;
use crate::formats::databricks::{self, SourceDialect, SourceVersion};
use crate::formats::json::serialize_to_json;
use crate::notebook::Notebook;

/// Parse and re-serialize with the same dialect.
///
/// The output is the stable fixed point of the format: normalizing it again yields the same text.
///
/// # Example
///
/// ```ignore
/// use dbnb_babel::transforms::normalize_source;
/// use dbnb_babel::SourceDialect;
///
/// let raw = "// Databricks notebook source\n   val x = 1   \n";
/// let normalized = normalize_source(raw, &SourceDialect::default());
/// assert_eq!(
///     normalized,
///     "// Databricks notebook source\n\n// COMMAND ----------\n\nval x = 1\n\n"
/// );
/// ```
pub fn normalize_source(raw: &str, dialect: &SourceDialect) -> String {
    let notebook = databricks::parse(raw, dialect);
    databricks::serialize(&notebook, dialect)
}

/// Rewrite a V1 (headerless) source file in the V2 encoding.
pub fn upgrade_source(raw: &str, guest_language: &str) -> String {
    convert_source(
        raw,
        &SourceDialect::new(SourceVersion::V1, guest_language),
        &SourceDialect::new(SourceVersion::V2, guest_language),
    )
}

/// Re-encode source text from one dialect into another.
pub fn convert_source(raw: &str, from: &SourceDialect, to: &SourceDialect) -> String {
    let notebook = databricks::parse(raw, from);
    databricks::serialize(&notebook, to)
}

/// Render a notebook as JSON.
pub fn notebook_to_json(notebook: &Notebook, pretty: bool) -> Result<String, FormatError> {
    serialize_to_json(notebook, pretty)
}
