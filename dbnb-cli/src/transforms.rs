//! CLI-specific transforms
//!
//! This module defines the views available through `dbnb inspect`.
//! Each transform is a stage + format combination (e.g., "cells-json", "line-kinds").
//!
//! ## Stages
//!
//! 1. **Lines** - Raw text → classified lines
//!    - `line-kinds`: one row per line with its classification
//!    - `line-json`: the same as JSON
//!
//! 2. **Cells** - Raw text → parsed notebook
//!    - `cells-summary`: one row per cell (default)
//!    - `cells-json`: the notebook as JSON
//!
//! ## Extra Parameters
//!
//! - `show-linum`: "false" hides line numbers in `line-kinds`
//! - `pretty`: "false" renders JSON views on a single line
//!
//! Example: `dbnb inspect notebook.scala line-kinds --extra-show-linum false`

use dbnb_babel::format::parse_bool;
use dbnb_babel::formats::databricks::lines::{classify_line, LineKind};
use dbnb_babel::formats::databricks::{parse, SourceDialect};
use dbnb_babel::transforms::notebook_to_json;
use dbnb_babel::Cell;
use serde_json::json;
use std::collections::HashMap;

/// All available CLI transforms (stage + format combinations)
pub const AVAILABLE_TRANSFORMS: &[&str] =
    &["cells-summary", "cells-json", "line-kinds", "line-json"];

pub const DEFAULT_TRANSFORM: &str = "cells-summary";

const PREVIEW_CHARS: usize = 40;

/// Execute a named transform on source text
///
/// # Arguments
///
/// * `source` - The paired-source text to inspect
/// * `transform_name` - The transform to apply (e.g., "cells-json")
/// * `dialect` - How the source is encoded
/// * `extra_params` - Optional parameters for the transform
///
/// # Examples
///
/// ```ignore
/// let params = HashMap::new();
/// let output = execute_transform(source, "line-kinds", &SourceDialect::default(), &params)?;
/// ```
pub fn execute_transform(
    source: &str,
    transform_name: &str,
    dialect: &SourceDialect,
    extra_params: &HashMap<String, String>,
) -> Result<String, String> {
    let show_linum = bool_param(extra_params, "show-linum", true)?;
    let pretty = bool_param(extra_params, "pretty", true)?;

    match transform_name {
        "cells-summary" => {
            let notebook = parse(source, dialect);
            Ok(notebook
                .iter()
                .enumerate()
                .map(|(index, cell)| cell_summary(index, cell))
                .collect())
        }
        "cells-json" => {
            let notebook = parse(source, dialect);
            notebook_to_json(&notebook, pretty).map_err(|e| format!("Transform failed: {e}"))
        }
        "line-kinds" => Ok(lines_to_simple(source, dialect, show_linum)),
        "line-json" => {
            let value = lines_to_json(source, dialect);
            let rendered = if pretty {
                serde_json::to_string_pretty(&value)
            } else {
                serde_json::to_string(&value)
            };
            rendered.map_err(|e| format!("JSON serialization failed: {e}"))
        }
        other => Err(format!(
            "Unknown transform '{other}'. Available: {}",
            AVAILABLE_TRANSFORMS.join(", ")
        )),
    }
}

fn bool_param(params: &HashMap<String, String>, key: &str, default: bool) -> Result<bool, String> {
    match params.get(key) {
        None => Ok(default),
        Some(raw) => parse_bool(raw)
            .ok_or_else(|| format!("Invalid boolean value '{raw}' for --extra-{key}")),
    }
}

fn cell_summary(index: usize, cell: &Cell) -> String {
    let first_line = cell.content.lines().next().unwrap_or("");
    let mut preview: String = first_line.chars().take(PREVIEW_CHARS).collect();
    if first_line.chars().count() > PREVIEW_CHARS {
        preview.push('…');
    }
    format!(
        "{index:<3}  {:<8}  {:<10}  {:>3} lines  {preview}\n",
        cell.kind.to_string(),
        cell.language,
        cell.line_count(),
    )
}

fn line_text<'a>(line: &'a str, kind: &LineKind<'a>) -> &'a str {
    match kind {
        LineKind::Header | LineKind::Separator => line.trim(),
        LineKind::MagicLine(text) => text,
        LineKind::PlainLine(text) => text,
    }
}

fn lines_to_simple(source: &str, dialect: &SourceDialect, show_linum: bool) -> String {
    let mut output = String::new();
    for (index, line) in source.lines().enumerate() {
        let kind = classify_line(line, &dialect.tokens);
        let text = line_text(line, &kind);
        if show_linum {
            output.push_str(&format!("{:>4}  {:<9}  {text}\n", index + 1, kind.label()));
        } else {
            output.push_str(&format!("{:<9}  {text}\n", kind.label()));
        }
    }
    output
}

fn lines_to_json(source: &str, dialect: &SourceDialect) -> serde_json::Value {
    let lines: Vec<serde_json::Value> = source
        .lines()
        .enumerate()
        .map(|(index, line)| {
            let kind = classify_line(line, &dialect.tokens);
            json!({
                "line": index + 1,
                "kind": kind.label(),
                "text": line_text(line, &kind),
            })
        })
        .collect();
    json!(lines)
}
