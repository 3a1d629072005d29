//! Paired-source serialization (Notebook → text)
//!
//! V2 layout, one line per row, every line newline-terminated:
//!
//! ```text
//! // Databricks notebook source
//!
//! // COMMAND ----------
//!
//! // MAGIC %md
//! // MAGIC # Title
//!
//! // COMMAND ----------
//!
//! val x = 1
//!
//! ```
//!
//! Code content is written verbatim. Markdown content is written one `// MAGIC ` line per
//! content line, blank lines included, so the line count is preserved.

use super::dialect::{SourceDialect, SourceTokens, SourceVersion};
use crate::notebook::{Cell, CellKind, Notebook};
use tracing::debug;

/// Serialize a notebook to paired-source text using `dialect`.
pub fn serialize(notebook: &Notebook, dialect: &SourceDialect) -> String {
    let output = match dialect.version {
        SourceVersion::V1 => serialize_v1(notebook, &dialect.tokens),
        SourceVersion::V2 => serialize_v2(notebook, &dialect.tokens),
    };
    debug!(
        version = %dialect.version,
        cells = notebook.len(),
        bytes = output.len(),
        "serialized paired-source notebook"
    );
    output
}

fn serialize_v2(notebook: &Notebook, tokens: &SourceTokens) -> String {
    let mut lines: Vec<String> = vec![tokens.header.to_string(), String::new()];

    for cell in notebook {
        lines.push(tokens.separator.to_string());
        lines.push(String::new());
        if cell.kind == CellKind::Markdown {
            lines.push(tokens.markdown_header.to_string());
        }
        push_cell_body(&mut lines, cell, tokens);
        lines.push(String::new());
    }

    let mut output = String::new();
    for line in &lines {
        output.push_str(line);
        output.push('\n');
    }
    output
}

fn serialize_v1(notebook: &Notebook, tokens: &SourceTokens) -> String {
    let mut lines: Vec<String> = Vec::new();

    for (index, cell) in notebook.iter().enumerate() {
        if index > 0 {
            lines.push(tokens.separator.to_string());
            lines.push(String::new());
        }
        push_cell_body(&mut lines, cell, tokens);
        lines.push(String::new());
    }

    lines.join("\n")
}

fn push_cell_body(lines: &mut Vec<String>, cell: &Cell, tokens: &SourceTokens) {
    match cell.kind {
        CellKind::Markdown => {
            for line in content_lines(&cell.content) {
                lines.push(format!("{} {line}", tokens.magic_prefix));
            }
        }
        CellKind::Code => lines.push(cell.content.clone()),
    }
}

/// Split content on `\n`, dropping a trailing `\r` per line. Keeps empty lines.
fn content_lines(content: &str) -> impl Iterator<Item = &str> {
    content
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
}
