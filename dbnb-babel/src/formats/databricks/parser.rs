//! Paired-source parsing (text → Notebook)
//!
//! Parsing is total. Malformed input degrades instead of failing:
//!
//! - V2 drops the first line unconditionally, header or not. A missing header is logged, not
//!   repaired, so a headerless file loses its first line.
//! - Blocks that are empty after trimming produce no cell, as do markdown blocks holding only
//!   the `%md` header.
//! - Lines of a markdown block that lack the magic prefix are kept, trimmed.
//!
//! Pipeline: lines → [`split_blocks`] → one cell per non-empty block.

use super::dialect::{SourceDialect, SourceVersion};
use super::lines::{classify_line, is_markdown_header, split_blocks, LineKind};
use crate::notebook::{Cell, Notebook};
use tracing::{debug, trace, warn};

/// Parse paired-source text into a notebook using `dialect`.
pub fn parse(raw: &str, dialect: &SourceDialect) -> Notebook {
    let notebook = match dialect.version {
        SourceVersion::V1 => parse_v1(raw, dialect),
        SourceVersion::V2 => parse_v2(raw, dialect),
    };
    debug!(
        version = %dialect.version,
        cells = notebook.len(),
        "parsed paired-source notebook"
    );
    notebook
}

fn parse_v2(raw: &str, dialect: &SourceDialect) -> Notebook {
    let tokens = &dialect.tokens;
    let mut lines = raw.lines();

    match lines.next() {
        Some(first) if classify_line(first, tokens) == LineKind::Header => {}
        Some(first) => warn!(
            line = first,
            "first line is not the notebook header, dropping it anyway"
        ),
        None => {}
    }

    split_blocks(lines, tokens)
        .iter()
        .filter_map(|block| block_to_cell_v2(block, dialect))
        .collect()
}

fn block_to_cell_v2(block: &[&str], dialect: &SourceDialect) -> Option<Cell> {
    let tokens = &dialect.tokens;
    let joined = block.join("\n");
    let trimmed = joined.trim();
    if trimmed.is_empty() {
        trace!("skipping empty block");
        return None;
    }

    let mut lines = trimmed.split('\n').peekable();
    let is_markdown = lines
        .peek()
        .is_some_and(|first| is_markdown_header(first, tokens));

    let body: Vec<&str> = if is_markdown {
        lines
            .skip(1)
            .map(|line| match classify_line(line, tokens) {
                LineKind::MagicLine(text) => text,
                _ => line.trim(),
            })
            .collect()
    } else {
        lines.map(str::trim).collect()
    };

    let content = body.join("\n");
    let content = content.trim();
    if content.is_empty() {
        trace!("skipping markdown block without narrative");
        return None;
    }

    Some(make_cell(content, is_markdown, dialect))
}

fn parse_v1(raw: &str, dialect: &SourceDialect) -> Notebook {
    split_blocks(raw.lines(), &dialect.tokens)
        .iter()
        .filter_map(|block| block_to_cell_v1(block, dialect))
        .collect()
}

fn block_to_cell_v1(block: &[&str], dialect: &SourceDialect) -> Option<Cell> {
    let joined = block.join("\n");
    let trimmed = joined.trim();
    if trimmed.is_empty() {
        trace!("skipping empty block");
        return None;
    }

    let mut is_markdown = false;
    let mut body: Vec<&str> = Vec::new();
    for line in trimmed.split('\n') {
        match classify_line(line, &dialect.tokens) {
            LineKind::MagicLine(text) => {
                is_markdown = true;
                body.push(text);
            }
            _ if !line.trim().is_empty() => body.push(line),
            // blank lines only count once the cell has started
            _ if !body.is_empty() => body.push(line),
            _ => {}
        }
    }

    let content = body.join("\n");
    let content = content.trim();
    if content.is_empty() {
        trace!("skipping block without content");
        return None;
    }

    Some(make_cell(content, is_markdown, dialect))
}

fn make_cell(content: &str, is_markdown: bool, dialect: &SourceDialect) -> Cell {
    if is_markdown {
        Cell::markdown(content)
    } else {
        Cell::code(content, dialect.guest_language.as_str())
    }
}
