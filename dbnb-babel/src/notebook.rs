//! Structured notebook model
//!
//! A [`Notebook`] is an ordered list of [`Cell`]s. Order is significant and is preserved by
//! every format. A notebook has no identity beyond the call that produced it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Language identifier carried by every markdown cell.
pub const MARKDOWN_LANGUAGE: &str = "markdown";

/// Kind of notebook cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellKind {
    /// Executable code in the notebook's guest language
    Code,
    /// Narrative markdown text
    Markdown,
}

impl fmt::Display for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CellKind::Code => "code",
            CellKind::Markdown => "markdown",
        };
        write!(f, "{s}")
    }
}

impl FromStr for CellKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "code" => Ok(CellKind::Code),
            "markdown" | "md" => Ok(CellKind::Markdown),
            _ => Err(format!("Unknown cell kind '{s}'. Expected: code, markdown")),
        }
    }
}

/// One unit of notebook content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub kind: CellKind,
    /// Guest language for code cells, `"markdown"` for markdown cells
    pub language: String,
    /// Cell body without separators, headers or magic prefixes
    pub content: String,
}

impl Cell {
    pub fn new(kind: CellKind, language: impl Into<String>, content: impl Into<String>) -> Self {
        Cell {
            kind,
            language: language.into(),
            content: content.into(),
        }
    }

    pub fn code(content: impl Into<String>, language: impl Into<String>) -> Self {
        Cell::new(CellKind::Code, language, content)
    }

    pub fn markdown(content: impl Into<String>) -> Self {
        Cell::new(CellKind::Markdown, MARKDOWN_LANGUAGE, content)
    }

    pub fn is_code(&self) -> bool {
        self.kind == CellKind::Code
    }

    pub fn is_markdown(&self) -> bool {
        self.kind == CellKind::Markdown
    }

    /// Number of lines in the content; empty content has zero lines.
    pub fn line_count(&self) -> usize {
        if self.content.is_empty() {
            0
        } else {
            self.content.split('\n').count()
        }
    }
}

/// An ordered sequence of cells
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notebook {
    pub cells: Vec<Cell>,
}

impl Notebook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cells(cells: Vec<Cell>) -> Self {
        Notebook { cells }
    }

    pub fn push(&mut self, cell: Cell) {
        self.cells.push(cell);
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Cell> {
        self.cells.iter()
    }

    pub fn code_cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter().filter(|cell| cell.is_code())
    }

    pub fn markdown_cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter().filter(|cell| cell.is_markdown())
    }
}

impl<'a> IntoIterator for &'a Notebook {
    type Item = &'a Cell;
    type IntoIter = std::slice::Iter<'a, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

impl FromIterator<Cell> for Notebook {
    fn from_iter<I: IntoIterator<Item = Cell>>(iter: I) -> Self {
        Notebook {
            cells: iter.into_iter().collect(),
        }
    }
}
