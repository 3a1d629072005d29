//! Databricks paired-source format
//!
//! Bidirectional conversion between the line-oriented notebook encoding Databricks writes for
//! source-controlled notebooks and [`Notebook`].
//!
//! # Wire Tokens
//!
//! | Token                | Literal                          |
//! |----------------------|----------------------------------|
//! | Document header      | `// Databricks notebook source`  |
//! | Cell separator       | `// COMMAND ----------`          |
//! | Magic line prefix    | `// MAGIC`                       |
//! | Markdown cell header | `// MAGIC %md`                   |
//!
//! # Versions
//!
//! | Behavior                 | V1                              | V2                               |
//! |--------------------------|---------------------------------|----------------------------------|
//! | Header line              | not written, read as code       | written, first line always dropped |
//! | Markdown detection       | any magic line in the block     | first line is `// MAGIC %md`     |
//! | Code line whitespace     | preserved                       | trimmed                          |
//! | Separator placement      | between cells                   | before every cell                |
//!
//! # Lossy Conversions
//!
//! - Surrounding whitespace of V2 code lines is trimmed on read.
//! - Leading and trailing blank lines of every cell are dropped.
//! - Cells with empty content disappear.
//! - The language of code cells is not stored; it comes from the dialect on read.
//! - A line equal to the separator inside a code cell splits that cell on read.

pub mod dialect;
pub mod lines;
pub mod parser;
pub mod serializer;

pub use dialect::{SourceDialect, SourceTokens, SourceVersion, DATABRICKS_TOKENS};
pub use parser::parse;
pub use serializer::serialize;

use crate::error::{decode_utf8, FormatError, TextDecodeError};
use crate::format::Format;
use crate::notebook::Notebook;

/// Decode a host byte buffer and parse it.
pub fn parse_bytes(bytes: &[u8], dialect: &SourceDialect) -> Result<Notebook, TextDecodeError> {
    let raw = decode_utf8(bytes)?;
    Ok(parse(raw, dialect))
}

/// Serialize a notebook into the UTF-8 bytes handed back to the host.
pub fn serialize_to_bytes(notebook: &Notebook, dialect: &SourceDialect) -> Vec<u8> {
    serialize(notebook, dialect).into_bytes()
}

/// Format implementation for one paired-source dialect
#[derive(Debug, Clone)]
pub struct SourceFormat {
    dialect: SourceDialect,
    claims_extensions: bool,
}

impl SourceFormat {
    /// A format that claims the `.scala` extension for detection.
    pub fn new(dialect: SourceDialect) -> Self {
        SourceFormat {
            dialect,
            claims_extensions: true,
        }
    }

    /// A format reachable by name only.
    pub fn named_only(dialect: SourceDialect) -> Self {
        SourceFormat {
            dialect,
            claims_extensions: false,
        }
    }

    pub fn dialect(&self) -> &SourceDialect {
        &self.dialect
    }

    /// Registry name for a version.
    pub fn name_for(version: SourceVersion) -> &'static str {
        match version {
            SourceVersion::V1 => "databricks-v1",
            SourceVersion::V2 => "databricks",
        }
    }
}

impl Default for SourceFormat {
    fn default() -> Self {
        Self::new(SourceDialect::default())
    }
}

impl Format for SourceFormat {
    fn name(&self) -> &str {
        Self::name_for(self.dialect.version)
    }

    fn description(&self) -> &str {
        match self.dialect.version {
            SourceVersion::V1 => "Databricks paired-source notebook (headerless legacy encoding)",
            SourceVersion::V2 => "Databricks paired-source notebook",
        }
    }

    fn file_extensions(&self) -> &[&str] {
        if self.claims_extensions {
            &["scala"]
        } else {
            &[]
        }
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Notebook, FormatError> {
        Ok(parse(source, &self.dialect))
    }

    fn serialize(&self, notebook: &Notebook) -> Result<String, FormatError> {
        Ok(serialize(notebook, &self.dialect))
    }
}
