//! JSON notebook format
//!
//! A structured rendering of [`Notebook`] that mirrors the cell list editors hold in memory:
//!
//! ```text
//! {
//!   "cells": [
//!     { "kind": "markdown", "language": "markdown", "content": "# Title" },
//!     { "kind": "code", "language": "scala", "content": "val x = 1" }
//!   ]
//! }
//! ```
//!
//! Unlike the paired-source format this one is lossless, including the language of code cells.
//! Parsing fails on malformed JSON.

use crate::error::FormatError;
use crate::format::{parse_bool, Format};
use crate::notebook::Notebook;
use std::collections::HashMap;

/// Format implementation for JSON notebooks
#[derive(Debug, Clone)]
pub struct JsonFormat {
    pretty: bool,
}

impl JsonFormat {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl Default for JsonFormat {
    fn default() -> Self {
        Self::new(true)
    }
}

pub fn parse_from_json(source: &str) -> Result<Notebook, FormatError> {
    serde_json::from_str(source).map_err(|e| FormatError::ParseError(e.to_string()))
}

pub fn serialize_to_json(notebook: &Notebook, pretty: bool) -> Result<String, FormatError> {
    let result = if pretty {
        serde_json::to_string_pretty(notebook)
    } else {
        serde_json::to_string(notebook)
    };
    result.map_err(|e| FormatError::SerializationError(e.to_string()))
}

impl Format for JsonFormat {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Structured notebook as JSON"
    }

    fn file_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Notebook, FormatError> {
        parse_from_json(source)
    }

    fn serialize(&self, notebook: &Notebook) -> Result<String, FormatError> {
        serialize_to_json(notebook, self.pretty)
    }

    fn serialize_with_options(
        &self,
        notebook: &Notebook,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        let mut pretty = self.pretty;
        for (key, value) in options {
            match key.as_str() {
                "pretty" => pretty = parse_bool_option(key, value)?,
                other => {
                    return Err(FormatError::NotSupported(format!(
                        "Format 'json' does not support parameter '{other}'"
                    )))
                }
            }
        }
        serialize_to_json(notebook, pretty)
    }
}

fn parse_bool_option(key: &str, raw: &str) -> Result<bool, FormatError> {
    parse_bool(raw).ok_or_else(|| {
        FormatError::SerializationError(format!("Invalid boolean value '{raw}' for '{key}'"))
    })
}
