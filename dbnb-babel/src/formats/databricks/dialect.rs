//! Format versions and the literal tokens of the paired-source encoding
//!
//! The parser and the serializer both take a [`SourceDialect`]. Nothing else in the crate spells
//! out a token literal.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Literal lines that define the wire format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceTokens {
    /// First line of every V2 file
    pub header: &'static str,
    /// Line that delimits consecutive cells
    pub separator: &'static str,
    /// Prefix of every line of a narrative cell
    pub magic_prefix: &'static str,
    /// First line of a V2 markdown cell
    pub markdown_header: &'static str,
}

pub const DATABRICKS_TOKENS: SourceTokens = SourceTokens {
    header: "// Databricks notebook source",
    separator: "// COMMAND ----------",
    magic_prefix: "// MAGIC",
    markdown_header: "// MAGIC %md",
};

/// Guest language used when none is configured.
pub const DEFAULT_GUEST_LANGUAGE: &str = "scala";

/// Version of the paired-source encoding
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceVersion {
    /// Headerless encoding. Any block containing a magic line is markdown.
    #[serde(alias = "1", alias = "legacy")]
    V1,
    /// Header line plus `%md` markdown headers.
    #[default]
    #[serde(alias = "2")]
    V2,
}

impl SourceVersion {
    /// Whether files of this version start with the header line.
    pub fn has_header(self) -> bool {
        matches!(self, SourceVersion::V2)
    }

    /// Whether markdown cells are introduced by the `%md` header line.
    pub fn has_markdown_header(self) -> bool {
        matches!(self, SourceVersion::V2)
    }
}

impl fmt::Display for SourceVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceVersion::V1 => write!(f, "v1"),
            SourceVersion::V2 => write!(f, "v2"),
        }
    }
}

impl FromStr for SourceVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "v1" | "1" | "legacy" => Ok(SourceVersion::V1),
            "v2" | "2" => Ok(SourceVersion::V2),
            other => Err(format!("Unknown source version '{other}'. Expected: v1, v2")),
        }
    }
}

/// Everything the converter needs to know about one document's encoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDialect {
    pub version: SourceVersion,
    /// Language of every code cell in the document
    pub guest_language: String,
    pub tokens: SourceTokens,
}

impl SourceDialect {
    pub fn new(version: SourceVersion, guest_language: impl Into<String>) -> Self {
        SourceDialect {
            version,
            guest_language: guest_language.into(),
            tokens: DATABRICKS_TOKENS,
        }
    }

    pub fn v1() -> Self {
        Self::new(SourceVersion::V1, DEFAULT_GUEST_LANGUAGE)
    }

    pub fn v2() -> Self {
        Self::new(SourceVersion::V2, DEFAULT_GUEST_LANGUAGE)
    }

    pub fn with_guest_language(mut self, language: impl Into<String>) -> Self {
        self.guest_language = language.into();
        self
    }
}

impl Default for SourceDialect {
    fn default() -> Self {
        Self::v2()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markdown_header_extends_magic_prefix() {
        let tokens = DATABRICKS_TOKENS;
        assert!(tokens.markdown_header.starts_with(tokens.magic_prefix));
    }

    #[test]
    fn version_parses_aliases() {
        assert_eq!("legacy".parse::<SourceVersion>(), Ok(SourceVersion::V1));
        assert_eq!(" V2 ".parse::<SourceVersion>(), Ok(SourceVersion::V2));
        assert!("v3".parse::<SourceVersion>().is_err());
    }

    #[test]
    fn deserialized_version_accepts_the_same_aliases() {
        for (raw, expected) in [
            ("\"v1\"", SourceVersion::V1),
            ("\"1\"", SourceVersion::V1),
            ("\"legacy\"", SourceVersion::V1),
            ("\"v2\"", SourceVersion::V2),
            ("\"2\"", SourceVersion::V2),
        ] {
            let version: SourceVersion = serde_json::from_str(raw).unwrap();
            assert_eq!(version, expected, "{raw}");
        }
        assert_eq!(serde_json::to_string(&SourceVersion::V1).unwrap(), "\"v1\"");
    }

    #[test]
    fn default_dialect_is_v2_scala() {
        let dialect = SourceDialect::default();
        assert_eq!(dialect.version, SourceVersion::V2);
        assert_eq!(dialect.guest_language, "scala");
        assert!(dialect.version.has_header());
    }

    #[test]
    fn guest_language_can_be_replaced() {
        let dialect = SourceDialect::v1().with_guest_language("python");
        assert_eq!(dialect.version, SourceVersion::V1);
        assert_eq!(dialect.guest_language, "python");
    }
}
