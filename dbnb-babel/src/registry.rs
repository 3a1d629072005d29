//! Format registry for format discovery and selection
//!
//! This module provides a centralized registry for all available formats.
//! Formats can be registered and retrieved by name.

use crate::error::FormatError;
use crate::format::Format;
use crate::formats::databricks::dialect::DEFAULT_GUEST_LANGUAGE;
use crate::formats::{JsonFormat, SourceDialect, SourceFormat, SourceVersion};
use crate::notebook::Notebook;
use std::collections::HashMap;

/// Knobs applied when building the default set of formats
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryOptions {
    /// Source version that owns the `.scala` extension
    pub version: SourceVersion,
    /// Guest language of code cells read from paired-source files
    pub guest_language: String,
    /// Whether the JSON format pretty-prints
    pub json_pretty: bool,
}

impl Default for RegistryOptions {
    fn default() -> Self {
        RegistryOptions {
            version: SourceVersion::V2,
            guest_language: DEFAULT_GUEST_LANGUAGE.to_string(),
            json_pretty: true,
        }
    }
}

/// Registry of notebook formats
///
/// # Examples
///
/// ```ignore
/// let registry = FormatRegistry::default();
/// let notebook = registry.parse(source, "databricks")?;
/// let json = registry.serialize(&notebook, "json")?;
/// ```
pub struct FormatRegistry {
    formats: HashMap<String, Box<dyn Format>>,
}

impl FormatRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        FormatRegistry {
            formats: HashMap::new(),
        }
    }

    /// Register a format
    ///
    /// If a format with the same name already exists, it will be replaced.
    pub fn register<F: Format + 'static>(&mut self, format: F) {
        self.formats
            .insert(format.name().to_string(), Box::new(format));
    }

    /// Get a format by name
    pub fn get(&self, name: &str) -> Result<&dyn Format, FormatError> {
        self.formats
            .get(name)
            .map(|f| f.as_ref())
            .ok_or_else(|| FormatError::FormatNotFound(name.to_string()))
    }

    /// Check if a format exists
    pub fn has(&self, name: &str) -> bool {
        self.formats.contains_key(name)
    }

    /// List all available format names (sorted)
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formats.keys().cloned().collect();
        names.sort();
        names
    }

    /// Detect format from filename based on file extension
    ///
    /// Returns the format name if a matching extension is found, or None otherwise.
    pub fn detect_format_from_filename(&self, filename: &str) -> Option<String> {
        let extension = std::path::Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())?;

        self.formats
            .values()
            .find(|format| format.file_extensions().contains(&extension))
            .map(|format| format.name().to_string())
    }

    /// Parse source text using the specified format
    pub fn parse(&self, source: &str, format: &str) -> Result<Notebook, FormatError> {
        let fmt = self.parsing_format(format)?;
        fmt.parse(source)
    }

    /// Parse a host byte buffer using the specified format
    pub fn parse_bytes(&self, bytes: &[u8], format: &str) -> Result<Notebook, FormatError> {
        let fmt = self.parsing_format(format)?;
        fmt.parse_bytes(bytes)
    }

    fn parsing_format(&self, format: &str) -> Result<&dyn Format, FormatError> {
        let fmt = self.get(format)?;
        if !fmt.supports_parsing() {
            return Err(FormatError::NotSupported(format!(
                "Format '{format}' does not support parsing"
            )));
        }
        Ok(fmt)
    }

    /// Serialize a notebook using the specified format
    pub fn serialize(&self, notebook: &Notebook, format: &str) -> Result<String, FormatError> {
        self.serialize_with_options(notebook, format, &HashMap::new())
    }

    /// Serialize a notebook using the specified format and options
    pub fn serialize_with_options(
        &self,
        notebook: &Notebook,
        format: &str,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        let fmt = self.get(format)?;
        if !fmt.supports_serialization() {
            return Err(FormatError::NotSupported(format!(
                "Format '{format}' does not support serialization"
            )));
        }
        fmt.serialize_with_options(notebook, options)
    }

    /// Create a registry with default formats
    pub fn with_defaults() -> Self {
        Self::with_options(&RegistryOptions::default())
    }

    /// Create a registry with both source versions and JSON.
    ///
    /// Only the source version named by `options.version` claims the `.scala` extension.
    pub fn with_options(options: &RegistryOptions) -> Self {
        let mut registry = Self::new();

        for version in [SourceVersion::V1, SourceVersion::V2] {
            let dialect = SourceDialect::new(version, options.guest_language.as_str());
            if version == options.version {
                registry.register(SourceFormat::new(dialect));
            } else {
                registry.register(SourceFormat::named_only(dialect));
            }
        }
        registry.register(JsonFormat::new(options.json_pretty));

        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
